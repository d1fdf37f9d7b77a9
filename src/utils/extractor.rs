//! Path extractors that reject malformed parameters with the standard
//! JSON error envelope instead of actix's plain-text 404.

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError,
};
use futures_util::future::{Ready, ready};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ApiResponse, ErrorCode};

static SETTING_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_.]{0,63}$").expect("Invalid setting key regex"));

fn bad_request(message: String) -> actix_web::Error {
    let response =
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

fn parse_positive_id(raw: Option<&str>, name: &str) -> Result<i64, actix_web::Error> {
    let raw = raw.ok_or_else(|| bad_request(format!("Missing path parameter '{name}'")))?;
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(bad_request(format!("Invalid {name}: '{raw}'"))),
    }
}

/// Generates an extractor for a positive `i64` path segment.
macro_rules! define_safe_i64_extractor {
    ($(#[$meta:meta])* $name:ident, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_positive_id(req.match_info().get($param), $param).map($name))
            }
        }
    };
}

define_safe_i64_extractor!(
    /// `{id}` segment
    SafeIDI64,
    "id"
);

define_safe_i64_extractor!(
    /// `{instructor_id}` segment of the course assignment routes
    SafeInstructorId,
    "instructor_id"
);

/// `{key}` segment of the settings API.
#[derive(Debug, Clone)]
pub struct SafeSettingKey(pub String);

impl FromRequest for SafeSettingKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.match_info().get("key") {
            Some(key) if SETTING_KEY_RE.is_match(key) => Ok(SafeSettingKey(key.to_string())),
            Some(key) => Err(bad_request(format!("Invalid setting key: '{key}'"))),
            None => Err(bad_request("Missing path parameter 'key'".to_string())),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_id_must_be_positive_integer() {
        let req = TestRequest::default().param("id", "17").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 17);

        for bad in ["0", "-3", "abc", "1.5"] {
            let req = TestRequest::default().param("id", bad).to_http_request();
            assert!(SafeIDI64::extract(&req).await.is_err(), "{bad} accepted");
        }
    }

    #[actix_web::test]
    async fn test_setting_key_format() {
        let req = TestRequest::default()
            .param("key", "finance.default_tax_rate")
            .to_http_request();
        assert_eq!(
            SafeSettingKey::extract(&req).await.unwrap().0,
            "finance.default_tax_rate"
        );

        let req = TestRequest::default()
            .param("key", "../etc/passwd")
            .to_http_request();
        assert!(SafeSettingKey::extract(&req).await.is_err());
    }
}
