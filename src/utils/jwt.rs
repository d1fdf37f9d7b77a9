use crate::config::AppConfig;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const ACCESS: &str = "access";
const REFRESH: &str = "refresh";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// `user_type` at issue time
    pub role: String,
    /// "access" or "refresh"
    pub token_type: String,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct JwtUtils;

impl JwtUtils {
    fn get_secret() -> &'static str {
        &AppConfig::get().jwt.secret
    }

    /// `token_expiry` overrides the configured lifetime ("remember me").
    pub fn generate_refresh_token(
        user_id: i64,
        role: &str,
        token_expiry: Option<chrono::Duration>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let expiry = token_expiry.unwrap_or_else(|| {
            chrono::Duration::days(AppConfig::get().jwt.refresh_token_expiry)
        });
        Self::generate_token_with_expiry(user_id, role, REFRESH, expiry)
    }

    pub fn generate_token_with_expiry(
        user_id: i64,
        role: &str,
        token_type: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        encode_with_secret(
            user_id,
            role,
            token_type,
            expiry_duration,
            Self::get_secret(),
        )
    }

    /// Lifetimes come from the runtime settings, see `DynamicConfig`.
    pub fn generate_token_pair(
        user_id: i64,
        role: &str,
        access_token_expiry: chrono::Duration,
        refresh_token_expiry: chrono::Duration,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access_token: Self::generate_token_with_expiry(
                user_id,
                role,
                ACCESS,
                access_token_expiry,
            )?,
            refresh_token: Self::generate_refresh_token(user_id, role, Some(refresh_token_expiry))?,
        })
    }

    pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode_with_secret(token, Self::get_secret())
    }

    pub fn verify_token_type(
        token: &str,
        expected_type: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        check_type(Self::verify_token(token)?, expected_type)
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(token, ACCESS)
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::verify_token_type(token, REFRESH)
    }

    /// Issues a fresh access token from a valid refresh token.
    pub fn refresh_access_token(
        refresh_token: &str,
        access_token_expiry: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Self::verify_refresh_token(refresh_token)?;
        let user_id = claims
            .user_id()
            .ok_or(jsonwebtoken::errors::ErrorKind::InvalidToken)?;
        Self::generate_token_with_expiry(user_id, &claims.role, ACCESS, access_token_expiry)
    }

    pub fn create_refresh_token_cookie(refresh_token: &str, max_age_days: i64) -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build("refresh_token", refresh_token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::days(max_age_days))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// Expired cookie, sent on logout.
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build("refresh_token", "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie("refresh_token")
            .map(|cookie| cookie.value().to_string())
    }
}

fn encode_with_secret(
    user_id: i64,
    role: &str,
    token_type: &str,
    expiry: chrono::Duration,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        token_type: token_type.to_string(),
        exp: (now + expiry).timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn decode_with_secret(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

fn check_type(claims: Claims, expected: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    if claims.token_type != expected {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-with-enough-entropy";

    #[test]
    fn test_token_carries_user_and_role() {
        let token =
            encode_with_secret(42, "manager", ACCESS, chrono::Duration::minutes(5), SECRET)
                .unwrap();
        let claims = decode_with_secret(&token, SECRET).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, "manager");
        assert!(check_type(claims, ACCESS).is_ok());
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let token =
            encode_with_secret(1, "admin", REFRESH, chrono::Duration::days(1), SECRET).unwrap();
        let claims = decode_with_secret(&token, SECRET).unwrap();
        assert!(check_type(claims, ACCESS).is_err());
    }

    #[test]
    fn test_wrong_secret_and_expiry_are_rejected() {
        let token =
            encode_with_secret(1, "admin", ACCESS, chrono::Duration::minutes(5), SECRET).unwrap();
        assert!(decode_with_secret(&token, "another-secret").is_err());

        let expired =
            encode_with_secret(1, "admin", ACCESS, chrono::Duration::minutes(-10), SECRET)
                .unwrap();
        assert!(decode_with_secret(&expired, SECRET).is_err());
    }
}
