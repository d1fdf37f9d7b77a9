use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
    users::entities::UserStatus,
};
use crate::services::error_response;
use crate::services::system::DynamicConfig;
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;

/// Failed attempts tolerated inside the window before the identifier is locked.
pub const MAX_FAILED_LOGINS: u64 = 5;
pub const LOCKOUT_WINDOW_SECS: i64 = 30 * 60;

fn auth_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let identifier = login_request.username.trim().to_string();
    let ip_address = request
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    let since = chrono::Utc::now().timestamp() - LOCKOUT_WINDOW_SECS;
    match storage.count_failed_logins_since(&identifier, since).await {
        Ok(failures) if failures >= MAX_FAILED_LOGINS => {
            warn!("Login locked for '{}' after {} failures", identifier, failures);
            return Ok(HttpResponse::TooManyRequests().json(ApiResponse::error_empty(
                ErrorCode::AccountLocked,
                "Too many failed login attempts, please try again later",
            )));
        }
        Ok(_) => {}
        Err(e) => return Ok(error_response(e)),
    }

    let user = match storage.get_user_by_username_or_email(&identifier).await {
        Ok(user) => user,
        Err(e) => return Ok(error_response(e)),
    };

    let Some(user) = user.filter(|u| verify_password(&login_request.password, &u.password_hash))
    else {
        if let Err(e) = storage
            .record_login_attempt(&identifier, ip_address, false)
            .await
        {
            error!("Failed to record login attempt: {}", e);
        }
        return Ok(auth_failed());
    };

    if user.status != UserStatus::Active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Account is not active",
        )));
    }

    if let Err(e) = storage
        .record_login_attempt(&identifier, ip_address, true)
        .await
    {
        error!("Failed to record login attempt: {}", e);
    }
    let _ = storage.update_last_login(user.id).await;

    let access_minutes = DynamicConfig::access_token_expiry().await;
    let refresh_days = if login_request.remember_me {
        DynamicConfig::refresh_token_remember_me_expiry().await
    } else {
        DynamicConfig::refresh_token_expiry().await
    };

    match user.generate_token_pair(
        chrono::Duration::minutes(access_minutes),
        chrono::Duration::days(refresh_days),
    ) {
        Ok(token_pair) => {
            info!("User {} logged in", user.username);

            let refresh_cookie =
                jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_days);
            let response = LoginResponse {
                access_token: token_pair.access_token,
                expires_in: access_minutes * 60,
                user,
                created_at: chrono::Utc::now(),
            };

            Ok(HttpResponse::Ok()
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use crate::utils::password::hash_password;
    use actix_web::{http::StatusCode, test::TestRequest};
    use std::sync::Arc;

    async fn service_with_user() -> AuthService {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        storage
            .create_user(CreateUserRequest {
                username: "secretary".into(),
                email: "secretary@coop.ma".into(),
                password: hash_password("Secretary123").unwrap(),
                user_type: UserRole::Staff,
                full_name: None,
                phone: None,
                instructor_id: None,
                member_id: None,
            })
            .await
            .unwrap();
        AuthService::with_storage(storage)
    }

    fn login(password: &str) -> LoginRequest {
        LoginRequest {
            username: "secretary".into(),
            password: password.into(),
            remember_me: false,
        }
    }

    #[actix_web::test]
    async fn test_login_success_sets_refresh_cookie() {
        let service = service_with_user().await;
        let req = TestRequest::default().to_http_request();

        let resp = service.login(login("Secretary123"), &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.cookies().any(|c| c.name() == "refresh_token"));
    }

    #[actix_web::test]
    async fn test_lockout_after_repeated_failures() {
        let service = service_with_user().await;
        let req = TestRequest::default().to_http_request();

        for _ in 0..MAX_FAILED_LOGINS {
            let resp = service.login(login("wrong-password"), &req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }
        // even the right password is refused while locked
        let resp = service.login(login("Secretary123"), &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
