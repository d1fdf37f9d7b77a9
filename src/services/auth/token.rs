use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::RequireJWT;
use crate::models::auth::responses::{
    RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::system::DynamicConfig;
use crate::utils::jwt;

use super::AuthService;

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}

pub async fn handle_refresh_token(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(unauthorized());
    };

    let access_minutes = DynamicConfig::access_token_expiry().await;
    match jwt::JwtUtils::refresh_access_token(
        &refresh_token,
        chrono::Duration::minutes(access_minutes),
    ) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: access_minutes * 60,
            },
            "Token refreshed successfully",
        ))),
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            // drop the stale cookie so the client stops retrying
            let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();
            Ok(HttpResponse::Unauthorized().cookie(empty_cookie).json(
                ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Login expired or invalid, please login again",
                ),
            ))
        }
    }
}

/// Reaching the handler means `RequireJWT` accepted the token.
pub async fn handle_verify_token(
    _service: &AuthService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid: true },
        "Token is valid",
    )))
}

pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user_claims(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "User information retrieved successfully",
        ))),
        None => Ok(unauthorized()),
    }
}
