use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::middlewares::RequireJWT;
use crate::models::auth::requests::{ChangePasswordRequest, UpdateProfileRequest};
use crate::models::users::requests::UpdateUserRequest;
use crate::models::users::responses::UserResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::{validate_email, validate_password_simple, validate_phone};

use super::AuthService;

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}

/// Name, phone and e-mail only; role and status stay with administrators.
pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(current_user) = RequireJWT::extract_user_claims(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request)?;

    if let Some(email) = update_data.email.as_deref() {
        if let Err(msg) = validate_email(email) {
            return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
        }
        match storage.get_user_by_email(email).await {
            Ok(Some(existing)) if existing.id != current_user.id => {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::UserEmailAlreadyExists,
                    "Email already exists",
                )));
            }
            Ok(_) => {}
            Err(e) => return Ok(error_response(e)),
        }
    }
    if let Some(phone) = update_data.phone.as_deref()
        && let Err(msg) = validate_phone(phone)
    {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }

    let update = UpdateUserRequest {
        email: update_data.email,
        full_name: update_data.full_name,
        phone: update_data.phone,
        ..Default::default()
    };

    match storage.update_user(current_user.id, update).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse { user },
            "Profile updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(error_response_with(ErrorCode::UserUpdateFailed, e)),
    }
}

pub async fn handle_change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(claims) = RequireJWT::extract_user_claims(request) else {
        return Ok(unauthorized());
    };
    let storage = service.get_storage(request)?;

    // the request extension may come from cache without the hash
    let user = match storage.get_user_by_id(claims.id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => return Ok(error_response(e)),
    };

    if !verify_password(&change_request.old_password, &user.password_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Current password is incorrect",
        )));
    }
    if let Err(msg) = validate_password_simple(&change_request.new_password) {
        return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
    }

    let password_hash = match hash_password(&change_request.new_password) {
        Ok(hash) => hash,
        Err(e) => return Ok(error_response(e)),
    };
    let update = UpdateUserRequest {
        password: Some(password_hash),
        ..Default::default()
    };

    match storage.update_user(user.id, update).await {
        Ok(Some(_)) => {
            info!("User {} changed their password", user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Password changed successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::UserNotFound, "User not found")),
        Err(e) => Ok(error_response_with(ErrorCode::UserUpdateFailed, e)),
    }
}
