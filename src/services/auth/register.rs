use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::models::{
    ApiResponse, ErrorCode,
    auth::requests::RegisterRequest,
    users::{
        entities::UserRole, requests::CreateUserRequest, responses::UserResponse,
    },
};
use crate::services::{bad_request, error_response, error_response_with};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_email, validate_password_simple, validate_phone, validate_username,
};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_username(&register_request.username) {
        return Ok(bad_request(ErrorCode::UserNameInvalid, msg));
    }
    if let Err(msg) = validate_email(&register_request.email) {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }
    if let Some(phone) = register_request.phone.as_deref()
        && let Err(msg) = validate_phone(phone)
    {
        return Ok(bad_request(ErrorCode::BadRequest, msg));
    }
    if register_request.password != register_request.password_confirm {
        return Ok(bad_request(
            ErrorCode::PasswordMismatch,
            "Password confirmation does not match",
        ));
    }
    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
    }

    let user_type = register_request.user_type.unwrap_or(UserRole::Staff);
    if user_type.is_privileged() {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::UserRoleForbidden,
            "This account type cannot be self-registered",
        )));
    }

    let storage = service.get_storage(request)?;

    if let Err(response) = check_unique(&storage, &register_request).await {
        return Ok(response);
    }

    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(error_response_with(ErrorCode::RegisterFailed, e)),
    };

    let create_request = CreateUserRequest {
        username: register_request.username,
        email: register_request.email,
        password: password_hash,
        user_type,
        full_name: Some(register_request.full_name),
        phone: register_request.phone,
        instructor_id: None,
        member_id: None,
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            info!("Registered account {} ({})", user.username, user.user_type);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse { user },
                "Registration successful",
            )))
        }
        Err(e) => Ok(error_response_with(ErrorCode::RegisterFailed, e)),
    }
}

async fn check_unique(
    storage: &Arc<dyn Storage>,
    register_request: &RegisterRequest,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(&register_request.username).await {
        Ok(Some(_)) => {
            return Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserNameAlreadyExists,
                "Username already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => return Err(error_response(e)),
    }
    match storage.get_user_by_email(&register_request.email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(error_response(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{http::StatusCode, test::TestRequest};

    fn registration(user_type: Option<UserRole>, confirm: &str) -> RegisterRequest {
        RegisterRequest {
            username: "instructor_amina".into(),
            email: "amina@coop.ma".into(),
            password: "Amina2025x".into(),
            password_confirm: confirm.into(),
            full_name: "Amina Idrissi".into(),
            phone: None,
            user_type,
        }
    }

    #[actix_web::test]
    async fn test_register_rules() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = AuthService::with_storage(storage.clone());
        let req = TestRequest::default().to_http_request();

        let resp = service
            .register(registration(None, "Mismatch2025"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = service
            .register(registration(Some(UserRole::Admin), "Amina2025x"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = service
            .register(registration(None, "Amina2025x"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let user = storage
            .get_user_by_username("instructor_amina")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.user_type, UserRole::Staff);

        let resp = service
            .register(registration(None, "Amina2025x"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
