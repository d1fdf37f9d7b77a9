use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::notifications::requests::{
    CreateTemplateRequest, TemplateListQuery, UpdateTemplateRequest,
};
use crate::models::notifications::responses::TemplateResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};

const NOT_FOUND: &str = "Template not found";

fn check_text(name: Option<&str>, body: Option<&str>) -> Option<&'static str> {
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Some("Template name cannot be empty");
    }
    if body.is_some_and(|b| b.trim().is_empty()) {
        return Some("Template body cannot be empty");
    }
    None
}

pub async fn list_templates(
    service: &NotificationService,
    query: TemplateListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_templates(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Templates retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

/// Names are unique; a duplicate is a conflict.
pub async fn create_template(
    service: &NotificationService,
    body: CreateTemplateRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(msg) = check_text(Some(&body.name), Some(&body.body)) {
        return Ok(bad_request(ErrorCode::TemplateInvalid, msg));
    }
    let storage = service.get_storage(request)?;

    match storage.create_template(body).await {
        Ok(template) => Ok(HttpResponse::Created().json(ApiResponse::success(
            TemplateResponse { template },
            "Template created successfully",
        ))),
        Err(e) => Ok(error_response_with(ErrorCode::TemplateInvalid, e)),
    }
}

pub async fn get_template(
    service: &NotificationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_template_by_id(id).await {
        Ok(Some(template)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TemplateResponse { template },
            "Template retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::TemplateNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn update_template(
    service: &NotificationService,
    id: i64,
    body: UpdateTemplateRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(msg) = check_text(body.name.as_deref(), body.body.as_deref()) {
        return Ok(bad_request(ErrorCode::TemplateInvalid, msg));
    }
    let storage = service.get_storage(request)?;

    match storage.update_template(id, body).await {
        Ok(Some(template)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TemplateResponse { template },
            "Template updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::TemplateNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response_with(ErrorCode::TemplateInvalid, e)),
    }
}

pub async fn delete_template(
    service: &NotificationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_template(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Template deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::TemplateNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::check_text;
    use crate::models::notifications::requests::CreateTemplateRequest;
    use crate::services::NotificationService;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{http::StatusCode, test::TestRequest};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_check_text() {
        assert!(check_text(Some(" "), None).is_some());
        assert!(check_text(None, Some("")).is_some());
        assert!(check_text(Some("welcome"), None).is_none());
    }

    #[actix_web::test]
    async fn test_duplicate_template_name() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = NotificationService::with_storage(storage);
        let req = TestRequest::default().to_http_request();

        // seeded by the migrations
        let body: CreateTemplateRequest = serde_json::from_value(json!({
            "name": "payment_reminder_sms",
            "notification_type": "payment_reminder",
            "channel": "sms",
            "body": "Reminder {amount}",
        }))
        .unwrap();
        let resp = service.create_template(body, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
