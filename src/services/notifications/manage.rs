use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::config::AppConfig;
use crate::models::notifications::entities::NewNotification;
use crate::models::notifications::requests::{
    CreateNotificationRequest, MarkFailedRequest, NotificationListQuery,
    UpdateNotificationRequest,
};
use crate::models::notifications::responses::NotificationResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};

const NOT_FOUND: &str = "Notification not found";

pub async fn list_notifications(
    service: &NotificationService,
    query: NotificationListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_notifications(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Notifications retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn create_notification(
    service: &NotificationService,
    body: CreateNotificationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if body.message.trim().is_empty() {
        return Ok(bad_request(ErrorCode::NotificationInvalid, "Message is required"));
    }
    if body.recipient_contact.trim().is_empty() {
        return Ok(bad_request(
            ErrorCode::NotificationInvalid,
            "Recipient contact is required",
        ));
    }
    let storage = service.get_storage(request)?;

    let new = NewNotification {
        notification_type: body.notification_type,
        channel: body.channel,
        recipient_type: body.recipient_type,
        recipient_id: body.recipient_id,
        recipient_contact: body.recipient_contact,
        subject: body.subject,
        message: body.message,
        scheduled_time: body.scheduled_time,
        related_payment_id: body.related_payment_id,
        reminder_key: None,
    };

    match storage.create_notification(new).await {
        Ok(notification) => Ok(HttpResponse::Created().json(ApiResponse::success(
            NotificationResponse { notification },
            "Notification queued successfully",
        ))),
        Err(e) => Ok(error_response_with(ErrorCode::NotificationInvalid, e)),
    }
}

pub async fn get_notification(
    service: &NotificationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_notification_by_id(id).await {
        Ok(Some(notification)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NotificationResponse { notification },
            "Notification retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::NotificationNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn update_notification(
    service: &NotificationService,
    id: i64,
    body: UpdateNotificationRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.update_notification(id, body).await {
        Ok(Some(notification)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NotificationResponse { notification },
            "Notification updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::NotificationNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response_with(ErrorCode::NotificationInvalid, e)),
    }
}

pub async fn delete_notification(
    service: &NotificationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_notification(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Notification deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::NotificationNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn mark_sent(
    service: &NotificationService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.mark_notification_sent(id).await {
        Ok(Some(notification)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NotificationResponse { notification },
            "Notification marked as sent",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::NotificationNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(e)),
    }
}

/// Counts one failed attempt; the row stays pending until the attempt budget is spent.
pub async fn mark_failed(
    service: &NotificationService,
    id: i64,
    body: MarkFailedRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if body.error.trim().is_empty() {
        return Ok(bad_request(ErrorCode::NotificationInvalid, "Error message is required"));
    }
    let storage = service.get_storage(request)?;
    let max_attempts = AppConfig::get().reminders.max_delivery_attempts;

    match storage
        .mark_notification_failed(id, &body.error, max_attempts)
        .await
    {
        Ok(Some(notification)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NotificationResponse { notification },
            "Delivery failure recorded",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::NotificationNotFound, NOT_FOUND)),
        Err(e) => Ok(error_response(e)),
    }
}

#[cfg(test)]
mod tests {
    use crate::models::notifications::entities::NotificationStatus;
    use crate::models::notifications::requests::{CreateNotificationRequest, MarkFailedRequest};
    use crate::services::NotificationService;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{http::StatusCode, test::TestRequest};
    use serde_json::json;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_manual_delivery_marks() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = NotificationService::with_storage(storage.clone());
        let req = TestRequest::default().to_http_request();

        let body = |message: &str| -> CreateNotificationRequest {
            serde_json::from_value(json!({
                "notification_type": "general",
                "channel": "email",
                "recipient_type": "member",
                "recipient_id": 3,
                "recipient_contact": "member@example.com",
                "message": message,
            }))
            .unwrap()
        };
        let resp = service.create_notification(body(" "), &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = service
            .create_notification(body("General assembly on Friday"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let id = storage
            .list_notifications(Default::default())
            .await
            .unwrap()
            .items[0]
            .id;
        let failure = MarkFailedRequest {
            error: "mailbox full".into(),
        };
        let resp = service.mark_failed(id, failure, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let stored = storage.get_notification_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.delivery_attempts, 1);
        assert_eq!(stored.error_message.as_deref(), Some("mailbox full"));

        let resp = service.mark_sent(id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let stored = storage.get_notification_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, NotificationStatus::Sent);

        let resp = service.mark_sent(id + 1, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
