use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use super::NotificationService;
use super::sender::{LogSender, NotificationSender, dispatch_due};
use crate::finance::today;
use crate::jobs::send_payment_reminders;
use crate::models::notifications::requests::RunRemindersRequest;
use crate::models::ApiResponse;
use crate::services::error_response;

/// Sender registered as app data, or the logging sender.
pub(crate) fn request_sender(request: &HttpRequest) -> Arc<dyn NotificationSender> {
    request
        .app_data::<web::Data<Arc<dyn NotificationSender>>>()
        .map(|data| data.get_ref().clone())
        .unwrap_or_else(|| Arc::new(LogSender))
}

pub async fn dispatch(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let sender = request_sender(request);

    match dispatch_due(&storage, sender.as_ref()).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            outcome,
            "Pending notifications dispatched",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

/// Same work as the daily reminder job, for the given date.
pub async fn run_reminders(
    service: &NotificationService,
    body: RunRemindersRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let sender = request_sender(request);
    let date = body.date.unwrap_or_else(today);

    match send_payment_reminders(&storage, sender.as_ref(), date).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            report,
            "Payment reminders processed",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
