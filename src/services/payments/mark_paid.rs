use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::PaymentService;
use crate::errors::CoopError;
use crate::models::payments::requests::MarkPaidRequest;
use crate::models::payments::responses::PaymentResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response_with, not_found};

/// Adds a settlement to the payment and issues a receipt number.
pub async fn mark_paid(
    service: &PaymentService,
    id: i64,
    body: MarkPaidRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.mark_payment_paid(id, body).await {
        Ok(Some(payment)) => {
            info!(
                "Payment {} settled: {} of {} ({})",
                payment.id, payment.amount_paid, payment.amount, payment.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                PaymentResponse { payment },
                "Payment recorded successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::PaymentNotFound, "Payment not found")),
        Err(e @ CoopError::Conflict(_)) => {
            Ok(error_response_with(ErrorCode::PaymentStateInvalid, e))
        }
        Err(e) => Ok(error_response_with(ErrorCode::PaymentInvalid, e)),
    }
}

#[cfg(test)]
mod tests {
    use crate::models::payments::entities::PaymentStatus;
    use crate::models::payments::requests::{
        CreatePaymentRequest, MarkPaidRequest, UpdatePaymentRequest,
    };
    use crate::models::students::requests::CreateStudentRequest;
    use crate::services::PaymentService;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{http::StatusCode, test::TestRequest};
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_partial_then_full_settlement() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = PaymentService::with_storage(storage.clone());
        let req = TestRequest::default().to_http_request();

        let student: CreateStudentRequest = serde_json::from_value(json!({
            "full_name": "Omar Idrissi",
            "parent_name": "Laila Idrissi",
            "parent_phone": "+212600000003",
        }))
        .unwrap();
        let student_id = storage.create_student(student).await.unwrap().id;

        let payment: CreatePaymentRequest = serde_json::from_value(json!({
            "student_id": student_id,
            "amount": "500",
            "due_date": "2025-02-01",
        }))
        .unwrap();
        let id = storage.create_payment(payment).await.unwrap().id;

        let partial = MarkPaidRequest {
            amount: Some(Decimal::from(200)),
            ..Default::default()
        };
        let resp = service.mark_paid(id, partial, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let stored = storage.get_payment_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::PartiallyPaid);
        assert!(stored.receipt_number.is_some());

        let resp = service
            .mark_paid(id, MarkPaidRequest::default(), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let stored = storage.get_payment_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Paid);
        assert_eq!(stored.balance, Decimal::ZERO);

        let cancel = UpdatePaymentRequest {
            status: Some(PaymentStatus::Cancelled),
            ..Default::default()
        };
        service.update_payment(id, cancel, &req).await.unwrap();
        let resp = service
            .mark_paid(id, MarkPaidRequest::default(), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = service
            .mark_paid(id + 1, MarkPaidRequest::default(), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
