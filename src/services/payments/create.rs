use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::PaymentService;
use crate::models::payments::requests::CreatePaymentRequest;
use crate::models::payments::responses::PaymentResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};
use crate::utils::validate::{validate_non_negative_amount, validate_positive_amount};

pub async fn create_payment(
    service: &PaymentService,
    payment: CreatePaymentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let checks = validate_positive_amount(payment.amount, "amount").and_then(|_| {
        payment
            .amount_paid
            .map_or(Ok(()), |paid| validate_non_negative_amount(paid, "amount_paid"))
    });
    if let Err(msg) = checks {
        return Ok(bad_request(ErrorCode::PaymentInvalid, msg));
    }
    if payment.amount_paid.is_some_and(|paid| paid > payment.amount) {
        return Ok(bad_request(
            ErrorCode::PaymentInvalid,
            "amount_paid cannot exceed amount",
        ));
    }

    let storage = service.get_storage(request)?;

    match storage.get_student_by_id(payment.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(error_response(e)),
    }

    match storage.create_payment(payment).await {
        Ok(payment) => {
            info!(
                "Created payment {} of {} for student {}",
                payment.id, payment.amount, payment.student_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                PaymentResponse { payment },
                "Payment created successfully",
            )))
        }
        Err(e) => Ok(error_response_with(ErrorCode::PaymentInvalid, e)),
    }
}
