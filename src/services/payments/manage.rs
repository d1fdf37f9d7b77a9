use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaymentService;
use crate::models::payments::requests::UpdatePaymentRequest;
use crate::models::payments::responses::PaymentResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};
use crate::utils::validate::validate_positive_amount;

pub async fn get_payment(
    service: &PaymentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_payment_by_id(id).await {
        Ok(Some(payment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PaymentResponse { payment },
            "Payment retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::PaymentNotFound, "Payment not found")),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn update_payment(
    service: &PaymentService,
    id: i64,
    update: UpdatePaymentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(amount) = update.amount
        && let Err(msg) = validate_positive_amount(amount, "amount")
    {
        return Ok(bad_request(ErrorCode::PaymentInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    match storage.update_payment(id, update).await {
        Ok(Some(payment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PaymentResponse { payment },
            "Payment updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::PaymentNotFound, "Payment not found")),
        Err(e) => Ok(error_response_with(ErrorCode::PaymentInvalid, e)),
    }
}

pub async fn delete_payment(
    service: &PaymentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_payment(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Payment deleted successfully"))),
        Ok(false) => Ok(not_found(ErrorCode::PaymentNotFound, "Payment not found")),
        Err(e) => Ok(error_response(e)),
    }
}
