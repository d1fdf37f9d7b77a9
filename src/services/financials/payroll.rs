use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::FinancialService;
use crate::errors::CoopError;
use crate::models::financials::entities::InstructorPaymentStatus;
use crate::models::financials::requests::{
    InstructorPaymentListQuery, PayInstructorRequest, PaymentDetails,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, error_response_with, not_found};

pub async fn list_instructor_payments(
    service: &FinancialService,
    query: InstructorPaymentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_instructor_payments(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Instructor payments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

/// Approve, pay or cancel. Settlement details only apply to `paid`.
pub async fn transition(
    service: &FinancialService,
    id: i64,
    next: InstructorPaymentStatus,
    pay: Option<PayInstructorRequest>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let details = pay
        .map(|p| PaymentDetails {
            payment_date: p.payment_date,
            payment_method: Some(p.payment_method),
            payment_reference: p.payment_reference,
        })
        .unwrap_or_default();

    match storage.transition_instructor_payment(id, next, details).await {
        Ok(Some(payment)) => {
            info!(
                "Instructor payment {} for {} is now {}",
                payment.id, payment.period_month, payment.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                payment,
                format!("Instructor payment marked {next}"),
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::InstructorPaymentNotFound,
            "Instructor payment not found",
        )),
        Err(e @ CoopError::Conflict(_)) => {
            Ok(error_response_with(ErrorCode::StatusTransitionInvalid, e))
        }
        Err(e) => Ok(error_response(e)),
    }
}
