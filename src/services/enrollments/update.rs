use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_decimal::Decimal;

use super::EnrollmentService;
use crate::errors::CoopError;
use crate::models::enrollments::requests::UpdateEnrollmentRequest;
use crate::models::enrollments::responses::EnrollmentResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};

pub async fn update_enrollment(
    service: &EnrollmentService,
    id: i64,
    update: UpdateEnrollmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if update
        .final_grade
        .is_some_and(|g| g < Decimal::ZERO || g > Decimal::ONE_HUNDRED)
    {
        return Ok(bad_request(
            ErrorCode::EnrollmentInvalid,
            "final_grade must be between 0 and 100",
        ));
    }

    let storage = service.get_storage(request)?;

    match storage.update_enrollment(id, update).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found")),
        Err(e @ CoopError::CapacityExceeded(_)) => {
            return Ok(error_response_with(ErrorCode::CourseFull, e));
        }
        Err(e) => return Ok(error_response_with(ErrorCode::EnrollmentInvalid, e)),
    }

    match storage.get_enrollment_detail(id).await {
        Ok(Some(enrollment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EnrollmentResponse { enrollment },
            "Enrollment updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found")),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn delete_enrollment(
    service: &EnrollmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_enrollment(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Enrollment deleted successfully"))),
        Ok(false) => Ok(not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found")),
        Err(e) => Ok(error_response(e)),
    }
}
