use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::enrollments::responses::EnrollmentResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found};

/// Includes attendance rate and the payment balance.
pub async fn get_enrollment(
    service: &EnrollmentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_enrollment_detail(id).await {
        Ok(Some(enrollment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EnrollmentResponse { enrollment },
            "Enrollment retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found")),
        Err(e) => Ok(error_response(e)),
    }
}
