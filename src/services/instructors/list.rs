use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InstructorService;
use crate::models::financials::requests::InstructorPaymentListQuery;
use crate::models::instructors::requests::InstructorListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found};

pub async fn list_instructors(
    service: &InstructorService,
    query: InstructorListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_instructors_with_pagination(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Instructor list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

/// Payroll history of one instructor, newest period first.
pub async fn list_instructor_payments(
    service: &InstructorService,
    id: i64,
    mut query: InstructorPaymentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_instructor_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::InstructorNotFound, "Instructor not found")),
        Err(e) => return Ok(error_response(e)),
    }

    query.instructor_id = Some(id);
    match storage.list_instructor_payments(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Instructor payments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
