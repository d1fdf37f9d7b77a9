use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode, PaginationQuery,
    attendance::requests::AttendanceListQuery,
    enrollments::requests::EnrollmentListQuery,
    payments::requests::PaymentListQuery,
    students::responses::StudentResponse,
};
use crate::services::{error_response, not_found};
use crate::storage::Storage;

pub async fn get_student(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_student_by_id(id).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentResponse { student },
            "Student retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(error_response(e)),
    }
}

/// 404 response when the student does not exist.
async fn require_student(storage: &Arc<dyn Storage>, id: i64) -> Result<(), HttpResponse> {
    match storage.get_student_by_id(id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Err(error_response(e)),
    }
}

fn first_page(request: &HttpRequest) -> PaginationQuery {
    actix_web::web::Query::<PaginationQuery>::from_query(request.query_string())
        .map(|q| q.into_inner())
        .unwrap_or_default()
}

pub async fn list_student_enrollments(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(resp) = require_student(&storage, id).await {
        return Ok(resp);
    }
    let page = first_page(request);

    let query = EnrollmentListQuery {
        page: Some(page.page),
        size: Some(page.size),
        student_id: Some(id),
        ..Default::default()
    };
    match storage.list_enrollments_with_pagination(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Student enrollments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn list_student_payments(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(resp) = require_student(&storage, id).await {
        return Ok(resp);
    }
    let page = first_page(request);

    let query = PaymentListQuery {
        page: Some(page.page),
        size: Some(page.size),
        student_id: Some(id),
        ..Default::default()
    };
    match storage.list_payments_with_pagination(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Student payments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn list_student_attendance(
    service: &StudentService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Err(resp) = require_student(&storage, id).await {
        return Ok(resp);
    }
    let page = first_page(request);

    let query = AttendanceListQuery {
        page: Some(page.page),
        size: Some(page.size),
        student_id: Some(id),
        ..Default::default()
    };
    match storage.list_attendance_with_pagination(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Student attendance retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
