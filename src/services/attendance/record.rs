use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::middlewares::RequireJWT;
use crate::models::attendance::requests::{
    AttendanceListQuery, CourseDateQuery, RecordAttendanceRequest, UpdateAttendanceRequest,
};
use crate::models::attendance::responses::{AttendanceResponse, CourseDateAttendanceResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};

pub async fn list_attendance(
    service: &AttendanceService,
    query: AttendanceListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_attendance_with_pagination(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Attendance list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

/// The caller is recorded as `recorded_by`.
pub async fn record_attendance(
    service: &AttendanceService,
    body: RecordAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let (Some(check_in), Some(check_out)) = (body.check_in_time, body.check_out_time)
        && check_out < check_in
    {
        return Ok(bad_request(
            ErrorCode::AttendanceInvalid,
            "check_out_time cannot be before check_in_time",
        ));
    }

    let storage = service.get_storage(request)?;
    let input = body.into_input(RequireJWT::extract_user_id(request));

    match storage.create_attendance(input).await {
        Ok(attendance) => Ok(HttpResponse::Created().json(ApiResponse::success(
            AttendanceResponse { attendance },
            "Attendance recorded successfully",
        ))),
        Err(e) => Ok(error_response_with(ErrorCode::AttendanceInvalid, e)),
    }
}

pub async fn get_attendance(
    service: &AttendanceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_attendance_by_id(id).await {
        Ok(Some(attendance)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceResponse { attendance },
            "Attendance retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::AttendanceNotFound, "Attendance record not found")),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn update_attendance(
    service: &AttendanceService,
    id: i64,
    update: UpdateAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.update_attendance(id, update).await {
        Ok(Some(attendance)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceResponse { attendance },
            "Attendance updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::AttendanceNotFound, "Attendance record not found")),
        Err(e) => Ok(error_response_with(ErrorCode::AttendanceInvalid, e)),
    }
}

pub async fn delete_attendance(
    service: &AttendanceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_attendance(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Attendance deleted successfully"))),
        Ok(false) => Ok(not_found(ErrorCode::AttendanceNotFound, "Attendance record not found")),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn by_course_date(
    service: &AttendanceService,
    query: CourseDateQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let (Some(course_id), Some(date)) = (query.course_id, query.date) else {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Both course_id and date are required",
        ));
    };

    let storage = service.get_storage(request)?;

    match storage.list_attendance_by_course_date(course_id, date).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseDateAttendanceResponse { items },
            "Attendance retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
