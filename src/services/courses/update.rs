use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use super::create::{CourseShape, validate_shape};
use crate::models::courses::requests::UpdateCourseRequest;
use crate::models::courses::responses::CourseResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};
use crate::utils::validate::validate_required;

pub async fn update_course(
    service: &CourseService,
    id: i64,
    update: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // date bounds are checked against the stored values the update keeps
    let current = match storage.get_course_by_id(id).await {
        Ok(Some(course)) => course,
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => return Ok(error_response(e)),
    };

    let shape = CourseShape {
        fee_per_month: update.fee_per_month,
        max_students: update.max_students,
        duration_months: update.duration_months,
        hours_per_session: update.hours_per_session,
        start_date: update.start_date.unwrap_or(current.start_date),
        end_date: update.end_date.unwrap_or(current.end_date),
    };
    let names = update
        .course_name
        .as_deref()
        .map_or(Ok(()), |n| validate_required(n, "course_name"))
        .and_then(|_| {
            update
                .subject
                .as_deref()
                .map_or(Ok(()), |s| validate_required(s, "subject"))
        });
    if let Err(msg) = names.and_then(|_| validate_shape(&shape)) {
        return Ok(bad_request(ErrorCode::CourseInvalid, msg));
    }

    match storage.update_course(id, update).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => return Ok(error_response_with(ErrorCode::CourseInvalid, e)),
    }

    match storage.get_course_detail(id).await {
        Ok(Some(course)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseResponse { course },
            "Course updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn delete_course(
    service: &CourseService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_course(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted successfully"))),
        Ok(false) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(error_response(e)),
    }
}
