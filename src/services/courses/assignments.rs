use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_decimal::Decimal;

use super::CourseService;
use crate::models::courses::requests::{AssignInstructorRequest, UpdateAssignmentRequest};
use crate::models::courses::responses::CourseInstructorsResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};

fn check_hours(hours: Option<Decimal>) -> Result<(), HttpResponse> {
    if hours.is_some_and(|h| h.is_sign_negative()) {
        return Err(bad_request(
            ErrorCode::CourseInvalid,
            "hours_taught cannot be negative",
        ));
    }
    Ok(())
}

pub async fn list_course_instructors(
    service: &CourseService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_course_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => return Ok(error_response(e)),
    }

    match storage.list_course_instructors(id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseInstructorsResponse { items },
            "Course instructors retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

/// One assignment per (course, instructor); a second one is a conflict.
pub async fn assign_instructor(
    service: &CourseService,
    id: i64,
    body: AssignInstructorRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = check_hours(body.hours_taught) {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;

    match storage.get_course_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => return Ok(error_response(e)),
    }
    match storage.get_instructor_by_id(body.instructor_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::InstructorNotFound, "Instructor not found")),
        Err(e) => return Ok(error_response(e)),
    }

    match storage.assign_instructor(id, body).await {
        Ok(assignment) => Ok(HttpResponse::Created().json(ApiResponse::success(
            assignment,
            "Instructor assigned successfully",
        ))),
        Err(e) => Ok(error_response_with(ErrorCode::CourseInvalid, e)),
    }
}

pub async fn update_assignment(
    service: &CourseService,
    id: i64,
    instructor_id: i64,
    body: UpdateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = check_hours(body.hours_taught) {
        return Ok(resp);
    }

    let storage = service.get_storage(request)?;

    match storage.update_assignment(id, instructor_id, body).await {
        Ok(Some(assignment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment updated successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::CourseInstructorNotFound,
            "Instructor is not assigned to this course",
        )),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn remove_assignment(
    service: &CourseService,
    id: i64,
    instructor_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.remove_assignment(id, instructor_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Instructor removed from course"))),
        Ok(false) => Ok(not_found(
            ErrorCode::CourseInstructorNotFound,
            "Instructor is not assigned to this course",
        )),
        Err(e) => Ok(error_response(e)),
    }
}
