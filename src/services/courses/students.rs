use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::courses::requests::EnrollStudentRequest;
use crate::models::courses::responses::CourseStudentsResponse;
use crate::models::enrollments::requests::CreateEnrollmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::enrollments::create::enroll;
use crate::services::{error_response, not_found};

/// Students holding an active enrollment in the course.
pub async fn list_course_students(
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

    match storage.list_course_students(id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseStudentsResponse { items },
            "Course students retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn enroll_student(
    service: &CourseService,
    id: i64,
    body: EnrollStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let enrollment = CreateEnrollmentRequest {
        student_id: body.student_id,
        course_id: id,
        enrollment_date: body.enrollment_date,
        status: None,
        notes: None,
    };
    Ok(enroll(&storage, enrollment).await)
}
