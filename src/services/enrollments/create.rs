use actix_web::HttpResponse;
use std::sync::Arc;
use tracing::info;

use crate::errors::CoopError;
use crate::models::enrollments::requests::CreateEnrollmentRequest;
use crate::models::enrollments::responses::EnrollmentResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, error_response_with, not_found};
use crate::storage::Storage;

/// Shared by `POST /enrollments` and `POST /courses/{id}/enroll`.
pub(crate) async fn enroll(
    storage: &Arc<dyn Storage>,
    enrollment: CreateEnrollmentRequest,
) -> HttpResponse {
    match storage.get_student_by_id(enrollment.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found(ErrorCode::StudentNotFound, "Student not found"),
        Err(e) => return error_response(e),
    }
    match storage.get_course_by_id(enrollment.course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found(ErrorCode::CourseNotFound, "Course not found"),
        Err(e) => return error_response(e),
    }

    let created = match storage.create_enrollment(enrollment).await {
        Ok(created) => created,
        Err(e @ CoopError::CapacityExceeded(_)) => {
            return error_response_with(ErrorCode::CourseFull, e);
        }
        Err(e @ CoopError::Conflict(_)) => {
            return error_response_with(ErrorCode::EnrollmentDuplicate, e);
        }
        Err(e) => return error_response_with(ErrorCode::EnrollmentInvalid, e),
    };
    info!(
        "Student {} enrolled in course {}",
        created.student_id, created.course_id
    );

    match storage.get_enrollment_detail(created.id).await {
        Ok(Some(enrollment)) => HttpResponse::Created().json(ApiResponse::success(
            EnrollmentResponse { enrollment },
            "Student enrolled successfully",
        )),
        Ok(None) => not_found(ErrorCode::EnrollmentNotFound, "Enrollment not found"),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::http::StatusCode;

    async fn student(storage: &Arc<dyn Storage>, name: &str) -> i64 {
        let req: CreateStudentRequest = serde_json::from_value(serde_json::json!({
            "full_name": name,
            "parent_name": "Parent",
            "parent_phone": "+212600000001",
        }))
        .unwrap();
        storage.create_student(req).await.unwrap().id
    }

    #[actix_web::test]
    async fn test_enroll_maps_capacity_and_duplicates() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let course: CreateCourseRequest = serde_json::from_value(serde_json::json!({
            "course_name": "French A1",
            "course_type": "language",
            "subject": "French",
            "fee_per_month": "250",
            "max_students": 1,
            "start_date": "2025-01-01",
            "end_date": "2025-06-30",
        }))
        .unwrap();
        let course_id = storage.create_course(course).await.unwrap().id;
        let first = student(&storage, "Amina").await;
        let second = student(&storage, "Omar").await;

        let req = |student_id| CreateEnrollmentRequest {
            student_id,
            course_id,
            enrollment_date: None,
            status: None,
            notes: None,
        };

        assert_eq!(enroll(&storage, req(first)).await.status(), StatusCode::CREATED);
        assert_eq!(enroll(&storage, req(first)).await.status(), StatusCode::CONFLICT);
        assert_eq!(enroll(&storage, req(second)).await.status(), StatusCode::CONFLICT);
        assert_eq!(enroll(&storage, req(999)).await.status(), StatusCode::NOT_FOUND);
    }
}
