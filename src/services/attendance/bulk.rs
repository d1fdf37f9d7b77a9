use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::AttendanceService;
use crate::middlewares::RequireJWT;
use crate::models::attendance::requests::{BulkAttendanceRequest, RecordAttendanceRequest};
use crate::models::attendance::responses::{BulkAttendanceResponse, BulkRecordError};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::bad_request;

/// Stores each record on its own; a record for an existing
/// (student, course, date) replaces it.
pub async fn bulk_record(
    service: &AttendanceService,
    body: BulkAttendanceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if body.records.is_empty() {
        return Ok(bad_request(
            ErrorCode::AttendanceInvalid,
            "records must not be empty",
        ));
    }

    let storage = service.get_storage(request)?;
    let recorded_by = RequireJWT::extract_user_id(request);

    let mut result = BulkAttendanceResponse {
        created: 0,
        failed: 0,
        records: Vec::with_capacity(body.records.len()),
        errors: Vec::new(),
    };

    for (index, raw) in body.records.into_iter().enumerate() {
        let record = match serde_json::from_value::<RecordAttendanceRequest>(raw) {
            Ok(record) => record,
            Err(e) => {
                result.failed += 1;
                result.errors.push(BulkRecordError {
                    index: index as i64,
                    message: e.to_string(),
                });
                continue;
            }
        };

        match storage.upsert_attendance(record.into_input(recorded_by)).await {
            Ok((attendance, inserted)) => {
                debug!(
                    "Bulk attendance #{}: {} record {}",
                    index,
                    if inserted { "created" } else { "updated" },
                    attendance.id
                );
                result.created += 1;
                result.records.push(attendance);
            }
            Err(e) => {
                result.failed += 1;
                result.errors.push(BulkRecordError {
                    index: index as i64,
                    message: e.message().to_string(),
                });
            }
        }
    }

    if result.created == 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::AttendanceInvalid,
            result,
            "No attendance record could be stored",
        )));
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        result,
        "Attendance recorded successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{http::StatusCode, test::TestRequest};
    use serde_json::json;
    use std::sync::Arc;

    async fn seed(storage: &Arc<dyn Storage>) -> (i64, i64) {
        let student: CreateStudentRequest = serde_json::from_value(json!({
            "full_name": "Amina Benali",
            "parent_name": "Karim Benali",
            "parent_phone": "+212600000001",
        }))
        .unwrap();
        let course: CreateCourseRequest = serde_json::from_value(json!({
            "course_name": "Maths 2BAC",
            "course_type": "academic",
            "subject": "Mathematics",
            "fee_per_month": "400",
            "start_date": "2025-01-01",
            "end_date": "2025-06-30",
        }))
        .unwrap();
        (
            storage.create_student(student).await.unwrap().id,
            storage.create_course(course).await.unwrap().id,
        )
    }

    #[actix_web::test]
    async fn test_bulk_stores_valid_records_and_reports_the_rest() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = AttendanceService::with_storage(storage.clone());
        let req = TestRequest::default().to_http_request();
        let (student_id, course_id) = seed(&storage).await;

        let empty = BulkAttendanceRequest { records: vec![] };
        let resp = service.bulk_record(empty, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let broken = BulkAttendanceRequest {
            records: vec![json!({"student_id": "x"})],
        };
        let resp = service.bulk_record(broken, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let mixed = BulkAttendanceRequest {
            records: vec![
                json!({"student_id": student_id, "course_id": course_id, "date": "2025-01-06", "status": "absent"}),
                json!({"student_id": student_id}),
                json!({"student_id": student_id, "course_id": course_id, "date": "2025-01-06", "status": "present"}),
            ],
        };
        let resp = service.bulk_record(mixed, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let stored = storage
            .list_attendance_by_course_date(course_id, date)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(
            stored[0].status,
            crate::models::attendance::entities::AttendanceStatus::Present
        );
    }
}
