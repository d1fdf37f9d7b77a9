use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::finance::{Period, today};
use crate::models::attendance::requests::{AttendanceSummaryQuery, RecalculateSummariesRequest};
use crate::models::attendance::responses::RecalculateSummariesResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response};

pub async fn list_summaries(
    service: &AttendanceService,
    query: AttendanceSummaryQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_attendance_summaries(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Attendance summaries retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

/// Rebuilds monthly summaries from raw records, current month by default.
pub async fn recalculate(
    service: &AttendanceService,
    body: RecalculateSummariesRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let period = match body.month.as_deref() {
        Some(month) => match Period::parse(month) {
            Ok(period) => period,
            Err(e) => return Ok(bad_request(ErrorCode::AttendanceInvalid, e.message())),
        },
        None => Period::containing(today()),
    };

    let storage = service.get_storage(request)?;

    match storage
        .recalculate_attendance_summaries(period, body.student_id, body.course_id)
        .await
    {
        Ok(summaries) => {
            info!(
                "Recalculated {} attendance summaries for {}",
                summaries.len(),
                period
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                RecalculateSummariesResponse {
                    month: period.to_string(),
                    updated: summaries.len() as i64,
                    summaries,
                },
                "Attendance summaries recalculated",
            )))
        }
        Err(e) => Ok(error_response(e)),
    }
}
