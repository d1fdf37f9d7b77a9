use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use super::CourseService;
use crate::models::courses::requests::CreateCourseRequest;
use crate::models::courses::responses::CourseResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with};
use crate::utils::validate::{validate_non_negative_amount, validate_required};

/// Numeric and calendar bounds of a course.
pub(super) struct CourseShape {
    pub fee_per_month: Option<Decimal>,
    pub max_students: Option<i32>,
    pub duration_months: Option<i32>,
    pub hours_per_session: Option<Decimal>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub(super) fn validate_shape(shape: &CourseShape) -> Result<(), String> {
    if let Some(fee) = shape.fee_per_month {
        validate_non_negative_amount(fee, "fee_per_month")?;
    }
    if shape.max_students.is_some_and(|n| n < 1) {
        return Err("max_students must be at least 1".to_string());
    }
    if shape.duration_months.is_some_and(|n| n < 1) {
        return Err("duration_months must be at least 1".to_string());
    }
    if shape
        .hours_per_session
        .is_some_and(|h| h < Decimal::new(5, 1))
    {
        return Err("hours_per_session must be at least 0.5".to_string());
    }
    if shape.end_date < shape.start_date {
        return Err("end_date cannot be before start_date".to_string());
    }
    Ok(())
}

pub async fn create_course(
    service: &CourseService,
    course: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let shape = CourseShape {
        fee_per_month: Some(course.fee_per_month),
        max_students: course.max_students,
        duration_months: course.duration_months,
        hours_per_session: course.hours_per_session,
        start_date: course.start_date,
        end_date: course.end_date,
    };
    if let Err(msg) = validate_required(&course.course_name, "course_name")
        .and_then(|_| validate_required(&course.subject, "subject"))
        .and_then(|_| validate_shape(&shape))
    {
        return Ok(bad_request(ErrorCode::CourseInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    let created = match storage.create_course(course).await {
        Ok(course) => course,
        Err(e) => return Ok(error_response_with(ErrorCode::CourseInvalid, e)),
    };
    info!("Created course {} ({})", created.id, created.course_name);

    match storage.get_course_detail(created.id).await {
        Ok(Some(course)) => Ok(HttpResponse::Created().json(ApiResponse::success(
            CourseResponse { course },
            "Course created successfully",
        ))),
        Ok(None) => Ok(HttpResponse::Created().json(ApiResponse::success_empty(
            "Course created successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(start: (u32, u32), end: (u32, u32)) -> CourseShape {
        CourseShape {
            fee_per_month: Some(Decimal::from(300)),
            max_students: Some(20),
            duration_months: Some(3),
            hours_per_session: Some(Decimal::new(15, 1)),
            start_date: NaiveDate::from_ymd_opt(2025, start.0, start.1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, end.0, end.1).unwrap(),
        }
    }

    #[test]
    fn test_course_bounds() {
        assert!(validate_shape(&shape((1, 1), (3, 31))).is_ok());
        assert!(validate_shape(&shape((1, 1), (1, 1))).is_ok());
        assert!(validate_shape(&shape((3, 1), (1, 1))).is_err());

        let mut s = shape((1, 1), (3, 31));
        s.hours_per_session = Some(Decimal::new(4, 1));
        assert!(validate_shape(&s).is_err());

        let mut s = shape((1, 1), (3, 31));
        s.max_students = Some(0);
        assert!(validate_shape(&s).is_err());
    }
}
