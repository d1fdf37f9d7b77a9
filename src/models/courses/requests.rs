use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{CourseStatus, CourseType, Weekday};

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<CourseStatus>,
    pub course_type: Option<CourseType>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub course_name: String,
    pub course_type: CourseType,
    pub subject: String,
    pub description: Option<String>,
    #[ts(type = "string")]
    pub fee_per_month: Decimal,
    pub max_students: Option<i32>,
    pub duration_months: Option<i32>,
    #[serde(default)]
    pub schedule_days: Vec<Weekday>,
    pub schedule_time: Option<NaiveTime>,
    #[ts(type = "string | null")]
    pub hours_per_session: Option<Decimal>,
    pub classroom: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: Option<CourseStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub course_name: Option<String>,
    pub course_type: Option<CourseType>,
    pub subject: Option<String>,
    pub description: Option<String>,
    #[ts(type = "string | null")]
    pub fee_per_month: Option<Decimal>,
    pub max_students: Option<i32>,
    pub duration_months: Option<i32>,
    pub schedule_days: Option<Vec<Weekday>>,
    pub schedule_time: Option<NaiveTime>,
    #[ts(type = "string | null")]
    pub hours_per_session: Option<Decimal>,
    pub classroom: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<CourseStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct EnrollStudentRequest {
    pub student_id: i64,
    pub enrollment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct AssignInstructorRequest {
    pub instructor_id: i64,
    #[serde(default)]
    pub is_primary: bool,
    #[ts(type = "string | null")]
    pub hours_taught: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateAssignmentRequest {
    pub is_primary: Option<bool>,
    #[ts(type = "string | null")]
    pub hours_taught: Option<Decimal>,
}
