use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::EnrollmentStatus;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub status: Option<EnrollmentStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct CreateEnrollmentRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub enrollment_date: Option<NaiveDate>,
    pub status: Option<EnrollmentStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct UpdateEnrollmentRequest {
    pub status: Option<EnrollmentStatus>,
    #[ts(type = "string | null")]
    pub final_grade: Option<Decimal>,
    pub completion_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
