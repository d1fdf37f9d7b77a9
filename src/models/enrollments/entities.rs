use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_str_enum;

define_str_enum!(EnrollmentStatus, "../frontend/src/types/generated/enrollment.ts" {
    Active => "active",
    Completed => "completed",
    Dropped => "dropped",
    Suspended => "suspended",
});

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub enrollment_date: NaiveDate,
    pub status: EnrollmentStatus,
    #[ts(type = "string | null")]
    pub final_grade: Option<Decimal>,
    pub completion_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Enrollment with its attendance and billing position
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub enrollment: Enrollment,
    pub student_name: Option<String>,
    pub course_name: Option<String>,
    /// `null` until attendance has been recorded
    #[ts(type = "string | null")]
    pub attendance_rate: Option<Decimal>,
    #[ts(type = "string")]
    pub total_paid: Decimal,
    #[ts(type = "string")]
    pub total_due: Decimal,
    #[ts(type = "string")]
    pub balance: Decimal,
}
