use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_str_enum;

define_str_enum!(AttendanceStatus, "../frontend/src/types/generated/attendance.ts" {
    Present => "present",
    Absent => "absent",
    Late => "late",
    Excused => "excused",
});

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub enrollment_id: Option<i64>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub recorded_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Monthly roll-up per student and course
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummary {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub month: NaiveDate,
    pub total_sessions: i32,
    pub present_count: i32,
    pub absent_count: i32,
    pub late_count: i32,
    pub excused_count: i32,
    #[ts(type = "string")]
    pub attendance_rate: Decimal,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// A validated attendance write, shared by single and bulk recording
#[derive(Debug, Clone)]
pub struct AttendanceInput {
    pub student_id: i64,
    pub course_id: i64,
    pub enrollment_id: Option<i64>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub notes: Option<String>,
    pub recorded_by: Option<i64>,
}
