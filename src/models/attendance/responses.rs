use serde::Serialize;
use ts_rs::TS;

use super::entities::{Attendance, AttendanceSummary};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceResponse {
    pub attendance: Attendance,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct BulkRecordError {
    /// Position in the submitted `records` array
    pub index: i64,
    pub message: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct BulkAttendanceResponse {
    pub created: i64,
    pub failed: i64,
    pub records: Vec<Attendance>,
    pub errors: Vec<BulkRecordError>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct CourseDateAttendanceResponse {
    pub items: Vec<Attendance>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RecalculateSummariesResponse {
    pub month: String,
    pub updated: i64,
    pub summaries: Vec<AttendanceSummary>,
}
