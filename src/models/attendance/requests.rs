use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{AttendanceInput, AttendanceStatus};

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RecordAttendanceRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub enrollment_id: Option<i64>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub notes: Option<String>,
}

impl RecordAttendanceRequest {
    pub fn into_input(self, recorded_by: Option<i64>) -> AttendanceInput {
        AttendanceInput {
            student_id: self.student_id,
            course_id: self.course_id,
            enrollment_id: self.enrollment_id,
            date: self.date,
            status: self.status,
            check_in_time: self.check_in_time,
            check_out_time: self.check_out_time,
            notes: self.notes,
            recorded_by,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct UpdateAttendanceRequest {
    pub status: Option<AttendanceStatus>,
    pub check_in_time: Option<NaiveTime>,
    pub check_out_time: Option<NaiveTime>,
    pub notes: Option<String>,
}

/// Records are decoded one by one so a bad entry does not reject the batch
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct BulkAttendanceRequest {
    #[serde(default)]
    pub records: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct CourseDateQuery {
    pub course_id: Option<i64>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSummaryQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    /// Any day of the month
    pub month: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct RecalculateSummariesRequest {
    /// `YYYY-MM` or `YYYY-MM-DD`; defaults to the current month
    pub month: Option<String>,
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_records_keep_raw_entries() {
        let body = r#"{"records":[
            {"student_id":1,"course_id":2,"date":"2025-01-06","status":"present"},
            {"student_id":"x"}
        ]}"#;
        let req: BulkAttendanceRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.records.len(), 2);
        let first: RecordAttendanceRequest =
            serde_json::from_value(req.records[0].clone()).unwrap();
        assert_eq!(first.status, AttendanceStatus::Present);
        assert!(serde_json::from_value::<RecordAttendanceRequest>(req.records[1].clone()).is_err());
    }

    #[test]
    fn test_missing_records_is_empty() {
        let req: BulkAttendanceRequest = serde_json::from_str("{}").unwrap();
        assert!(req.records.is_empty());
    }
}
