//! Attendance records, one per student, course and day

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub enrollment_id: Option<i64>,
    pub date: Date,
    pub status: String,
    pub check_in_time: Option<Time>,
    pub check_out_time: Option<Time>,
    pub notes: Option<String>,
    pub recorded_by: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_attendance(self) -> crate::models::attendance::entities::Attendance {
        use crate::models::attendance::entities::{Attendance, AttendanceStatus};

        Attendance {
            id: self.id,
            student_id: self.student_id,
            course_id: self.course_id,
            enrollment_id: self.enrollment_id,
            date: self.date,
            status: self
                .status
                .parse::<AttendanceStatus>()
                .unwrap_or(AttendanceStatus::Present),
            check_in_time: self.check_in_time,
            check_out_time: self.check_out_time,
            notes: self.notes,
            recorded_by: self.recorded_by,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
