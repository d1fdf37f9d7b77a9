//! Monthly attendance roll-ups

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_summaries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// First day of the month
    pub month: Date,
    pub total_sessions: i32,
    pub present_count: i32,
    pub absent_count: i32,
    pub late_count: i32,
    pub excused_count: i32,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub attendance_rate: Decimal,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_summary(self) -> crate::models::attendance::entities::AttendanceSummary {
        crate::models::attendance::entities::AttendanceSummary {
            id: self.id,
            student_id: self.student_id,
            course_id: self.course_id,
            month: self.month,
            total_sessions: self.total_sessions,
            present_count: self.present_count,
            absent_count: self.absent_count,
            late_count: self.late_count,
            excused_count: self.excused_count,
            attendance_rate: self.attendance_rate,
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
