//! Courses

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_name: String,
    pub course_type: String,
    pub subject: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub fee_per_month: Decimal,
    pub max_students: i32,
    pub duration_months: i32,
    /// Comma separated weekday names
    pub schedule_days: String,
    pub schedule_time: Option<Time>,
    #[sea_orm(column_type = "Decimal(Some((4, 2)))")]
    pub hours_per_session: Decimal,
    pub classroom: Option<String>,
    pub start_date: Date,
    pub end_date: Date,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::course_instructors::Entity")]
    CourseInstructors,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::course_instructors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseInstructors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::courses::entities::{
            Course, CourseStatus, CourseType, decode_schedule_days,
        };

        Course {
            id: self.id,
            course_name: self.course_name,
            course_type: self
                .course_type
                .parse::<CourseType>()
                .unwrap_or(CourseType::Academic),
            subject: self.subject,
            description: self.description,
            fee_per_month: self.fee_per_month,
            max_students: self.max_students,
            duration_months: self.duration_months,
            schedule_days: decode_schedule_days(&self.schedule_days),
            schedule_time: self.schedule_time,
            hours_per_session: self.hours_per_session,
            classroom: self.classroom,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self
                .status
                .parse::<CourseStatus>()
                .unwrap_or(CourseStatus::Pending),
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
