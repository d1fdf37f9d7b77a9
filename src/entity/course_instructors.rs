//! Instructor assignments to courses

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "course_instructors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub instructor_id: i64,
    pub is_primary: bool,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub hours_taught: Decimal,
    pub assigned_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::instructors::Entity",
        from = "Column::InstructorId",
        to = "super::instructors::Column::Id",
        on_delete = "Cascade"
    )]
    Instructor,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::instructors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(
        self,
        instructor_name: Option<String>,
    ) -> crate::models::courses::entities::CourseInstructor {
        crate::models::courses::entities::CourseInstructor {
            id: self.id,
            course_id: self.course_id,
            instructor_id: self.instructor_id,
            is_primary: self.is_primary,
            hours_taught: self.hours_taught,
            assigned_at: super::ts_to_datetime(self.assigned_at),
            instructor_name,
        }
    }
}
