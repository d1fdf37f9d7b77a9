//! Instructors

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "instructors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub specialization: String,
    pub qualifications: Option<String>,
    pub years_of_experience: i32,
    pub employment_type: String,
    pub hire_date: Date,
    pub status: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub hourly_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub tax_rate_percentage: Decimal,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub rib: Option<String>,
    pub bio: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_instructors::Entity")]
    CourseInstructors,
    #[sea_orm(has_many = "super::instructor_payments::Entity")]
    InstructorPayments,
}

impl Related<super::course_instructors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseInstructors.def()
    }
}

impl Related<super::instructor_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InstructorPayments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_instructor(self) -> crate::models::instructors::entities::Instructor {
        use crate::models::instructors::entities::{EmploymentType, Instructor, InstructorStatus};

        Instructor {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            specialization: self.specialization,
            qualifications: self.qualifications,
            years_of_experience: self.years_of_experience,
            employment_type: self
                .employment_type
                .parse::<EmploymentType>()
                .unwrap_or(EmploymentType::FullTime),
            hire_date: self.hire_date,
            status: self
                .status
                .parse::<InstructorStatus>()
                .unwrap_or(InstructorStatus::Active),
            hourly_rate: self.hourly_rate,
            tax_rate_percentage: self.tax_rate_percentage,
            bank_name: self.bank_name,
            account_number: self.account_number,
            rib: self.rib,
            bio: self.bio,
            notes: self.notes,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
