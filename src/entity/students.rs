//! Students

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    pub date_of_birth: Option<Date>,
    pub gender: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub parent_name: String,
    pub parent_phone: String,
    pub parent_email: Option<String>,
    pub education_level: String,
    pub school_name: Option<String>,
    pub registration_date: Date,
    pub status: String,
    pub medical_notes: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self, today: Date) -> crate::models::students::entities::Student {
        use crate::models::students::entities::{
            EducationLevel, Gender, Student, StudentStatus, age_on,
        };

        Student {
            id: self.id,
            age: self.date_of_birth.map(|dob| age_on(dob, today)),
            full_name: self.full_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender.and_then(|g| g.parse::<Gender>().ok()),
            email: self.email,
            phone: self.phone,
            address: self.address,
            parent_name: self.parent_name,
            parent_phone: self.parent_phone,
            parent_email: self.parent_email,
            education_level: self
                .education_level
                .parse::<EducationLevel>()
                .unwrap_or(EducationLevel::Other),
            school_name: self.school_name,
            registration_date: self.registration_date,
            status: self
                .status
                .parse::<StudentStatus>()
                .unwrap_or(StudentStatus::Active),
            medical_notes: self.medical_notes,
            notes: self.notes,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
