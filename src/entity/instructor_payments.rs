//! Monthly instructor pay

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "instructor_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub instructor_id: i64,
    pub period_month: Date,
    #[sea_orm(column_type = "Decimal(Some((8, 2)))")]
    pub total_hours: Decimal,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub hourly_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub gross_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))")]
    pub tax_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub tax_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub net_amount: Decimal,
    pub status: String,
    pub payment_date: Option<Date>,
    pub payment_method: Option<String>,
    pub payment_reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::instructors::Entity",
        from = "Column::InstructorId",
        to = "super::instructors::Column::Id",
        on_delete = "Cascade"
    )]
    Instructor,
}

impl Related<super::instructors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_instructor_payment(
        self,
        instructor_name: Option<String>,
    ) -> crate::models::financials::entities::InstructorPayment {
        use crate::models::financials::entities::{InstructorPayment, InstructorPaymentStatus};

        InstructorPayment {
            id: self.id,
            instructor_id: self.instructor_id,
            instructor_name,
            period_month: self.period_month,
            total_hours: self.total_hours,
            hourly_rate: self.hourly_rate,
            gross_amount: self.gross_amount,
            tax_rate: self.tax_rate,
            tax_amount: self.tax_amount,
            net_amount: self.net_amount,
            status: self
                .status
                .parse::<InstructorPaymentStatus>()
                .unwrap_or(InstructorPaymentStatus::Pending),
            payment_date: self.payment_date,
            payment_method: self.payment_method.and_then(|m| m.parse().ok()),
            payment_reference: self.payment_reference,
            notes: self.notes,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
