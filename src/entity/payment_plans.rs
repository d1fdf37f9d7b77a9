//! Installment plans

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_plans")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub enrollment_id: Option<i64>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub installment_amount: Decimal,
    pub number_of_installments: i32,
    pub start_date: Date,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_plan(self) -> crate::models::payment_plans::entities::PaymentPlan {
        use crate::models::payment_plans::entities::{PaymentPlan, PaymentPlanStatus};

        PaymentPlan {
            id: self.id,
            student_id: self.student_id,
            enrollment_id: self.enrollment_id,
            total_amount: self.total_amount,
            installment_amount: self.installment_amount,
            number_of_installments: self.number_of_installments,
            start_date: self.start_date,
            status: self
                .status
                .parse::<PaymentPlanStatus>()
                .unwrap_or(PaymentPlanStatus::Active),
            notes: self.notes,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
