//! Student payments

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub enrollment_id: Option<i64>,
    pub payment_plan_id: Option<i64>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount_paid: Decimal,
    pub payment_method: String,
    pub due_date: Date,
    pub payment_date: Option<Date>,
    pub status: String,
    #[sea_orm(unique)]
    pub receipt_number: Option<String>,
    pub transaction_reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `today` drives the derived overdue fields.
    pub fn into_payment(self, today: Date) -> crate::models::payments::entities::Payment {
        use crate::finance::payments::days_overdue;
        use crate::models::payments::entities::{Payment, PaymentMethod, PaymentStatus};

        let status = self
            .status
            .parse::<PaymentStatus>()
            .unwrap_or(PaymentStatus::Pending);
        let balance = (self.amount - self.amount_paid).max(Decimal::ZERO);
        let is_overdue = status.is_open() && self.due_date < today;

        Payment {
            id: self.id,
            student_id: self.student_id,
            enrollment_id: self.enrollment_id,
            payment_plan_id: self.payment_plan_id,
            amount: self.amount,
            amount_paid: self.amount_paid,
            payment_method: self
                .payment_method
                .parse::<PaymentMethod>()
                .unwrap_or(PaymentMethod::Cash),
            due_date: self.due_date,
            payment_date: self.payment_date,
            status,
            receipt_number: self.receipt_number,
            transaction_reference: self.transaction_reference,
            notes: self.notes,
            balance,
            is_overdue,
            days_overdue: if is_overdue {
                days_overdue(self.due_date, today)
            } else {
                0
            },
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
