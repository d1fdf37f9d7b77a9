//! Operating expenses

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub category: String,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    pub expense_date: Date,
    pub period_month: Date,
    pub status: String,
    pub vendor: Option<String>,
    pub receipt_number: Option<String>,
    pub approved_by: Option<i64>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_expense(self) -> crate::models::financials::entities::Expense {
        use crate::models::financials::entities::{Expense, ExpenseCategory, ExpenseStatus};

        Expense {
            id: self.id,
            category: self
                .category
                .parse::<ExpenseCategory>()
                .unwrap_or(ExpenseCategory::Other),
            description: self.description,
            amount: self.amount,
            expense_date: self.expense_date,
            period_month: self.period_month,
            status: self
                .status
                .parse::<ExpenseStatus>()
                .unwrap_or(ExpenseStatus::Pending),
            vendor: self.vendor,
            receipt_number: self.receipt_number,
            approved_by: self.approved_by,
            notes: self.notes,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
