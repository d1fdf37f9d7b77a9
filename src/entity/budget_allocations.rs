//! Budget per period and expense category

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budget_allocations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub period_month: Date,
    pub category: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub allocated_amount: Decimal,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `spent` is the paid expense total of the same period and category.
    pub fn into_budget(self, spent: Decimal) -> crate::models::financials::entities::BudgetAllocation {
        use crate::finance::money::{ratio_percent, round_money};
        use crate::models::financials::entities::{BudgetAllocation, ExpenseCategory};

        BudgetAllocation {
            id: self.id,
            period_month: self.period_month,
            category: self
                .category
                .parse::<ExpenseCategory>()
                .unwrap_or(ExpenseCategory::Other),
            remaining: round_money(self.allocated_amount - spent),
            utilization_percentage: ratio_percent(spent, self.allocated_amount),
            allocated_amount: self.allocated_amount,
            notes: self.notes,
            spent,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
