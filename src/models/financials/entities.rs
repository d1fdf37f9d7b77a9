use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_str_enum;
use crate::models::payments::entities::PaymentMethod;

define_str_enum!(InstructorPaymentStatus, "../frontend/src/types/generated/financial.ts" {
    Pending => "pending",
    Approved => "approved",
    Paid => "paid",
    Cancelled => "cancelled",
});

define_str_enum!(DistributionStatus, "../frontend/src/types/generated/financial.ts" {
    Pending => "pending",
    Approved => "approved",
    Paid => "paid",
    Cancelled => "cancelled",
});

define_str_enum!(ExpenseCategory, "../frontend/src/types/generated/financial.ts" {
    Rent => "rent",
    Utilities => "utilities",
    Supplies => "supplies",
    Marketing => "marketing",
    Maintenance => "maintenance",
    Insurance => "insurance",
    Salaries => "salaries",
    Taxes => "taxes",
    Other => "other",
});

define_str_enum!(ExpenseStatus, "../frontend/src/types/generated/financial.ts" {
    Pending => "pending",
    Approved => "approved",
    Paid => "paid",
    Rejected => "rejected",
});

impl InstructorPaymentStatus {
    /// Rows a recalculation must not overwrite. A cancellation is a
    /// manager's decision and survives reruns like an approval does.
    pub fn is_settled(&self) -> bool {
        !matches!(self, InstructorPaymentStatus::Pending)
    }

    pub fn can_transition_to(&self, next: InstructorPaymentStatus) -> bool {
        use InstructorPaymentStatus::*;
        matches!(
            (self, next),
            (Pending, Approved) | (Approved, Paid) | (Pending, Cancelled) | (Approved, Cancelled)
        )
    }
}

impl DistributionStatus {
    pub fn can_transition_to(&self, next: DistributionStatus) -> bool {
        use DistributionStatus::*;
        matches!(
            (self, next),
            (Pending, Approved) | (Approved, Paid) | (Pending, Cancelled) | (Approved, Cancelled)
        )
    }
}

impl ExpenseStatus {
    pub fn can_transition_to(&self, next: ExpenseStatus) -> bool {
        use ExpenseStatus::*;
        matches!(
            (self, next),
            (Pending, Approved) | (Pending, Rejected) | (Approved, Paid) | (Approved, Rejected)
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct InstructorPayment {
    pub id: i64,
    pub instructor_id: i64,
    pub instructor_name: Option<String>,
    pub period_month: NaiveDate,
    #[ts(type = "string")]
    pub total_hours: Decimal,
    #[ts(type = "string")]
    pub hourly_rate: Decimal,
    #[ts(type = "string")]
    pub gross_amount: Decimal,
    #[ts(type = "string")]
    pub tax_rate: Decimal,
    #[ts(type = "string")]
    pub tax_amount: Decimal,
    #[ts(type = "string")]
    pub net_amount: Decimal,
    pub status: InstructorPaymentStatus,
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct MonthlyFinancial {
    pub id: i64,
    pub period_month: NaiveDate,
    #[ts(type = "string")]
    pub total_revenue: Decimal,
    #[ts(type = "string")]
    pub instructor_payments: Decimal,
    #[ts(type = "string")]
    pub operational_expenses: Decimal,
    #[ts(type = "string")]
    pub other_expenses: Decimal,
    #[ts(type = "string")]
    pub total_expenses: Decimal,
    #[ts(type = "string")]
    pub gross_profit: Decimal,
    #[ts(type = "string")]
    pub retained_earnings_percentage: Decimal,
    #[ts(type = "string")]
    pub retained_earnings: Decimal,
    #[ts(type = "string")]
    pub distributable_profit: Decimal,
    pub is_finalized: bool,
    pub finalized_date: Option<chrono::DateTime<chrono::Utc>>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct MemberDistribution {
    pub id: i64,
    pub member_id: i64,
    pub member_name: Option<String>,
    pub monthly_financial_id: i64,
    #[ts(type = "string")]
    pub share_percentage: Decimal,
    #[ts(type = "string")]
    pub amount: Decimal,
    pub status: DistributionStatus,
    pub is_public_employee: bool,
    pub payment_date: Option<NaiveDate>,
    pub payment_reference: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct Expense {
    pub id: i64,
    pub category: ExpenseCategory,
    pub description: String,
    #[ts(type = "string")]
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub period_month: NaiveDate,
    pub status: ExpenseStatus,
    pub vendor: Option<String>,
    pub receipt_number: Option<String>,
    pub approved_by: Option<i64>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct BudgetAllocation {
    pub id: i64,
    pub period_month: NaiveDate,
    pub category: ExpenseCategory,
    #[ts(type = "string")]
    pub allocated_amount: Decimal,
    pub notes: Option<String>,
    /// Paid expenses of the same period and category
    #[ts(type = "string")]
    pub spent: Decimal,
    #[ts(type = "string")]
    pub remaining: Decimal,
    #[ts(type = "string")]
    pub utilization_percentage: Decimal,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructor_payment_transitions() {
        use InstructorPaymentStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Approved.can_transition_to(Paid));
        assert!(!Pending.can_transition_to(Paid));
        assert!(!Paid.can_transition_to(Cancelled));
        assert!(Approved.is_settled());
        assert!(Cancelled.is_settled());
        assert!(!Pending.is_settled());
    }

    #[test]
    fn test_expense_transitions() {
        use ExpenseStatus::*;
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Paid));
        assert!(!Pending.can_transition_to(Paid));
    }
}
