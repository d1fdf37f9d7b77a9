use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{DistributionStatus, ExpenseCategory, ExpenseStatus, InstructorPaymentStatus};
use crate::models::payments::entities::PaymentMethod;

/// `period_month` is kept as text so a malformed value yields a 400 from the handler
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct CalculateInstructorPaymentsRequest {
    pub period_month: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct CalculateMonthlyProfitRequest {
    pub period_month: Option<String>,
    #[ts(type = "string | null")]
    pub retained_earnings_percentage: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct PeriodQuery {
    pub period_month: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct InstructorPaymentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub instructor_id: Option<i64>,
    pub status: Option<InstructorPaymentStatus>,
    pub period_month: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct PayInstructorRequest {
    pub payment_method: PaymentMethod,
    pub payment_reference: Option<String>,
    pub payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct MonthlyFinancialListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub is_finalized: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct FinalizePeriodRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct DistributionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub member_id: Option<i64>,
    pub monthly_financial_id: Option<i64>,
    pub status: Option<DistributionStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct PayDistributionRequest {
    pub payment_reference: Option<String>,
    pub payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct ExpenseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub category: Option<ExpenseCategory>,
    pub status: Option<ExpenseStatus>,
    pub period_month: Option<NaiveDate>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct CreateExpenseRequest {
    pub category: ExpenseCategory,
    pub description: String,
    #[ts(type = "string")]
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    /// Defaults to the month of `expense_date`
    pub period_month: Option<String>,
    pub vendor: Option<String>,
    pub receipt_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct UpdateExpenseRequest {
    pub category: Option<ExpenseCategory>,
    pub description: Option<String>,
    #[ts(type = "string | null")]
    pub amount: Option<Decimal>,
    pub expense_date: Option<NaiveDate>,
    pub period_month: Option<String>,
    pub vendor: Option<String>,
    pub receipt_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct BudgetListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub period_month: Option<NaiveDate>,
    pub category: Option<ExpenseCategory>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct CreateBudgetRequest {
    pub period_month: Option<String>,
    pub category: ExpenseCategory,
    #[ts(type = "string")]
    pub allocated_amount: Decimal,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct UpdateBudgetRequest {
    #[ts(type = "string | null")]
    pub allocated_amount: Option<Decimal>,
    pub notes: Option<String>,
}

/// Settlement data recorded when an instructor payment or a distribution is paid
#[derive(Debug, Clone, Default)]
pub struct PaymentDetails {
    pub payment_date: Option<NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_reference: Option<String>,
}
