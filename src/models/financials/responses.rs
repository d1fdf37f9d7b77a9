use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{InstructorPayment, MemberDistribution, MonthlyFinancial};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct InstructorPaymentsCalculationResponse {
    pub message: String,
    pub period: String,
    pub payments_count: i64,
    pub payments: Vec<InstructorPayment>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct MonthlyProfitResponse {
    pub message: String,
    pub period: String,
    pub summary: MonthlyFinancial,
    pub distributions: Vec<MemberDistribution>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct FinancialSummaryResponse {
    /// Human label, e.g. "January 2025"
    pub period: String,
    #[ts(type = "string")]
    pub total_revenue: Decimal,
    #[ts(type = "string")]
    pub total_expenses: Decimal,
    #[ts(type = "string")]
    pub gross_profit: Decimal,
    #[ts(type = "string")]
    pub retained_earnings: Decimal,
    #[ts(type = "string")]
    pub distributable_profit: Decimal,
    #[ts(type = "string")]
    pub profit_margin: Decimal,
    pub is_finalized: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct DashboardStats {
    pub total_students: i64,
    pub total_courses: i64,
    pub active_enrollments: i64,
    pub pending_payments_count: i64,
    #[ts(type = "string")]
    pub pending_payments_amount: Decimal,
    #[ts(type = "string")]
    pub current_month_revenue: Decimal,
    #[ts(type = "string")]
    pub current_month_profit: Decimal,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/financial.ts")]
pub struct MonthlyFinancialResponse {
    pub monthly: MonthlyFinancial,
    pub distributions: Vec<MemberDistribution>,
}
