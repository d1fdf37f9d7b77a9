use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_str_enum;

define_str_enum!(PaymentPlanStatus, "../frontend/src/types/generated/payment_plan.ts" {
    Active => "active",
    Completed => "completed",
    Defaulted => "defaulted",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment_plan.ts")]
pub struct PaymentPlan {
    pub id: i64,
    pub student_id: i64,
    pub enrollment_id: Option<i64>,
    #[ts(type = "string")]
    pub total_amount: Decimal,
    #[ts(type = "string")]
    pub installment_amount: Decimal,
    pub number_of_installments: i32,
    pub start_date: NaiveDate,
    pub status: PaymentPlanStatus,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
