use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::PaymentPlanStatus;
use crate::models::payments::entities::PaymentMethod;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment_plan.ts")]
pub struct PaymentPlanListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<PaymentPlanStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment_plan.ts")]
pub struct CreatePaymentPlanRequest {
    pub student_id: i64,
    pub enrollment_id: Option<i64>,
    #[ts(type = "string")]
    pub total_amount: Decimal,
    pub number_of_installments: i32,
    pub start_date: NaiveDate,
    pub status: Option<PaymentPlanStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment_plan.ts")]
pub struct UpdatePaymentPlanRequest {
    pub status: Option<PaymentPlanStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment_plan.ts")]
pub struct GenerateInstallmentsRequest {
    /// Method recorded on the generated payments, cash by default
    pub payment_method: Option<PaymentMethod>,
}
