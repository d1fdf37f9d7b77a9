use serde::Serialize;
use ts_rs::TS;

use super::entities::PaymentPlan;
use crate::models::payments::entities::Payment;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment_plan.ts")]
pub struct PaymentPlanResponse {
    pub plan: PaymentPlan,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment_plan.ts")]
pub struct InstallmentsResponse {
    pub plan_id: i64,
    pub installments: Vec<Payment>,
}
