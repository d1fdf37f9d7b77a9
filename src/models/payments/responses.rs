use serde::Serialize;
use ts_rs::TS;

use super::entities::Payment;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct PaymentResponse {
    pub payment: Payment,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct OverduePaymentsResponse {
    pub items: Vec<Payment>,
    pub total: i64,
}
