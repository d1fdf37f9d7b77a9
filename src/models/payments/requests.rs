use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{PaymentMethod, PaymentStatus};

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct PaymentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub enrollment_id: Option<i64>,
    pub status: Option<PaymentStatus>,
    pub method: Option<PaymentMethod>,
    pub due_before: Option<NaiveDate>,
    pub due_after: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct CreatePaymentRequest {
    pub student_id: i64,
    pub enrollment_id: Option<i64>,
    #[ts(type = "string")]
    pub amount: Decimal,
    #[ts(type = "string | null")]
    pub amount_paid: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub status: Option<PaymentStatus>,
    pub transaction_reference: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct UpdatePaymentRequest {
    #[ts(type = "string | null")]
    pub amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<PaymentStatus>,
    pub transaction_reference: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct MarkPaidRequest {
    /// Defaults to the outstanding balance
    #[ts(type = "string | null")]
    pub amount: Option<Decimal>,
    pub method: Option<PaymentMethod>,
    pub transaction_reference: Option<String>,
}
