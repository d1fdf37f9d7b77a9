use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::InvoiceStatus;

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invoice.ts")]
pub struct InvoiceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<InvoiceStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invoice.ts")]
pub struct CreateInvoiceRequest {
    pub student_id: i64,
    pub enrollment_id: Option<i64>,
    /// Generated when absent
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: NaiveDate,
    #[ts(type = "string")]
    pub subtotal: Decimal,
    #[ts(type = "string | null")]
    pub discount: Option<Decimal>,
    #[ts(type = "string | null")]
    pub tax: Option<Decimal>,
    pub status: Option<InvoiceStatus>,
    pub payment_id: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invoice.ts")]
pub struct UpdateInvoiceRequest {
    pub due_date: Option<NaiveDate>,
    #[ts(type = "string | null")]
    pub subtotal: Option<Decimal>,
    #[ts(type = "string | null")]
    pub discount: Option<Decimal>,
    #[ts(type = "string | null")]
    pub tax: Option<Decimal>,
    pub status: Option<InvoiceStatus>,
    pub payment_id: Option<i64>,
    pub notes: Option<String>,
}
