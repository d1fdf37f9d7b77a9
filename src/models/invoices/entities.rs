use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_str_enum;

define_str_enum!(InvoiceStatus, "../frontend/src/types/generated/invoice.ts" {
    Draft => "draft",
    Sent => "sent",
    Paid => "paid",
    Overdue => "overdue",
    Cancelled => "cancelled",
});

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invoice.ts")]
pub struct Invoice {
    pub id: i64,
    pub student_id: i64,
    pub enrollment_id: Option<i64>,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    #[ts(type = "string")]
    pub subtotal: Decimal,
    #[ts(type = "string")]
    pub discount: Decimal,
    #[ts(type = "string")]
    pub tax: Decimal,
    #[ts(type = "string")]
    pub total: Decimal,
    pub status: InvoiceStatus,
    pub payment_id: Option<i64>,
    pub pdf_path: Option<String>,
    pub notes: Option<String>,
    pub is_overdue: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl InvoiceStatus {
    pub fn is_unsettled(&self) -> bool {
        matches!(self, InvoiceStatus::Draft | InvoiceStatus::Sent)
    }
}
