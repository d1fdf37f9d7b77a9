use serde::Serialize;
use ts_rs::TS;

use super::entities::Invoice;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/invoice.ts")]
pub struct InvoiceResponse {
    pub invoice: Invoice,
}
