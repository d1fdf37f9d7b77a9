use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_str_enum;

define_str_enum!(PaymentMethod, "../frontend/src/types/generated/payment.ts" {
    Cash => "cash",
    BankTransfer => "bank_transfer",
    Check => "check",
    CreditCard => "credit_card",
    MobilePayment => "mobile_payment",
});

define_str_enum!(PaymentStatus, "../frontend/src/types/generated/payment.ts" {
    Pending => "pending",
    Paid => "paid",
    PartiallyPaid => "partially_paid",
    Overdue => "overdue",
    Cancelled => "cancelled",
    Refunded => "refunded",
});

impl PaymentStatus {
    /// Statuses that still expect money.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Pending | PaymentStatus::PartiallyPaid | PaymentStatus::Overdue
        )
    }

    pub fn accepts_payment(&self) -> bool {
        !matches!(self, PaymentStatus::Cancelled | PaymentStatus::Refunded)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    pub enrollment_id: Option<i64>,
    pub payment_plan_id: Option<i64>,
    #[ts(type = "string")]
    pub amount: Decimal,
    #[ts(type = "string")]
    pub amount_paid: Decimal,
    pub payment_method: PaymentMethod,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub receipt_number: Option<String>,
    pub transaction_reference: Option<String>,
    pub notes: Option<String>,
    #[ts(type = "string")]
    pub balance: Decimal,
    pub is_overdue: bool,
    pub days_overdue: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
