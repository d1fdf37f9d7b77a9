//! Invoices

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub enrollment_id: Option<i64>,
    #[sea_orm(unique)]
    pub invoice_number: String,
    pub invoice_date: Date,
    pub due_date: Date,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub subtotal: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub discount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub tax: Decimal,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total: Decimal,
    pub status: String,
    #[sea_orm(unique)]
    pub payment_id: Option<i64>,
    pub pdf_path: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_invoice(self, today: Date) -> crate::models::invoices::entities::Invoice {
        use crate::models::invoices::entities::{Invoice, InvoiceStatus};

        let status = self
            .status
            .parse::<InvoiceStatus>()
            .unwrap_or(InvoiceStatus::Draft);

        Invoice {
            id: self.id,
            student_id: self.student_id,
            enrollment_id: self.enrollment_id,
            invoice_number: self.invoice_number,
            invoice_date: self.invoice_date,
            is_overdue: status.is_unsettled() && self.due_date < today,
            due_date: self.due_date,
            subtotal: self.subtotal,
            discount: self.discount,
            tax: self.tax,
            total: self.total,
            status,
            payment_id: self.payment_id,
            pdf_path: self.pdf_path,
            notes: self.notes,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
