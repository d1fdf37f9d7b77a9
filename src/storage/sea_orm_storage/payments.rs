//! Student payments, invoices and installment plans.

use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::payments::{ActiveModel, Column, Entity as Payments};
use crate::entity::{invoices, payment_plans};
use crate::errors::{CoopError, Result};
use crate::finance::{
    payments::{installment_amount, installment_schedule, invoice_total, settle_payment},
    round_money, today,
};
use crate::models::{
    PaginatedResponse, page_params,
    invoices::{
        entities::{Invoice, InvoiceStatus},
        requests::{CreateInvoiceRequest, InvoiceListQuery, UpdateInvoiceRequest},
    },
    payment_plans::{
        entities::{PaymentPlan, PaymentPlanStatus},
        requests::{CreatePaymentPlanRequest, PaymentPlanListQuery, UpdatePaymentPlanRequest},
    },
    payments::{
        entities::{Payment, PaymentMethod, PaymentStatus},
        requests::{CreatePaymentRequest, MarkPaidRequest, PaymentListQuery, UpdatePaymentRequest},
    },
};
use crate::utils::random_code;
use crate::utils::validate::validate_invoice_number;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};

fn open_statuses() -> [String; 3] {
    [
        PaymentStatus::Pending.to_string(),
        PaymentStatus::PartiallyPaid.to_string(),
        PaymentStatus::Overdue.to_string(),
    ]
}

impl SeaOrmStorage {
    pub async fn create_payment_impl(&self, req: CreatePaymentRequest) -> Result<Payment> {
        let now = now_ts();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            enrollment_id: Set(req.enrollment_id),
            amount: Set(round_money(req.amount)),
            amount_paid: Set(round_money(req.amount_paid.unwrap_or_default())),
            payment_method: Set(req.payment_method.unwrap_or(PaymentMethod::Cash).to_string()),
            due_date: Set(req.due_date),
            payment_date: Set(req.payment_date),
            status: Set(req.status.unwrap_or(PaymentStatus::Pending).to_string()),
            transaction_reference: Set(req.transaction_reference),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("Failed to create payment"))?;

        Ok(model.into_payment(today()))
    }

    pub async fn get_payment_by_id_impl(&self, id: i64) -> Result<Option<Payment>> {
        let result = Payments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load payment"))?;

        Ok(result.map(|m| m.into_payment(today())))
    }

    pub async fn list_payments_with_pagination_impl(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaginatedResponse<Payment>> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Payments::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(enrollment_id) = query.enrollment_id {
            select = select.filter(Column::EnrollmentId.eq(enrollment_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(method) = query.method {
            select = select.filter(Column::PaymentMethod.eq(method.to_string()));
        }
        if let Some(before) = query.due_before {
            select = select.filter(Column::DueDate.lte(before));
        }
        if let Some(after) = query.due_after {
            select = select.filter(Column::DueDate.gte(after));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_desc(Column::DueDate).order_by_desc(Column::Id),
                page,
                size,
                "Failed to list payments",
            )
            .await?;

        let today = today();
        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_payment(today)).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    pub async fn update_payment_impl(
        &self,
        id: i64,
        update: UpdatePaymentRequest,
    ) -> Result<Option<Payment>> {
        let Some(existing) = Payments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load payment"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.updated_at = Set(now_ts());
        if let Some(v) = update.amount {
            model.amount = Set(round_money(v));
        }
        if let Some(v) = update.payment_method {
            model.payment_method = Set(v.to_string());
        }
        if let Some(v) = update.due_date {
            model.due_date = Set(v);
        }
        if let Some(v) = update.status {
            model.status = Set(v.to_string());
        }
        if let Some(v) = update.transaction_reference {
            model.transaction_reference = Set(Some(v));
        }
        if let Some(v) = update.notes {
            model.notes = Set(Some(v));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update payment"))?;

        Ok(Some(updated.into_payment(today())))
    }

    pub async fn delete_payment_impl(&self, id: i64) -> Result<bool> {
        let result = Payments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete payment"))?;

        Ok(result.rows_affected > 0)
    }

    /// Records money received against a payment.
    ///
    /// Cancelled and refunded payments are rejected with `Conflict`,
    /// non-positive amounts with `Validation`.
    pub async fn mark_payment_paid_impl(
        &self,
        id: i64,
        req: MarkPaidRequest,
    ) -> Result<Option<Payment>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start payment update"))?;

        let Some(existing) = Payments::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_error("Failed to load payment"))?
        else {
            return Ok(None);
        };

        let status = existing
            .status
            .parse::<PaymentStatus>()
            .unwrap_or(PaymentStatus::Pending);
        if !status.accepts_payment() {
            return Err(CoopError::conflict(format!(
                "Payment {id} is {status} and cannot be paid"
            )));
        }

        let settlement = settle_payment(existing.amount, existing.amount_paid, req.amount)?;
        let today = today();
        let receipt = existing
            .receipt_number
            .clone()
            .unwrap_or_else(|| random_code::receipt_number(today));

        let mut model = existing.into_active_model();
        model.amount_paid = Set(settlement.amount_paid);
        model.status = Set(if settlement.fully_paid {
            PaymentStatus::Paid
        } else {
            PaymentStatus::PartiallyPaid
        }
        .to_string());
        model.payment_date = Set(Some(today));
        model.receipt_number = Set(Some(receipt));
        if let Some(method) = req.method {
            model.payment_method = Set(method.to_string());
        }
        if let Some(reference) = req.transaction_reference {
            model.transaction_reference = Set(Some(reference));
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&txn)
            .await
            .map_err(db_error("Failed to record payment"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit payment"))?;

        Ok(Some(updated.into_payment(today)))
    }

    /// Open payments whose due date has passed.
    pub async fn list_overdue_payments_impl(&self, today: NaiveDate) -> Result<Vec<Payment>> {
        let rows = Payments::find()
            .filter(Column::Status.is_in(open_statuses()))
            .filter(Column::DueDate.lt(today))
            .order_by_asc(Column::DueDate)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list overdue payments"))?;

        Ok(rows.into_iter().map(|m| m.into_payment(today)).collect())
    }

    /// Pending or partially paid payments due exactly on `date`.
    pub async fn list_payments_due_on_impl(&self, date: NaiveDate) -> Result<Vec<Payment>> {
        let rows = Payments::find()
            .filter(Column::Status.is_in([
                PaymentStatus::Pending.to_string(),
                PaymentStatus::PartiallyPaid.to_string(),
            ]))
            .filter(Column::DueDate.eq(date))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list due payments"))?;

        let today = today();
        Ok(rows.into_iter().map(|m| m.into_payment(today)).collect())
    }

    /// Open payments due exactly on `date`, including ones already flagged overdue.
    pub async fn list_open_payments_due_on_impl(&self, date: NaiveDate) -> Result<Vec<Payment>> {
        let rows = Payments::find()
            .filter(Column::Status.is_in(open_statuses()))
            .filter(Column::DueDate.eq(date))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list due payments"))?;

        let today = today();
        Ok(rows.into_iter().map(|m| m.into_payment(today)).collect())
    }

    /// Flags a pending or partially paid payment as overdue.
    pub async fn mark_payment_overdue_impl(&self, id: i64) -> Result<bool> {
        let result = Payments::update_many()
            .col_expr(Column::Status, Expr::value(PaymentStatus::Overdue.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.is_in([
                PaymentStatus::Pending.to_string(),
                PaymentStatus::PartiallyPaid.to_string(),
            ]))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to mark payment overdue"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_plan_installments_impl(&self, plan_id: i64) -> Result<Vec<Payment>> {
        let rows = Payments::find()
            .filter(Column::PaymentPlanId.eq(plan_id))
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list installments"))?;

        let today = today();
        Ok(rows.into_iter().map(|m| m.into_payment(today)).collect())
    }

    // Invoices

    pub async fn create_invoice_impl(&self, req: CreateInvoiceRequest) -> Result<Invoice> {
        let discount = req.discount.unwrap_or_default();
        let tax = req.tax.unwrap_or_default();
        let total = invoice_total(req.subtotal, discount, tax)?;
        let invoice_date = req.invoice_date.unwrap_or_else(today);
        let invoice_number = match req.invoice_number.filter(|n| !n.trim().is_empty()) {
            Some(number) => {
                validate_invoice_number(&number).map_err(CoopError::validation)?;
                number
            }
            None => random_code::invoice_number(invoice_date),
        };
        let now = now_ts();

        let model = invoices::ActiveModel {
            student_id: Set(req.student_id),
            enrollment_id: Set(req.enrollment_id),
            invoice_number: Set(invoice_number),
            invoice_date: Set(invoice_date),
            due_date: Set(req.due_date),
            subtotal: Set(round_money(req.subtotal)),
            discount: Set(round_money(discount)),
            tax: Set(round_money(tax)),
            total: Set(total),
            status: Set(req.status.unwrap_or(InvoiceStatus::Draft).to_string()),
            payment_id: Set(req.payment_id),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("Failed to create invoice"))?;

        Ok(model.into_invoice(today()))
    }

    pub async fn get_invoice_by_id_impl(&self, id: i64) -> Result<Option<Invoice>> {
        let result = invoices::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load invoice"))?;

        Ok(result.map(|m| m.into_invoice(today())))
    }

    pub async fn list_invoices_with_pagination_impl(
        &self,
        query: InvoiceListQuery,
    ) -> Result<PaginatedResponse<Invoice>> {
        use invoices::Column as I;

        let (page, size) = page_params(query.page, query.size);

        let mut select = invoices::Entity::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(I::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(I::Status.eq(status.to_string()));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_desc(I::InvoiceDate).order_by_desc(I::Id),
                page,
                size,
                "Failed to list invoices",
            )
            .await?;

        let today = today();
        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_invoice(today)).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    /// Amount changes recompute the total.
    pub async fn update_invoice_impl(
        &self,
        id: i64,
        update: UpdateInvoiceRequest,
    ) -> Result<Option<Invoice>> {
        let Some(existing) = invoices::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load invoice"))?
        else {
            return Ok(None);
        };

        let subtotal = update.subtotal.unwrap_or(existing.subtotal);
        let discount = update.discount.unwrap_or(existing.discount);
        let tax = update.tax.unwrap_or(existing.tax);
        let total = invoice_total(subtotal, discount, tax)?;

        let mut model = existing.into_active_model();
        model.subtotal = Set(round_money(subtotal));
        model.discount = Set(round_money(discount));
        model.tax = Set(round_money(tax));
        model.total = Set(total);
        if let Some(v) = update.due_date {
            model.due_date = Set(v);
        }
        if let Some(v) = update.status {
            model.status = Set(v.to_string());
        }
        if let Some(v) = update.payment_id {
            model.payment_id = Set(Some(v));
        }
        if let Some(v) = update.notes {
            model.notes = Set(Some(v));
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update invoice"))?;

        Ok(Some(updated.into_invoice(today())))
    }

    pub async fn delete_invoice_impl(&self, id: i64) -> Result<bool> {
        let result = invoices::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete invoice"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn set_invoice_pdf_path_impl(&self, id: i64, path: &str) -> Result<bool> {
        let result = invoices::Entity::update_many()
            .col_expr(invoices::Column::PdfPath, Expr::value(path.to_string()))
            .col_expr(invoices::Column::UpdatedAt, Expr::value(now_ts()))
            .filter(invoices::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to store invoice document path"))?;

        Ok(result.rows_affected > 0)
    }

    // Payment plans

    pub async fn create_payment_plan_impl(
        &self,
        req: CreatePaymentPlanRequest,
    ) -> Result<PaymentPlan> {
        let installment =
            installment_amount(round_money(req.total_amount), req.number_of_installments)?;
        let now = now_ts();

        let model = payment_plans::ActiveModel {
            student_id: Set(req.student_id),
            enrollment_id: Set(req.enrollment_id),
            total_amount: Set(round_money(req.total_amount)),
            installment_amount: Set(installment),
            number_of_installments: Set(req.number_of_installments),
            start_date: Set(req.start_date),
            status: Set(req.status.unwrap_or(PaymentPlanStatus::Active).to_string()),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("Failed to create payment plan"))?;

        Ok(model.into_plan())
    }

    pub async fn get_payment_plan_by_id_impl(&self, id: i64) -> Result<Option<PaymentPlan>> {
        let result = payment_plans::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load payment plan"))?;

        Ok(result.map(|m| m.into_plan()))
    }

    pub async fn list_payment_plans_with_pagination_impl(
        &self,
        query: PaymentPlanListQuery,
    ) -> Result<PaginatedResponse<PaymentPlan>> {
        use payment_plans::Column as P;

        let (page, size) = page_params(query.page, query.size);

        let mut select = payment_plans::Entity::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(P::StudentId.eq(student_id));
        }
        if let Some(status) = query.status {
            select = select.filter(P::Status.eq(status.to_string()));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_desc(P::StartDate).order_by_desc(P::Id),
                page,
                size,
                "Failed to list payment plans",
            )
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_plan()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    pub async fn update_payment_plan_impl(
        &self,
        id: i64,
        update: UpdatePaymentPlanRequest,
    ) -> Result<Option<PaymentPlan>> {
        let Some(existing) = payment_plans::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load payment plan"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(v) = update.status {
            model.status = Set(v.to_string());
        }
        if let Some(v) = update.notes {
            model.notes = Set(Some(v));
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update payment plan"))?;

        Ok(Some(updated.into_plan()))
    }

    pub async fn delete_payment_plan_impl(&self, id: i64) -> Result<bool> {
        let result = payment_plans::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete payment plan"))?;

        Ok(result.rows_affected > 0)
    }

    /// Creates the plan's pending installment payments.
    ///
    /// Fails with `Conflict` when installments already exist.
    pub async fn generate_installments_impl(
        &self,
        plan_id: i64,
        method: PaymentMethod,
    ) -> Result<Option<Vec<Payment>>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start installment generation"))?;

        let Some(plan) = payment_plans::Entity::find_by_id(plan_id)
            .one(&txn)
            .await
            .map_err(db_error("Failed to load payment plan"))?
        else {
            return Ok(None);
        };

        let existing = Payments::find()
            .filter(Column::PaymentPlanId.eq(plan_id))
            .count(&txn)
            .await
            .map_err(db_error("Failed to count installments"))?;
        if existing > 0 {
            return Err(CoopError::conflict(format!(
                "Payment plan {plan_id} already has {existing} installments"
            )));
        }

        let schedule =
            installment_schedule(plan.total_amount, plan.number_of_installments, plan.start_date)?;

        let now = now_ts();
        let today = today();
        let mut created = Vec::with_capacity(schedule.len());
        for installment in schedule {
            let model = ActiveModel {
                student_id: Set(plan.student_id),
                enrollment_id: Set(plan.enrollment_id),
                payment_plan_id: Set(Some(plan.id)),
                amount: Set(installment.amount),
                amount_paid: Set(Decimal::ZERO),
                payment_method: Set(method.to_string()),
                due_date: Set(installment.due_date),
                status: Set(PaymentStatus::Pending.to_string()),
                notes: Set(Some(installment.note)),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(db_error("Failed to create installment"))?;
            created.push(model.into_payment(today));
        }

        txn.commit()
            .await
            .map_err(db_error("Failed to commit installments"))?;

        Ok(Some(created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    async fn student(storage: &SeaOrmStorage) -> i64 {
        storage
            .create_student_impl(CreateStudentRequest {
                full_name: "Youssef".into(),
                date_of_birth: None,
                gender: None,
                email: None,
                phone: None,
                address: None,
                parent_name: "Parent".into(),
                parent_phone: "+212600000002".into(),
                parent_email: None,
                education_level: None,
                school_name: None,
                registration_date: None,
                status: None,
                medical_notes: None,
                notes: None,
            })
            .await
            .unwrap()
            .id
    }

    fn payment(student_id: i64, amount: i64) -> CreatePaymentRequest {
        CreatePaymentRequest {
            student_id,
            enrollment_id: None,
            amount: Decimal::from(amount),
            amount_paid: None,
            payment_method: None,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            payment_date: None,
            status: None,
            transaction_reference: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_partial_then_full_payment() {
        let storage = memory_storage().await;
        let sid = student(&storage).await;
        let p = storage.create_payment_impl(payment(sid, 300)).await.unwrap();

        let partial = storage
            .mark_payment_paid_impl(
                p.id,
                MarkPaidRequest {
                    amount: Some(Decimal::from(100)),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(partial.status, PaymentStatus::PartiallyPaid);
        assert_eq!(partial.balance, Decimal::from(200));
        let receipt = partial.receipt_number.clone();
        assert!(receipt.is_some());

        let full = storage
            .mark_payment_paid_impl(p.id, MarkPaidRequest::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(full.status, PaymentStatus::Paid);
        assert_eq!(full.amount_paid, Decimal::from(300));
        assert_eq!(full.receipt_number, receipt);
    }

    #[tokio::test]
    async fn test_cancelled_payment_rejects_money() {
        let storage = memory_storage().await;
        let sid = student(&storage).await;
        let mut req = payment(sid, 100);
        req.status = Some(PaymentStatus::Cancelled);
        let p = storage.create_payment_impl(req).await.unwrap();

        let err = storage
            .mark_payment_paid_impl(p.id, MarkPaidRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoopError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_installments_generated_once() {
        let storage = memory_storage().await;
        let sid = student(&storage).await;
        let plan = storage
            .create_payment_plan_impl(CreatePaymentPlanRequest {
                student_id: sid,
                enrollment_id: None,
                total_amount: Decimal::from(1000),
                number_of_installments: 3,
                start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                status: None,
                notes: None,
            })
            .await
            .unwrap();

        let installments = storage
            .generate_installments_impl(plan.id, PaymentMethod::Cash)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(installments.len(), 3);
        let sum: Decimal = installments.iter().map(|p| p.amount).sum();
        assert_eq!(sum, Decimal::from(1000));
        assert_eq!(installments[2].notes.as_deref(), Some("Installment 3 of 3"));

        let again = storage
            .generate_installments_impl(plan.id, PaymentMethod::Cash)
            .await;
        assert!(matches!(again, Err(CoopError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_invoice_number_and_total() {
        let storage = memory_storage().await;
        let sid = student(&storage).await;
        let invoice = storage
            .create_invoice_impl(CreateInvoiceRequest {
                student_id: sid,
                enrollment_id: None,
                invoice_number: None,
                invoice_date: NaiveDate::from_ymd_opt(2025, 2, 1),
                due_date: NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
                subtotal: Decimal::from(500),
                discount: Some(Decimal::from(50)),
                tax: Some(Decimal::from(20)),
                status: None,
                payment_id: None,
                notes: None,
            })
            .await
            .unwrap();
        assert!(invoice.invoice_number.starts_with("INV-202502-"));
        assert_eq!(invoice.total, Decimal::from(470));
        assert_eq!(invoice.status, InvoiceStatus::Draft);

        let rejected = storage
            .create_invoice_impl(CreateInvoiceRequest {
                student_id: sid,
                enrollment_id: None,
                invoice_number: Some("../../escape".into()),
                invoice_date: None,
                due_date: NaiveDate::from_ymd_opt(2025, 2, 15).unwrap(),
                subtotal: Decimal::from(500),
                discount: None,
                tax: None,
                status: None,
                payment_id: None,
                notes: None,
            })
            .await;
        assert!(matches!(rejected, Err(CoopError::Validation(_))));
    }
}
