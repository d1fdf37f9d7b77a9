//! Dashboard KPIs.

use super::{SeaOrmStorage, db_error};
use crate::entity::payments;
use crate::errors::Result;
use crate::finance::{Period, round_money};
use crate::models::{
    financials::responses::DashboardStats, payments::entities::PaymentStatus,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QuerySelect};

impl SeaOrmStorage {
    /// Pending payments are those still `pending` with `due_date <= today`;
    /// their amount is the outstanding balance. Profit comes from the
    /// month's calculation and is zero until one has run.
    pub async fn dashboard_stats_impl(&self, today: NaiveDate) -> Result<DashboardStats> {
        let total_students = self.count_students_impl(None).await?;
        let total_courses = self.count_courses_impl().await?;
        let active_enrollments = self.count_active_enrollments_impl().await?;

        let pending: Vec<(Decimal, Decimal)> = payments::Entity::find()
            .select_only()
            .column(payments::Column::Amount)
            .column(payments::Column::AmountPaid)
            .filter(payments::Column::Status.eq(PaymentStatus::Pending.to_string()))
            .filter(payments::Column::DueDate.lte(today))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load pending payments"))?;

        let pending_payments_amount = round_money(
            pending
                .iter()
                .map(|(amount, paid)| (*amount - *paid).max(Decimal::ZERO))
                .sum(),
        );

        let period = Period::containing(today);
        let current_month_revenue = self.period_revenue_impl(period).await?;
        let current_month_profit = self
            .get_monthly_financial_by_period_impl(period)
            .await?
            .map(|m| m.gross_profit)
            .unwrap_or_default();

        Ok(DashboardStats {
            total_students: total_students as i64,
            total_courses: total_courses as i64,
            active_enrollments: active_enrollments as i64,
            pending_payments_count: pending.len() as i64,
            pending_payments_amount,
            current_month_revenue,
            current_month_profit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payments::requests::CreatePaymentRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    #[tokio::test]
    async fn test_pending_payments_due_by_today() {
        let storage = memory_storage().await;
        let student = storage
            .create_student_impl(CreateStudentRequest {
                full_name: "Nadia".into(),
                date_of_birth: None,
                gender: None,
                email: None,
                phone: None,
                address: None,
                parent_name: "Parent".into(),
                parent_phone: "+212600000040".into(),
                parent_email: None,
                education_level: None,
                school_name: None,
                registration_date: None,
                status: None,
                medical_notes: None,
                notes: None,
            })
            .await
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        for (amount, due) in [(300, 5), (200, 10), (999, 20)] {
            storage
                .create_payment_impl(CreatePaymentRequest {
                    student_id: student.id,
                    enrollment_id: None,
                    amount: Decimal::from(amount),
                    amount_paid: None,
                    payment_method: None,
                    due_date: NaiveDate::from_ymd_opt(2025, 3, due).unwrap(),
                    payment_date: None,
                    status: None,
                    transaction_reference: None,
                    notes: None,
                })
                .await
                .unwrap();
        }

        let stats = storage.dashboard_stats_impl(today).await.unwrap();
        assert_eq!(stats.total_students, 1);
        assert_eq!(stats.pending_payments_count, 2);
        assert_eq!(stats.pending_payments_amount, Decimal::from(500));
        assert_eq!(stats.current_month_revenue, Decimal::ZERO);
        assert_eq!(stats.current_month_profit, Decimal::ZERO);
    }
}
