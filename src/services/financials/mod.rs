//! Payroll, profit sharing, expenses and budgets.

pub mod budgets;
pub mod calculate;
pub mod expenses;
pub mod monthly;
pub mod payroll;
pub mod summary;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::cache::{DASHBOARD_KEY, ObjectCache};
use crate::models::financials::entities::{DistributionStatus, ExpenseStatus, InstructorPaymentStatus};
use crate::models::financials::requests::{
    BudgetListQuery, CalculateInstructorPaymentsRequest, CalculateMonthlyProfitRequest,
    CreateBudgetRequest, CreateExpenseRequest, DistributionListQuery, ExpenseListQuery,
    FinalizePeriodRequest, InstructorPaymentListQuery, MonthlyFinancialListQuery,
    PayDistributionRequest, PayInstructorRequest, PeriodQuery, UpdateBudgetRequest,
    UpdateExpenseRequest,
};

super::storage_service!(FinancialService);

/// Cache registered as app data, if any.
pub(crate) fn request_cache(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

/// Drops the dashboard snapshot after figures it aggregates have changed.
pub(crate) async fn invalidate_dashboard(request: &HttpRequest) {
    if let Some(cache) = request_cache(request) {
        cache.remove(DASHBOARD_KEY).await;
    }
}

impl FinancialService {
    pub async fn calculate_instructor_payments(
        &self,
        body: CalculateInstructorPaymentsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        calculate::calculate_instructor_payments(self, body, request).await
    }

    pub async fn calculate_monthly_profit(
        &self,
        body: CalculateMonthlyProfitRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        calculate::calculate_monthly_profit(self, body, request).await
    }

    pub async fn summary(&self, query: PeriodQuery, request: &HttpRequest) -> ActixResult<HttpResponse> {
        summary::summary(self, query, request).await
    }

    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        summary::dashboard(self, request).await
    }

    // Instructor payments

    pub async fn list_instructor_payments(
        &self,
        query: InstructorPaymentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        payroll::list_instructor_payments(self, query, request).await
    }

    pub async fn approve_instructor_payment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        payroll::transition(self, id, InstructorPaymentStatus::Approved, None, request).await
    }

    pub async fn pay_instructor_payment(
        &self,
        id: i64,
        body: PayInstructorRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        payroll::transition(self, id, InstructorPaymentStatus::Paid, Some(body), request).await
    }

    pub async fn cancel_instructor_payment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        payroll::transition(self, id, InstructorPaymentStatus::Cancelled, None, request).await
    }

    // Monthly periods and distributions

    pub async fn list_monthly(
        &self,
        query: MonthlyFinancialListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        monthly::list_monthly(self, query, request).await
    }

    pub async fn get_monthly(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        monthly::get_monthly(self, id, request).await
    }

    pub async fn monthly_distributions(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        monthly::monthly_distributions(self, id, request).await
    }

    pub async fn finalize_monthly(
        &self,
        id: i64,
        body: FinalizePeriodRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        monthly::finalize_monthly(self, id, body, request).await
    }

    pub async fn list_distributions(
        &self,
        query: DistributionListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        monthly::list_distributions(self, query, request).await
    }

    pub async fn approve_distribution(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        monthly::transition_distribution(self, id, DistributionStatus::Approved, None, request)
            .await
    }

    pub async fn pay_distribution(
        &self,
        id: i64,
        body: PayDistributionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        monthly::transition_distribution(self, id, DistributionStatus::Paid, Some(body), request)
            .await
    }

    // Expenses

    pub async fn list_expenses(
        &self,
        query: ExpenseListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        expenses::list_expenses(self, query, request).await
    }

    pub async fn create_expense(
        &self,
        body: CreateExpenseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        expenses::create_expense(self, body, request).await
    }

    pub async fn get_expense(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        expenses::get_expense(self, id, request).await
    }

    pub async fn update_expense(
        &self,
        id: i64,
        body: UpdateExpenseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        expenses::update_expense(self, id, body, request).await
    }

    pub async fn delete_expense(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        expenses::delete_expense(self, id, request).await
    }

    pub async fn approve_expense(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        expenses::transition_expense(self, id, ExpenseStatus::Approved, request).await
    }

    pub async fn reject_expense(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        expenses::transition_expense(self, id, ExpenseStatus::Rejected, request).await
    }

    pub async fn pay_expense(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        expenses::transition_expense(self, id, ExpenseStatus::Paid, request).await
    }

    // Budgets

    pub async fn list_budgets(
        &self,
        query: BudgetListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        budgets::list_budgets(self, query, request).await
    }

    pub async fn create_budget(
        &self,
        body: CreateBudgetRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        budgets::create_budget(self, body, request).await
    }

    pub async fn get_budget(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        budgets::get_budget(self, id, request).await
    }

    pub async fn update_budget(
        &self,
        id: i64,
        body: UpdateBudgetRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        budgets::update_budget(self, id, body, request).await
    }

    pub async fn delete_budget(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        budgets::delete_budget(self, id, request).await
    }
}
