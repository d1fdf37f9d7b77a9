use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::financials::requests::{
    BudgetListQuery, CalculateInstructorPaymentsRequest, CalculateMonthlyProfitRequest,
    CreateBudgetRequest, CreateExpenseRequest, DistributionListQuery, ExpenseListQuery,
    FinalizePeriodRequest, InstructorPaymentListQuery, MonthlyFinancialListQuery,
    PayDistributionRequest, PayInstructorRequest, PeriodQuery, UpdateBudgetRequest,
    UpdateExpenseRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::FinancialService;
use crate::utils::SafeIDI64;

static FINANCIAL_SERVICE: Lazy<FinancialService> = Lazy::new(FinancialService::new_lazy);

// Calculations

pub async fn calculate_instructor_payments(
    req: HttpRequest,
    body: web::Json<CalculateInstructorPaymentsRequest>,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE
        .calculate_instructor_payments(body.into_inner(), &req)
        .await
}

pub async fn calculate_monthly_profit(
    req: HttpRequest,
    body: web::Json<CalculateMonthlyProfitRequest>,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE
        .calculate_monthly_profit(body.into_inner(), &req)
        .await
}

pub async fn summary(
    req: HttpRequest,
    query: web::Query<PeriodQuery>,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.summary(query.into_inner(), &req).await
}

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.dashboard(&req).await
}

// Instructor payroll

pub async fn list_instructor_payments(
    req: HttpRequest,
    query: web::Query<InstructorPaymentListQuery>,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE
        .list_instructor_payments(query.into_inner(), &req)
        .await
}

pub async fn approve_instructor_payment(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE
        .approve_instructor_payment(id.0, &req)
        .await
}

pub async fn pay_instructor_payment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<PayInstructorRequest>,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE
        .pay_instructor_payment(id.0, body.into_inner(), &req)
        .await
}

pub async fn cancel_instructor_payment(
    req: HttpRequest,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.cancel_instructor_payment(id.0, &req).await
}

// Monthly results and distributions

pub async fn list_monthly(
    req: HttpRequest,
    query: web::Query<MonthlyFinancialListQuery>,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.list_monthly(query.into_inner(), &req).await
}

pub async fn get_monthly(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.get_monthly(id.0, &req).await
}

pub async fn monthly_distributions(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.monthly_distributions(id.0, &req).await
}

pub async fn finalize_monthly(
    req: HttpRequest,
    id: SafeIDI64,
    body: Option<web::Json<FinalizePeriodRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    FINANCIAL_SERVICE.finalize_monthly(id.0, body, &req).await
}

pub async fn list_distributions(
    req: HttpRequest,
    query: web::Query<DistributionListQuery>,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE
        .list_distributions(query.into_inner(), &req)
        .await
}

pub async fn approve_distribution(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.approve_distribution(id.0, &req).await
}

pub async fn pay_distribution(
    req: HttpRequest,
    id: SafeIDI64,
    body: Option<web::Json<PayDistributionRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    FINANCIAL_SERVICE.pay_distribution(id.0, body, &req).await
}

// Expenses

pub async fn list_expenses(
    req: HttpRequest,
    query: web::Query<ExpenseListQuery>,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.list_expenses(query.into_inner(), &req).await
}

pub async fn create_expense(
    req: HttpRequest,
    body: web::Json<CreateExpenseRequest>,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.create_expense(body.into_inner(), &req).await
}

pub async fn get_expense(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.get_expense(id.0, &req).await
}

pub async fn update_expense(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateExpenseRequest>,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE
        .update_expense(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_expense(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.delete_expense(id.0, &req).await
}

pub async fn approve_expense(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.approve_expense(id.0, &req).await
}

pub async fn reject_expense(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.reject_expense(id.0, &req).await
}

pub async fn pay_expense(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.pay_expense(id.0, &req).await
}

// Budgets

pub async fn list_budgets(
    req: HttpRequest,
    query: web::Query<BudgetListQuery>,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.list_budgets(query.into_inner(), &req).await
}

pub async fn create_budget(
    req: HttpRequest,
    body: web::Json<CreateBudgetRequest>,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.create_budget(body.into_inner(), &req).await
}

pub async fn get_budget(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.get_budget(id.0, &req).await
}

pub async fn update_budget(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateBudgetRequest>,
) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE
        .update_budget(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_budget(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FINANCIAL_SERVICE.delete_budget(id.0, &req).await
}

pub fn configure_financial_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/financials")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::management_roles()))
                    .route(
                        "/calculate-instructor-payments",
                        web::post()
                            .to(calculate_instructor_payments)
                            .wrap(middlewares::RateLimit::job_trigger()),
                    )
                    .route(
                        "/calculate-monthly-profit",
                        web::post()
                            .to(calculate_monthly_profit)
                            .wrap(middlewares::RateLimit::job_trigger()),
                    )
                    .route("/summary", web::get().to(summary))
                    .route("/dashboard", web::get().to(dashboard))
                    .service(
                        web::scope("/instructor-payments")
                            .route("", web::get().to(list_instructor_payments))
                            .route("/{id}/approve", web::post().to(approve_instructor_payment))
                            .route("/{id}/pay", web::post().to(pay_instructor_payment))
                            .route("/{id}/cancel", web::post().to(cancel_instructor_payment)),
                    )
                    .service(
                        web::scope("/monthly")
                            .route("", web::get().to(list_monthly))
                            .route("/{id}", web::get().to(get_monthly))
                            .route("/{id}/distributions", web::get().to(monthly_distributions))
                            .route("/{id}/finalize", web::post().to(finalize_monthly)),
                    )
                    .service(
                        web::scope("/distributions")
                            .route("", web::get().to(list_distributions))
                            .route("/{id}/approve", web::post().to(approve_distribution))
                            .route("/{id}/pay", web::post().to(pay_distribution)),
                    )
                    .service(
                        web::scope("/expenses")
                            .route("", web::get().to(list_expenses))
                            .route("", web::post().to(create_expense))
                            .route("/{id}", web::get().to(get_expense))
                            .route("/{id}", web::put().to(update_expense))
                            .route("/{id}", web::delete().to(delete_expense))
                            .route("/{id}/approve", web::post().to(approve_expense))
                            .route("/{id}/reject", web::post().to(reject_expense))
                            .route("/{id}/pay", web::post().to(pay_expense)),
                    )
                    .service(
                        web::scope("/budgets")
                            .route("", web::get().to(list_budgets))
                            .route("", web::post().to(create_budget))
                            .route("/{id}", web::get().to(get_budget))
                            .route("/{id}", web::put().to(update_budget))
                            .route("/{id}", web::delete().to(delete_budget)),
                    ),
            ),
    );
}
