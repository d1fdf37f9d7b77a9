use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_decimal::Decimal;
use tracing::info;

use super::FinancialService;
use crate::errors::CoopError;
use crate::middlewares::RequireJWT;
use crate::models::financials::entities::ExpenseStatus;
use crate::models::financials::requests::{
    CreateExpenseRequest, ExpenseListQuery, UpdateExpenseRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};

fn check_amount(amount: Decimal) -> Result<(), HttpResponse> {
    if amount <= Decimal::ZERO {
        return Err(bad_request(
            ErrorCode::ExpenseInvalid,
            "Expense amount must be greater than zero",
        ));
    }
    Ok(())
}

pub async fn list_expenses(
    service: &FinancialService,
    query: ExpenseListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_expenses(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Expenses retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn create_expense(
    service: &FinancialService,
    body: CreateExpenseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if body.description.trim().is_empty() {
        return Ok(bad_request(ErrorCode::ExpenseInvalid, "Description is required"));
    }
    if let Err(resp) = check_amount(body.amount) {
        return Ok(resp);
    }
    let storage = service.get_storage(request)?;

    match storage.create_expense(body).await {
        Ok(expense) => {
            info!(
                "Expense {} recorded: {} ({})",
                expense.id, expense.amount, expense.category
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                expense,
                "Expense created successfully",
            )))
        }
        Err(e) => Ok(error_response_with(ErrorCode::ExpenseInvalid, e)),
    }
}

pub async fn get_expense(
    service: &FinancialService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_expense_by_id(id).await {
        Ok(Some(expense)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            expense,
            "Expense retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ExpenseNotFound, "Expense not found")),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn update_expense(
    service: &FinancialService,
    id: i64,
    body: UpdateExpenseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(amount) = body.amount
        && let Err(resp) = check_amount(amount)
    {
        return Ok(resp);
    }
    let storage = service.get_storage(request)?;

    match storage.update_expense(id, body).await {
        Ok(Some(expense)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            expense,
            "Expense updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ExpenseNotFound, "Expense not found")),
        Err(e) => Ok(error_response_with(ErrorCode::ExpenseInvalid, e)),
    }
}

pub async fn delete_expense(
    service: &FinancialService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_expense(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Expense deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::ExpenseNotFound, "Expense not found")),
        Err(e) => Ok(error_response(e)),
    }
}

/// The caller is recorded as approver.
pub async fn transition_expense(
    service: &FinancialService,
    id: i64,
    next: ExpenseStatus,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let actor = RequireJWT::extract_user_id(request);

    match storage.transition_expense(id, next, actor).await {
        Ok(Some(expense)) => {
            info!("Expense {} is now {}", expense.id, expense.status);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                expense,
                format!("Expense marked {next}"),
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::ExpenseNotFound, "Expense not found")),
        Err(e @ CoopError::Conflict(_)) => {
            Ok(error_response_with(ErrorCode::StatusTransitionInvalid, e))
        }
        Err(e) => Ok(error_response(e)),
    }
}

#[cfg(test)]
mod tests {
    use crate::models::financials::requests::CreateExpenseRequest;
    use crate::services::FinancialService;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{http::StatusCode, test::TestRequest};
    use serde_json::json;
    use std::sync::Arc;

    fn expense(amount: &str) -> CreateExpenseRequest {
        serde_json::from_value(json!({
            "category": "rent",
            "description": "January rent",
            "amount": amount,
            "expense_date": "2025-01-03",
        }))
        .unwrap()
    }

    #[actix_web::test]
    async fn test_expense_workflow() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = FinancialService::with_storage(storage.clone());
        let req = TestRequest::default().to_http_request();

        let resp = service.create_expense(expense("0"), &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = service.create_expense(expense("2500"), &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let id = storage
            .list_expenses(Default::default())
            .await
            .unwrap()
            .items[0]
            .id;

        // paying requires approval first
        let resp = service.pay_expense(id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = service.approve_expense(id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = service.pay_expense(id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let stored = storage.get_expense_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.period_month.to_string(), "2025-01-01");

        let resp = service.reject_expense(id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let resp = service.reject_expense(id + 1, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
