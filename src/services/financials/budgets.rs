use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_decimal::Decimal;

use super::FinancialService;
use crate::errors::CoopError;
use crate::models::financials::requests::{
    BudgetListQuery, CreateBudgetRequest, UpdateBudgetRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};

const NEGATIVE_ALLOCATION: &str = "Allocated amount cannot be negative";

pub async fn list_budgets(
    service: &FinancialService,
    query: BudgetListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_budgets(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Budgets retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

/// One allocation per period and category.
pub async fn create_budget(
    service: &FinancialService,
    body: CreateBudgetRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if body.allocated_amount < Decimal::ZERO {
        return Ok(bad_request(ErrorCode::BudgetInvalid, NEGATIVE_ALLOCATION));
    }
    let storage = service.get_storage(request)?;

    match storage.create_budget(body).await {
        Ok(budget) => Ok(HttpResponse::Created().json(ApiResponse::success(
            budget,
            "Budget created successfully",
        ))),
        Err(e @ CoopError::Conflict(_)) => Ok(error_response(e)),
        Err(e) => Ok(error_response_with(ErrorCode::BudgetInvalid, e)),
    }
}

pub async fn get_budget(
    service: &FinancialService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_budget_by_id(id).await {
        Ok(Some(budget)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            budget,
            "Budget retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::BudgetNotFound, "Budget not found")),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn update_budget(
    service: &FinancialService,
    id: i64,
    body: UpdateBudgetRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if body.allocated_amount.is_some_and(|a| a < Decimal::ZERO) {
        return Ok(bad_request(ErrorCode::BudgetInvalid, NEGATIVE_ALLOCATION));
    }
    let storage = service.get_storage(request)?;

    match storage.update_budget(id, body).await {
        Ok(Some(budget)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            budget,
            "Budget updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::BudgetNotFound, "Budget not found")),
        Err(e) => Ok(error_response_with(ErrorCode::BudgetInvalid, e)),
    }
}

pub async fn delete_budget(
    service: &FinancialService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_budget(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Budget deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::BudgetNotFound, "Budget not found")),
        Err(e) => Ok(error_response(e)),
    }
}
