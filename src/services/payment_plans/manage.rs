use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::PaymentPlanService;
use crate::finance::payments::installment_amount;
use crate::models::payment_plans::requests::{
    CreatePaymentPlanRequest, PaymentPlanListQuery, UpdatePaymentPlanRequest,
};
use crate::models::payment_plans::responses::PaymentPlanResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};

pub async fn list_plans(
    service: &PaymentPlanService,
    query: PaymentPlanListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_payment_plans_with_pagination(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Payment plan list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn create_plan(
    service: &PaymentPlanService,
    plan: CreatePaymentPlanRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = installment_amount(plan.total_amount, plan.number_of_installments) {
        return Ok(bad_request(ErrorCode::PaymentPlanInvalid, e.message()));
    }

    let storage = service.get_storage(request)?;

    match storage.get_student_by_id(plan.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(error_response(e)),
    }

    match storage.create_payment_plan(plan).await {
        Ok(plan) => {
            info!(
                "Payment plan {} created: {} in {} installments",
                plan.id, plan.total_amount, plan.number_of_installments
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                PaymentPlanResponse { plan },
                "Payment plan created successfully",
            )))
        }
        Err(e) => Ok(error_response_with(ErrorCode::PaymentPlanInvalid, e)),
    }
}

pub async fn get_plan(
    service: &PaymentPlanService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_payment_plan_by_id(id).await {
        Ok(Some(plan)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PaymentPlanResponse { plan },
            "Payment plan retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::PaymentPlanNotFound, "Payment plan not found")),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn update_plan(
    service: &PaymentPlanService,
    id: i64,
    update: UpdatePaymentPlanRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.update_payment_plan(id, update).await {
        Ok(Some(plan)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PaymentPlanResponse { plan },
            "Payment plan updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::PaymentPlanNotFound, "Payment plan not found")),
        Err(e) => Ok(error_response_with(ErrorCode::PaymentPlanInvalid, e)),
    }
}

pub async fn delete_plan(
    service: &PaymentPlanService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_payment_plan(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Payment plan deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::PaymentPlanNotFound, "Payment plan not found")),
        Err(e) => Ok(error_response(e)),
    }
}
