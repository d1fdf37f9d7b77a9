use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaymentService;
use crate::finance::today;
use crate::models::ApiResponse;
use crate::models::payments::requests::PaymentListQuery;
use crate::models::payments::responses::OverduePaymentsResponse;
use crate::services::error_response;

pub async fn list_payments(
    service: &PaymentService,
    query: PaymentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_payments_with_pagination(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Payment list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

/// Open payments whose due date has passed, oldest first.
pub async fn list_overdue(
    service: &PaymentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_overdue_payments(today()).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            OverduePaymentsResponse {
                total: items.len() as i64,
                items,
            },
            "Overdue payments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
