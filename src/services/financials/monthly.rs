use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{FinancialService, invalidate_dashboard};
use crate::errors::CoopError;
use crate::jobs::finalize_period;
use crate::models::financials::entities::DistributionStatus;
use crate::models::financials::requests::{
    DistributionListQuery, FinalizePeriodRequest, MonthlyFinancialListQuery,
    PayDistributionRequest, PaymentDetails,
};
use crate::models::financials::responses::MonthlyFinancialResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, error_response_with, not_found};

pub async fn list_monthly(
    service: &FinancialService,
    query: MonthlyFinancialListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_monthly_financials(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Monthly financials retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn get_monthly(
    service: &FinancialService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let monthly = match storage.get_monthly_financial_by_id(id).await {
        Ok(Some(monthly)) => monthly,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::FinancialPeriodNotFound,
                "Monthly financial record not found",
            ));
        }
        Err(e) => return Ok(error_response(e)),
    };

    match storage.list_monthly_distributions(id).await {
        Ok(distributions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MonthlyFinancialResponse {
                monthly,
                distributions,
            },
            "Monthly financial record retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn monthly_distributions(
    service: &FinancialService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_monthly_financial_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::FinancialPeriodNotFound,
                "Monthly financial record not found",
            ));
        }
        Err(e) => return Ok(error_response(e)),
    }

    match storage.list_monthly_distributions(id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Distributions retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

/// Locks the period against recalculation. Waits for a running calculation
/// of the same period.
pub async fn finalize_monthly(
    service: &FinancialService,
    id: i64,
    body: FinalizePeriodRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match finalize_period(&storage, id, body.notes).await {
        Ok(Some(monthly)) => {
            info!("Financial period {} finalized", monthly.period_month);
            invalidate_dashboard(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                monthly,
                "Financial period finalized successfully",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::FinancialPeriodNotFound,
            "Monthly financial record not found",
        )),
        Err(e @ CoopError::Conflict(_)) => {
            Ok(error_response_with(ErrorCode::FinancialPeriodFinalized, e))
        }
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn list_distributions(
    service: &FinancialService,
    query: DistributionListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_distributions(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Distributions retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn transition_distribution(
    service: &FinancialService,
    id: i64,
    next: DistributionStatus,
    pay: Option<PayDistributionRequest>,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let details = pay
        .map(|p| PaymentDetails {
            payment_date: p.payment_date,
            payment_method: None,
            payment_reference: p.payment_reference,
        })
        .unwrap_or_default();

    match storage.transition_distribution(id, next, details).await {
        Ok(Some(distribution)) => {
            info!(
                "Distribution {} to member {} is now {}",
                distribution.id, distribution.member_id, distribution.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                distribution,
                format!("Distribution marked {next}"),
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::DistributionNotFound, "Distribution not found")),
        Err(e @ CoopError::Conflict(_)) => {
            Ok(error_response_with(ErrorCode::StatusTransitionInvalid, e))
        }
        Err(e) => Ok(error_response(e)),
    }
}
