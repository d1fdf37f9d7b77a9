use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::{FinancialService, request_cache};
use crate::cache::{DASHBOARD_KEY, DASHBOARD_TTL};
use crate::finance::profit::profit_margin;
use crate::finance::{Period, today};
use crate::models::financials::requests::PeriodQuery;
use crate::models::financials::responses::{DashboardStats, FinancialSummaryResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, not_found};

/// Figures of one calculated period; the current month when none is given.
pub async fn summary(
    service: &FinancialService,
    query: PeriodQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let period = match query.period_month.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => match Period::parse(raw) {
            Ok(period) => period,
            Err(e) => return Ok(bad_request(ErrorCode::FinancialPeriodInvalid, e.message())),
        },
        None => Period::containing(today()),
    };
    let storage = service.get_storage(request)?;

    match storage.get_monthly_financial_by_period(period).await {
        Ok(Some(m)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            FinancialSummaryResponse {
                period: period.label(),
                profit_margin: profit_margin(m.gross_profit, m.total_revenue),
                total_revenue: m.total_revenue,
                total_expenses: m.total_expenses,
                gross_profit: m.gross_profit,
                retained_earnings: m.retained_earnings,
                distributable_profit: m.distributable_profit,
                is_finalized: m.is_finalized,
            },
            "Financial summary retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::FinancialPeriodNotFound,
            &format!("No financial data for {}", period.label()),
        )),
        Err(e) => Ok(error_response(e)),
    }
}

/// KPI snapshot, served from cache for a short while.
pub async fn dashboard(service: &FinancialService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let cache = request_cache(request);
    if let Some(cache) = &cache
        && let Some(stats) = cache.get_json::<DashboardStats>(DASHBOARD_KEY).await
    {
        debug!("Dashboard served from cache");
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Dashboard retrieved successfully",
        )));
    }

    let storage = service.get_storage(request)?;
    match storage.dashboard_stats(today()).await {
        Ok(stats) => {
            if let Some(cache) = &cache {
                cache
                    .insert_json(DASHBOARD_KEY.to_string(), &stats, DASHBOARD_TTL)
                    .await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                stats,
                "Dashboard retrieved successfully",
            )))
        }
        Err(e) => Ok(error_response(e)),
    }
}
