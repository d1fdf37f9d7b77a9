use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{FinancialService, invalidate_dashboard};
use crate::errors::CoopError;
use crate::finance::Period;
use crate::finance::money::validate_percentage;
use crate::jobs::financials;
use crate::models::financials::requests::{
    CalculateInstructorPaymentsRequest, CalculateMonthlyProfitRequest,
};
use crate::models::financials::responses::{
    InstructorPaymentsCalculationResponse, MonthlyProfitResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with};

fn required_period(raw: Option<&str>) -> Result<Period, HttpResponse> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Period::parse(raw)
            .map_err(|e| bad_request(ErrorCode::FinancialPeriodInvalid, e.message())),
        None => Err(bad_request(
            ErrorCode::FinancialPeriodInvalid,
            "period_month is required (YYYY-MM-DD)",
        )),
    }
}

fn calculation_failed(e: CoopError) -> HttpResponse {
    match e {
        CoopError::PeriodFinalized(_) | CoopError::Validation(_) => error_response(e),
        e => error_response_with(ErrorCode::FinancialCalculationFailed, e),
    }
}

pub async fn calculate_instructor_payments(
    service: &FinancialService,
    body: CalculateInstructorPaymentsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let period = match required_period(body.period_month.as_deref()) {
        Ok(period) => period,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    match financials::calculate_instructor_payments(&storage, period).await {
        Ok(payments) => {
            invalidate_dashboard(request).await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                InstructorPaymentsCalculationResponse {
                    message: format!("Instructor payments calculated for {}", period.label()),
                    period: period.to_string(),
                    payments_count: payments.len() as i64,
                    payments,
                },
                "Instructor payments calculated successfully",
            )))
        }
        Err(e) => Ok(calculation_failed(e)),
    }
}

pub async fn calculate_monthly_profit(
    service: &FinancialService,
    body: CalculateMonthlyProfitRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let period = match required_period(body.period_month.as_deref()) {
        Ok(period) => period,
        Err(resp) => return Ok(resp),
    };
    if let Some(pct) = body.retained_earnings_percentage
        && !validate_percentage(pct)
    {
        return Ok(bad_request(
            ErrorCode::FinancialPeriodInvalid,
            "retained_earnings_percentage must be between 0 and 100",
        ));
    }
    let storage = service.get_storage(request)?;

    match financials::calculate_monthly_profit(&storage, period, body.retained_earnings_percentage)
        .await
    {
        Ok((summary, distributions)) => {
            invalidate_dashboard(request).await;
            Ok(HttpResponse::Created().json(ApiResponse::success(
                MonthlyProfitResponse {
                    message: format!("Monthly profit calculated for {}", period.label()),
                    period: period.to_string(),
                    summary,
                    distributions,
                },
                "Monthly profit calculated successfully",
            )))
        }
        Err(e) => Ok(calculation_failed(e)),
    }
}

#[cfg(test)]
mod tests {
    use crate::models::financials::requests::{
        CalculateInstructorPaymentsRequest, CalculateMonthlyProfitRequest, FinalizePeriodRequest,
        PeriodQuery,
    };
    use crate::services::FinancialService;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{body::to_bytes, http::StatusCode, test::TestRequest};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_period_lifecycle() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = FinancialService::with_storage(storage.clone());
        let req = TestRequest::default().to_http_request();

        let resp = service
            .calculate_instructor_payments(CalculateInstructorPaymentsRequest::default(), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = service
            .calculate_instructor_payments(
                CalculateInstructorPaymentsRequest {
                    period_month: Some("2025-13-01".into()),
                },
                &req,
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let query = PeriodQuery {
            period_month: Some("2025-01-01".into()),
        };
        let resp = service.summary(query.clone(), &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = service
            .calculate_monthly_profit(
                CalculateMonthlyProfitRequest {
                    period_month: Some("2025-01-01".into()),
                    retained_earnings_percentage: Some(Decimal::from(150)),
                },
                &req,
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = CalculateMonthlyProfitRequest {
            period_month: Some("2025-01-01".into()),
            retained_earnings_percentage: Some(Decimal::from(20)),
        };
        let resp = service.calculate_monthly_profit(body.clone(), &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = service.summary(query, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value =
            serde_json::from_slice(&to_bytes(resp.into_body()).await.unwrap()).unwrap();
        assert_eq!(json["data"]["period"], "January 2025");
        assert_eq!(json["data"]["is_finalized"], false);

        let monthly = storage
            .list_monthly_financials(Default::default())
            .await
            .unwrap()
            .items
            .remove(0);
        let resp = service
            .finalize_monthly(monthly.id, FinalizePeriodRequest::default(), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = service.calculate_monthly_profit(body, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let resp = service
            .finalize_monthly(monthly.id, FinalizePeriodRequest::default(), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
