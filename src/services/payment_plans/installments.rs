use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::PaymentPlanService;
use crate::errors::CoopError;
use crate::models::payment_plans::requests::GenerateInstallmentsRequest;
use crate::models::payment_plans::responses::InstallmentsResponse;
use crate::models::payments::entities::PaymentMethod;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, error_response_with, not_found};

pub async fn list_installments(
    service: &PaymentPlanService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_payment_plan_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(not_found(ErrorCode::PaymentPlanNotFound, "Payment plan not found"));
        }
        Err(e) => return Ok(error_response(e)),
    }

    match storage.list_plan_installments(id).await {
        Ok(installments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            InstallmentsResponse {
                plan_id: id,
                installments,
            },
            "Installments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

/// Splits the plan into pending payments due every 30 days.
pub async fn generate_installments(
    service: &PaymentPlanService,
    id: i64,
    body: GenerateInstallmentsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let method = body.payment_method.unwrap_or(PaymentMethod::Cash);

    match storage.generate_installments(id, method).await {
        Ok(Some(installments)) => {
            info!("Generated {} installments for plan {}", installments.len(), id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                InstallmentsResponse {
                    plan_id: id,
                    installments,
                },
                "Installments generated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::PaymentPlanNotFound, "Payment plan not found")),
        Err(e @ CoopError::Conflict(_)) => Ok(error_response_with(
            ErrorCode::InstallmentsAlreadyGenerated,
            e,
        )),
        Err(e) => Ok(error_response_with(ErrorCode::PaymentPlanInvalid, e)),
    }
}

#[cfg(test)]
mod tests {
    use crate::models::payment_plans::requests::{
        CreatePaymentPlanRequest, GenerateInstallmentsRequest,
    };
    use crate::models::students::requests::CreateStudentRequest;
    use crate::services::PaymentPlanService;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{http::StatusCode, test::TestRequest};
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_generate_installments_once() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = PaymentPlanService::with_storage(storage.clone());
        let req = TestRequest::default().to_http_request();

        let student: CreateStudentRequest = serde_json::from_value(json!({
            "full_name": "Salma Tazi",
            "parent_name": "Nadia Tazi",
            "parent_phone": "+212600000007",
        }))
        .unwrap();
        let student_id = storage.create_student(student).await.unwrap().id;

        let invalid: CreatePaymentPlanRequest = serde_json::from_value(json!({
            "student_id": student_id,
            "total_amount": "1000",
            "number_of_installments": 0,
            "start_date": "2025-01-01",
        }))
        .unwrap();
        let resp = service.create_plan(invalid, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        for (total, count) in [("1000", 121), ("1000000000", 3_300_000), ("0.05", 10)] {
            let rejected: CreatePaymentPlanRequest = serde_json::from_value(json!({
                "student_id": student_id,
                "total_amount": total,
                "number_of_installments": count,
                "start_date": "2025-01-01",
            }))
            .unwrap();
            let resp = service.create_plan(rejected.clone(), &req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert!(storage.create_payment_plan(rejected).await.is_err());
        }

        let plan: CreatePaymentPlanRequest = serde_json::from_value(json!({
            "student_id": student_id,
            "total_amount": "1000",
            "number_of_installments": 3,
            "start_date": "2025-01-01",
        }))
        .unwrap();
        let resp = service.create_plan(plan, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let plan_id = storage
            .list_payment_plans_with_pagination(Default::default())
            .await
            .unwrap()
            .items[0]
            .id;

        let resp = service
            .generate_installments(plan_id, GenerateInstallmentsRequest::default(), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let installments = storage.list_plan_installments(plan_id).await.unwrap();
        assert_eq!(installments.len(), 3);
        let sum: Decimal = installments.iter().map(|p| p.amount).sum();
        assert_eq!(sum, Decimal::from(1000));

        let resp = service
            .generate_installments(plan_id, GenerateInstallmentsRequest::default(), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = service
            .generate_installments(plan_id + 1, GenerateInstallmentsRequest::default(), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
