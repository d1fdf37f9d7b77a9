use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::payment_plans::requests::{
    CreatePaymentPlanRequest, GenerateInstallmentsRequest, PaymentPlanListQuery,
    UpdatePaymentPlanRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::PaymentPlanService;
use crate::utils::SafeIDI64;

static PAYMENT_PLAN_SERVICE: Lazy<PaymentPlanService> = Lazy::new(PaymentPlanService::new_lazy);

pub async fn list_plans(
    req: HttpRequest,
    query: web::Query<PaymentPlanListQuery>,
) -> ActixResult<HttpResponse> {
    PAYMENT_PLAN_SERVICE
        .list_plans(query.into_inner(), &req)
        .await
}

pub async fn create_plan(
    req: HttpRequest,
    body: web::Json<CreatePaymentPlanRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_PLAN_SERVICE
        .create_plan(body.into_inner(), &req)
        .await
}

pub async fn get_plan(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PAYMENT_PLAN_SERVICE.get_plan(id.0, &req).await
}

pub async fn update_plan(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdatePaymentPlanRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_PLAN_SERVICE
        .update_plan(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_plan(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PAYMENT_PLAN_SERVICE.delete_plan(id.0, &req).await
}

pub async fn list_installments(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PAYMENT_PLAN_SERVICE.list_installments(id.0, &req).await
}

/// The body is optional; an empty request uses the defaults.
pub async fn generate_installments(
    req: HttpRequest,
    id: SafeIDI64,
    body: Option<web::Json<GenerateInstallmentsRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    PAYMENT_PLAN_SERVICE
        .generate_installments(id.0, body, &req)
        .await
}

pub fn configure_payment_plan_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/payment-plans")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::office_roles()))
                    .route("", web::get().to(list_plans))
                    .route("", web::post().to(create_plan))
                    .route("/{id}", web::get().to(get_plan))
                    .route("/{id}", web::put().to(update_plan))
                    .route("/{id}", web::delete().to(delete_plan))
                    .route("/{id}/installments", web::get().to(list_installments))
                    .route(
                        "/{id}/generate-installments",
                        web::post().to(generate_installments),
                    ),
            ),
    );
}
