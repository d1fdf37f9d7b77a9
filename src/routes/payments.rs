use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::payments::requests::{
    CreatePaymentRequest, MarkPaidRequest, PaymentListQuery, UpdatePaymentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::PaymentService;
use crate::utils::SafeIDI64;

static PAYMENT_SERVICE: Lazy<PaymentService> = Lazy::new(PaymentService::new_lazy);

pub async fn list_payments(
    req: HttpRequest,
    query: web::Query<PaymentListQuery>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.list_payments(query.into_inner(), &req).await
}

pub async fn list_overdue(req: HttpRequest) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.list_overdue(&req).await
}

pub async fn create_payment(
    req: HttpRequest,
    body: web::Json<CreatePaymentRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.create_payment(body.into_inner(), &req).await
}

pub async fn get_payment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.get_payment(id.0, &req).await
}

pub async fn update_payment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdatePaymentRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .update_payment(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_payment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.delete_payment(id.0, &req).await
}

pub async fn mark_paid(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<MarkPaidRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .mark_paid(id.0, body.into_inner(), &req)
        .await
}

pub fn configure_payment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/payments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::office_roles()))
                    .route("/overdue", web::get().to(list_overdue))
                    .route("", web::get().to(list_payments))
                    .route("", web::post().to(create_payment))
                    .route("/{id}", web::get().to(get_payment))
                    .route("/{id}", web::put().to(update_payment))
                    .route(
                        "/{id}",
                        web::delete()
                            .to(delete_payment)
                            .wrap(middlewares::RequireRole::new_any(UserRole::management_roles())),
                    )
                    .route("/{id}/mark-paid", web::post().to(mark_paid)),
            ),
    );
}
