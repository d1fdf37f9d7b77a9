use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::invoices::requests::{
    CreateInvoiceRequest, InvoiceListQuery, UpdateInvoiceRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::InvoiceService;
use crate::utils::SafeIDI64;

static INVOICE_SERVICE: Lazy<InvoiceService> = Lazy::new(InvoiceService::new_lazy);

pub async fn list_invoices(
    req: HttpRequest,
    query: web::Query<InvoiceListQuery>,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.list_invoices(query.into_inner(), &req).await
}

pub async fn create_invoice(
    req: HttpRequest,
    body: web::Json<CreateInvoiceRequest>,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.create_invoice(body.into_inner(), &req).await
}

pub async fn get_invoice(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.get_invoice(id.0, &req).await
}

pub async fn update_invoice(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateInvoiceRequest>,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE
        .update_invoice(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_invoice(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.delete_invoice(id.0, &req).await
}

pub async fn invoice_pdf(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.invoice_pdf(id.0, &req).await
}

pub fn configure_invoice_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/invoices")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::office_roles()))
                    .route("", web::get().to(list_invoices))
                    .route("", web::post().to(create_invoice))
                    .route("/{id}", web::get().to(get_invoice))
                    .route("/{id}", web::put().to(update_invoice))
                    .route("/{id}", web::delete().to(delete_invoice))
                    .route("/{id}/pdf", web::get().to(invoice_pdf)),
            ),
    );
}
