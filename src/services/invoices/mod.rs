pub mod manage;
pub mod pdf;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::invoices::requests::{
    CreateInvoiceRequest, InvoiceListQuery, UpdateInvoiceRequest,
};

super::storage_service!(InvoiceService);

impl InvoiceService {
    pub async fn list_invoices(
        &self,
        query: InvoiceListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::list_invoices(self, query, request).await
    }

    pub async fn create_invoice(
        &self,
        invoice: CreateInvoiceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_invoice(self, invoice, request).await
    }

    pub async fn get_invoice(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::get_invoice(self, id, request).await
    }

    pub async fn update_invoice(
        &self,
        id: i64,
        update: UpdateInvoiceRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_invoice(self, id, update, request).await
    }

    pub async fn delete_invoice(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::delete_invoice(self, id, request).await
    }

    pub async fn invoice_pdf(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        pdf::invoice_pdf(self, id, request).await
    }
}
