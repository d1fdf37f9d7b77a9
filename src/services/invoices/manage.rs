use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_decimal::Decimal;
use tracing::info;

use super::InvoiceService;
use crate::finance::payments::invoice_total;
use crate::models::invoices::requests::{
    CreateInvoiceRequest, InvoiceListQuery, UpdateInvoiceRequest,
};
use crate::models::invoices::responses::InvoiceResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};
use crate::utils::validate::validate_invoice_number;

pub async fn list_invoices(
    service: &InvoiceService,
    query: InvoiceListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_invoices_with_pagination(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Invoice list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn create_invoice(
    service: &InvoiceService,
    invoice: CreateInvoiceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = invoice_total(
        invoice.subtotal,
        invoice.discount.unwrap_or(Decimal::ZERO),
        invoice.tax.unwrap_or(Decimal::ZERO),
    ) {
        return Ok(bad_request(ErrorCode::InvoiceInvalid, e.message()));
    }
    if let Some(number) = invoice.invoice_number.as_deref().filter(|n| !n.trim().is_empty())
        && let Err(msg) = validate_invoice_number(number)
    {
        return Ok(bad_request(ErrorCode::InvoiceInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    match storage.get_student_by_id(invoice.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(error_response(e)),
    }

    match storage.create_invoice(invoice).await {
        Ok(invoice) => {
            info!("Issued invoice {} ({})", invoice.invoice_number, invoice.total);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                InvoiceResponse { invoice },
                "Invoice created successfully",
            )))
        }
        Err(e) => Ok(error_response_with(ErrorCode::InvoiceInvalid, e)),
    }
}

pub async fn get_invoice(
    service: &InvoiceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_invoice_by_id(id).await {
        Ok(Some(invoice)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            InvoiceResponse { invoice },
            "Invoice retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::InvoiceNotFound, "Invoice not found")),
        Err(e) => Ok(error_response(e)),
    }
}

/// The total is recomputed by storage from the merged amounts.
pub async fn update_invoice(
    service: &InvoiceService,
    id: i64,
    update: UpdateInvoiceRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.update_invoice(id, update).await {
        Ok(Some(invoice)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            InvoiceResponse { invoice },
            "Invoice updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::InvoiceNotFound, "Invoice not found")),
        Err(e) => Ok(error_response_with(ErrorCode::InvoiceInvalid, e)),
    }
}

pub async fn delete_invoice(
    service: &InvoiceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_invoice(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Invoice deleted successfully"))),
        Ok(false) => Ok(not_found(ErrorCode::InvoiceNotFound, "Invoice not found")),
        Err(e) => Ok(error_response(e)),
    }
}
