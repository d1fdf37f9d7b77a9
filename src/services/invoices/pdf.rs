//! Invoice documents.
//!
//! Rendering is a pure function of [`InvoiceDocument`]; the handler gathers
//! the data, writes the file under `documents.dir` and records its path.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use tracing::{error, info};

use super::InvoiceService;
use crate::config::AppConfig;
use crate::errors::{CoopError, Result};
use crate::models::invoices::entities::Invoice;
use crate::models::students::entities::Student;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::system::DynamicConfig;
use crate::services::{error_response, not_found};

/// Everything printed on an invoice.
#[derive(Debug, Clone)]
pub struct InvoiceDocument {
    pub cooperative_name: String,
    pub cooperative_address: String,
    pub cooperative_phone: String,
    pub cooperative_email: String,
    pub currency: String,
    pub invoice: Invoice,
    pub student_name: String,
    pub parent_name: String,
    pub parent_phone: String,
    /// Description of the single billed line
    pub line_label: String,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn render_error(e: impl std::fmt::Display) -> CoopError {
    CoopError::document_render(format!("Failed to render invoice: {e}"))
}

fn money(amount: Decimal, currency: &str) -> String {
    format!("{:.2} {}", amount.round_dp(2), currency)
}

fn text(layer: &PdfLayerReference, value: &str, size: f32, x: f32, y: f32, font: &IndirectFontRef) {
    layer.use_text(value, size, Mm(x), Mm(y), font);
}

/// Renders a one-page A4 invoice.
pub fn render_invoice(doc: &InvoiceDocument) -> Result<Vec<u8>> {
    let invoice = &doc.invoice;
    let title = format!("Invoice {}", invoice.invoice_number);
    let (pdf, page, layer) = PdfDocument::new(&title, Mm(210.0), Mm(297.0), "invoice");
    let fonts = Fonts {
        regular: pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_error)?,
        bold: pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_error)?,
    };
    let layer = pdf.get_page(page).get_layer(layer);

    // cooperative header
    text(&layer, &doc.cooperative_name, 18.0, 20.0, 272.0, &fonts.bold);
    let contact = [
        doc.cooperative_address.as_str(),
        doc.cooperative_phone.as_str(),
        doc.cooperative_email.as_str(),
    ];
    let mut y = 264.0;
    for line in contact.iter().filter(|l| !l.trim().is_empty()) {
        text(&layer, line, 10.0, 20.0, y, &fonts.regular);
        y -= 5.0;
    }

    text(&layer, "INVOICE", 16.0, 140.0, 272.0, &fonts.bold);
    text(&layer, &format!("No. {}", invoice.invoice_number), 10.0, 140.0, 264.0, &fonts.regular);
    text(&layer, &format!("Date: {}", invoice.invoice_date), 10.0, 140.0, 259.0, &fonts.regular);
    text(&layer, &format!("Due: {}", invoice.due_date), 10.0, 140.0, 254.0, &fonts.regular);
    text(&layer, &format!("Status: {}", invoice.status), 10.0, 140.0, 249.0, &fonts.regular);

    // billed party
    text(&layer, "Bill to", 12.0, 20.0, 230.0, &fonts.bold);
    text(&layer, &doc.student_name, 10.0, 20.0, 223.0, &fonts.regular);
    text(
        &layer,
        &format!("Parent: {} ({})", doc.parent_name, doc.parent_phone),
        10.0,
        20.0,
        218.0,
        &fonts.regular,
    );

    // line items
    text(&layer, "Description", 11.0, 20.0, 200.0, &fonts.bold);
    text(&layer, "Amount", 11.0, 150.0, 200.0, &fonts.bold);
    text(&layer, &doc.line_label, 10.0, 20.0, 192.0, &fonts.regular);
    text(&layer, &money(invoice.subtotal, &doc.currency), 10.0, 150.0, 192.0, &fonts.regular);

    let totals = [
        ("Subtotal", invoice.subtotal),
        ("Discount", -invoice.discount),
        ("Tax", invoice.tax),
    ];
    let mut y = 172.0;
    for (label, amount) in totals {
        text(&layer, label, 10.0, 110.0, y, &fonts.regular);
        text(&layer, &money(amount, &doc.currency), 10.0, 150.0, y, &fonts.regular);
        y -= 6.0;
    }
    text(&layer, "Total", 12.0, 110.0, y - 2.0, &fonts.bold);
    text(&layer, &money(invoice.total, &doc.currency), 12.0, 150.0, y - 2.0, &fonts.bold);

    if let Some(notes) = invoice.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        text(&layer, "Notes", 10.0, 20.0, 120.0, &fonts.bold);
        text(&layer, notes, 9.0, 20.0, 114.0, &fonts.regular);
    }

    pdf.save_to_bytes().map_err(render_error)
}

async fn load_document(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    invoice: Invoice,
    student: Student,
) -> Result<InvoiceDocument> {
    let line_label = match invoice.enrollment_id {
        Some(enrollment_id) => storage
            .get_enrollment_detail(enrollment_id)
            .await?
            .and_then(|detail| detail.course_name)
            .map(|course| format!("Tuition: {course}"))
            .unwrap_or_else(|| "Tuition".to_string()),
        None => "Tuition".to_string(),
    };

    Ok(InvoiceDocument {
        cooperative_name: DynamicConfig::cooperative_name().await,
        cooperative_address: DynamicConfig::cooperative_address().await,
        cooperative_phone: DynamicConfig::cooperative_phone().await,
        cooperative_email: DynamicConfig::cooperative_email().await,
        currency: DynamicConfig::currency().await,
        student_name: student.full_name,
        parent_name: student.parent_name,
        parent_phone: student.parent_phone,
        line_label,
        invoice,
    })
}

/// File name for a stored invoice. Rows created before numbers were
/// validated may still carry separators or quotes.
fn document_file_name(invoice_number: &str) -> String {
    let safe: String = invoice_number
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("invoice-{safe}.pdf")
}

fn write_document(dir: &str, file_name: &str, bytes: &[u8]) -> Result<String> {
    let dir = Path::new(dir);
    fs::create_dir_all(dir).map_err(|e| {
        CoopError::file_operation(format!("Cannot create {}: {e}", dir.display()))
    })?;
    let path = dir.join(file_name);
    fs::write(&path, bytes)
        .map_err(|e| CoopError::file_operation(format!("Cannot write {}: {e}", path.display())))?;
    Ok(path.to_string_lossy().into_owned())
}

/// Renders the invoice, stores the file and streams it back.
pub async fn invoice_pdf(
    service: &InvoiceService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let invoice = match storage.get_invoice_by_id(id).await {
        Ok(Some(invoice)) => invoice,
        Ok(None) => return Ok(not_found(ErrorCode::InvoiceNotFound, "Invoice not found")),
        Err(e) => return Ok(error_response(e)),
    };
    let student = match storage.get_student_by_id(invoice.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => return Ok(error_response(e)),
    };

    let document = match load_document(&storage, invoice, student).await {
        Ok(document) => document,
        Err(e) => return Ok(error_response(e)),
    };
    let bytes = match render_invoice(&document) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Invoice {} could not be rendered: {}", id, e.message());
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InvoiceRenderFailed,
                e.format_simple(),
            )));
        }
    };

    let file_name = document_file_name(&document.invoice.invoice_number);
    let path = match write_document(&AppConfig::get().documents.dir, &file_name, &bytes) {
        Ok(path) => path,
        Err(e) => return Ok(error_response(e)),
    };
    if let Err(e) = storage.set_invoice_pdf_path(id, &path).await {
        return Ok(error_response(e));
    }
    info!("Invoice {} rendered to {}", document.invoice.invoice_number, path);

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("inline; filename=\"{file_name}\""),
        ))
        .body(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoices::entities::InvoiceStatus;
    use chrono::NaiveDate;

    fn document() -> InvoiceDocument {
        let now = chrono::Utc::now();
        InvoiceDocument {
            cooperative_name: "Coop Savoir".into(),
            cooperative_address: "12 Rue Atlas, Rabat".into(),
            cooperative_phone: "+212537000000".into(),
            cooperative_email: "".into(),
            currency: "MAD".into(),
            invoice: Invoice {
                id: 1,
                student_id: 1,
                enrollment_id: None,
                invoice_number: "INV-20250105-0001".into(),
                invoice_date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
                due_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
                subtotal: Decimal::from(500),
                discount: Decimal::from(50),
                tax: Decimal::ZERO,
                total: Decimal::from(450),
                status: InvoiceStatus::Sent,
                payment_id: None,
                pdf_path: None,
                notes: Some("January tuition".into()),
                is_overdue: false,
                created_at: now,
                updated_at: now,
            },
            student_name: "Amina Benali".into(),
            parent_name: "Karim Benali".into(),
            parent_phone: "+212600000001".into(),
            line_label: "Tuition: Maths 2BAC".into(),
        }
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = render_invoice(&document()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(Decimal::new(4505, 1), "MAD"), "450.50 MAD");
        assert_eq!(money(-Decimal::from(50), "MAD"), "-50.00 MAD");
    }

    #[test]
    fn test_document_file_name_stays_in_directory() {
        assert_eq!(document_file_name("INV-20250105-0001"), "invoice-INV-20250105-0001.pdf");
        assert_eq!(document_file_name("../a\"b"), "invoice-___a_b.pdf");
        assert!(!document_file_name("x/../../y").contains('/'));
    }

    #[test]
    fn test_write_document_creates_directory() {
        let dir = std::env::temp_dir().join(format!("edu-coop-docs-{}", uuid::Uuid::new_v4()));
        let dir_str = dir.to_string_lossy().into_owned();
        let path = write_document(&dir_str, "x.pdf", b"%PDF-1.3").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.3");
        fs::remove_dir_all(dir).ok();
    }
}
