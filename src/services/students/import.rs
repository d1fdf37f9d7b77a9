//! Bulk student import from CSV or XLSX files.

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDate;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;
use std::sync::Arc;
use tracing::{error, info};

use super::StudentService;
use super::create::{FieldError, validate_new_student};
use crate::models::students::entities::{EducationLevel, Gender, StudentStatus};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::students::responses::{ImportRowError, StudentImportResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::bad_request;
use crate::storage::Storage;

pub const MAX_IMPORT_ROWS: usize = 1000;

pub const REQUIRED_COLUMNS: [&str; 3] = ["full_name", "parent_name", "parent_phone"];

pub const OPTIONAL_COLUMNS: [&str; 11] = [
    "registration_date",
    "status",
    "email",
    "phone",
    "gender",
    "date_of_birth",
    "education_level",
    "school_name",
    "parent_email",
    "address",
    "notes",
];

/// Failure that rejects the whole file.
#[derive(Debug)]
pub enum ImportParseError {
    MissingColumn(String),
    ParseFailed(String),
    EmptyFile,
    TooManyRows(usize),
}

impl ImportParseError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingColumn(_) => ErrorCode::ImportFileMissingColumn,
            Self::ParseFailed(_) => ErrorCode::ImportFileParseFailed,
            Self::EmptyFile | Self::TooManyRows(_) => ErrorCode::ImportFileDataInvalid,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::MissingColumn(col) => format!("Missing required column: {col}"),
            Self::ParseFailed(msg) => msg.clone(),
            Self::EmptyFile => "The file contains no data rows".to_string(),
            Self::TooManyRows(n) => {
                format!("At most {MAX_IMPORT_ROWS} rows can be imported at once, got {n}")
            }
        }
    }
}

impl fmt::Display for ImportParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Non-empty cells of one data row, keyed by column name.
#[derive(Debug, Clone)]
struct RawRow {
    row: i64,
    cells: HashMap<&'static str, String>,
}

impl RawRow {
    fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    fn owned(&self, column: &str) -> Option<String> {
        self.get(column).map(str::to_string)
    }
}

pub async fn import_students(
    service: &StudentService,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (file_bytes, file_name) = match read_file_from_multipart(&mut payload).await {
        Ok(result) => result,
        Err(e) => {
            return Ok(bad_request(
                ErrorCode::FileUploadFailed,
                format!("Could not read the uploaded file: {e}"),
            ));
        }
    };

    match import_from_bytes(&storage, &file_bytes, &file_name).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(report, "Import finished"))),
        Err(e) => Ok(bad_request(e.error_code(), e.message())),
    }
}

/// Parses `data` (XLSX when `file_name` ends in `.xlsx`, CSV otherwise) and
/// creates every valid, not yet registered student.
pub async fn import_from_bytes(
    storage: &Arc<dyn Storage>,
    data: &[u8],
    file_name: &str,
) -> Result<StudentImportResponse, ImportParseError> {
    let rows = if file_name.to_lowercase().ends_with(".xlsx") {
        parse_xlsx(data)?
    } else {
        parse_csv(data)?
    };

    if rows.is_empty() {
        return Err(ImportParseError::EmptyFile);
    }
    if rows.len() > MAX_IMPORT_ROWS {
        return Err(ImportParseError::TooManyRows(rows.len()));
    }

    let mut report = StudentImportResponse {
        total: rows.len() as i64,
        ..Default::default()
    };

    for raw in &rows {
        let student = match row_to_request(raw) {
            Ok(student) => student,
            Err(e) => {
                report.failed += 1;
                report.errors.push(ImportRowError {
                    row: raw.row,
                    field: Some(e.field.to_string()),
                    message: e.message,
                });
                continue;
            }
        };

        match storage
            .find_student_by_name_and_parent_phone(&student.full_name, &student.parent_phone)
            .await
        {
            Ok(Some(_)) => {
                report.skipped += 1;
                report.errors.push(ImportRowError {
                    row: raw.row,
                    field: None,
                    message: "A student with this name and parent phone already exists"
                        .to_string(),
                });
                continue;
            }
            Ok(None) => {}
            Err(e) => {
                error!("Duplicate lookup failed on row {}: {}", raw.row, e);
                report.failed += 1;
                report.errors.push(ImportRowError {
                    row: raw.row,
                    field: None,
                    message: e.format_simple(),
                });
                continue;
            }
        }

        match storage.create_student(student).await {
            Ok(_) => report.success += 1,
            Err(e) => {
                error!("Creating student from row {} failed: {}", raw.row, e);
                report.failed += 1;
                report.errors.push(ImportRowError {
                    row: raw.row,
                    field: None,
                    message: e.message().to_string(),
                });
            }
        }
    }

    info!(
        "Student import from {}: {} created, {} skipped, {} failed",
        file_name, report.success, report.skipped, report.failed
    );
    Ok(report)
}

async fn read_file_from_multipart(payload: &mut Multipart) -> Result<(Vec<u8>, String), String> {
    let mut file_bytes = Vec::new();
    let mut file_name = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("invalid multipart field: {e}"))?;

        if field.name() == Some("file") {
            if let Some(disposition) = field.content_disposition() {
                file_name = disposition
                    .get_filename()
                    .unwrap_or("upload.csv")
                    .to_string();
            }

            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| format!("upload interrupted: {e}"))?;
                file_bytes.extend_from_slice(&data);
            }
        }
    }

    if file_bytes.is_empty() {
        return Err("no `file` field in the form".to_string());
    }

    Ok((file_bytes, file_name))
}

/// Column positions for every recognised header.
fn column_map(
    headers: impl Iterator<Item = String>,
) -> Result<Vec<(&'static str, usize)>, ImportParseError> {
    let by_name: HashMap<String, usize> = headers
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    for col in REQUIRED_COLUMNS {
        if !by_name.contains_key(col) {
            return Err(ImportParseError::MissingColumn(col.to_string()));
        }
    }

    Ok(REQUIRED_COLUMNS
        .iter()
        .chain(OPTIONAL_COLUMNS.iter())
        .filter_map(|col| by_name.get(*col).map(|idx| (*col, *idx)))
        .collect())
}

fn collect_row(
    row: i64,
    columns: &[(&'static str, usize)],
    cell: impl Fn(usize) -> Option<String>,
) -> Option<RawRow> {
    let cells: HashMap<&'static str, String> = columns
        .iter()
        .filter_map(|(name, idx)| {
            cell(*idx)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (*name, v))
        })
        .collect();

    // blank lines are not rows
    if cells.is_empty() {
        return None;
    }
    Some(RawRow { row, cells })
}

fn parse_csv(data: &[u8]) -> Result<Vec<RawRow>, ImportParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(data));

    let headers = rdr
        .headers()
        .map_err(|e| ImportParseError::ParseFailed(format!("Could not read the header: {e}")))?;
    let columns = column_map(headers.iter().map(|h| h.trim_start_matches('\u{feff}').to_string()))?;

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let row = idx as i64 + 1;
        let record = result
            .map_err(|e| ImportParseError::ParseFailed(format!("Row {row} is malformed: {e}")))?;
        if let Some(raw) = collect_row(row, &columns, |i| record.get(i).map(str::to_string)) {
            rows.push(raw);
        }
    }

    Ok(rows)
}

fn parse_xlsx(data: &[u8]) -> Result<Vec<RawRow>, ImportParseError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))
        .map_err(|e| ImportParseError::ParseFailed(format!("Could not open the workbook: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ImportParseError::ParseFailed("The workbook has no sheet".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportParseError::ParseFailed(format!("Could not read the sheet: {e}")))?;

    let mut rows_iter = range.rows();
    let header_row = rows_iter.next().ok_or(ImportParseError::EmptyFile)?;
    let columns = column_map(header_row.iter().map(cell_text))?;

    let mut rows = Vec::new();
    for (idx, cells) in rows_iter.enumerate() {
        let row = idx as i64 + 1;
        if let Some(raw) = collect_row(row, &columns, |i| cells.get(i).map(cell_text)) {
            rows.push(raw);
        }
    }

    Ok(rows)
}

/// Renders a worksheet cell the way it would appear in a CSV export.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        Data::DateTimeIso(s) => s.chars().take(10).collect(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(chrono::Duration::days(serial.trunc() as i64))
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| FieldError::new(field, format!("`{value}` is not a YYYY-MM-DD date")))
}

fn parse_choice<T: std::str::FromStr<Err = String>>(
    field: &'static str,
    value: &str,
) -> Result<T, FieldError> {
    value.parse::<T>().map_err(|msg| FieldError::new(field, msg))
}

fn row_to_request(raw: &RawRow) -> Result<CreateStudentRequest, FieldError> {
    let student = CreateStudentRequest {
        full_name: raw.owned("full_name").unwrap_or_default(),
        date_of_birth: raw
            .get("date_of_birth")
            .map(|v| parse_date("date_of_birth", v))
            .transpose()?,
        gender: raw
            .get("gender")
            .map(|v| parse_choice::<Gender>("gender", &v.to_uppercase()))
            .transpose()?,
        email: raw.owned("email"),
        phone: raw.owned("phone"),
        address: raw.owned("address"),
        parent_name: raw.owned("parent_name").unwrap_or_default(),
        parent_phone: raw.owned("parent_phone").unwrap_or_default(),
        parent_email: raw.owned("parent_email"),
        education_level: raw
            .get("education_level")
            .map(|v| parse_choice::<EducationLevel>("education_level", &v.to_lowercase()))
            .transpose()?,
        school_name: raw.owned("school_name"),
        registration_date: raw
            .get("registration_date")
            .map(|v| parse_date("registration_date", v))
            .transpose()?,
        status: raw
            .get("status")
            .map(|v| parse_choice::<StudentStatus>("status", &v.to_lowercase()))
            .transpose()?,
        medical_notes: None,
        notes: raw.owned("notes"),
    };

    validate_new_student(&student)?;
    Ok(student)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    #[test]
    fn test_csv_requires_parent_phone() {
        let err = parse_csv(b"full_name,parent_name\nAmina,Karim\n").unwrap_err();
        assert!(matches!(err, ImportParseError::MissingColumn(ref c) if c == "parent_phone"));
        assert_eq!(err.error_code(), ErrorCode::ImportFileMissingColumn);
    }

    #[test]
    fn test_csv_rows_are_numbered_without_header() {
        let rows = parse_csv(
            b"Full_Name,parent_name,parent_phone,gender\nAmina,Karim,+212600000001,f\n,,,\nYoussef,Sara,0600000002,\n",
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row, 1);
        assert_eq!(rows[1].row, 3);
        assert_eq!(rows[0].get("full_name"), Some("Amina"));

        let student = row_to_request(&rows[0]).unwrap();
        assert_eq!(student.gender, Some(Gender::Female));
        assert!(rows[1].get("gender").is_none());
    }

    #[test]
    fn test_invalid_row_reports_field() {
        let rows =
            parse_csv(b"full_name,parent_name,parent_phone,registration_date\nAmina,Karim,12,\nOmar,Laila,0600000003,03/01/2025\n")
                .unwrap();
        assert_eq!(row_to_request(&rows[0]).unwrap_err().field, "parent_phone");
        assert_eq!(
            row_to_request(&rows[1]).unwrap_err().field,
            "registration_date"
        );
    }

    #[test]
    fn test_excel_serial_dates() {
        assert_eq!(
            excel_serial_to_date(45658.0),
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
    }

    #[tokio::test]
    async fn test_import_skips_existing_students() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let csv = "full_name,parent_name,parent_phone,status\n\
                   Amina Benali,Karim Benali,+212600000001,active\n\
                   Amina Benali,Karim Benali,+212600000001,active\n\
                   Omar Idrissi,Laila Idrissi,bad-phone,active\n\
                   Youssef Alami,Sara Alami,0600000002,unknown\n";

        let report = import_from_bytes(&storage, csv.as_bytes(), "students.csv")
            .await
            .unwrap();

        assert_eq!(report.total, 4);
        assert_eq!(report.success, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 2);
        assert_eq!(report.errors.len(), 3);
        assert_eq!(report.errors[0].row, 2);
        assert_eq!(report.errors[1].field.as_deref(), Some("parent_phone"));
        assert_eq!(report.errors[2].field.as_deref(), Some("status"));
    }

    #[tokio::test]
    async fn test_import_rejects_oversized_files() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let mut csv = String::from("full_name,parent_name,parent_phone\n");
        for i in 0..=MAX_IMPORT_ROWS {
            csv.push_str(&format!("Student {i},Parent {i},06000{i:05}\n"));
        }

        let err = import_from_bytes(&storage, csv.as_bytes(), "big.csv")
            .await
            .unwrap_err();
        assert!(matches!(err, ImportParseError::TooManyRows(1001)));
    }
}
