use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_xlsxwriter::{Format, Workbook};
use tracing::error;

use super::StudentService;
use super::import::{OPTIONAL_COLUMNS, REQUIRED_COLUMNS};
use crate::models::students::entities::Student;
use crate::models::students::requests::{FileFormatQuery, StudentListQuery};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const EXPORT_HEADERS: [&str; 17] = [
    "id",
    "full_name",
    "date_of_birth",
    "age",
    "gender",
    "email",
    "phone",
    "address",
    "parent_name",
    "parent_phone",
    "parent_email",
    "education_level",
    "school_name",
    "registration_date",
    "status",
    "notes",
    "created_at",
];

/// Same filters as the list endpoint, without pagination.
pub async fn export_students(
    service: &StudentService,
    query: StudentListQuery,
    format: FileFormatQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let students = match storage.list_all_students(query).await {
        Ok(students) => students,
        Err(e) => return Ok(error_response(e)),
    };

    let rows: Vec<Vec<String>> = students.iter().map(student_row).collect();
    match format.format.as_deref() {
        Some("xlsx") => xlsx_response("students.xlsx", &EXPORT_HEADERS, &rows),
        _ => csv_response("students.csv", &EXPORT_HEADERS, &rows),
    }
}

pub async fn download_template(format: &str) -> ActixResult<HttpResponse> {
    let headers: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .chain(OPTIONAL_COLUMNS.iter())
        .copied()
        .collect();
    let example = template_example(&headers);

    match format {
        "xlsx" => xlsx_response("student_import_template.xlsx", &headers, &[example]),
        _ => csv_response("student_import_template.csv", &headers, &[example]),
    }
}

fn template_example(headers: &[&str]) -> Vec<String> {
    headers
        .iter()
        .map(|col| {
            match *col {
                "full_name" => "Amina Benali",
                "parent_name" => "Karim Benali",
                "parent_phone" => "+212600000001",
                "registration_date" => "2025-09-01",
                "status" => "active",
                "gender" => "F",
                "date_of_birth" => "2012-04-18",
                "education_level" => "middle",
                _ => "",
            }
            .to_string()
        })
        .collect()
}

fn student_row(student: &Student) -> Vec<String> {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    vec![
        student.id.to_string(),
        student.full_name.clone(),
        student
            .date_of_birth
            .map(|d| d.to_string())
            .unwrap_or_default(),
        student.age.map(|a| a.to_string()).unwrap_or_default(),
        student.gender.map(|g| g.to_string()).unwrap_or_default(),
        opt(&student.email),
        opt(&student.phone),
        opt(&student.address),
        student.parent_name.clone(),
        student.parent_phone.clone(),
        opt(&student.parent_email),
        student.education_level.to_string(),
        opt(&student.school_name),
        student.registration_date.to_string(),
        student.status.to_string(),
        opt(&student.notes),
        student.created_at.to_rfc3339(),
    ]
}

fn export_failed(kind: &str, e: String) -> HttpResponse {
    error!("{} generation failed: {}", kind, e);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::ExportFailed,
        format!("{kind} generation failed"),
    ))
}

fn csv_bytes(headers: &[&str], rows: &[Vec<String>]) -> Result<Vec<u8>, String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(headers).map_err(|e| e.to_string())?;
    for row in rows {
        wtr.write_record(row).map_err(|e| e.to_string())?;
    }
    wtr.into_inner().map_err(|e| e.to_string())
}

fn csv_response(
    file_name: &str,
    headers: &[&str],
    rows: &[Vec<String>],
) -> ActixResult<HttpResponse> {
    let data = match csv_bytes(headers, rows) {
        Ok(data) => data,
        Err(e) => return Ok(export_failed("CSV", e)),
    };

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(data))
}

fn xlsx_bytes(headers: &[&str], rows: &[Vec<String>]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| e.to_string())?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_string(r, col as u16, value)
                .map_err(|e| e.to_string())?;
        }
    }

    workbook.save_to_buffer().map_err(|e| e.to_string())
}

fn xlsx_response(
    file_name: &str,
    headers: &[&str],
    rows: &[Vec<String>],
) -> ActixResult<HttpResponse> {
    let data = match xlsx_bytes(headers, rows) {
        Ok(data) => data,
        Err(e) => return Ok(export_failed("XLSX", e)),
    };

    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_carries_every_import_column() {
        let headers: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .chain(OPTIONAL_COLUMNS.iter())
            .copied()
            .collect();
        let bytes = csv_bytes(&headers, &[template_example(&headers)]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "full_name,parent_name,parent_phone,registration_date,status,email,phone,gender,date_of_birth,education_level,school_name,parent_email,address,notes"
        );
        assert!(lines.next().unwrap().starts_with("Amina Benali,Karim Benali,+212600000001,2025-09-01,active"));
    }

    #[test]
    fn test_xlsx_export_is_readable() {
        use calamine::{Reader, Xlsx};
        use std::io::Cursor;

        let rows = vec![vec!["1".to_string(), "Amina".to_string()]];
        let bytes = xlsx_bytes(&["id", "full_name"], &rows).unwrap();

        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).unwrap();
        let sheet = workbook.sheet_names()[0].clone();
        let range = workbook.worksheet_range(&sheet).unwrap();
        assert_eq!(range.get_size(), (2, 2));
    }
}
