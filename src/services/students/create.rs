use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::CreateStudentRequest, responses::StudentResponse},
};
use crate::services::{bad_request, error_response_with};
use crate::utils::validate::{validate_email, validate_phone, validate_required};

/// A rejected field, shared by the JSON endpoints and the file import.
#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub(crate) fn check_phone(field: &'static str, value: Option<&str>) -> Result<(), FieldError> {
    match value {
        Some(v) => validate_phone(v).map_err(|msg| FieldError::new(field, msg)),
        None => Ok(()),
    }
}

pub(crate) fn check_email(field: &'static str, value: Option<&str>) -> Result<(), FieldError> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => validate_email(v).map_err(|msg| FieldError::new(field, msg)),
        None => Ok(()),
    }
}

pub fn validate_new_student(student: &CreateStudentRequest) -> Result<(), FieldError> {
    validate_required(&student.full_name, "full_name")
        .map_err(|msg| FieldError::new("full_name", msg))?;
    validate_required(&student.parent_name, "parent_name")
        .map_err(|msg| FieldError::new("parent_name", msg))?;
    check_phone("parent_phone", Some(&student.parent_phone))?;
    check_phone("phone", student.phone.as_deref())?;
    check_email("email", student.email.as_deref())?;
    check_email("parent_email", student.parent_email.as_deref())?;
    Ok(())
}

pub async fn create_student(
    service: &StudentService,
    student: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = validate_new_student(&student) {
        return Ok(bad_request(
            ErrorCode::StudentInvalid,
            format!("{}: {}", e.field, e.message),
        ));
    }

    let storage = service.get_storage(request)?;

    match storage.create_student(student).await {
        Ok(student) => {
            info!("Registered student {} ({})", student.id, student.full_name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                StudentResponse { student },
                "Student created successfully",
            )))
        }
        Err(e) => Ok(error_response_with(ErrorCode::StudentInvalid, e)),
    }
}
