use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use super::create::{FieldError, check_email, check_phone};
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::UpdateStudentRequest, responses::StudentResponse},
};
use crate::services::{bad_request, error_response_with, not_found};
use crate::utils::validate::validate_required;

fn validate_update(update: &UpdateStudentRequest) -> Result<(), FieldError> {
    if let Some(name) = &update.full_name {
        validate_required(name, "full_name").map_err(|msg| FieldError::new("full_name", msg))?;
    }
    if let Some(name) = &update.parent_name {
        validate_required(name, "parent_name")
            .map_err(|msg| FieldError::new("parent_name", msg))?;
    }
    check_phone("parent_phone", update.parent_phone.as_deref())?;
    check_phone("phone", update.phone.as_deref())?;
    check_email("email", update.email.as_deref())?;
    check_email("parent_email", update.parent_email.as_deref())?;
    Ok(())
}

pub async fn update_student(
    service: &StudentService,
    id: i64,
    update: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = validate_update(&update) {
        return Ok(bad_request(
            ErrorCode::StudentInvalid,
            format!("{}: {}", e.field, e.message),
        ));
    }

    let storage = service.get_storage(request)?;

    match storage.update_student(id, update).await {
        Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentResponse { student },
            "Student updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(error_response_with(ErrorCode::StudentInvalid, e)),
    }
}
