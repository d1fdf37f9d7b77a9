use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_decimal::Decimal;
use tracing::info;

use super::InstructorService;
use crate::models::instructors::entities::{InstructorDetail, InstructorStats};
use crate::models::instructors::requests::CreateInstructorRequest;
use crate::models::instructors::responses::InstructorResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::system::DynamicConfig;
use crate::services::{bad_request, error_response_with};
use crate::utils::validate::{
    validate_email, validate_non_negative_amount, validate_percentage, validate_phone,
    validate_required,
};

/// Checks shared by create and update; `None` means the field is untouched.
pub(super) fn validate_fields(
    full_name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
    hourly_rate: Option<Decimal>,
    tax_rate: Option<Decimal>,
    years_of_experience: Option<i32>,
) -> Result<(), String> {
    if let Some(name) = full_name {
        validate_required(name, "full_name")?;
    }
    if let Some(email) = email {
        validate_email(email).map_err(|e| format!("email: {e}"))?;
    }
    if let Some(phone) = phone {
        validate_phone(phone).map_err(|e| format!("phone: {e}"))?;
    }
    if let Some(rate) = hourly_rate {
        validate_non_negative_amount(rate, "hourly_rate")?;
    }
    if let Some(rate) = tax_rate {
        validate_percentage(rate, "tax_rate_percentage")?;
    }
    if years_of_experience.is_some_and(|y| y < 0) {
        return Err("years_of_experience cannot be negative".to_string());
    }
    Ok(())
}

pub async fn create_instructor(
    service: &InstructorService,
    mut instructor: CreateInstructorRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_fields(
        Some(&instructor.full_name),
        Some(&instructor.email),
        Some(&instructor.phone),
        Some(instructor.hourly_rate),
        instructor.tax_rate_percentage,
        instructor.years_of_experience,
    )
    .and_then(|_| validate_required(&instructor.specialization, "specialization"))
    {
        return Ok(bad_request(ErrorCode::InstructorInvalid, msg));
    }

    if instructor.tax_rate_percentage.is_none() {
        instructor.tax_rate_percentage = Some(DynamicConfig::default_tax_rate().await);
    }

    let storage = service.get_storage(request)?;

    match storage.create_instructor(instructor).await {
        Ok(instructor) => {
            info!("Created instructor {} ({})", instructor.id, instructor.full_name);
            let detail = InstructorDetail {
                instructor,
                stats: InstructorStats::default(),
            };
            Ok(HttpResponse::Created().json(ApiResponse::success(
                InstructorResponse { instructor: detail },
                "Instructor created successfully",
            )))
        }
        Err(e) => Ok(error_response_with(ErrorCode::InstructorInvalid, e)),
    }
}
