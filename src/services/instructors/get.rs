use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InstructorService;
use crate::models::instructors::entities::InstructorDetail;
use crate::models::instructors::responses::InstructorResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found};

pub async fn get_instructor(
    service: &InstructorService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let instructor = match storage.get_instructor_by_id(id).await {
        Ok(Some(instructor)) => instructor,
        Ok(None) => return Ok(not_found(ErrorCode::InstructorNotFound, "Instructor not found")),
        Err(e) => return Ok(error_response(e)),
    };

    match storage.instructor_stats(id).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            InstructorResponse {
                instructor: InstructorDetail { instructor, stats },
            },
            "Instructor retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
