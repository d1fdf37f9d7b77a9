use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, students::requests::StudentListQuery};
use crate::services::error_response;

/// Newest registrations first, then by name.
pub async fn list_students(
    service: &StudentService,
    query: StudentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_students_with_pagination(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Student list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
