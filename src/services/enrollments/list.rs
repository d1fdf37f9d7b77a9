use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::ApiResponse;
use crate::models::enrollments::requests::EnrollmentListQuery;
use crate::services::error_response;

pub async fn list_enrollments(
    service: &EnrollmentService,
    query: EnrollmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_enrollments_with_pagination(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Enrollment list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
