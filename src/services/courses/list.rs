use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::ApiResponse;
use crate::models::courses::requests::CourseListQuery;
use crate::services::error_response;

pub async fn list_courses(
    service: &CourseService,
    query: CourseListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_courses_with_pagination(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Course list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
