use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InstructorService;
use super::create::validate_fields;
use crate::models::instructors::entities::InstructorDetail;
use crate::models::instructors::requests::UpdateInstructorRequest;
use crate::models::instructors::responses::InstructorResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};

pub async fn update_instructor(
    service: &InstructorService,
    id: i64,
    update: UpdateInstructorRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_fields(
        update.full_name.as_deref(),
        update.email.as_deref(),
        update.phone.as_deref(),
        update.hourly_rate,
        update.tax_rate_percentage,
        update.years_of_experience,
    ) {
        return Ok(bad_request(ErrorCode::InstructorInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    let instructor = match storage.update_instructor(id, update).await {
        Ok(Some(instructor)) => instructor,
        Ok(None) => return Ok(not_found(ErrorCode::InstructorNotFound, "Instructor not found")),
        Err(e) => return Ok(error_response_with(ErrorCode::InstructorInvalid, e)),
    };

    match storage.instructor_stats(id).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            InstructorResponse {
                instructor: InstructorDetail { instructor, stats },
            },
            "Instructor updated successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn delete_instructor(
    service: &InstructorService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_instructor(id).await {
        Ok(true) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Instructor deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::InstructorNotFound, "Instructor not found")),
        Err(e) => Ok(error_response(e)),
    }
}

#[cfg(test)]
mod tests {
    use crate::models::instructors::requests::CreateInstructorRequest;
    use crate::services::InstructorService;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{http::StatusCode, test::TestRequest};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn instructor(email: &str, tax: Option<&str>) -> CreateInstructorRequest {
        serde_json::from_value(serde_json::json!({
            "full_name": "Hassan Tazi",
            "email": email,
            "phone": "+212622222222",
            "specialization": "Mathematics",
            "hourly_rate": "150.00",
            "tax_rate_percentage": tax,
        }))
        .unwrap()
    }

    #[actix_web::test]
    async fn test_create_applies_default_tax_and_rejects_duplicates() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = InstructorService::with_storage(storage.clone());
        let req = TestRequest::default().to_http_request();

        let resp = service
            .create_instructor(instructor("hassan@coop.ma", Some("150")), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = service
            .create_instructor(instructor("hassan@coop.ma", None), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = service
            .create_instructor(instructor("hassan@coop.ma", Some("10")), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let page = storage
            .list_instructors_with_pagination(Default::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.items[0].tax_rate_percentage >= Decimal::ZERO);

        let id = page.items[0].id;
        let resp = service.get_instructor(id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = service.delete_instructor(id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = service.delete_instructor(id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
