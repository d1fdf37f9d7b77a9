pub mod create;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::enrollments::requests::{
    CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest,
};

super::storage_service!(EnrollmentService);

impl EnrollmentService {
    pub async fn list_enrollments(
        &self,
        query: EnrollmentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_enrollments(self, query, request).await
    }

    pub async fn create_enrollment(
        &self,
        enrollment: CreateEnrollmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        Ok(create::enroll(&storage, enrollment).await)
    }

    pub async fn get_enrollment(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_enrollment(self, id, request).await
    }

    pub async fn update_enrollment(
        &self,
        id: i64,
        update: UpdateEnrollmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_enrollment(self, id, update, request).await
    }

    pub async fn delete_enrollment(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::delete_enrollment(self, id, request).await
    }
}
