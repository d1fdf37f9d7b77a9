pub mod create;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::financials::requests::InstructorPaymentListQuery;
use crate::models::instructors::requests::{
    CreateInstructorRequest, InstructorListQuery, UpdateInstructorRequest,
};

super::storage_service!(InstructorService);

impl InstructorService {
    pub async fn list_instructors(
        &self,
        query: InstructorListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_instructors(self, query, request).await
    }

    pub async fn create_instructor(
        &self,
        instructor: CreateInstructorRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_instructor(self, instructor, request).await
    }

    pub async fn get_instructor(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_instructor(self, id, request).await
    }

    pub async fn update_instructor(
        &self,
        id: i64,
        update: UpdateInstructorRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_instructor(self, id, update, request).await
    }

    pub async fn delete_instructor(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::delete_instructor(self, id, request).await
    }

    pub async fn list_instructor_payments(
        &self,
        id: i64,
        query: InstructorPaymentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_instructor_payments(self, id, query, request).await
    }
}
