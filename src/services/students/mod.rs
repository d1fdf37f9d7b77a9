pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod import;
pub mod list;
pub mod statistics;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::students::requests::{
    CreateStudentRequest, FileFormatQuery, StudentListQuery, UpdateStudentRequest,
};

super::storage_service!(StudentService);

impl StudentService {
    pub async fn list_students(
        &self,
        query: StudentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    pub async fn create_student(
        &self,
        student: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, student, request).await
    }

    pub async fn get_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_student(self, id, request).await
    }

    pub async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, id, update, request).await
    }

    pub async fn delete_student(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_student(self, id, request).await
    }

    pub async fn list_student_enrollments(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_student_enrollments(self, id, request).await
    }

    pub async fn list_student_payments(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_student_payments(self, id, request).await
    }

    pub async fn list_student_attendance(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::list_student_attendance(self, id, request).await
    }

    pub async fn statistics(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        statistics::get_statistics(self, request).await
    }

    pub async fn import_students(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_students(self, payload, request).await
    }

    pub async fn export_students(
        &self,
        query: StudentListQuery,
        format: FileFormatQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        export::export_students(self, query, format, request).await
    }

    pub async fn download_template(&self, format: FileFormatQuery) -> ActixResult<HttpResponse> {
        export::download_template(format.format.as_deref().unwrap_or("csv")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{http::StatusCode, test::TestRequest};
    use std::sync::Arc;

    fn minimal(name: &str, parent_phone: &str) -> CreateStudentRequest {
        serde_json::from_value(serde_json::json!({
            "full_name": name,
            "parent_name": "Karim Benali",
            "parent_phone": parent_phone,
        }))
        .unwrap()
    }

    #[actix_web::test]
    async fn test_student_lifecycle() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = StudentService::with_storage(storage.clone());
        let req = TestRequest::default().to_http_request();

        let resp = service
            .create_student(minimal("Amina Benali", "12345"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = service
            .create_student(minimal("Amina Benali", "+212600000001"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let id = storage
            .find_student_by_name_and_parent_phone("Amina Benali", "+212600000001")
            .await
            .unwrap()
            .unwrap()
            .id;

        let resp = service.list_student_payments(id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = service.list_student_payments(id + 100, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let update = UpdateStudentRequest {
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        let resp = service.update_student(id, update, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = service.delete_student(id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = service.get_student(id, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
