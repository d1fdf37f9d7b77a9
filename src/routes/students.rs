use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::students::requests::{
    CreateStudentRequest, FileFormatQuery, StudentListQuery, UpdateStudentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::StudentService;
use crate::utils::SafeIDI64;

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentListQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(query.into_inner(), &req).await
}

pub async fn create_student(
    req: HttpRequest,
    body: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.create_student(body.into_inner(), &req).await
}

pub async fn get_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(id.0, &req).await
}

pub async fn update_student(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(id.0, &req).await
}

pub async fn student_enrollments(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_student_enrollments(id.0, &req).await
}

pub async fn student_payments(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_student_payments(id.0, &req).await
}

pub async fn student_attendance(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_student_attendance(id.0, &req).await
}

pub async fn statistics(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.statistics(&req).await
}

pub async fn import_students(
    req: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.import_students(payload, &req).await
}

pub async fn export_students(
    req: HttpRequest,
    query: web::Query<StudentListQuery>,
    format: web::Query<FileFormatQuery>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .export_students(query.into_inner(), format.into_inner(), &req)
        .await
}

pub async fn import_template(format: web::Query<FileFormatQuery>) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.download_template(format.into_inner()).await
}

// Static segments are registered before `/{id}`.
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::office_roles()))
                    .route("/statistics", web::get().to(statistics))
                    .route("/export", web::get().to(export_students))
                    .route("/import/template", web::get().to(import_template))
                    .route(
                        "/import",
                        web::post()
                            .to(import_students)
                            .wrap(middlewares::RateLimit::import()),
                    )
                    .route("", web::get().to(list_students))
                    .route("", web::post().to(create_student))
                    .route("/{id}", web::get().to(get_student))
                    .route("/{id}", web::put().to(update_student))
                    .route(
                        "/{id}",
                        web::delete()
                            .to(delete_student)
                            .wrap(middlewares::RequireRole::new_any(UserRole::management_roles())),
                    )
                    .route("/{id}/enrollments", web::get().to(student_enrollments))
                    .route("/{id}/payments", web::get().to(student_payments))
                    .route("/{id}/attendance", web::get().to(student_attendance)),
            ),
    );
}
