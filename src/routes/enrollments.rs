use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::{
    CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::EnrollmentService;
use crate::utils::SafeIDI64;

static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

pub async fn list_enrollments(
    req: HttpRequest,
    query: web::Query<EnrollmentListQuery>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_enrollments(query.into_inner(), &req)
        .await
}

pub async fn create_enrollment(
    req: HttpRequest,
    body: web::Json<CreateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .create_enrollment(body.into_inner(), &req)
        .await
}

pub async fn get_enrollment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.get_enrollment(id.0, &req).await
}

pub async fn update_enrollment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .update_enrollment(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_enrollment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.delete_enrollment(id.0, &req).await
}

pub fn configure_enrollment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/enrollments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::office_roles()))
                    .route("", web::get().to(list_enrollments))
                    .route("", web::post().to(create_enrollment))
                    .route("/{id}", web::get().to(get_enrollment))
                    .route("/{id}", web::put().to(update_enrollment))
                    .route("/{id}", web::delete().to(delete_enrollment)),
            ),
    );
}
