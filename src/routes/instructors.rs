use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::financials::requests::InstructorPaymentListQuery;
use crate::models::instructors::requests::{
    CreateInstructorRequest, InstructorListQuery, UpdateInstructorRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::InstructorService;
use crate::utils::SafeIDI64;

static INSTRUCTOR_SERVICE: Lazy<InstructorService> = Lazy::new(InstructorService::new_lazy);

pub async fn list_instructors(
    req: HttpRequest,
    query: web::Query<InstructorListQuery>,
) -> ActixResult<HttpResponse> {
    INSTRUCTOR_SERVICE
        .list_instructors(query.into_inner(), &req)
        .await
}

pub async fn create_instructor(
    req: HttpRequest,
    body: web::Json<CreateInstructorRequest>,
) -> ActixResult<HttpResponse> {
    INSTRUCTOR_SERVICE
        .create_instructor(body.into_inner(), &req)
        .await
}

pub async fn get_instructor(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INSTRUCTOR_SERVICE.get_instructor(id.0, &req).await
}

pub async fn update_instructor(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateInstructorRequest>,
) -> ActixResult<HttpResponse> {
    INSTRUCTOR_SERVICE
        .update_instructor(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_instructor(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    INSTRUCTOR_SERVICE.delete_instructor(id.0, &req).await
}

pub async fn instructor_payments(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<InstructorPaymentListQuery>,
) -> ActixResult<HttpResponse> {
    INSTRUCTOR_SERVICE
        .list_instructor_payments(id.0, query.into_inner(), &req)
        .await
}

pub fn configure_instructor_routes(cfg: &mut web::ServiceConfig) {
    let management = || middlewares::RequireRole::new_any(UserRole::management_roles());

    cfg.service(
        web::scope("/api/v1/instructors")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::office_roles()))
                    .route("", web::get().to(list_instructors))
                    .route("", web::post().to(create_instructor).wrap(management()))
                    .route("/{id}", web::get().to(get_instructor))
                    .route("/{id}", web::put().to(update_instructor).wrap(management()))
                    .route(
                        "/{id}",
                        web::delete().to(delete_instructor).wrap(management()),
                    )
                    .route(
                        "/{id}/payments",
                        web::get().to(instructor_payments).wrap(management()),
                    ),
            ),
    );
}
