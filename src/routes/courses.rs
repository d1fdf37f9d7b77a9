use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::courses::requests::{
    AssignInstructorRequest, CourseListQuery, CreateCourseRequest, EnrollStudentRequest,
    UpdateAssignmentRequest, UpdateCourseRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::CourseService;
use crate::utils::{SafeIDI64, SafeInstructorId};

static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseListQuery>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.create_course(body.into_inner(), &req).await
}

pub async fn get_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(id.0, &req).await
}

pub async fn update_course(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_course(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(id.0, &req).await
}

pub async fn course_students(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_course_students(id.0, &req).await
}

pub async fn enroll_student(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .enroll_student(id.0, body.into_inner(), &req)
        .await
}

pub async fn course_instructors(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_course_instructors(id.0, &req).await
}

pub async fn assign_instructor(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<AssignInstructorRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .assign_instructor(id.0, body.into_inner(), &req)
        .await
}

pub async fn update_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    instructor_id: SafeInstructorId,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_assignment(id.0, instructor_id.0, body.into_inner(), &req)
        .await
}

pub async fn remove_assignment(
    req: HttpRequest,
    id: SafeIDI64,
    instructor_id: SafeInstructorId,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .remove_assignment(id.0, instructor_id.0, &req)
        .await
}

/// Instructors may read the catalogue; changes need an office role.
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    let office = || middlewares::RequireRole::new_any(UserRole::office_roles());
    let management = || middlewares::RequireRole::new_any(UserRole::management_roles());

    cfg.service(
        web::scope("/api/v1/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::attendance_roles()))
                    .route("", web::get().to(list_courses))
                    .route("", web::post().to(create_course).wrap(office()))
                    .route("/{id}", web::get().to(get_course))
                    .route("/{id}", web::put().to(update_course).wrap(office()))
                    .route("/{id}", web::delete().to(delete_course).wrap(management()))
                    .route("/{id}/students", web::get().to(course_students))
                    .route("/{id}/enroll", web::post().to(enroll_student).wrap(office()))
                    .route("/{id}/instructors", web::get().to(course_instructors))
                    .route(
                        "/{id}/instructors",
                        web::post().to(assign_instructor).wrap(office()),
                    )
                    .route(
                        "/{id}/instructors/{instructor_id}",
                        web::put().to(update_assignment).wrap(office()),
                    )
                    .route(
                        "/{id}/instructors/{instructor_id}",
                        web::delete().to(remove_assignment).wrap(office()),
                    ),
            ),
    );
}
