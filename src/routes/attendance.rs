use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    AttendanceListQuery, AttendanceSummaryQuery, BulkAttendanceRequest, CourseDateQuery,
    RecalculateSummariesRequest, RecordAttendanceRequest, UpdateAttendanceRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AttendanceService;
use crate::utils::SafeIDI64;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(query.into_inner(), &req)
        .await
}

pub async fn record_attendance(
    req: HttpRequest,
    body: web::Json<RecordAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .record_attendance(body.into_inner(), &req)
        .await
}

pub async fn get_attendance(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_attendance(id.0, &req).await
}

pub async fn update_attendance(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_attendance(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.delete_attendance(id.0, &req).await
}

pub async fn bulk_record(
    req: HttpRequest,
    body: web::Json<BulkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.bulk_record(body.into_inner(), &req).await
}

pub async fn by_course_date(
    req: HttpRequest,
    query: web::Query<CourseDateQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .by_course_date(query.into_inner(), &req)
        .await
}

pub async fn list_summaries(
    req: HttpRequest,
    query: web::Query<AttendanceSummaryQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_summaries(query.into_inner(), &req)
        .await
}

pub async fn recalculate_summaries(
    req: HttpRequest,
    body: web::Json<RecalculateSummariesRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .recalculate_summaries(body.into_inner(), &req)
        .await
}

pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::attendance_roles()))
                    .route("/bulk", web::post().to(bulk_record))
                    .route("/by-course-date", web::get().to(by_course_date))
                    .route("/summaries", web::get().to(list_summaries))
                    .route(
                        "/summaries/recalculate",
                        web::post().to(recalculate_summaries).wrap(
                            middlewares::RequireRole::new_any(UserRole::office_roles()),
                        ),
                    )
                    .route("", web::get().to(list_attendance))
                    .route("", web::post().to(record_attendance))
                    .route("/{id}", web::get().to(get_attendance))
                    .route("/{id}", web::put().to(update_attendance))
                    .route("/{id}", web::delete().to(delete_attendance)),
            ),
    );
}
