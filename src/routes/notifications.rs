use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::notifications::requests::{
    CreateNotificationRequest, CreateTemplateRequest, MarkFailedRequest, NotificationListQuery,
    RunRemindersRequest, TemplateListQuery, UpdateNotificationRequest, UpdateTemplateRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::NotificationService;
use crate::utils::SafeIDI64;

static NOTIFICATION_SERVICE: Lazy<NotificationService> =
    Lazy::new(NotificationService::new_lazy);

pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<NotificationListQuery>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .list_notifications(query.into_inner(), &req)
        .await
}

pub async fn create_notification(
    req: HttpRequest,
    body: web::Json<CreateNotificationRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .create_notification(body.into_inner(), &req)
        .await
}

pub async fn get_notification(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.get_notification(id.0, &req).await
}

pub async fn update_notification(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateNotificationRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .update_notification(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_notification(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.delete_notification(id.0, &req).await
}

pub async fn mark_sent(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_sent(id.0, &req).await
}

pub async fn mark_failed(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<MarkFailedRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .mark_failed(id.0, body.into_inner(), &req)
        .await
}

pub async fn dispatch(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.dispatch(&req).await
}

pub async fn run_reminders(
    req: HttpRequest,
    body: Option<web::Json<RunRemindersRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    NOTIFICATION_SERVICE.run_reminders(body, &req).await
}

pub async fn list_templates(
    req: HttpRequest,
    query: web::Query<TemplateListQuery>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .list_templates(query.into_inner(), &req)
        .await
}

pub async fn create_template(
    req: HttpRequest,
    body: web::Json<CreateTemplateRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .create_template(body.into_inner(), &req)
        .await
}

pub async fn get_template(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.get_template(id.0, &req).await
}

pub async fn update_template(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateTemplateRequest>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .update_template(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_template(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.delete_template(id.0, &req).await
}

pub fn configure_notification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::office_roles()))
                    .route(
                        "/dispatch",
                        web::post()
                            .to(dispatch)
                            .wrap(middlewares::RateLimit::job_trigger()),
                    )
                    .route(
                        "/send-reminders",
                        web::post()
                            .to(run_reminders)
                            .wrap(middlewares::RateLimit::job_trigger()),
                    )
                    .service(
                        web::scope("/templates")
                            .route("", web::get().to(list_templates))
                            .route("", web::post().to(create_template))
                            .route("/{id}", web::get().to(get_template))
                            .route("/{id}", web::put().to(update_template))
                            .route("/{id}", web::delete().to(delete_template)),
                    )
                    .route("", web::get().to(list_notifications))
                    .route("", web::post().to(create_notification))
                    .route("/{id}", web::get().to(get_notification))
                    .route("/{id}", web::put().to(update_notification))
                    .route("/{id}", web::delete().to(delete_notification))
                    .route("/{id}/mark-sent", web::post().to(mark_sent))
                    .route("/{id}/mark-failed", web::post().to(mark_failed)),
            ),
    );
}
