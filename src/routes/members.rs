use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::financials::requests::DistributionListQuery;
use crate::models::members::requests::{CreateMemberRequest, MemberListQuery, UpdateMemberRequest};
use crate::models::users::entities::UserRole;
use crate::services::MemberService;
use crate::utils::SafeIDI64;

static MEMBER_SERVICE: Lazy<MemberService> = Lazy::new(MemberService::new_lazy);

pub async fn list_members(
    req: HttpRequest,
    query: web::Query<MemberListQuery>,
) -> ActixResult<HttpResponse> {
    MEMBER_SERVICE.list_members(query.into_inner(), &req).await
}

pub async fn create_member(
    req: HttpRequest,
    body: web::Json<CreateMemberRequest>,
) -> ActixResult<HttpResponse> {
    MEMBER_SERVICE.create_member(body.into_inner(), &req).await
}

pub async fn get_member(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MEMBER_SERVICE.get_member(id.0, &req).await
}

pub async fn update_member(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateMemberRequest>,
) -> ActixResult<HttpResponse> {
    MEMBER_SERVICE
        .update_member(id.0, body.into_inner(), &req)
        .await
}

pub async fn delete_member(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    MEMBER_SERVICE.delete_member(id.0, &req).await
}

pub async fn member_distributions(
    req: HttpRequest,
    id: SafeIDI64,
    query: web::Query<DistributionListQuery>,
) -> ActixResult<HttpResponse> {
    MEMBER_SERVICE
        .list_member_distributions(id.0, query.into_inner(), &req)
        .await
}

pub fn configure_member_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/members")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::management_roles()))
                    .route("", web::get().to(list_members))
                    .route("", web::post().to(create_member))
                    .route("/{id}", web::get().to(get_member))
                    .route("/{id}", web::put().to(update_member))
                    .route("/{id}", web::delete().to(delete_member))
                    .route("/{id}/distributions", web::get().to(member_distributions)),
            ),
    );
}
