use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MemberService;
use crate::models::financials::requests::DistributionListQuery;
use crate::models::members::requests::MemberListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found};

pub async fn list_members(
    service: &MemberService,
    query: MemberListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_members_with_pagination(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Member list retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn list_member_distributions(
    service: &MemberService,
    id: i64,
    mut query: DistributionListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_member_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::MemberNotFound, "Member not found")),
        Err(e) => return Ok(error_response(e)),
    }

    query.member_id = Some(id);
    match storage.list_distributions(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Member distributions retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
