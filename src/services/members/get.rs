use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::MemberService;
use crate::errors::Result;
use crate::models::members::entities::{Member, MemberDetail};
use crate::models::members::responses::MemberResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, not_found};
use crate::storage::Storage;

pub(super) async fn member_detail(storage: &Arc<dyn Storage>, member: Member) -> Result<MemberDetail> {
    let total = storage.member_distributions_total(member.id).await?;
    Ok(MemberDetail {
        can_receive_profit: member.can_receive_profit(),
        member,
        total_distributions_received: total,
    })
}

pub async fn get_member(
    service: &MemberService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let member = match storage.get_member_by_id(id).await {
        Ok(Some(member)) => member,
        Ok(None) => return Ok(not_found(ErrorCode::MemberNotFound, "Member not found")),
        Err(e) => return Ok(error_response(e)),
    };

    match member_detail(&storage, member).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MemberResponse { member: detail },
            "Member retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
