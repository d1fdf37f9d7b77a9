use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_decimal::Decimal;
use tracing::info;

use super::MemberService;
use crate::finance::today;
use crate::models::members::entities::MemberDetail;
use crate::models::members::requests::CreateMemberRequest;
use crate::models::members::responses::MemberResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response_with};
use crate::utils::random_code::membership_number;
use crate::utils::validate::{validate_email, validate_percentage, validate_phone, validate_required};

pub(super) fn validate_fields(
    full_name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
    share_percentage: Option<Decimal>,
) -> Result<(), String> {
    if let Some(name) = full_name {
        validate_required(name, "full_name")?;
    }
    if let Some(email) = email {
        validate_email(email).map_err(|e| format!("email: {e}"))?;
    }
    if let Some(phone) = phone {
        validate_phone(phone).map_err(|e| format!("phone: {e}"))?;
    }
    if let Some(share) = share_percentage {
        validate_percentage(share, "share_percentage")?;
    }
    Ok(())
}

pub async fn create_member(
    service: &MemberService,
    mut member: CreateMemberRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_fields(
        Some(&member.full_name),
        Some(&member.email),
        Some(&member.phone),
        Some(member.share_percentage),
    ) {
        return Ok(bad_request(ErrorCode::MemberInvalid, msg));
    }

    let join_date = *member.join_date.get_or_insert_with(today);
    if member
        .membership_number
        .as_deref()
        .is_none_or(|n| n.trim().is_empty())
    {
        member.membership_number = Some(membership_number(join_date));
    }

    let storage = service.get_storage(request)?;

    match storage.create_member(member).await {
        Ok(member) => {
            info!(
                "Registered member {} ({})",
                member.id, member.membership_number
            );
            let detail = MemberDetail {
                can_receive_profit: member.can_receive_profit(),
                member,
                total_distributions_received: Decimal::ZERO,
            };
            Ok(HttpResponse::Created().json(ApiResponse::success(
                MemberResponse { member: detail },
                "Member created successfully",
            )))
        }
        Err(e) => Ok(error_response_with(ErrorCode::MemberInvalid, e)),
    }
}
