use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MemberService;
use super::create::validate_fields;
use super::get::member_detail;
use crate::models::members::requests::UpdateMemberRequest;
use crate::models::members::responses::MemberResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, error_response, error_response_with, not_found};

pub async fn update_member(
    service: &MemberService,
    id: i64,
    update: UpdateMemberRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_fields(
        update.full_name.as_deref(),
        update.email.as_deref(),
        update.phone.as_deref(),
        update.share_percentage,
    ) {
        return Ok(bad_request(ErrorCode::MemberInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    let member = match storage.update_member(id, update).await {
        Ok(Some(member)) => member,
        Ok(None) => return Ok(not_found(ErrorCode::MemberNotFound, "Member not found")),
        Err(e) => return Ok(error_response_with(ErrorCode::MemberInvalid, e)),
    };

    match member_detail(&storage, member).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MemberResponse { member: detail },
            "Member updated successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn delete_member(
    service: &MemberService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_member(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Member deleted successfully"))),
        Ok(false) => Ok(not_found(ErrorCode::MemberNotFound, "Member not found")),
        Err(e) => Ok(error_response(e)),
    }
}

#[cfg(test)]
mod tests {
    use crate::models::members::entities::EmploymentStatus;
    use crate::models::members::requests::{CreateMemberRequest, UpdateMemberRequest};
    use crate::services::MemberService;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{body::to_bytes, http::StatusCode, test::TestRequest};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn member(share: &str, employment: &str) -> CreateMemberRequest {
        serde_json::from_value(serde_json::json!({
            "full_name": "Fatima Zahra",
            "email": "fz@coop.ma",
            "phone": "+212611111111",
            "employment_status": employment,
            "share_percentage": share,
        }))
        .unwrap()
    }

    #[actix_web::test]
    async fn test_member_number_and_profit_flag() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let service = MemberService::with_storage(storage.clone());
        let req = TestRequest::default().to_http_request();

        let resp = service
            .create_member(member("120", "private"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = service
            .create_member(member("25", "public"), &req)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value =
            serde_json::from_slice(&to_bytes(resp.into_body()).await.unwrap()).unwrap();
        let data = &body["data"]["member"];
        assert!(!data["membership_number"].as_str().unwrap().is_empty());
        assert_eq!(data["can_receive_profit"], false);

        let id = data["id"].as_i64().unwrap();
        let update = UpdateMemberRequest {
            employment_status: Some(EmploymentStatus::Private),
            ..Default::default()
        };
        let resp = service.update_member(id, update, &req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let stored = storage.get_member_by_id(id).await.unwrap().unwrap();
        assert!(stored.can_receive_profit());
        assert_eq!(
            storage.member_distributions_total(id).await.unwrap(),
            Decimal::ZERO
        );
    }
}
