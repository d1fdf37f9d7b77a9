pub mod create;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::financials::requests::DistributionListQuery;
use crate::models::members::requests::{CreateMemberRequest, MemberListQuery, UpdateMemberRequest};

super::storage_service!(MemberService);

impl MemberService {
    pub async fn list_members(
        &self,
        query: MemberListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_members(self, query, request).await
    }

    pub async fn create_member(
        &self,
        member: CreateMemberRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_member(self, member, request).await
    }

    pub async fn get_member(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_member(self, id, request).await
    }

    pub async fn update_member(
        &self,
        id: i64,
        update: UpdateMemberRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_member(self, id, update, request).await
    }

    pub async fn delete_member(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        update::delete_member(self, id, request).await
    }

    pub async fn list_member_distributions(
        &self,
        id: i64,
        query: DistributionListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_member_distributions(self, id, query, request).await
    }
}
