pub mod installments;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::payment_plans::requests::{
    CreatePaymentPlanRequest, GenerateInstallmentsRequest, PaymentPlanListQuery,
    UpdatePaymentPlanRequest,
};

super::storage_service!(PaymentPlanService);

impl PaymentPlanService {
    pub async fn list_plans(
        &self,
        query: PaymentPlanListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::list_plans(self, query, request).await
    }

    pub async fn create_plan(
        &self,
        plan: CreatePaymentPlanRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_plan(self, plan, request).await
    }

    pub async fn get_plan(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::get_plan(self, id, request).await
    }

    pub async fn update_plan(
        &self,
        id: i64,
        update: UpdatePaymentPlanRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_plan(self, id, update, request).await
    }

    pub async fn delete_plan(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::delete_plan(self, id, request).await
    }

    pub async fn list_installments(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        installments::list_installments(self, id, request).await
    }

    pub async fn generate_installments(
        &self,
        id: i64,
        body: GenerateInstallmentsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        installments::generate_installments(self, id, body, request).await
    }
}
