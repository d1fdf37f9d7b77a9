pub mod create;
pub mod list;
pub mod manage;
pub mod mark_paid;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::payments::requests::{
    CreatePaymentRequest, MarkPaidRequest, PaymentListQuery, UpdatePaymentRequest,
};

super::storage_service!(PaymentService);

impl PaymentService {
    pub async fn list_payments(
        &self,
        query: PaymentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_payments(self, query, request).await
    }

    pub async fn list_overdue(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_overdue(self, request).await
    }

    pub async fn create_payment(
        &self,
        payment: CreatePaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_payment(self, payment, request).await
    }

    pub async fn get_payment(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::get_payment(self, id, request).await
    }

    pub async fn update_payment(
        &self,
        id: i64,
        update: UpdatePaymentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_payment(self, id, update, request).await
    }

    pub async fn delete_payment(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::delete_payment(self, id, request).await
    }

    pub async fn mark_paid(
        &self,
        id: i64,
        body: MarkPaidRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        mark_paid::mark_paid(self, id, body, request).await
    }
}
