pub mod dispatch;
pub mod manage;
pub mod sender;
pub mod templates;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::notifications::requests::{
    CreateNotificationRequest, CreateTemplateRequest, MarkFailedRequest, NotificationListQuery,
    RunRemindersRequest, TemplateListQuery, UpdateNotificationRequest, UpdateTemplateRequest,
};

super::storage_service!(NotificationService);

impl NotificationService {
    pub async fn list_notifications(
        &self,
        query: NotificationListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::list_notifications(self, query, request).await
    }

    pub async fn create_notification(
        &self,
        body: CreateNotificationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_notification(self, body, request).await
    }

    pub async fn get_notification(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::get_notification(self, id, request).await
    }

    pub async fn update_notification(
        &self,
        id: i64,
        body: UpdateNotificationRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_notification(self, id, body, request).await
    }

    pub async fn delete_notification(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::delete_notification(self, id, request).await
    }

    pub async fn mark_sent(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::mark_sent(self, id, request).await
    }

    pub async fn mark_failed(
        &self,
        id: i64,
        body: MarkFailedRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::mark_failed(self, id, body, request).await
    }

    pub async fn dispatch(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dispatch::dispatch(self, request).await
    }

    pub async fn run_reminders(
        &self,
        body: RunRemindersRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        dispatch::run_reminders(self, body, request).await
    }

    // Templates

    pub async fn list_templates(
        &self,
        query: TemplateListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        templates::list_templates(self, query, request).await
    }

    pub async fn create_template(
        &self,
        body: CreateTemplateRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        templates::create_template(self, body, request).await
    }

    pub async fn get_template(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        templates::get_template(self, id, request).await
    }

    pub async fn update_template(
        &self,
        id: i64,
        body: UpdateTemplateRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        templates::update_template(self, id, body, request).await
    }

    pub async fn delete_template(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        templates::delete_template(self, id, request).await
    }
}
