pub mod settings;
pub mod settings_cache;

pub use settings_cache::DynamicConfig;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::system::requests::{SettingAuditQuery, UpdateSettingRequest};

super::storage_service!(SystemService);

impl SystemService {
    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn get_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        settings::get_settings(self, request).await
    }

    pub async fn get_admin_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        settings::get_admin_settings(self, request).await
    }

    pub async fn update_setting(
        &self,
        key: String,
        body: UpdateSettingRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        settings::update_setting(self, key, body, request).await
    }

    pub async fn get_setting_audits(
        &self,
        query: SettingAuditQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        settings::get_setting_audits(self, query, request).await
    }
}
