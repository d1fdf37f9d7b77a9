use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::info;

use super::{DynamicConfig, SystemService};
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, AppStartTime, ErrorCode,
    system::{
        entities::KnownSettingKey,
        requests::{SettingAuditQuery, UpdateSettingRequest},
        responses::{AdminSettingsListResponse, SettingResponse, SystemSettingsResponse},
    },
};
use crate::services::{bad_request, error_response, error_response_with, not_found};

/// Public, read-only view of the runtime settings.
pub async fn get_settings(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| (chrono::Utc::now() - start.start_datetime).num_seconds());

    let response = SystemSettingsResponse {
        system_name: DynamicConfig::system_name().await,
        cooperative_name: DynamicConfig::cooperative_name().await,
        cooperative_address: DynamicConfig::cooperative_address().await,
        cooperative_phone: DynamicConfig::cooperative_phone().await,
        cooperative_email: DynamicConfig::cooperative_email().await,
        currency: DynamicConfig::currency().await,
        environment: config.app.environment.clone(),
        uptime_seconds,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Settings retrieved successfully",
    )))
}

pub async fn get_admin_settings(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_all_settings().await {
        Ok(settings) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AdminSettingsListResponse { settings },
            "Admin settings retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}

pub async fn update_setting(
    service: &SystemService,
    key: String,
    body: UpdateSettingRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let known: KnownSettingKey = match key.parse() {
        Ok(k) => k,
        Err(msg) => return Ok(not_found(ErrorCode::SettingNotFound, &msg)),
    };
    if let Err(msg) = known.validate(&body.value) {
        return Ok(bad_request(ErrorCode::SettingInvalid, msg));
    }

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    let ip_address = request
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    let storage = service.get_storage(request)?;
    let value = body.value.trim().to_string();
    let setting = match storage
        .update_setting(&key, &value, user_id, ip_address)
        .await
    {
        Ok(s) => s,
        Err(e) => return Ok(error_response_with(ErrorCode::SettingUpdateFailed, e)),
    };

    DynamicConfig::update(&key, &value).await;
    info!("Setting {} changed by user {}", key, user_id);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SettingResponse { setting },
        "Setting updated successfully",
    )))
}

pub async fn get_setting_audits(
    service: &SystemService,
    query: SettingAuditQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_setting_audits(query).await {
        Ok(audits) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            audits,
            "Setting audits retrieved successfully",
        ))),
        Err(e) => Ok(error_response(e)),
    }
}
