use serde::Serialize;
use ts_rs::TS;

use super::entities::SystemSetting;

/// Values safe to expose to any signed-in user
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemSettingsResponse {
    pub system_name: String,
    pub cooperative_name: String,
    pub cooperative_address: String,
    pub cooperative_phone: String,
    pub cooperative_email: String,
    pub currency: String,
    pub environment: String,
    /// Seconds since the server process started, absent outside the server
    pub uptime_seconds: Option<i64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct AdminSettingsListResponse {
    pub settings: Vec<SystemSetting>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SettingResponse {
    pub setting: SystemSetting,
}
