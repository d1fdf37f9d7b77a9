use super::entities::{UserRole, UserStatus};
use serde::Deserialize;
use ts_rs::TS;

// List filters (query string), also handed to storage
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub user_type: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    /// Plain text on the way in, replaced by the hash before storage
    pub password: String,
    pub user_type: UserRole,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub instructor_id: Option<i64>,
    pub member_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub user_type: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub instructor_id: Option<i64>,
    pub member_id: Option<i64>,
}
