use serde::Deserialize;
use ts_rs::TS;

use crate::models::users::entities::UserRole;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// Username or e-mail
    #[serde(alias = "email")]
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub user_type: Option<UserRole>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_accepts_email_field() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.co","password":"x"}"#).unwrap();
        assert_eq!(req.username, "a@b.co");
        assert!(!req.remember_me);
    }

    #[test]
    fn test_register_rejects_unknown_role() {
        let body = r#"{"username":"u","email":"e","password":"p","password_confirm":"p","full_name":"f","user_type":"root"}"#;
        assert!(serde_json::from_str::<RegisterRequest>(body).is_err());
    }
}
