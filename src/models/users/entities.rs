use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_str_enum;

define_str_enum!(
    /// Account type, doubles as the authorization role
    UserRole, "../frontend/src/types/generated/user.ts" {
        Admin => "admin",
        Manager => "manager",
        Instructor => "instructor",
        Staff => "staff",
        Member => "member",
    }
);

impl UserRole {
    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn management_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Manager]
    }
    pub fn office_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Manager, &Self::Staff]
    }
    pub fn attendance_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Manager, &Self::Staff, &Self::Instructor]
    }

    /// Roles that may not be chosen through public registration.
    pub fn is_privileged(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Manager)
    }
}

define_str_enum!(UserStatus, "../frontend/src/types/generated/user.ts" {
    Active => "active",
    Inactive => "inactive",
    Suspended => "suspended",
});

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    pub user_type: UserRole,
    pub status: UserStatus,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    /// Linked instructor profile, for instructor accounts
    pub instructor_id: Option<i64>,
    /// Linked member profile, for member accounts
    pub member_id: Option<i64>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn generate_token_pair(
        &self,
        access_token_expiry: chrono::TimeDelta,
        refresh_token_expiry: chrono::TimeDelta,
    ) -> Result<crate::utils::jwt::TokenPair, jsonwebtoken::errors::Error> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            self.user_type.as_str(),
            access_token_expiry,
            refresh_token_expiry,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_groups() {
        assert!(UserRole::office_roles().contains(&&UserRole::Staff));
        assert!(!UserRole::office_roles().contains(&&UserRole::Instructor));
        assert!(UserRole::attendance_roles().contains(&&UserRole::Instructor));
        assert!(!UserRole::management_roles().contains(&&UserRole::Member));
    }

    #[test]
    fn test_privileged_roles() {
        assert!(UserRole::Admin.is_privileged());
        assert!(UserRole::Manager.is_privileged());
        assert!(!UserRole::Staff.is_privileged());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let now = chrono::Utc::now();
        let user = User {
            id: 1,
            username: "admin".into(),
            email: "admin@localhost".into(),
            password_hash: "secret-hash".into(),
            user_type: UserRole::Admin,
            status: UserStatus::Active,
            full_name: None,
            phone: None,
            instructor_id: None,
            member_id: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"user_type\":\"admin\""));
    }
}
