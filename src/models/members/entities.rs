use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_str_enum;

define_str_enum!(MemberStatus, "../frontend/src/types/generated/member.ts" {
    Active => "active",
    Inactive => "inactive",
    Suspended => "suspended",
});

define_str_enum!(EmploymentStatus, "../frontend/src/types/generated/member.ts" {
    Public => "public",
    Private => "private",
    SelfEmployed => "self_employed",
    Unemployed => "unemployed",
});

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/member.ts")]
pub struct Member {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub membership_number: String,
    pub join_date: NaiveDate,
    pub status: MemberStatus,
    pub employment_status: EmploymentStatus,
    pub employer_name: Option<String>,
    #[ts(type = "string")]
    pub share_percentage: Decimal,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub rib: Option<String>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Member {
    /// Public employees never receive profit, nor do inactive members.
    pub fn can_receive_profit(&self) -> bool {
        self.status == MemberStatus::Active && self.employment_status != EmploymentStatus::Public
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/member.ts")]
pub struct MemberDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub member: Member,
    pub can_receive_profit: bool,
    #[ts(type = "string")]
    pub total_distributions_received: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(status: MemberStatus, employment: EmploymentStatus) -> Member {
        let now = chrono::Utc::now();
        Member {
            id: 1,
            full_name: "Fatima Zahra".into(),
            email: "fz@example.com".into(),
            phone: "+212611111111".into(),
            address: None,
            membership_number: "MEM-0001".into(),
            join_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            status,
            employment_status: employment,
            employer_name: None,
            share_percentage: Decimal::from(25),
            bank_name: None,
            account_number: None,
            rib: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_public_employee_restriction() {
        assert!(member(MemberStatus::Active, EmploymentStatus::Private).can_receive_profit());
        assert!(!member(MemberStatus::Active, EmploymentStatus::Public).can_receive_profit());
        assert!(!member(MemberStatus::Suspended, EmploymentStatus::Private).can_receive_profit());
    }
}
