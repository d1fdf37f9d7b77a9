use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{EmploymentStatus, MemberStatus};

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/member.ts")]
pub struct MemberListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<MemberStatus>,
    pub employment_status: Option<EmploymentStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/member.ts")]
pub struct CreateMemberRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    /// Generated when absent
    pub membership_number: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub status: Option<MemberStatus>,
    pub employment_status: EmploymentStatus,
    pub employer_name: Option<String>,
    #[ts(type = "string")]
    pub share_percentage: Decimal,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub rib: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/member.ts")]
pub struct UpdateMemberRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub status: Option<MemberStatus>,
    pub employment_status: Option<EmploymentStatus>,
    pub employer_name: Option<String>,
    #[ts(type = "string | null")]
    pub share_percentage: Option<Decimal>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub rib: Option<String>,
    pub notes: Option<String>,
}
