use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_str_enum;

define_str_enum!(EmploymentType, "../frontend/src/types/generated/instructor.ts" {
    FullTime => "full_time",
    PartTime => "part_time",
    Contract => "contract",
});

define_str_enum!(InstructorStatus, "../frontend/src/types/generated/instructor.ts" {
    Active => "active",
    Inactive => "inactive",
    OnLeave => "on_leave",
});

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/instructor.ts")]
pub struct Instructor {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub specialization: String,
    pub qualifications: Option<String>,
    pub years_of_experience: i32,
    pub employment_type: EmploymentType,
    pub hire_date: NaiveDate,
    pub status: InstructorStatus,
    #[ts(type = "string")]
    pub hourly_rate: Decimal,
    #[ts(type = "string")]
    pub tax_rate_percentage: Decimal,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub rib: Option<String>,
    pub bio: Option<String>,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Workload and earnings of one instructor
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/instructor.ts")]
pub struct InstructorStats {
    pub active_courses_count: i64,
    #[ts(type = "string")]
    pub total_hours_taught: Decimal,
    /// Net amount of paid instructor payments
    #[ts(type = "string")]
    pub total_earnings: Decimal,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/instructor.ts")]
pub struct InstructorDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub instructor: Instructor,
    #[serde(flatten)]
    #[ts(flatten)]
    pub stats: InstructorStats,
}
