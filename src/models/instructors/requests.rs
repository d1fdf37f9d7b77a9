use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{EmploymentType, InstructorStatus};

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/instructor.ts")]
pub struct InstructorListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<InstructorStatus>,
    pub employment_type: Option<EmploymentType>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/instructor.ts")]
pub struct CreateInstructorRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub specialization: String,
    pub qualifications: Option<String>,
    pub years_of_experience: Option<i32>,
    pub employment_type: Option<EmploymentType>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<InstructorStatus>,
    #[ts(type = "string")]
    pub hourly_rate: Decimal,
    /// Falls back to `finance.default_tax_rate`
    #[ts(type = "string | null")]
    pub tax_rate_percentage: Option<Decimal>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub rib: Option<String>,
    pub bio: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/instructor.ts")]
pub struct UpdateInstructorRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub specialization: Option<String>,
    pub qualifications: Option<String>,
    pub years_of_experience: Option<i32>,
    pub employment_type: Option<EmploymentType>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<InstructorStatus>,
    #[ts(type = "string | null")]
    pub hourly_rate: Option<Decimal>,
    #[ts(type = "string | null")]
    pub tax_rate_percentage: Option<Decimal>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub rib: Option<String>,
    pub bio: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_accepts_numbers_and_strings() {
        let body = r#"{"full_name":"A","email":"a@b.co","phone":"+212600000001",
            "specialization":"Maths","hourly_rate":"150.50","tax_rate_percentage":12}"#;
        let req: CreateInstructorRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.hourly_rate, Decimal::new(15050, 2));
        assert_eq!(req.tax_rate_percentage, Some(Decimal::from(12)));
    }
}
