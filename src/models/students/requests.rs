use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{EducationLevel, Gender, StudentStatus};

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<StudentStatus>,
    pub education_level: Option<EducationLevel>,
    pub gender: Option<Gender>,
    /// Matches full name, parent name and both e-mails
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub parent_name: String,
    pub parent_phone: String,
    pub parent_email: Option<String>,
    pub education_level: Option<EducationLevel>,
    pub school_name: Option<String>,
    /// Defaults to today
    pub registration_date: Option<NaiveDate>,
    /// Defaults to active
    pub status: Option<StudentStatus>,
    pub medical_notes: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_email: Option<String>,
    pub education_level: Option<EducationLevel>,
    pub school_name: Option<String>,
    pub registration_date: Option<NaiveDate>,
    pub status: Option<StudentStatus>,
    pub medical_notes: Option<String>,
    pub notes: Option<String>,
}

/// `?format=csv|xlsx` for export and template downloads
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct FileFormatQuery {
    pub format: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_create_payload() {
        let body = r#"{
            "full_name": "Ahmed Benali",
            "parent_name": "Mohamed Benali",
            "parent_phone": "+212600000000",
            "registration_date": "2025-01-15",
            "status": "active"
        }"#;
        let req: CreateStudentRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.full_name, "Ahmed Benali");
        assert_eq!(req.status, Some(StudentStatus::Active));
        assert_eq!(
            req.registration_date,
            NaiveDate::from_ymd_opt(2025, 1, 15)
        );
        assert!(req.education_level.is_none());
    }
}
