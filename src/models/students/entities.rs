use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_str_enum;

define_str_enum!(Gender, "../frontend/src/types/generated/student.ts" {
    Male => "M",
    Female => "F",
});

define_str_enum!(EducationLevel, "../frontend/src/types/generated/student.ts" {
    Primary => "primary",
    Middle => "middle",
    High => "high",
    University => "university",
    Other => "other",
});

define_str_enum!(StudentStatus, "../frontend/src/types/generated/student.ts" {
    Active => "active",
    Inactive => "inactive",
    Graduated => "graduated",
    Suspended => "suspended",
});

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub parent_name: String,
    pub parent_phone: String,
    pub parent_email: Option<String>,
    pub education_level: EducationLevel,
    pub school_name: Option<String>,
    pub registration_date: NaiveDate,
    pub status: StudentStatus,
    pub medical_notes: Option<String>,
    pub notes: Option<String>,
    /// Whole years, derived from `date_of_birth`
    pub age: Option<i32>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Age in whole years on `today`.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        assert_eq!(age_on(date(2010, 6, 15), date(2025, 6, 14)), 14);
        assert_eq!(age_on(date(2010, 6, 15), date(2025, 6, 15)), 15);
        assert_eq!(age_on(date(2030, 1, 1), date(2025, 1, 1)), 0);
    }

    #[test]
    fn test_gender_wire_values() {
        assert_eq!("M".parse::<Gender>().unwrap(), Gender::Male);
        assert!("m".parse::<Gender>().is_err());
    }
}
