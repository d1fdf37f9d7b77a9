use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_str_enum;

define_str_enum!(CourseType, "../frontend/src/types/generated/course.ts" {
    Academic => "academic",
    Language => "language",
    Skill => "skill",
    ExamPrep => "exam_prep",
});

define_str_enum!(CourseStatus, "../frontend/src/types/generated/course.ts" {
    Pending => "pending",
    Active => "active",
    Completed => "completed",
    Cancelled => "cancelled",
});

define_str_enum!(Weekday, "../frontend/src/types/generated/course.ts" {
    Monday => "monday",
    Tuesday => "tuesday",
    Wednesday => "wednesday",
    Thursday => "thursday",
    Friday => "friday",
    Saturday => "saturday",
    Sunday => "sunday",
});

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub course_name: String,
    pub course_type: CourseType,
    pub subject: String,
    pub description: Option<String>,
    #[ts(type = "string")]
    pub fee_per_month: Decimal,
    pub max_students: i32,
    pub duration_months: i32,
    pub schedule_days: Vec<Weekday>,
    pub schedule_time: Option<NaiveTime>,
    #[ts(type = "string")]
    pub hours_per_session: Decimal,
    pub classroom: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: CourseStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    /// Fee over the whole course duration for one student.
    pub fn total_fee(&self) -> Decimal {
        self.fee_per_month * Decimal::from(self.duration_months)
    }

    pub fn total_revenue_potential(&self) -> Decimal {
        self.total_fee() * Decimal::from(self.max_students)
    }

    pub fn with_enrollment(self, enrolled_count: i64) -> CourseDetail {
        let available_seats = (self.max_students as i64 - enrolled_count).max(0);
        CourseDetail {
            enrolled_count,
            is_full: available_seats == 0,
            available_seats,
            total_revenue_potential: self.total_revenue_potential(),
            course: self,
        }
    }
}

/// Stored form of `schedule_days`: comma separated weekday names.
pub fn encode_schedule_days(days: &[Weekday]) -> String {
    days.iter().map(Weekday::as_str).collect::<Vec<_>>().join(",")
}

/// Unknown names are dropped.
pub fn decode_schedule_days(raw: &str) -> Vec<Weekday> {
    raw.split(',')
        .filter_map(|d| d.trim().parse().ok())
        .collect()
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub course: Course,
    pub enrolled_count: i64,
    pub is_full: bool,
    pub available_seats: i64,
    #[ts(type = "string")]
    pub total_revenue_potential: Decimal,
}

/// An instructor teaching a course
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseInstructor {
    pub id: i64,
    pub course_id: i64,
    pub instructor_id: i64,
    pub is_primary: bool,
    #[ts(type = "string")]
    pub hours_taught: Decimal,
    pub assigned_at: chrono::DateTime<chrono::Utc>,
    pub instructor_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(max_students: i32) -> Course {
        let now = chrono::Utc::now();
        Course {
            id: 1,
            course_name: "Maths 2BAC".into(),
            course_type: CourseType::ExamPrep,
            subject: "Mathematics".into(),
            description: None,
            fee_per_month: Decimal::new(30000, 2),
            max_students,
            duration_months: 3,
            schedule_days: vec![Weekday::Monday, Weekday::Thursday],
            schedule_time: NaiveTime::from_hms_opt(18, 0, 0),
            hours_per_session: Decimal::new(15, 1),
            classroom: None,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            status: CourseStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_detail_seats() {
        let detail = course(2).with_enrollment(1);
        assert_eq!(detail.available_seats, 1);
        assert!(!detail.is_full);
        assert_eq!(detail.total_revenue_potential, Decimal::from(1800));

        let full = course(2).with_enrollment(3);
        assert!(full.is_full);
        assert_eq!(full.available_seats, 0);
    }

    #[test]
    fn test_schedule_days_storage() {
        let days = vec![Weekday::Monday, Weekday::Saturday];
        let raw = encode_schedule_days(&days);
        assert_eq!(raw, "monday,saturday");
        assert_eq!(decode_schedule_days("monday, funday,saturday"), days);
        assert!(decode_schedule_days("").is_empty());
    }
}
