//! SeaORM entities.
//!
//! Kept apart from the API types in `models`: storage reads these rows and
//! converts them with the `into_*` helpers.

pub mod prelude;

pub mod attendance;
pub mod attendance_summaries;
pub mod budget_allocations;
pub mod course_instructors;
pub mod courses;
pub mod enrollments;
pub mod expenses;
pub mod instructor_payments;
pub mod instructors;
pub mod invoices;
pub mod login_attempts;
pub mod member_distributions;
pub mod members;
pub mod monthly_financials;
pub mod notification_templates;
pub mod notifications;
pub mod payment_plans;
pub mod payments;
pub mod students;
pub mod system_settings;
pub mod system_settings_audit;
pub mod users;

use chrono::{DateTime, Utc};

pub(crate) fn ts_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
