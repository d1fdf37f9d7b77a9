//! Periodic work shared by the scheduler, the CLI and the HTTP triggers.

pub mod attendance;
pub mod financials;
pub mod reminders;
pub mod scheduler;

pub use attendance::update_attendance_summaries;
pub use financials::{FinancialRun, calculate_financials, finalize_period};
pub use reminders::send_payment_reminders;
pub use scheduler::Scheduler;
