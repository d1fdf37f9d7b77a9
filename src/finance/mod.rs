//! Pure financial and attendance arithmetic.
//!
//! Nothing in here touches storage; services and jobs feed it rows and
//! persist what it returns.

pub mod attendance;
pub mod money;
pub mod payments;
pub mod payroll;
pub mod period;
pub mod profit;

pub use money::{percent_of, round_money};
pub use period::{Period, today};
