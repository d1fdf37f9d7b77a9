use rust_decimal::Decimal;

use super::money::ratio_percent;

/// Status counts of a student in a course over some window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceCounts {
    pub present: i32,
    pub absent: i32,
    pub late: i32,
    pub excused: i32,
}

impl AttendanceCounts {
    pub fn total(&self) -> i32 {
        self.present + self.absent + self.late + self.excused
    }

    /// Tallies a status string; unknown statuses are ignored.
    pub fn record(&mut self, status: &str) {
        match status {
            "present" => self.present += 1,
            "absent" => self.absent += 1,
            "late" => self.late += 1,
            "excused" => self.excused += 1,
            _ => {}
        }
    }

    /// Summary rate: late arrivals count as attended.
    pub fn summary_rate(&self) -> Decimal {
        ratio_percent(
            Decimal::from(self.present + self.late),
            Decimal::from(self.total()),
        )
    }

    /// Enrollment rate: only `present` counts, `None` without records.
    pub fn enrollment_rate(&self) -> Option<Decimal> {
        match self.total() {
            0 => None,
            total => Some(ratio_percent(
                Decimal::from(self.present),
                Decimal::from(total),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rate_counts_late() {
        let mut counts = AttendanceCounts::default();
        for s in ["present", "present", "late", "absent"] {
            counts.record(s);
        }
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.summary_rate(), Decimal::from(75));
        assert_eq!(counts.enrollment_rate(), Some(Decimal::from(50)));
    }

    #[test]
    fn test_empty_counts() {
        let counts = AttendanceCounts::default();
        assert_eq!(counts.summary_rate(), Decimal::ZERO);
        assert_eq!(counts.enrollment_rate(), None);
    }

    #[test]
    fn test_unknown_status_ignored() {
        let mut counts = AttendanceCounts::default();
        counts.record("holiday");
        assert_eq!(counts.total(), 0);
    }
}
