use chrono::{Datelike, Months, NaiveDate};
use std::fmt;

use crate::errors::{CoopError, Result};

/// Current calendar date on the server clock.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// A calendar month, identified by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    first_day: NaiveDate,
}

impl Period {
    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// Parses `YYYY-MM-DD` (any day of the month) or `YYYY-MM`.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CoopError::validation("Period is required"));
        }

        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return Ok(Self::containing(date));
        }

        NaiveDate::parse_from_str(&format!("{input}-01"), "%Y-%m-%d")
            .map(Self::containing)
            .map_err(|_| {
                CoopError::validation(format!(
                    "Invalid period '{input}', expected YYYY-MM-DD or YYYY-MM"
                ))
            })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day.pred_opt().unwrap_or(self.first_day)
    }

    pub fn next(&self) -> Self {
        Self {
            first_day: self
                .first_day
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first_day),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day()
    }

    /// Whether `[start, end]` intersects this month.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.last_day() && end >= self.first_day
    }

    /// "January 2025"
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_normalises_to_first_day() {
        let p = Period::parse("2025-01-15").unwrap();
        assert_eq!(p.first_day(), date(2025, 1, 1));
        assert_eq!(Period::parse("2025-01").unwrap(), p);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Period::parse("").is_err());
        assert!(Period::parse("January").is_err());
        assert!(Period::parse("2025-13-01").is_err());
    }

    #[test]
    fn test_last_day_handles_leap_years() {
        assert_eq!(Period::parse("2024-02").unwrap().last_day(), date(2024, 2, 29));
        assert_eq!(Period::parse("2025-02").unwrap().last_day(), date(2025, 2, 28));
        assert_eq!(Period::parse("2025-12").unwrap().last_day(), date(2025, 12, 31));
    }

    #[test]
    fn test_overlaps() {
        let p = Period::parse("2025-03").unwrap();
        assert!(p.overlaps(date(2025, 1, 1), date(2025, 3, 1)));
        assert!(p.overlaps(date(2025, 3, 31), date(2025, 6, 1)));
        assert!(!p.overlaps(date(2025, 4, 1), date(2025, 6, 1)));
        assert!(!p.overlaps(date(2025, 1, 1), date(2025, 2, 28)));
    }

    #[test]
    fn test_label_and_display() {
        let p = Period::parse("2025-01-01").unwrap();
        assert_eq!(p.label(), "January 2025");
        assert_eq!(p.to_string(), "2025-01-01");
        assert!(p.contains(date(2025, 1, 31)));
        assert!(!p.contains(date(2025, 2, 1)));
    }
}
