use chrono::{Days, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use super::money::round_money;
use crate::errors::{CoopError, Result};

/// Outcome of applying a payment amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub amount_paid: Decimal,
    pub fully_paid: bool,
}

/// Adds `amount` (default: the outstanding balance) to what was already paid.
pub fn settle_payment(
    amount_due: Decimal,
    already_paid: Decimal,
    amount: Option<Decimal>,
) -> Result<Settlement> {
    let balance = round_money(amount_due - already_paid);
    let amount = round_money(amount.unwrap_or(balance));

    if amount <= Decimal::ZERO {
        return Err(CoopError::validation("Payment amount must be positive"));
    }

    let amount_paid = round_money(already_paid + amount);
    Ok(Settlement {
        amount_paid,
        fully_paid: amount_paid >= amount_due,
    })
}

/// One generated installment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installment {
    pub number: i32,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub note: String,
}

/// Upper bound on installments per plan (ten years of monthly payments).
pub const MAX_INSTALLMENTS: i32 = 120;

const DAYS_BETWEEN_INSTALLMENTS: u64 = 30;

pub fn validate_installment_count(count: i32) -> Result<()> {
    if !(1..=MAX_INSTALLMENTS).contains(&count) {
        return Err(CoopError::validation(format!(
            "Number of installments must be between 1 and {MAX_INSTALLMENTS}"
        )));
    }
    Ok(())
}

/// Regular installment amount, rounded toward zero so the last installment
/// only ever absorbs a non-negative remainder.
pub fn installment_amount(total: Decimal, count: i32) -> Result<Decimal> {
    validate_installment_count(count)?;
    if total <= Decimal::ZERO {
        return Err(CoopError::validation("Plan total must be positive"));
    }
    let each = (total / Decimal::from(count)).round_dp_with_strategy(2, RoundingStrategy::ToZero);
    if each <= Decimal::ZERO {
        return Err(CoopError::validation(format!(
            "Plan total {total} is too small for {count} installments"
        )));
    }
    Ok(each)
}

/// Splits `total` into `count` installments due every 30 days from `start`.
///
/// The last installment absorbs rounding so the amounts sum to `total`.
pub fn installment_schedule(
    total: Decimal,
    count: i32,
    start: NaiveDate,
) -> Result<Vec<Installment>> {
    let total = round_money(total);
    let each = installment_amount(total, count)?;
    let mut allocated = Decimal::ZERO;
    let mut out = Vec::with_capacity(count as usize);

    for i in 0..count {
        let amount = if i == count - 1 {
            total - allocated
        } else {
            each
        };
        let offset = Days::new(DAYS_BETWEEN_INSTALLMENTS * i as u64);
        let due_date = start.checked_add_days(offset).ok_or_else(|| {
            CoopError::validation(format!("Installment {} falls outside the calendar", i + 1))
        })?;
        allocated += amount;
        out.push(Installment {
            number: i + 1,
            amount,
            due_date,
            note: format!("Installment {} of {}", i + 1, count),
        });
    }

    Ok(out)
}

/// `subtotal − discount + tax`; negative totals are rejected.
pub fn invoice_total(subtotal: Decimal, discount: Decimal, tax: Decimal) -> Result<Decimal> {
    if subtotal < Decimal::ZERO || discount < Decimal::ZERO || tax < Decimal::ZERO {
        return Err(CoopError::validation(
            "Invoice amounts must not be negative",
        ));
    }
    let total = round_money(subtotal - discount + tax);
    if total < Decimal::ZERO {
        return Err(CoopError::validation("Invoice total must not be negative"));
    }
    Ok(total)
}

/// Days past `due_date`, zero when not yet due.
pub fn days_overdue(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (today - due_date).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn date(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_settle_full_balance_by_default() {
        let s = settle_payment(d("500"), d("200"), None).unwrap();
        assert_eq!(s.amount_paid, d("500"));
        assert!(s.fully_paid);
    }

    #[test]
    fn test_settle_partial() {
        let s = settle_payment(d("500"), Decimal::ZERO, Some(d("150"))).unwrap();
        assert_eq!(s.amount_paid, d("150"));
        assert!(!s.fully_paid);
    }

    #[test]
    fn test_settle_rejects_non_positive() {
        assert!(settle_payment(d("500"), d("500"), None).is_err());
        assert!(settle_payment(d("500"), Decimal::ZERO, Some(d("-1"))).is_err());
    }

    #[test]
    fn test_installments_absorb_rounding() {
        let plan = installment_schedule(d("1000"), 3, date(2025, 1, 1)).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].amount, d("333.33"));
        assert_eq!(plan[1].amount, d("333.33"));
        assert_eq!(plan[2].amount, d("333.34"));
        let sum: Decimal = plan.iter().map(|i| i.amount).sum();
        assert_eq!(sum, d("1000"));
        assert_eq!(plan[1].due_date, date(2025, 1, 31));
        assert_eq!(plan[2].note, "Installment 3 of 3");
    }

    #[test]
    fn test_installments_validation() {
        assert!(installment_schedule(d("1000"), 0, date(2025, 1, 1)).is_err());
        assert!(installment_schedule(Decimal::ZERO, 2, date(2025, 1, 1)).is_err());
        assert!(installment_schedule(d("1000"), MAX_INSTALLMENTS + 1, date(2025, 1, 1)).is_err());
        assert!(installment_schedule(d("1000000000"), 3_300_000, date(2025, 1, 1)).is_err());
    }

    #[test]
    fn test_installments_never_negative() {
        // rounding half up would give 0.01 each and -0.04 for the last one
        assert!(installment_schedule(d("0.05"), 10, date(2025, 1, 1)).is_err());

        let plan = installment_schedule(d("0.20"), 3, date(2025, 1, 1)).unwrap();
        let amounts: Vec<Decimal> = plan.iter().map(|i| i.amount).collect();
        assert_eq!(amounts, vec![d("0.06"), d("0.06"), d("0.08")]);

        let plan = installment_schedule(d("100.99"), 7, date(2025, 1, 1)).unwrap();
        assert!(plan.iter().all(|i| i.amount > Decimal::ZERO));
        let sum: Decimal = plan.iter().map(|i| i.amount).sum();
        assert_eq!(sum, d("100.99"));
    }

    #[test]
    fn test_installments_at_the_cap() {
        let plan = installment_schedule(d("12000"), MAX_INSTALLMENTS, date(2025, 1, 1)).unwrap();
        assert_eq!(plan.len(), MAX_INSTALLMENTS as usize);
        assert_eq!(plan[119].due_date, date(2025, 1, 1) + chrono::Duration::days(30 * 119));
    }

    #[test]
    fn test_installments_past_the_calendar_end() {
        assert!(installment_schedule(d("100"), 2, NaiveDate::MAX).is_err());
    }

    #[test]
    fn test_invoice_total() {
        assert_eq!(invoice_total(d("1000"), d("100"), d("90")).unwrap(), d("990"));
        assert!(invoice_total(d("100"), d("200"), Decimal::ZERO).is_err());
    }

    #[test]
    fn test_days_overdue() {
        assert_eq!(days_overdue(date(2025, 1, 1), date(2025, 1, 8)), 7);
        assert_eq!(days_overdue(date(2025, 1, 8), date(2025, 1, 1)), 0);
    }
}
