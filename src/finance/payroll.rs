use rust_decimal::Decimal;

use super::money::{percent_of, round_money};

/// Pay of one instructor for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructorPay {
    pub total_hours: Decimal,
    pub hourly_rate: Decimal,
    pub tax_rate: Decimal,
    pub gross_amount: Decimal,
    pub tax_amount: Decimal,
    pub net_amount: Decimal,
}

/// `gross = hours × rate`, `tax = gross × tax_rate ÷ 100`, `net = gross − tax`.
///
/// Returns `None` when the instructor taught nothing that month.
pub fn compute_instructor_pay(
    total_hours: Decimal,
    hourly_rate: Decimal,
    tax_rate: Decimal,
) -> Option<InstructorPay> {
    if total_hours <= Decimal::ZERO {
        return None;
    }

    let gross_amount = round_money(total_hours * hourly_rate);
    let tax_amount = percent_of(gross_amount, tax_rate);
    let net_amount = round_money(gross_amount - tax_amount);

    Some(InstructorPay {
        total_hours,
        hourly_rate,
        tax_rate,
        gross_amount,
        tax_amount,
        net_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_basic_pay() {
        let pay = compute_instructor_pay(d("40"), d("150"), d("10")).unwrap();
        assert_eq!(pay.gross_amount, d("6000"));
        assert_eq!(pay.tax_amount, d("600"));
        assert_eq!(pay.net_amount, d("5400"));
    }

    #[test]
    fn test_rounding() {
        let pay = compute_instructor_pay(d("7.5"), d("33.33"), d("12.5")).unwrap();
        // 7.5 × 33.33 = 249.975 → 249.98
        assert_eq!(pay.gross_amount, d("249.98"));
        // 249.98 × 0.125 = 31.2475 → 31.25
        assert_eq!(pay.tax_amount, d("31.25"));
        assert_eq!(pay.net_amount, d("218.73"));
    }

    #[test]
    fn test_zero_hours_yields_nothing() {
        assert!(compute_instructor_pay(Decimal::ZERO, d("100"), d("10")).is_none());
    }

    #[test]
    fn test_zero_tax() {
        let pay = compute_instructor_pay(d("2"), d("50"), Decimal::ZERO).unwrap();
        assert_eq!(pay.net_amount, pay.gross_amount);
    }
}
