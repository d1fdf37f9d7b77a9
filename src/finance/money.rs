use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to two decimals, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `value × pct ÷ 100`, rounded.
pub fn percent_of(value: Decimal, pct: Decimal) -> Decimal {
    round_money(value * pct / Decimal::ONE_HUNDRED)
}

/// `part ÷ whole × 100`, rounded, or zero when `whole` is not positive.
pub fn ratio_percent(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_money(part / whole * Decimal::ONE_HUNDRED)
}

/// Accepts a percentage only inside `[0, 100]`.
pub fn validate_percentage(pct: Decimal) -> bool {
    pct >= Decimal::ZERO && pct <= Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_money(d("2.345")), d("2.35"));
        assert_eq!(round_money(d("2.344")), d("2.34"));
        assert_eq!(round_money(d("-2.345")), d("-2.35"));
        assert_eq!(round_money(d("10")), d("10"));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(d("1000"), d("20")), d("200"));
        assert_eq!(percent_of(d("333.33"), d("10")), d("33.33"));
        assert_eq!(percent_of(d("0.05"), d("50")), d("0.03"));
    }

    #[test]
    fn test_ratio_percent_zero_whole() {
        assert_eq!(ratio_percent(d("10"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(ratio_percent(d("1"), d("3")), d("33.33"));
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage(Decimal::ZERO));
        assert!(validate_percentage(d("100")));
        assert!(!validate_percentage(d("100.01")));
        assert!(!validate_percentage(d("-1")));
    }
}
