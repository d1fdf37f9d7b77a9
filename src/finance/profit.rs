use rust_decimal::Decimal;

use super::money::{percent_of, ratio_percent, round_money};

/// Inputs of a monthly profit calculation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfitInputs {
    pub total_revenue: Decimal,
    pub instructor_payments: Decimal,
    pub operational_expenses: Decimal,
    pub other_expenses: Decimal,
    pub retained_earnings_percentage: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfitSplit {
    pub total_revenue: Decimal,
    pub instructor_payments: Decimal,
    pub operational_expenses: Decimal,
    pub other_expenses: Decimal,
    pub total_expenses: Decimal,
    pub gross_profit: Decimal,
    pub retained_earnings_percentage: Decimal,
    pub retained_earnings: Decimal,
    pub distributable_profit: Decimal,
}

/// Splits gross profit into retained earnings and the distributable remainder.
///
/// A loss (or break-even) month retains and distributes nothing.
pub fn compute_profit_split(inputs: ProfitInputs) -> ProfitSplit {
    let total_revenue = round_money(inputs.total_revenue);
    let instructor_payments = round_money(inputs.instructor_payments);
    let operational_expenses = round_money(inputs.operational_expenses);
    let other_expenses = round_money(inputs.other_expenses);
    let total_expenses = instructor_payments + operational_expenses + other_expenses;
    let gross_profit = total_revenue - total_expenses;

    let (retained_earnings, distributable_profit) = if gross_profit > Decimal::ZERO {
        let retained = percent_of(gross_profit, inputs.retained_earnings_percentage);
        (retained, gross_profit - retained)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    ProfitSplit {
        total_revenue,
        instructor_payments,
        operational_expenses,
        other_expenses,
        total_expenses,
        gross_profit,
        retained_earnings_percentage: inputs.retained_earnings_percentage,
        retained_earnings,
        distributable_profit,
    }
}

/// `gross ÷ revenue × 100`, or zero without revenue.
pub fn profit_margin(gross_profit: Decimal, total_revenue: Decimal) -> Decimal {
    ratio_percent(gross_profit, total_revenue)
}

/// A member as seen by the distribution calculation.
#[derive(Debug, Clone, Copy)]
pub struct ShareHolder {
    pub member_id: i64,
    pub share_percentage: Decimal,
    pub can_receive_profit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionLine {
    pub member_id: i64,
    pub share_percentage: Decimal,
    pub amount: Decimal,
    /// Member is barred from receiving profit; the line is recorded but cancelled.
    pub is_public_employee: bool,
}

/// One line per active member, each `distributable × share ÷ 100`.
///
/// Nothing is distributed when there is no distributable profit or the
/// shares add up to zero. Any rounding remainder stays with the cooperative.
pub fn distribute(distributable: Decimal, holders: &[ShareHolder]) -> Vec<DistributionLine> {
    let total_shares: Decimal = holders.iter().map(|h| h.share_percentage).sum();
    if distributable <= Decimal::ZERO || total_shares <= Decimal::ZERO {
        return Vec::new();
    }

    holders
        .iter()
        .map(|h| DistributionLine {
            member_id: h.member_id,
            share_percentage: h.share_percentage,
            amount: percent_of(distributable, h.share_percentage),
            is_public_employee: !h.can_receive_profit,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_profitable_month() {
        let split = compute_profit_split(ProfitInputs {
            total_revenue: d("20000"),
            instructor_payments: d("8000"),
            operational_expenses: d("2000"),
            other_expenses: Decimal::ZERO,
            retained_earnings_percentage: d("20"),
        });
        assert_eq!(split.total_expenses, d("10000"));
        assert_eq!(split.gross_profit, d("10000"));
        assert_eq!(split.retained_earnings, d("2000"));
        assert_eq!(split.distributable_profit, d("8000"));
    }

    #[test]
    fn test_loss_month_distributes_nothing() {
        let split = compute_profit_split(ProfitInputs {
            total_revenue: d("1000"),
            instructor_payments: d("1500"),
            retained_earnings_percentage: d("20"),
            ..Default::default()
        });
        assert_eq!(split.gross_profit, d("-500"));
        assert_eq!(split.retained_earnings, Decimal::ZERO);
        assert_eq!(split.distributable_profit, Decimal::ZERO);
    }

    #[test]
    fn test_retained_plus_distributable_equals_gross() {
        let split = compute_profit_split(ProfitInputs {
            total_revenue: d("1234.57"),
            retained_earnings_percentage: d("33.33"),
            ..Default::default()
        });
        assert_eq!(
            split.retained_earnings + split.distributable_profit,
            split.gross_profit
        );
    }

    #[test]
    fn test_profit_margin() {
        assert_eq!(profit_margin(d("2500"), d("10000")), d("25"));
        assert_eq!(profit_margin(d("100"), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_distribution_marks_public_employees() {
        let holders = [
            ShareHolder {
                member_id: 1,
                share_percentage: d("60"),
                can_receive_profit: true,
            },
            ShareHolder {
                member_id: 2,
                share_percentage: d("40"),
                can_receive_profit: false,
            },
        ];
        let lines = distribute(d("8000"), &holders);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].amount, d("4800"));
        assert!(!lines[0].is_public_employee);
        assert_eq!(lines[1].amount, d("3200"));
        assert!(lines[1].is_public_employee);
    }

    #[test]
    fn test_distribution_requires_profit_and_shares() {
        let holders = [ShareHolder {
            member_id: 1,
            share_percentage: Decimal::ZERO,
            can_receive_profit: true,
        }];
        assert!(distribute(d("100"), &holders).is_empty());
        assert!(distribute(Decimal::ZERO, &[]).is_empty());
    }
}
