use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate, Years};

/// Constant annual payment (annuity) fully amortizing `principal` over
/// `years` at annual `rate`.
///
/// Total over its whole domain, with explicit edge-case branches:
/// - `principal <= 0` returns 0 (no debt, no payment)
/// - `years <= 0` returns the principal unchanged (degenerate policy that
///   avoids a division by zero; not a realistic input)
/// - `rate == 0` is straight-line amortization
pub fn amortize_annual(principal: Money, rate: Rate, years: Years) -> Money {
    if principal <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if years <= Decimal::ZERO {
        return principal;
    }
    if rate.is_zero() {
        return principal / years;
    }

    // r * P / (1 - (1+r)^-n), computed through the positive power so the
    // Decimal exponentiation stays on a positive base
    let compound = (Decimal::ONE + rate).powd(years);
    rate * principal * compound / (compound - Decimal::ONE)
}

/// One year of an amortization schedule under the constant annuity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    /// Payment due this year (interest + principal)
    pub payment: Money,
    /// Interest portion, on the opening balance
    pub interest: Money,
    /// Principal repaid this year
    pub principal: Money,
    /// Balance outstanding after the payment
    pub closing_balance: Money,
}

/// Year-by-year interest/principal split of the constant annuity.
///
/// Empty when the annuity degenerates (non-positive principal or term).
/// The final year repays the exact remaining balance, so the last payment
/// absorbs any residual from the annuity rounding.
pub fn amortization_schedule(principal: Money, rate: Rate, years: Years) -> Vec<AmortizationYear> {
    if principal <= Decimal::ZERO || years <= Decimal::ZERO {
        return Vec::new();
    }

    let payment = amortize_annual(principal, rate, years);
    let n = years.ceil().to_u32().unwrap_or(0);

    let mut schedule = Vec::with_capacity(n as usize);
    let mut balance = principal;
    for year in 1..=n {
        let interest = balance * rate;
        let mut principal_paid = payment - interest;
        if principal_paid > balance || year == n {
            principal_paid = balance;
        }
        balance -= principal_paid;
        schedule.push(AmortizationYear {
            year,
            payment: interest + principal_paid,
            interest,
            principal: principal_paid,
            closing_balance: balance,
        });
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_or_negative_principal() {
        assert_eq!(amortize_annual(Decimal::ZERO, dec!(0.035), dec!(7)), Decimal::ZERO);
        assert_eq!(amortize_annual(dec!(-500), dec!(0.035), dec!(7)), Decimal::ZERO);
    }

    #[test]
    fn test_degenerate_term_returns_principal() {
        assert_eq!(amortize_annual(dec!(1000), dec!(0.035), Decimal::ZERO), dec!(1000));
        assert_eq!(amortize_annual(dec!(1000), dec!(0.035), dec!(-3)), dec!(1000));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(amortize_annual(dec!(1000), Decimal::ZERO, dec!(5)), dec!(200));
    }

    #[test]
    fn test_positive_annuity() {
        // 100k at 3.5% over 7 years: ~16,354/year
        let payment = amortize_annual(dec!(100000), dec!(0.035), dec!(7));
        assert!(payment > dec!(16000) && payment < dec!(17000), "got {payment}");
        // Total repaid exceeds principal when the loan carries interest
        assert!(payment * dec!(7) > dec!(100000));
    }

    #[test]
    fn test_schedule_zero_rate() {
        let schedule = amortization_schedule(dec!(1000), Decimal::ZERO, dec!(5));
        assert_eq!(schedule.len(), 5);
        for row in &schedule {
            assert_eq!(row.payment, dec!(200));
            assert_eq!(row.interest, Decimal::ZERO);
        }
        assert_eq!(schedule.last().unwrap().closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_schedule_amortizes_to_zero() {
        let schedule = amortization_schedule(dec!(100000), dec!(0.035), dec!(7));
        assert_eq!(schedule.len(), 7);

        let mut opening = dec!(100000);
        for row in &schedule {
            // Interest accrues on the opening balance
            assert_eq!(row.interest, opening * dec!(0.035));
            // Each row balances: payment = interest + principal
            assert_eq!(row.payment, row.interest + row.principal);
            opening -= row.principal;
            assert_eq!(row.closing_balance, opening);
        }
        assert_eq!(schedule.last().unwrap().closing_balance, Decimal::ZERO);

        // Principal portions grow over the life of the loan
        assert!(schedule[6].principal > schedule[0].principal);
    }

    #[test]
    fn test_schedule_degenerate_inputs() {
        assert!(amortization_schedule(Decimal::ZERO, dec!(0.035), dec!(7)).is_empty());
        assert!(amortization_schedule(dec!(1000), dec!(0.035), Decimal::ZERO).is_empty());
    }
}
