use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;

/// Negative cash flow smaller than this fraction of total rents rates
/// orange rather than red.
const ORANGE_BAND: Decimal = dec!(0.05);

/// Traffic-light rating of a cash-flow figure relative to total rents.
///
/// Stateless and presentation-oriented: no hysteresis across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowRating {
    Green,
    Orange,
    Red,
}

impl CashFlowRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashFlowRating::Green => "green",
            CashFlowRating::Orange => "orange",
            CashFlowRating::Red => "red",
        }
    }
}

/// Green when cash flow is positive; orange when non-positive but within
/// 5% of total tenant rents; red otherwise.
pub fn rate_cash_flow(cash_flow: Money, total_tenant_rents: Money) -> CashFlowRating {
    if cash_flow > Decimal::ZERO {
        return CashFlowRating::Green;
    }
    if cash_flow.abs() < ORANGE_BAND * total_tenant_rents {
        CashFlowRating::Orange
    } else {
        CashFlowRating::Red
    }
}
