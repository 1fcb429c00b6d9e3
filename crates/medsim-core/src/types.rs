use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.035 = 3.5%). Never as percentages.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Key of an occupancy/pricing segment of the tenant mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrancheKey {
    Low,
    Mid,
    High,
}

impl TrancheKey {
    pub const ALL: [TrancheKey; 3] = [TrancheKey::Low, TrancheKey::Mid, TrancheKey::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrancheKey::Low => "low",
            TrancheKey::Mid => "mid",
            TrancheKey::High => "high",
        }
    }
}

/// One tenant segment: pricing, share of the lettable surface, occupancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tranche {
    /// Rent per m² per month, gross of tax
    pub rent_per_m2_per_month: Money,
    /// Share of the total surface allocated to this segment (0..100)
    pub share_percent: Decimal,
    /// Occupancy rate in percent (nominal range 50..100)
    pub occupancy_percent: Decimal,
}

/// The three tenant segments of a simulation, keyed low/mid/high.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tranches {
    pub low: Tranche,
    pub mid: Tranche,
    pub high: Tranche,
}

impl Tranches {
    pub fn get(&self, key: TrancheKey) -> &Tranche {
        match key {
            TrancheKey::Low => &self.low,
            TrancheKey::Mid => &self.mid,
            TrancheKey::High => &self.high,
        }
    }
}

/// Secondary loan facility ("PRU"). Ignored entirely when `amount` is zero
/// or negative.
///
/// Rate and term are always explicit; there is no fallback to the main
/// loan's terms. Defaults come from [`SimulationInput::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryLoan {
    pub amount: Money,
    pub rate: Rate,
    pub years: Years,
}

/// Immutable input snapshot for one simulation run.
///
/// Fully owned by the caller; the engine never mutates it and keeps no
/// state between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// Usable surface of the building (m²)
    pub surface_m2: Decimal,
    /// Works cost per m²
    pub works_cost_per_m2: Money,

    /// Main loan annual rate (0.035 = 3.5%)
    pub main_loan_rate: Rate,
    /// Main loan term in years
    pub main_loan_years: Years,

    /// Secondary loan facility (PRU)
    pub pru: SecondaryLoan,

    /// Investment incentive (CIIC) as a fraction of works cost (0..0.30)
    pub ciic_percent: Rate,

    /// Landlord base rent per m² per month, facial (franchise not applied)
    pub landlord_base_rent_per_m2_per_month: Money,
    /// Months of rent franchise granted by the landlord, clamped to 0..24
    pub landlord_franchise_months: Decimal,
    /// Surface the landlord rent is assessed on (m²)
    pub landlord_surface_m2: Decimal,

    /// Tenant mix
    pub tenants: Tranches,

    /// Non-recoverable charges per m² per year
    pub charges_non_recoverable_per_m2_per_year: Money,

    /// Tenant rent indexation, reserved for multi-year runs; unused in
    /// year-one KPIs
    pub indexation_percent: Rate,

    /// Maximum practitioner headcount the building can host
    pub practitioners_max: u32,
    /// Surface required per practitioner (m²)
    pub surface_per_practitioner: Decimal,
}

impl Default for SimulationInput {
    fn default() -> Self {
        SimulationInput {
            surface_m2: dec!(450),
            works_cost_per_m2: dec!(1500),

            main_loan_rate: dec!(0.035),
            main_loan_years: dec!(7),

            pru: SecondaryLoan {
                amount: Decimal::ZERO,
                rate: dec!(0.02),
                years: dec!(15),
            },

            ciic_percent: Decimal::ZERO,

            landlord_base_rent_per_m2_per_month: dec!(12),
            landlord_franchise_months: dec!(6),
            landlord_surface_m2: dec!(550),

            tenants: Tranches {
                low: Tranche {
                    rent_per_m2_per_month: dec!(40),
                    share_percent: dec!(40),
                    occupancy_percent: dec!(80),
                },
                mid: Tranche {
                    rent_per_m2_per_month: dec!(50),
                    share_percent: dec!(40),
                    occupancy_percent: dec!(80),
                },
                high: Tranche {
                    rent_per_m2_per_month: dec!(60),
                    share_percent: dec!(20),
                    occupancy_percent: dec!(80),
                },
            },

            charges_non_recoverable_per_m2_per_year: Decimal::ZERO,

            indexation_percent: dec!(0.02),

            practitioners_max: 18,
            surface_per_practitioner: dec!(25),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_shares_sum_to_100() {
        let input = SimulationInput::default();
        let sum: Decimal = TrancheKey::ALL
            .iter()
            .map(|k| input.tenants.get(*k).share_percent)
            .sum();
        assert_eq!(sum, dec!(100));
    }

    #[test]
    fn test_input_serde_round_trip() {
        let input = SimulationInput::default();
        let json = serde_json::to_string(&input).unwrap();
        let back: SimulationInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, back);
    }

    #[test]
    fn test_tranche_key_as_str() {
        assert_eq!(TrancheKey::Low.as_str(), "low");
        assert_eq!(TrancheKey::Mid.as_str(), "mid");
        assert_eq!(TrancheKey::High.as_str(), "high");
    }
}
