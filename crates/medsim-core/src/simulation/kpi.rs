use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::MedSimError;
use crate::loan::amortize_annual;
use crate::types::{Money, SimulationInput, TrancheKey};
use crate::MedSimResult;

/// Tolerance on the tranche share sum, in percentage points.
const SHARE_SUM_TOLERANCE: Decimal = dec!(0.1);
/// Architect fee, applied to works and to the landlord facial annual rent.
const ARCHITECT_FEE_RATE: Decimal = dec!(0.08);
const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Year-one KPIs, as a flat record. Every intermediate aggregate is exposed
/// so a consumer can render a full breakdown; values are exact (unrounded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    /// Works cost: surface x cost per m²
    pub total_works: Money,
    /// Architect fee on works (8%)
    pub architect_fees_on_works: Money,
    /// Architect commission on the landlord facial annual rent (8%)
    pub architect_fees_on_landlord_annual: Money,
    pub architect_fees_total: Money,
    /// Works plus total fees
    pub investment_gross: Money,
    /// CIIC incentive; the base is works cost, not gross investment
    pub incentive_amount: Money,
    /// Gross investment minus incentive and PRU, floored at 0
    pub investment_net: Money,
    /// Annuity of the main loan, on the net investment
    pub annuity_main: Money,
    /// Annuity of the PRU facility; 0 when its amount is 0
    pub annuity_pru: Money,
    pub total_annuities: Money,
    /// Annual tenant rents across the three tranches at their occupancy
    pub total_tenant_rents: Money,
    /// Landlord rent actually paid, after the franchise months
    pub landlord_paid: Money,
    /// Non-recoverable charges for the year
    pub charges: Money,
    pub cash_flow: Money,
    pub total_resources: Money,
    /// Landlord paid + charges + annuities
    pub total_charges: Money,
    /// Occupancy level at which cash flow is exactly zero (1 = 100%)
    pub break_even_occupancy: Decimal,
    /// Practitioner headcount needed to reach break-even occupancy
    pub required_practitioners: u32,
    pub avg_rent_per_m2_per_month: Money,
    /// Tenant rents over total annuities; None when there is no debt service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_to_debt_ratio: Option<Decimal>,
}

/// Result of one simulation run: KPIs plus ordered findings.
///
/// Recomputed whole on every call; two runs over equal inputs produce equal
/// results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub kpis: Kpis,
    /// Soft findings (out-of-range occupancy, clamped values, unprofitable
    /// model). Never block the computation.
    pub warnings: Vec<String>,
    /// Hard modeling invariant violations. The computation still ran with
    /// the given values; callers decide whether to block on these.
    pub errors: Vec<String>,
}

impl SimulationResult {
    /// Err when a hard invariant was violated, for callers that gate
    /// submission on a clean input. Warnings never block.
    pub fn ensure_valid(&self) -> MedSimResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(MedSimError::InvalidInput {
                field: "simulation".into(),
                reason: self.errors.join(" "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Compute the year-one KPI set for one input snapshot.
///
/// Total function: malformed numeric ranges are reported through the
/// warning/error lists on the result, and a best-effort calculation is
/// always produced. Nothing here short-circuits.
pub fn simulate(input: &SimulationInput) -> SimulationResult {
    let mut warnings: Vec<String> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    // --- Validation ---
    let share_sum: Decimal = TrancheKey::ALL
        .iter()
        .map(|k| input.tenants.get(*k).share_percent)
        .sum();
    if (share_sum - PERCENT).abs() > SHARE_SUM_TOLERANCE {
        errors.push("Low/Mid/High share percentages must sum to 100%.".to_string());
    }

    let out_of_range: Vec<&str> = TrancheKey::ALL
        .iter()
        .filter(|k| {
            let occupancy = input.tenants.get(**k).occupancy_percent;
            occupancy < dec!(50) || occupancy > dec!(100)
        })
        .map(|k| k.as_str())
        .collect();
    if !out_of_range.is_empty() {
        warnings.push(format!(
            "Occupancy outside the 50-100% range for: {}",
            out_of_range.join(", ")
        ));
    }

    // --- Cost base ---
    let surface = input.surface_m2;
    let total_works = surface * input.works_cost_per_m2;
    // Facial annual rent: no franchise applied, assessed on the landlord surface
    let landlord_annual_base =
        input.landlord_base_rent_per_m2_per_month * input.landlord_surface_m2 * MONTHS_PER_YEAR;

    // --- Fees ---
    let architect_fees_on_works = ARCHITECT_FEE_RATE * total_works;
    let architect_fees_on_landlord_annual = ARCHITECT_FEE_RATE * landlord_annual_base;
    let architect_fees_total = architect_fees_on_works + architect_fees_on_landlord_annual;

    let investment_gross = total_works + architect_fees_total;

    // --- Incentive ---
    let incentive_amount = input.ciic_percent * total_works;

    let investment_net_raw = investment_gross - incentive_amount - input.pru.amount;
    let investment_net = investment_net_raw.max(Decimal::ZERO);
    if investment_net_raw < Decimal::ZERO {
        warnings
            .push("PRU and CIIC exceed gross investment: net investment clamped to 0.".to_string());
    }

    // --- Annuities ---
    let annuity_main = amortize_annual(investment_net, input.main_loan_rate, input.main_loan_years);
    let annuity_pru = if input.pru.amount > Decimal::ZERO {
        amortize_annual(input.pru.amount, input.pru.rate, input.pru.years)
    } else {
        Decimal::ZERO
    };
    let total_annuities = annuity_main + annuity_pru;

    // --- Rents and running costs ---
    let total_tenant_rents = tenant_rents_at(input, None);

    let franchise = input
        .landlord_franchise_months
        .clamp(Decimal::ZERO, dec!(24));
    let landlord_paid = landlord_annual_base * (MONTHS_PER_YEAR - franchise) / MONTHS_PER_YEAR;

    let charges = input.charges_non_recoverable_per_m2_per_year * surface;

    let cash_flow = total_tenant_rents - landlord_paid - charges - total_annuities;
    let total_resources = total_tenant_rents;
    let total_charges = landlord_paid + charges + total_annuities;

    // --- Break-even ---
    let rents_at_100 = tenant_rents_at(input, Some(Decimal::ONE));
    let break_even_occupancy = if rents_at_100 > Decimal::ZERO {
        total_charges / rents_at_100
    } else {
        Decimal::ONE
    };
    if break_even_occupancy > Decimal::ONE {
        warnings.push(
            "Break-even occupancy exceeds 100%: model is not profitable under current assumptions."
                .to_string(),
        );
    }

    let required_practitioners = if input.surface_per_practitioner > Decimal::ZERO {
        (break_even_occupancy * surface / input.surface_per_practitioner)
            .ceil()
            .to_u32()
            .unwrap_or(u32::MAX)
    } else {
        0
    };
    if required_practitioners > input.practitioners_max {
        warnings.push("Required practitioner count exceeds the maximum capacity.".to_string());
    }

    let avg_rent_per_m2_per_month = if surface > Decimal::ZERO {
        total_tenant_rents / (surface * MONTHS_PER_YEAR)
    } else {
        Decimal::ZERO
    };

    // Explicit sentinel instead of a floating-point infinity
    let rent_to_debt_ratio = if total_annuities > Decimal::ZERO {
        Some(total_tenant_rents / total_annuities)
    } else {
        None
    };

    SimulationResult {
        kpis: Kpis {
            total_works,
            architect_fees_on_works,
            architect_fees_on_landlord_annual,
            architect_fees_total,
            investment_gross,
            incentive_amount,
            investment_net,
            annuity_main,
            annuity_pru,
            total_annuities,
            total_tenant_rents,
            landlord_paid,
            charges,
            cash_flow,
            total_resources,
            total_charges,
            break_even_occupancy,
            required_practitioners,
            avg_rent_per_m2_per_month,
            rent_to_debt_ratio,
        },
        warnings,
        errors,
    }
}

/// Annual tenant rents across the three tranches. `occupancy_override`
/// replaces every tranche's own occupancy (as a fraction) when set.
fn tenant_rents_at(input: &SimulationInput, occupancy_override: Option<Decimal>) -> Money {
    TrancheKey::ALL
        .iter()
        .map(|k| {
            let tranche = input.tenants.get(*k);
            let occupancy =
                occupancy_override.unwrap_or(tranche.occupancy_percent / PERCENT);
            tranche.rent_per_m2_per_month
                * (input.surface_m2 * tranche.share_percent / PERCENT)
                * MONTHS_PER_YEAR
                * occupancy
        })
        .sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
