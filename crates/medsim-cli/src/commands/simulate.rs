use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use medsim_core::simulation::{rate_cash_flow, simulate};
use medsim_core::types::SimulationInput;

use crate::input;

/// Arguments for the KPI simulation.
///
/// Input priority: `--input` JSON file, then piped stdin JSON, then the
/// project defaults overridden by the individual flags below.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SimulateArgs {
    /// Path to a JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Usable surface in m²
    #[arg(long)]
    pub surface: Option<Decimal>,

    /// Works cost per m²
    #[arg(long)]
    pub works_cost: Option<Decimal>,

    /// Main loan annual rate (e.g. 0.035 for 3.5%)
    #[arg(long)]
    pub main_rate: Option<Decimal>,

    /// Main loan term in years
    #[arg(long)]
    pub main_years: Option<Decimal>,

    /// Secondary loan (PRU) amount
    #[arg(long)]
    pub pru_amount: Option<Decimal>,

    /// Secondary loan (PRU) annual rate
    #[arg(long)]
    pub pru_rate: Option<Decimal>,

    /// Secondary loan (PRU) term in years
    #[arg(long)]
    pub pru_years: Option<Decimal>,

    /// Investment incentive (CIIC) as a fraction of works cost (0..0.30)
    #[arg(long)]
    pub ciic: Option<Decimal>,

    /// Landlord base rent per m² per month
    #[arg(long)]
    pub landlord_rent: Option<Decimal>,

    /// Landlord rent franchise in months (0..24)
    #[arg(long)]
    pub franchise_months: Option<Decimal>,

    /// Surface the landlord rent is assessed on, in m²
    #[arg(long)]
    pub landlord_surface: Option<Decimal>,

    /// Low tranche rent per m² per month
    #[arg(long)]
    pub low_rent: Option<Decimal>,

    /// Low tranche share of surface, in percent
    #[arg(long)]
    pub low_share: Option<Decimal>,

    /// Low tranche occupancy, in percent
    #[arg(long)]
    pub low_occupancy: Option<Decimal>,

    /// Mid tranche rent per m² per month
    #[arg(long)]
    pub mid_rent: Option<Decimal>,

    /// Mid tranche share of surface, in percent
    #[arg(long)]
    pub mid_share: Option<Decimal>,

    /// Mid tranche occupancy, in percent
    #[arg(long)]
    pub mid_occupancy: Option<Decimal>,

    /// High tranche rent per m² per month
    #[arg(long)]
    pub high_rent: Option<Decimal>,

    /// High tranche share of surface, in percent
    #[arg(long)]
    pub high_share: Option<Decimal>,

    /// High tranche occupancy, in percent
    #[arg(long)]
    pub high_occupancy: Option<Decimal>,

    /// Non-recoverable charges per m² per year
    #[arg(long)]
    pub charges: Option<Decimal>,

    /// Tenant rent indexation (reserved for multi-year runs)
    #[arg(long)]
    pub indexation: Option<Decimal>,

    /// Maximum practitioner headcount
    #[arg(long)]
    pub practitioners_max: Option<u32>,

    /// Surface required per practitioner, in m²
    #[arg(long)]
    pub surface_per_practitioner: Option<Decimal>,

    /// Exit non-zero when the input breaks a hard modeling invariant
    #[arg(long)]
    pub strict: bool,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input: SimulationInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        apply_overrides(SimulationInput::default(), &args)
    };

    let result = simulate(&sim_input);

    if args.strict {
        result.ensure_valid()?;
    }

    let rating = rate_cash_flow(result.kpis.cash_flow, result.kpis.total_tenant_rents);

    Ok(json!({
        "result": result.kpis,
        "cash_flow_rating": rating,
        "warnings": result.warnings,
        "errors": result.errors,
    }))
}

fn apply_overrides(mut input: SimulationInput, args: &SimulateArgs) -> SimulationInput {
    if let Some(v) = args.surface {
        input.surface_m2 = v;
    }
    if let Some(v) = args.works_cost {
        input.works_cost_per_m2 = v;
    }
    if let Some(v) = args.main_rate {
        input.main_loan_rate = v;
    }
    if let Some(v) = args.main_years {
        input.main_loan_years = v;
    }
    if let Some(v) = args.pru_amount {
        input.pru.amount = v;
    }
    if let Some(v) = args.pru_rate {
        input.pru.rate = v;
    }
    if let Some(v) = args.pru_years {
        input.pru.years = v;
    }
    if let Some(v) = args.ciic {
        input.ciic_percent = v;
    }
    if let Some(v) = args.landlord_rent {
        input.landlord_base_rent_per_m2_per_month = v;
    }
    if let Some(v) = args.franchise_months {
        input.landlord_franchise_months = v;
    }
    if let Some(v) = args.landlord_surface {
        input.landlord_surface_m2 = v;
    }
    if let Some(v) = args.low_rent {
        input.tenants.low.rent_per_m2_per_month = v;
    }
    if let Some(v) = args.low_share {
        input.tenants.low.share_percent = v;
    }
    if let Some(v) = args.low_occupancy {
        input.tenants.low.occupancy_percent = v;
    }
    if let Some(v) = args.mid_rent {
        input.tenants.mid.rent_per_m2_per_month = v;
    }
    if let Some(v) = args.mid_share {
        input.tenants.mid.share_percent = v;
    }
    if let Some(v) = args.mid_occupancy {
        input.tenants.mid.occupancy_percent = v;
    }
    if let Some(v) = args.high_rent {
        input.tenants.high.rent_per_m2_per_month = v;
    }
    if let Some(v) = args.high_share {
        input.tenants.high.share_percent = v;
    }
    if let Some(v) = args.high_occupancy {
        input.tenants.high.occupancy_percent = v;
    }
    if let Some(v) = args.charges {
        input.charges_non_recoverable_per_m2_per_year = v;
    }
    if let Some(v) = args.indexation {
        input.indexation_percent = v;
    }
    if let Some(v) = args.practitioners_max {
        input.practitioners_max = v;
    }
    if let Some(v) = args.surface_per_practitioner {
        input.surface_per_practitioner = v;
    }
    input
}
