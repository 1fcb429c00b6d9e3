use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use medsim_core::loan::{amortization_schedule, amortize_annual};

/// Arguments for the annuity calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnnuityArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual rate (e.g. 0.035 for 3.5%)
    #[arg(long)]
    pub rate: Decimal,

    /// Term in years
    #[arg(long)]
    pub years: Decimal,

    /// Include the year-by-year amortization schedule
    #[arg(long)]
    pub schedule: bool,
}

pub fn run_annuity(args: AnnuityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let annual_payment = amortize_annual(args.principal, args.rate, args.years);

    let mut value = json!({
        "result": { "annual_payment": annual_payment },
    });

    if args.schedule {
        let schedule = amortization_schedule(args.principal, args.rate, args.years);
        value["schedule"] = serde_json::to_value(schedule)?;
    }

    Ok(value)
}
