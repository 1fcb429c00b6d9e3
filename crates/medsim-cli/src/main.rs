mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::annuity::AnnuityArgs;
use commands::simulate::SimulateArgs;

/// Year-one investment simulator for medical-office buildings
#[derive(Parser)]
#[command(
    name = "medsim",
    version,
    about = "Year-one investment simulator for medical-office buildings",
    long_about = "Computes year-one KPIs for a medical-office building project with \
                  decimal precision: investment breakdown, loan annuities, tenant and \
                  landlord rents, cash flow, break-even occupancy and required \
                  practitioner headcount, plus validation warnings and errors."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the KPI simulation over an input snapshot
    Simulate(SimulateArgs),
    /// Constant annual loan payment, with an optional amortization schedule
    Annuity(AnnuityArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Annuity(args) => commands::annuity::run_annuity(args),
        Commands::Version => {
            println!("medsim {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
