mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::catalog::CatalogArgs;
use commands::lca::LcaArgs;
use commands::scenario::ScenarioArgs;
use commands::sensitivity::SensitivityArgs;

/// Emissions and financial scenario modelling
#[derive(Parser)]
#[command(
    name = "clx",
    version,
    about = "Emissions and financial scenario modelling",
    long_about = "A CLI for emissions-reduction scenario analysis with decimal precision. \
                  Evaluates initiative portfolios (investment, reduction, savings, NPV, \
                  payback), runs one-way sensitivity sweeps, and performs simplified \
                  cradle-to-grave product LCAs."
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
    /// Evaluate an emissions-reduction scenario end to end
    Scenario(ScenarioArgs),
    /// One-way NPV sensitivity sweep over carbon price or discount rate
    Sensitivity(SensitivityArgs),
    /// Run a simplified product life-cycle assessment
    Lca(LcaArgs),
    /// Show the initiative catalog and predefined bundles
    Catalog(CatalogArgs),
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
        Commands::Scenario(args) => commands::scenario::run_scenario(args),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args),
        Commands::Lca(args) => commands::lca::run_lca(args),
        Commands::Catalog(args) => commands::catalog::run_catalog(args),
        Commands::Version => {
            println!("clx {}", env!("CARGO_PKG_VERSION"));
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
