mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::indicators::{AdxArgs, BollingerArgs, EmaArgs, MacdArgs, RsiArgs, SmaArgs};
use commands::optimizer::SimulateArgs;
use commands::risk::RiskArgs;

/// Investment analytics over historical return and price series
#[derive(Parser)]
#[command(
    name = "inva",
    version,
    about = "Investment analytics over historical return and price series",
    long_about = "A CLI for Monte Carlo portfolio simulation with box-constrained \
                  weight sampling, per-asset risk metrics (VaR, CVaR, drawdown, \
                  normality), and technical indicators (SMA, EMA, RSI, MACD, \
                  Bollinger bands, ADX)."
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
    /// Run a Monte Carlo portfolio simulation
    Simulate(SimulateArgs),
    /// Per-asset risk metrics (VaR, CVaR, drawdown, normality)
    Risk(RiskArgs),
    /// Simple moving average
    Sma(SmaArgs),
    /// Exponential moving average
    Ema(EmaArgs),
    /// Relative Strength Index
    Rsi(RsiArgs),
    /// MACD with signal line and crossovers
    Macd(MacdArgs),
    /// Bollinger bands
    Bollinger(BollingerArgs),
    /// Average Directional Index
    Adx(AdxArgs),
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
        Commands::Simulate(args) => commands::optimizer::run_simulate(args),
        Commands::Risk(args) => commands::risk::run_risk(args),
        Commands::Sma(args) => commands::indicators::run_sma(args),
        Commands::Ema(args) => commands::indicators::run_ema(args),
        Commands::Rsi(args) => commands::indicators::run_rsi(args),
        Commands::Macd(args) => commands::indicators::run_macd(args),
        Commands::Bollinger(args) => commands::indicators::run_bollinger(args),
        Commands::Adx(args) => commands::indicators::run_adx(args),
        Commands::Version => {
            println!("inva {}", env!("CARGO_PKG_VERSION"));
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
