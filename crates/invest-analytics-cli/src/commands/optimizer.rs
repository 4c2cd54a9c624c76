use clap::Args;
use serde_json::Value;

use invest_analytics_core::optimizer::{simulate_portfolios, OptimizationInput};

use crate::commands::parse_frequency;
use crate::input;

/// Arguments for the Monte Carlo portfolio simulation.
///
/// The asset series come from `--input` or stdin as an
/// `OptimizationInput` JSON document; the flags below override its
/// constraint fields.
#[derive(Args)]
pub struct SimulateArgs {
    /// Path to a JSON file with the simulation input
    #[arg(long)]
    pub input: Option<String>,

    /// Number of candidate portfolios to draw
    #[arg(long)]
    pub num_samples: Option<u32>,

    /// Minimum weight per asset
    #[arg(long)]
    pub min_weight: Option<f64>,

    /// Maximum weight per asset
    #[arg(long)]
    pub max_weight: Option<f64>,

    /// Flat transaction cost deducted from expected returns
    #[arg(long)]
    pub transaction_cost: Option<f64>,

    /// Annualised risk-free rate
    #[arg(long)]
    pub risk_free_rate: Option<f64>,

    /// Return frequency: daily, calendar-daily, weekly, monthly, quarterly, annual
    #[arg(long)]
    pub frequency: Option<String>,

    /// PRNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut sim_input: OptimizationInput = input::load(&args.input)?;

    if let Some(n) = args.num_samples {
        sim_input.constraints.num_samples = n;
    }
    if let Some(w) = args.min_weight {
        sim_input.constraints.min_weight = w;
    }
    if let Some(w) = args.max_weight {
        sim_input.constraints.max_weight = w;
    }
    if let Some(c) = args.transaction_cost {
        sim_input.constraints.transaction_cost_rate = c;
    }
    if let Some(r) = args.risk_free_rate {
        sim_input.risk_free_rate = r;
    }
    if let Some(ref f) = args.frequency {
        sim_input.frequency = parse_frequency(f)?;
    }
    if args.seed.is_some() {
        sim_input.seed = args.seed;
    }

    let result = simulate_portfolios(&sim_input)?;
    Ok(serde_json::to_value(&result)?)
}
