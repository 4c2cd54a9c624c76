//! Monte Carlo portfolio simulation with box-constrained rejection
//! sampling over the weight simplex.
//!
//! Candidate weight vectors are drawn by normalising independent
//! Uniform(0,1) draws, then rejected and redrawn (bounded retries) when any
//! weight violates the per-asset bounds. Each accepted portfolio is scored
//! by annualised return, volatility and Sharpe ratio; the output carries
//! the full accepted sample set, the max-Sharpe / min-variance /
//! max-return portfolios and the efficient frontier.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::InvestError;
use crate::series;
use crate::types::{with_metadata, AssetSeries, ComputationOutput, ReturnFrequency};
use crate::InvestResult;

use super::frontier::pareto_frontier;

/// Per-sample retry budget for rejection sampling.
const MAX_DRAW_ATTEMPTS: u32 = 100;

/// Volatility below this is treated as degenerate: the sample keeps its
/// place in the set and the frontier but has no Sharpe ratio.
const MIN_VOLATILITY: f64 = 1e-12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Per-asset weight constraints for the simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightConstraints {
    /// Minimum weight per asset (e.g. 0.05)
    #[serde(default)]
    pub min_weight: f64,
    /// Maximum weight per asset (e.g. 0.40)
    #[serde(default = "default_max_weight")]
    pub max_weight: f64,
    /// Flat transaction cost deducted once from the expected return
    #[serde(default)]
    pub transaction_cost_rate: f64,
    /// Number of candidate portfolios to draw
    #[serde(default = "default_num_samples")]
    pub num_samples: u32,
}

fn default_max_weight() -> f64 {
    1.0
}

fn default_num_samples() -> u32 {
    10_000
}

impl Default for WeightConstraints {
    fn default() -> Self {
        Self {
            min_weight: 0.0,
            max_weight: 1.0,
            transaction_cost_rate: 0.0,
            num_samples: default_num_samples(),
        }
    }
}

/// A candidate portfolio with its annualised risk/return metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    /// Weights in the same order as the input series
    pub weights: Vec<f64>,
    /// Annualised expected return before costs
    pub expected_return: f64,
    /// Expected return net of the flat transaction cost
    pub net_return: f64,
    /// Annualised volatility
    pub volatility: f64,
    /// Sharpe ratio; None when volatility is degenerate
    pub sharpe: Option<f64>,
}

/// Input to the Monte Carlo portfolio simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationInput {
    /// Aligned historical return series, one per asset
    pub series: Vec<AssetSeries>,
    #[serde(default)]
    pub constraints: WeightConstraints,
    /// Annualised risk-free rate
    #[serde(default)]
    pub risk_free_rate: f64,
    /// Observation frequency of the return series
    #[serde(default)]
    pub frequency: ReturnFrequency,
    /// PRNG seed; runs are reproducible only when a seed is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Output of the Monte Carlo portfolio simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOutput {
    /// Asset order for every weight vector in this output
    pub tickers: Vec<String>,
    /// All accepted samples
    pub samples: Vec<Portfolio>,
    /// Highest Sharpe ratio among samples with a defined Sharpe
    pub max_sharpe: Option<Portfolio>,
    /// Lowest volatility sample
    pub min_variance: Portfolio,
    /// Highest net-return sample
    pub max_return: Portfolio,
    /// Indices into `samples` forming the efficient frontier, sorted by
    /// volatility ascending
    pub frontier: Vec<usize>,
    pub samples_requested: u32,
    pub samples_accepted: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the Monte Carlo portfolio simulation.
///
/// Draws `num_samples` candidate weight vectors under the box constraints,
/// scores each against the annualised mean vector and covariance matrix of
/// the input series, and reports the accepted set with its distinguished
/// portfolios and Pareto frontier.
pub fn simulate_portfolios(
    input: &OptimizationInput,
) -> InvestResult<ComputationOutput<OptimizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let n_assets = input.series.len();
    validate_input(input, n_assets)?;

    let periods = input.frequency.periods_per_year();
    let mu = series::annualize_means(&series::mean_returns(&input.series), periods);
    let sigma = series::annualize_covariance(&series::covariance_matrix(&input.series), periods);

    let c = &input.constraints;
    let mut rng = match input.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut samples: Vec<Portfolio> = Vec::with_capacity(c.num_samples as usize);
    let mut attempts_total: u64 = 0;

    let mut best_sharpe: Option<(usize, f64)> = None;
    let mut min_vol: Option<(usize, f64)> = None;
    let mut max_ret: Option<(usize, f64)> = None;

    for _ in 0..c.num_samples {
        let (weights, attempts) =
            draw_weights(&mut rng, n_assets, c.min_weight, c.max_weight, MAX_DRAW_ATTEMPTS);
        attempts_total += attempts as u64;

        let weights = match weights {
            Some(w) => w,
            None => continue, // retry budget exhausted, skip this sample
        };

        let expected_return = vec_dot(&weights, &mu);
        let variance = quadratic_form(&weights, &sigma);
        let volatility = variance.max(0.0).sqrt();
        let net_return = expected_return - c.transaction_cost_rate;
        let sharpe = if volatility < MIN_VOLATILITY {
            None
        } else {
            Some((net_return - input.risk_free_rate) / volatility)
        };

        let idx = samples.len();

        // Strict comparisons keep the first-seen sample on ties, so a
        // fixed seed always selects the same portfolios.
        if let Some(s) = sharpe {
            if best_sharpe.map_or(true, |(_, best)| s > best) {
                best_sharpe = Some((idx, s));
            }
        }
        if min_vol.map_or(true, |(_, best)| volatility < best) {
            min_vol = Some((idx, volatility));
        }
        if max_ret.map_or(true, |(_, best)| net_return > best) {
            max_ret = Some((idx, net_return));
        }

        samples.push(Portfolio {
            weights,
            expected_return,
            net_return,
            volatility,
            sharpe,
        });
    }

    let (min_vol_idx, _) = min_vol.ok_or_else(|| {
        InvestError::InfeasibleConstraints(format!(
            "No valid portfolio found in {} samples within weight bounds [{}, {}]",
            c.num_samples, c.min_weight, c.max_weight
        ))
    })?;
    let (max_ret_idx, _) = max_ret.unwrap_or((min_vol_idx, 0.0));

    let accepted = samples.len() as u32;
    if accepted < c.num_samples / 2 {
        warnings.push(format!(
            "Only {} of {} requested samples accepted; weight bounds are tight for {} assets",
            accepted, c.num_samples, n_assets
        ));
    }
    let rejection_rate = 1.0 - accepted as f64 / attempts_total.max(1) as f64;
    if rejection_rate > 0.5 {
        warnings.push(format!(
            "Rejection rate {:.1}% — consider widening the weight bounds",
            rejection_rate * 100.0
        ));
    }

    let frontier = pareto_frontier(&samples);

    let output = OptimizationOutput {
        tickers: input.series.iter().map(|s| s.ticker.clone()).collect(),
        max_sharpe: best_sharpe.map(|(i, _)| samples[i].clone()),
        min_variance: samples[min_vol_idx].clone(),
        max_return: samples[max_ret_idx].clone(),
        frontier,
        samples_requested: c.num_samples,
        samples_accepted: accepted,
        samples,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monte Carlo Portfolio Simulation (normalised-uniform simplex sampling)",
        &serde_json::json!({
            "n_assets": n_assets,
            "num_samples": c.num_samples,
            "min_weight": c.min_weight,
            "max_weight": c.max_weight,
            "transaction_cost_rate": c.transaction_cost_rate,
            "risk_free_rate": input.risk_free_rate,
            "frequency": format!("{:?}", input.frequency),
            "periods_per_year": periods,
            "seed": input.seed,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

/// Draw one weight vector on the simplex, rejecting draws that violate the
/// box constraints. Returns the accepted weights (or None when the retry
/// budget runs out) and the number of attempts consumed.
fn draw_weights<R: Rng>(
    rng: &mut R,
    n_assets: usize,
    min_weight: f64,
    max_weight: f64,
    max_attempts: u32,
) -> (Option<Vec<f64>>, u32) {
    for attempt in 1..=max_attempts {
        let raw: Vec<f64> = (0..n_assets).map(|_| rng.gen::<f64>()).collect();
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            continue;
        }
        let weights: Vec<f64> = raw.iter().map(|w| w / total).collect();

        let in_bounds = weights
            .iter()
            .all(|&w| w >= min_weight - 1e-12 && w <= max_weight + 1e-12);
        if in_bounds {
            return (Some(weights), attempt);
        }
    }
    (None, max_attempts)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &OptimizationInput, n_assets: usize) -> InvestResult<()> {
    if n_assets < 2 {
        return Err(InvestError::DimensionMismatch(format!(
            "Portfolio simulation requires at least 2 assets, got {}",
            n_assets
        )));
    }
    series::validate_aligned(&input.series)?;

    let c = &input.constraints;
    if c.num_samples == 0 {
        return Err(InvestError::InvalidInput {
            field: "constraints.num_samples".into(),
            reason: "Must be at least 1".into(),
        });
    }
    if !(0.0..=1.0).contains(&c.min_weight) {
        return Err(InvestError::InvalidInput {
            field: "constraints.min_weight".into(),
            reason: format!("Must be in [0, 1], got {}", c.min_weight),
        });
    }
    if !(0.0..=1.0).contains(&c.max_weight) {
        return Err(InvestError::InvalidInput {
            field: "constraints.max_weight".into(),
            reason: format!("Must be in [0, 1], got {}", c.max_weight),
        });
    }
    if c.transaction_cost_rate < 0.0 {
        return Err(InvestError::InvalidInput {
            field: "constraints.transaction_cost_rate".into(),
            reason: "Must be non-negative".into(),
        });
    }

    if c.min_weight > c.max_weight {
        return Err(InvestError::InfeasibleConstraints(format!(
            "min_weight {} exceeds max_weight {}",
            c.min_weight, c.max_weight
        )));
    }
    let n = n_assets as f64;
    if c.min_weight * n > 1.0 + 1e-9 {
        return Err(InvestError::InfeasibleConstraints(format!(
            "min_weight {} x {} assets exceeds a total weight of 1.0",
            c.min_weight, n_assets
        )));
    }
    if c.max_weight < 1.0 / n - 1e-9 {
        return Err(InvestError::InfeasibleConstraints(format!(
            "max_weight {} x {} assets cannot reach a total weight of 1.0",
            c.max_weight, n_assets
        )));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Portfolio math helpers
// ---------------------------------------------------------------------------

fn vec_dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// w' * Sigma * w
fn quadratic_form(w: &[f64], sigma: &[Vec<f64>]) -> f64 {
    sigma
        .iter()
        .zip(w.iter())
        .map(|(row, wi)| wi * vec_dot(row, w))
        .sum()
}
