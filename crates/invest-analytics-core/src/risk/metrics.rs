//! Per-asset risk metrics: VaR (parametric and historical), CVaR, max
//! drawdown, higher moments and a Jarque-Bera normality test.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};
use std::time::Instant;

use crate::error::InvestError;
use crate::series::{mean, sample_variance};
use crate::types::{with_metadata, AssetSeries, ComputationOutput, ReturnFrequency};
use crate::InvestResult;

/// Input for per-asset risk metrics.
///
/// Series are analysed independently, so they do not need to be aligned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMetricsInput {
    pub series: Vec<AssetSeries>,
    /// Observation frequency
    #[serde(default)]
    pub frequency: ReturnFrequency,
    /// VaR confidence level (e.g. 0.95 or 0.99)
    #[serde(default = "default_confidence")]
    pub confidence_level: f64,
    /// Annualised risk-free rate for the Sharpe ratio
    #[serde(default)]
    pub risk_free_rate: f64,
}

fn default_confidence() -> f64 {
    0.95
}

/// Jarque-Bera normality test result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JarqueBera {
    pub statistic: f64,
    pub p_value: f64,
    /// Whether normality is not rejected at the 5% level
    pub is_normal: bool,
}

/// Risk metrics for a single asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRiskMetrics {
    pub ticker: String,
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    /// None when volatility is zero
    pub sharpe: Option<f64>,
    /// Parametric VaR per period, as a positive loss number
    pub var_parametric: f64,
    /// Historical VaR per period, as a positive loss number
    pub var_historical: f64,
    /// Conditional VaR / Expected Shortfall per period
    pub cvar: f64,
    pub max_drawdown: f64,
    /// Duration of the max drawdown in periods
    pub max_drawdown_duration: u32,
    pub skewness: f64,
    /// Excess kurtosis (sample-adjusted)
    pub kurtosis: f64,
    /// None when there are too few observations for the test
    pub jarque_bera: Option<JarqueBera>,
}

/// Output of per-asset risk metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMetricsOutput {
    pub assets: Vec<AssetRiskMetrics>,
}

/// Calculate risk metrics for each asset series.
pub fn asset_risk_metrics(
    input: &RiskMetricsInput,
) -> InvestResult<ComputationOutput<RiskMetricsOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.series.is_empty() {
        return Err(InvestError::InsufficientData(
            "At least one return series required".into(),
        ));
    }
    if input.confidence_level <= 0.0 || input.confidence_level >= 1.0 {
        return Err(InvestError::InvalidInput {
            field: "confidence_level".into(),
            reason: "Confidence level must be between 0 and 1 (exclusive)".into(),
        });
    }
    for s in &input.series {
        if s.returns.len() < 3 {
            return Err(InvestError::InsufficientData(format!(
                "Series '{}' has {} observations, need at least 3 for risk metrics",
                s.ticker,
                s.returns.len()
            )));
        }
    }

    let std_normal = Normal::new(0.0, 1.0).map_err(|e| InvestError::InvalidInput {
        field: "distribution".into(),
        reason: format!("Invalid Normal parameters: {e}"),
    })?;
    let z = std_normal.inverse_cdf(input.confidence_level);
    let periods = input.frequency.periods_per_year();

    let assets: Vec<AssetRiskMetrics> = input
        .series
        .iter()
        .map(|s| {
            let m = single_asset_metrics(
                s,
                z,
                input.confidence_level,
                periods,
                input.risk_free_rate,
            );
            if m.sharpe.is_none() {
                warnings.push(format!(
                    "Series '{}' has zero volatility; Sharpe ratio omitted",
                    s.ticker
                ));
            }
            m
        })
        .collect();

    let output = RiskMetricsOutput { assets };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Asset Risk Metrics (VaR, CVaR, Drawdown, Skewness, Kurtosis, Jarque-Bera)",
        &serde_json::json!({
            "n_assets": input.series.len(),
            "confidence_level": input.confidence_level,
            "risk_free_rate": input.risk_free_rate,
            "frequency": format!("{:?}", input.frequency),
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn single_asset_metrics(
    series: &AssetSeries,
    z: f64,
    confidence_level: f64,
    periods: f64,
    risk_free_rate: f64,
) -> AssetRiskMetrics {
    let returns = &series.returns;
    let n = returns.len();

    let mu = mean(returns);
    let variance = sample_variance(returns, mu);
    let std_dev = variance.sqrt();

    let annualized_return = mu * periods;
    let annualized_volatility = std_dev * periods.sqrt();
    let sharpe = if annualized_volatility > 0.0 {
        Some((annualized_return - risk_free_rate) / annualized_volatility)
    } else {
        None
    };

    // Parametric VaR: loss at the normal quantile of the per-period
    // return distribution.
    let var_parametric = -(mu - z * std_dev);

    // Historical VaR: empirical percentile of sorted returns.
    let mut sorted = returns.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let var_index =
        (((sorted.len() as f64) * (1.0 - confidence_level)).floor() as usize).min(n - 1);
    let var_historical = -sorted[var_index];

    // CVaR: mean of the tail at or below the VaR threshold.
    let threshold = sorted[var_index];
    let tail: Vec<f64> = sorted.iter().copied().filter(|r| *r <= threshold).collect();
    let cvar = if tail.is_empty() {
        var_historical
    } else {
        -(tail.iter().sum::<f64>() / tail.len() as f64)
    };

    let (max_drawdown, max_drawdown_duration) = max_drawdown_with_duration(returns);

    let skewness = sample_skewness(returns, mu, std_dev);
    let kurtosis = sample_excess_kurtosis(returns, mu, variance);
    let jarque_bera = jarque_bera_test(n, skewness, kurtosis);

    AssetRiskMetrics {
        ticker: series.ticker.clone(),
        annualized_return,
        annualized_volatility,
        sharpe,
        var_parametric,
        var_historical,
        cvar,
        max_drawdown,
        max_drawdown_duration,
        skewness,
        kurtosis,
        jarque_bera,
    }
}

/// Maximum drawdown and its duration (in periods) from a return series.
fn max_drawdown_with_duration(returns: &[f64]) -> (f64, u32) {
    let mut cumulative = 1.0;
    let mut peak = 1.0;
    let mut max_dd = 0.0;
    let mut peak_idx: usize = 0;
    let mut max_dd_start: usize = 0;
    let mut max_dd_end: usize = 0;

    for (i, r) in returns.iter().enumerate() {
        cumulative *= 1.0 + r;
        if cumulative > peak {
            peak = cumulative;
            peak_idx = i;
        }
        if peak > 0.0 {
            let dd = (peak - cumulative) / peak;
            if dd > max_dd {
                max_dd = dd;
                max_dd_start = peak_idx;
                max_dd_end = i;
            }
        }
    }

    let duration = max_dd_end.saturating_sub(max_dd_start) as u32;
    (max_dd, duration)
}

/// Sample-adjusted skewness: n/((n-1)(n-2)) * sum(((x-mu)/s)^3)
fn sample_skewness(returns: &[f64], mu: f64, std_dev: f64) -> f64 {
    let n = returns.len();
    if n < 3 || std_dev == 0.0 {
        return 0.0;
    }
    let m3: f64 = returns.iter().map(|r| (r - mu).powi(3)).sum();
    let nf = n as f64;
    let adjustment = nf / ((nf - 1.0) * (nf - 2.0));
    adjustment * m3 / std_dev.powi(3)
}

/// Sample-adjusted excess kurtosis.
fn sample_excess_kurtosis(returns: &[f64], mu: f64, variance: f64) -> f64 {
    let n = returns.len();
    if n < 4 || variance == 0.0 {
        return 0.0;
    }
    let m4: f64 = returns.iter().map(|r| (r - mu).powi(4)).sum();
    let nf = n as f64;
    let factor1 = nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0));
    let factor2 = 3.0 * (nf - 1.0) * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0));
    factor1 * (m4 / (variance * variance)) - factor2
}

/// Jarque-Bera statistic and chi-squared (2 df) p-value.
fn jarque_bera_test(n: usize, skewness: f64, excess_kurtosis: f64) -> Option<JarqueBera> {
    if n < 4 {
        return None;
    }
    let nf = n as f64;
    let statistic = nf / 6.0 * (skewness * skewness + excess_kurtosis * excess_kurtosis / 4.0);
    let chi2 = ChiSquared::new(2.0).ok()?;
    let p_value = 1.0 - chi2.cdf(statistic);
    Some(JarqueBera {
        statistic,
        p_value,
        is_normal: p_value > 0.05,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input(confidence: f64) -> RiskMetricsInput {
        RiskMetricsInput {
            series: vec![AssetSeries {
                ticker: "X".into(),
                returns: vec![
                    0.05, -0.02, 0.03, 0.01, -0.01, 0.04, 0.02, -0.03, 0.06, 0.01, -0.02, 0.03,
                ],
            }],
            frequency: ReturnFrequency::Monthly,
            confidence_level: confidence,
            risk_free_rate: 0.02,
        }
    }

    #[test]
    fn test_basic_metrics() {
        let result = asset_risk_metrics(&sample_input(0.95)).unwrap();
        let m = &result.result.assets[0];

        assert!(m.annualized_return > 0.10);
        assert!(m.annualized_volatility > 0.0);
        assert!(m.sharpe.is_some());
        assert!(m.var_parametric > 0.0);
        assert!(m.var_historical > 0.0);
        assert!(m.cvar >= m.var_historical);
        assert!(m.max_drawdown >= 0.0);
    }

    #[test]
    fn test_higher_confidence_higher_var() {
        let r95 = asset_risk_metrics(&sample_input(0.95)).unwrap();
        let r99 = asset_risk_metrics(&sample_input(0.99)).unwrap();
        assert!(
            r99.result.assets[0].var_parametric > r95.result.assets[0].var_parametric
        );
    }

    #[test]
    fn test_max_drawdown_known_answer() {
        let (dd, _) = max_drawdown_with_duration(&[0.10, -0.20, 0.05, -0.10]);
        // Peak 1.1 after +10%; trough 1.1*0.8*1.05*0.9 = 0.8316 => dd ~0.244
        assert!((dd - 0.244).abs() < 0.001);
    }

    #[test]
    fn test_drawdown_duration() {
        let (_, duration) = max_drawdown_with_duration(&[0.10, -0.20, -0.05, 0.01]);
        assert!(duration >= 2);
    }

    #[test]
    fn test_zero_volatility_omits_sharpe() {
        let input = RiskMetricsInput {
            series: vec![AssetSeries {
                ticker: "FLAT".into(),
                returns: vec![0.01, 0.01, 0.01, 0.01],
            }],
            frequency: ReturnFrequency::Daily,
            confidence_level: 0.95,
            risk_free_rate: 0.0,
        };
        let result = asset_risk_metrics(&input).unwrap();
        assert!(result.result.assets[0].sharpe.is_none());
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_invalid_confidence() {
        assert!(asset_risk_metrics(&sample_input(1.5)).is_err());
        assert!(asset_risk_metrics(&sample_input(0.0)).is_err());
    }

    #[test]
    fn test_insufficient_observations() {
        let input = RiskMetricsInput {
            series: vec![AssetSeries {
                ticker: "X".into(),
                returns: vec![0.01, 0.02],
            }],
            frequency: ReturnFrequency::Daily,
            confidence_level: 0.95,
            risk_free_rate: 0.0,
        };
        assert!(asset_risk_metrics(&input).is_err());
    }

    #[test]
    fn test_jarque_bera_near_symmetric() {
        let result = asset_risk_metrics(&sample_input(0.95)).unwrap();
        let jb = result.result.assets[0].jarque_bera.as_ref().unwrap();
        assert!(jb.statistic >= 0.0);
        assert!(jb.p_value >= 0.0 && jb.p_value <= 1.0);
    }

    #[test]
    fn test_skewness_direction() {
        // A strong negative outlier should give negative skewness
        let returns = vec![0.01, 0.012, 0.008, 0.011, -0.15, 0.009, 0.01, 0.013];
        let mu = mean(&returns);
        let sd = sample_variance(&returns, mu).sqrt();
        assert!(sample_skewness(&returns, mu, sd) < 0.0);
    }
}
