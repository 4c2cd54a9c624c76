use clap::Args;
use serde_json::Value;

use invest_analytics_core::risk::{asset_risk_metrics, RiskMetricsInput};
use invest_analytics_core::AssetSeries;

use crate::commands::parse_frequency;
use crate::input;

/// Arguments for per-asset risk metrics.
#[derive(Args)]
pub struct RiskArgs {
    /// Path to a JSON file with a RiskMetricsInput document
    #[arg(long)]
    pub input: Option<String>,

    /// Comma-separated periodic returns for a single ad-hoc series
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub returns: Option<Vec<f64>>,

    /// Ticker label for the ad-hoc series
    #[arg(long, default_value = "SERIES")]
    pub ticker: String,

    /// Confidence level for VaR/CVaR (e.g. 0.95 for 95%)
    #[arg(long, default_value_t = 0.95)]
    pub confidence: f64,

    /// Annualised risk-free rate for the Sharpe ratio
    #[arg(long, default_value_t = 0.0)]
    pub risk_free_rate: f64,

    /// Return frequency: daily, calendar-daily, weekly, monthly, quarterly, annual
    #[arg(long, default_value = "daily")]
    pub frequency: String,
}

pub fn run_risk(args: RiskArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let risk_input = if let Some(returns) = args.returns {
        // Inline series: the flags fully describe the input
        RiskMetricsInput {
            series: vec![AssetSeries {
                ticker: args.ticker,
                returns,
            }],
            frequency: parse_frequency(&args.frequency)?,
            confidence_level: args.confidence,
            risk_free_rate: args.risk_free_rate,
        }
    } else {
        let mut loaded: RiskMetricsInput = input::load(&args.input)?;
        // Flags override the document only when explicitly non-default
        if args.confidence != 0.95 {
            loaded.confidence_level = args.confidence;
        }
        if args.risk_free_rate != 0.0 {
            loaded.risk_free_rate = args.risk_free_rate;
        }
        if args.frequency != "daily" {
            loaded.frequency = parse_frequency(&args.frequency)?;
        }
        loaded
    };

    let result = asset_risk_metrics(&risk_input)?;
    Ok(serde_json::to_value(&result)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_returns_produce_metrics() {
        let args = RiskArgs {
            input: None,
            returns: Some(vec![0.01, -0.02, 0.015, 0.005, -0.01]),
            ticker: "TEST".into(),
            confidence: 0.95,
            risk_free_rate: 0.0,
            frequency: "daily".into(),
        };
        let value = run_risk(args).unwrap();
        let assets = &value["result"]["assets"];
        assert_eq!(assets[0]["ticker"], "TEST");
        assert!(assets[0]["annualized_volatility"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_bad_frequency_rejected() {
        let args = RiskArgs {
            input: None,
            returns: Some(vec![0.01, -0.02, 0.015]),
            ticker: "TEST".into(),
            confidence: 0.95,
            risk_free_rate: 0.0,
            frequency: "hourly".into(),
        };
        assert!(run_risk(args).is_err());
    }

    #[test]
    fn test_no_input_at_all_fails() {
        let args = RiskArgs {
            input: Some("/nonexistent/path.json".into()),
            returns: None,
            ticker: "SERIES".into(),
            confidence: 0.95,
            risk_free_rate: 0.0,
            frequency: "daily".into(),
        };
        assert!(run_risk(args).is_err());
    }
}
