use clap::Args;
use serde::Deserialize;
use serde_json::{json, Value};

use invest_analytics_core::indicators::{adx, bollinger, ema, macd, rsi, sma};

use crate::input;

/// Arguments for the simple moving average.
#[derive(Args)]
pub struct SmaArgs {
    /// Path to a JSON file with a price array or {"prices": [...]}
    #[arg(long)]
    pub input: Option<String>,

    /// Comma-separated prices (e.g. "101.2,100.8,102.5")
    #[arg(long, value_delimiter = ',')]
    pub prices: Option<Vec<f64>>,

    /// Rolling window length
    #[arg(long, default_value_t = 20)]
    pub window: usize,
}

/// Arguments for the exponential moving average.
#[derive(Args)]
pub struct EmaArgs {
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub prices: Option<Vec<f64>>,

    /// Span for the smoothing factor alpha = 2 / (span + 1)
    #[arg(long, default_value_t = 20)]
    pub span: usize,
}

/// Arguments for the Relative Strength Index.
#[derive(Args)]
pub struct RsiArgs {
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub prices: Option<Vec<f64>>,

    /// Lookback period
    #[arg(long, default_value_t = 14)]
    pub period: usize,
}

/// Arguments for MACD.
#[derive(Args)]
pub struct MacdArgs {
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub prices: Option<Vec<f64>>,

    /// Fast EMA span
    #[arg(long, default_value_t = 12)]
    pub fast: usize,

    /// Slow EMA span
    #[arg(long, default_value_t = 26)]
    pub slow: usize,

    /// Signal line EMA span
    #[arg(long, default_value_t = 9)]
    pub signal: usize,
}

/// Arguments for Bollinger bands.
#[derive(Args)]
pub struct BollingerArgs {
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub prices: Option<Vec<f64>>,

    /// Rolling window length
    #[arg(long, default_value_t = 20)]
    pub window: usize,

    /// Standard deviation multiplier for the bands
    #[arg(long, default_value_t = 2.0)]
    pub num_std: f64,
}

/// Arguments for the Average Directional Index.
#[derive(Args)]
pub struct AdxArgs {
    /// Path to a JSON file with {"high": [...], "low": [...], "close": [...]}
    #[arg(long)]
    pub input: Option<String>,

    /// Lookback period
    #[arg(long, default_value_t = 14)]
    pub period: usize,
}

/// JSON document shape for single-series indicator inputs.
#[derive(Deserialize)]
#[serde(untagged)]
enum PriceDocument {
    Bare(Vec<f64>),
    Keyed { prices: Vec<f64> },
}

/// OHLC document shape for the ADX command.
#[derive(Deserialize)]
struct OhlcDocument {
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
}

fn get_prices(
    input_path: &Option<String>,
    cli_prices: &Option<Vec<f64>>,
) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    if let Some(ref prices) = cli_prices {
        return Ok(prices.clone());
    }
    let doc: PriceDocument = input::load(input_path).map_err(|e| {
        format!("Provide --prices, --input file, or pipe JSON via stdin ({})", e)
    })?;
    Ok(match doc {
        PriceDocument::Bare(prices) => prices,
        PriceDocument::Keyed { prices } => prices,
    })
}

pub fn run_sma(args: SmaArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let prices = get_prices(&args.input, &args.prices)?;
    let values = sma(&prices, args.window)?;
    Ok(json!({
        "result": { "values": values, "window": args.window },
        "indicator": "sma",
    }))
}

pub fn run_ema(args: EmaArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let prices = get_prices(&args.input, &args.prices)?;
    let values = ema(&prices, args.span)?;
    Ok(json!({
        "result": { "values": values, "span": args.span },
        "indicator": "ema",
    }))
}

pub fn run_rsi(args: RsiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let prices = get_prices(&args.input, &args.prices)?;
    let values = rsi(&prices, args.period)?;
    Ok(json!({
        "result": { "values": values, "period": args.period },
        "indicator": "rsi",
    }))
}

pub fn run_macd(args: MacdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let prices = get_prices(&args.input, &args.prices)?;
    let out = macd(&prices, args.fast, args.slow, args.signal)?;
    Ok(json!({
        "result": out,
        "indicator": "macd",
        "spans": { "fast": args.fast, "slow": args.slow, "signal": args.signal },
    }))
}

pub fn run_bollinger(args: BollingerArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let prices = get_prices(&args.input, &args.prices)?;
    let out = bollinger(&prices, args.window, args.num_std)?;
    Ok(json!({
        "result": out,
        "indicator": "bollinger",
        "window": args.window,
        "num_std": args.num_std,
    }))
}

pub fn run_adx(args: AdxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let doc: OhlcDocument = input::load(&args.input)?;
    let out = adx(&doc.high, &doc.low, &doc.close, args.period)?;
    Ok(json!({
        "result": out,
        "indicator": "adx",
        "period": args.period,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_inline_prices() {
        let args = SmaArgs {
            input: None,
            prices: Some(vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            window: 3,
        };
        let value = run_sma(args).unwrap();
        assert_eq!(value["indicator"], "sma");
        assert_eq!(value["result"]["values"][2], 2.0);
        assert!(value["result"]["values"][0].is_null());
    }

    #[test]
    fn test_macd_inline_prices() {
        let prices: Vec<f64> = (0..60).map(|i| 100.0 + i as f64 * 0.5).collect();
        let args = MacdArgs {
            input: None,
            prices: Some(prices),
            fast: 12,
            slow: 26,
            signal: 9,
        };
        let value = run_macd(args).unwrap();
        assert!(value["result"]["macd"].as_array().unwrap().len() == 60);
    }

    #[test]
    fn test_oversized_window_surfaces_error() {
        let args = RsiArgs {
            input: None,
            prices: Some(vec![1.0, 2.0, 3.0]),
            period: 14,
        };
        assert!(run_rsi(args).is_err());
    }
}
