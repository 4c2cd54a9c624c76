//! Momentum indicators: RSI and MACD.

use serde::{Deserialize, Serialize};

use super::moving_averages::{ema, ma_crossovers};
use super::{validate_window, Signal};
use crate::error::InvestError;
use crate::InvestResult;

/// Relative Strength Index over rolling-mean gains and losses.
///
/// Uses plain rolling means of gains and losses rather than Wilder
/// smoothing. The first `period` entries are `None`. A window with no
/// losses reads 100; a completely flat window reads neutral (50).
pub fn rsi(prices: &[f64], period: usize) -> InvestResult<Vec<Option<f64>>> {
    if prices.len() < 2 {
        return Err(InvestError::InsufficientData(
            "RSI requires at least 2 prices".into(),
        ));
    }
    validate_window(prices.len() - 1, period, "period")?;

    let n = prices.len();
    let mut gains = vec![0.0; n];
    let mut losses = vec![0.0; n];
    for i in 1..n {
        let delta = prices[i] - prices[i - 1];
        if delta > 0.0 {
            gains[i] = delta;
        } else {
            losses[i] = -delta;
        }
    }

    let mut out = vec![None; n];
    for i in period..n {
        let window = (i + 1 - period)..=i;
        let avg_gain: f64 = gains[window.clone()].iter().sum::<f64>() / period as f64;
        let avg_loss: f64 = losses[window].iter().sum::<f64>() / period as f64;
        out[i] = Some(if avg_loss == 0.0 {
            if avg_gain > 0.0 {
                100.0
            } else {
                50.0
            }
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        });
    }
    Ok(out)
}

/// MACD line, signal line, histogram and crossover signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdOutput {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
    /// `Buy` where MACD crosses above the signal line, `Sell` below
    pub crossovers: Vec<Signal>,
}

/// Moving Average Convergence Divergence (defaults 12/26/9).
pub fn macd(
    prices: &[f64],
    fast_span: usize,
    slow_span: usize,
    signal_span: usize,
) -> InvestResult<MacdOutput> {
    if fast_span >= slow_span {
        return Err(InvestError::InvalidInput {
            field: "fast_span".into(),
            reason: format!(
                "Fast span {} must be shorter than slow span {}",
                fast_span, slow_span
            ),
        });
    }
    validate_window(prices.len(), slow_span, "slow_span")?;
    validate_window(prices.len(), signal_span, "signal_span")?;

    let fast = ema(prices, fast_span)?;
    let slow = ema(prices, slow_span)?;

    let macd_values: Vec<f64> = fast
        .iter()
        .zip(&slow)
        .map(|(f, s)| f.unwrap_or(0.0) - s.unwrap_or(0.0))
        .collect();
    let macd_line: Vec<Option<f64>> = macd_values.iter().copied().map(Some).collect();

    let signal_line = ema(&macd_values, signal_span)?;
    let histogram: Vec<Option<f64>> = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        })
        .collect();
    let crossovers = ma_crossovers(&macd_line, &signal_line);

    Ok(MacdOutput {
        macd: macd_line,
        signal: signal_line,
        histogram,
        crossovers,
    })
}
