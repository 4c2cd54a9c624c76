//! Simple and exponential moving averages, plus crossover detection.

use super::{validate_window, Signal};
use crate::InvestResult;

/// Simple moving average over a fixed window.
///
/// The first `window - 1` entries are `None`.
pub fn sma(prices: &[f64], window: usize) -> InvestResult<Vec<Option<f64>>> {
    validate_window(prices.len(), window, "window")?;

    let mut out = vec![None; prices.len()];
    let mut running_sum: f64 = prices[..window - 1].iter().sum();
    for i in (window - 1)..prices.len() {
        running_sum += prices[i];
        out[i] = Some(running_sum / window as f64);
        running_sum -= prices[i + 1 - window];
    }
    Ok(out)
}

/// Exponential moving average with smoothing `alpha = 2 / (span + 1)`,
/// seeded from the first observation.
///
/// Defined from the first entry onward, so every value is `Some`.
pub fn ema(prices: &[f64], span: usize) -> InvestResult<Vec<Option<f64>>> {
    validate_window(prices.len(), span, "span")?;

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(prices.len());
    let mut current = prices[0];
    out.push(Some(current));
    for &price in &prices[1..] {
        current = alpha * price + (1.0 - alpha) * current;
        out.push(Some(current));
    }
    Ok(out)
}

/// Detect golden/death crosses between a short and a long moving average.
///
/// `Buy` where the short average crosses above the long one, `Sell` where
/// it crosses below, `Hold` elsewhere (including anywhere either input is
/// still in its warmup window).
pub fn ma_crossovers(short: &[Option<f64>], long: &[Option<f64>]) -> Vec<Signal> {
    let len = short.len().min(long.len());
    let mut signals = vec![Signal::Hold; len];

    let mut prev_diff: Option<f64> = None;
    for i in 0..len {
        let diff = match (short[i], long[i]) {
            (Some(s), Some(l)) => Some(s - l),
            _ => None,
        };
        if let (Some(d), Some(p)) = (diff, prev_diff) {
            if d > 0.0 && p <= 0.0 {
                signals[i] = Signal::Buy;
            } else if d < 0.0 && p >= 0.0 {
                signals[i] = Signal::Sell;
            }
        }
        prev_diff = diff;
    }
    signals
}
