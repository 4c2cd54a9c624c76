//! Bollinger bands.

use serde::{Deserialize, Serialize};

use super::{validate_window, Signal};
use crate::error::InvestError;
use crate::InvestResult;

/// Bollinger bands with bandwidth, %B and band-touch signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Rolling mean (middle band)
    pub middle: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
    /// (upper - lower) / middle * 100
    pub bandwidth: Vec<Option<f64>>,
    /// Position of the price within the bands, as a percentage
    pub percent_b: Vec<Option<f64>>,
    /// `Buy` on a fresh touch of the lower band, `Sell` on the upper
    pub signals: Vec<Signal>,
}

/// Bollinger bands over a rolling window (defaults 20 periods, 2 standard
/// deviations). Band width uses the sample standard deviation.
pub fn bollinger(prices: &[f64], window: usize, num_std: f64) -> InvestResult<BollingerOutput> {
    validate_window(prices.len(), window, "window")?;
    if window < 2 {
        return Err(InvestError::InvalidInput {
            field: "window".into(),
            reason: "Bollinger window must be at least 2".into(),
        });
    }
    if num_std <= 0.0 {
        return Err(InvestError::InvalidInput {
            field: "num_std".into(),
            reason: "Standard deviation multiplier must be positive".into(),
        });
    }

    let n = prices.len();
    let mut middle = vec![None; n];
    let mut upper = vec![None; n];
    let mut lower = vec![None; n];
    let mut bandwidth = vec![None; n];
    let mut percent_b = vec![None; n];

    for i in (window - 1)..n {
        let slice = &prices[i + 1 - window..=i];
        let mean = slice.iter().sum::<f64>() / window as f64;
        let variance = slice.iter().map(|p| (p - mean).powi(2)).sum::<f64>()
            / (window as f64 - 1.0);
        let std_dev = variance.sqrt();

        let up = mean + num_std * std_dev;
        let lo = mean - num_std * std_dev;
        middle[i] = Some(mean);
        upper[i] = Some(up);
        lower[i] = Some(lo);
        bandwidth[i] = if mean != 0.0 {
            Some((up - lo) / mean * 100.0)
        } else {
            None
        };
        percent_b[i] = if up > lo {
            Some((prices[i] - lo) / (up - lo) * 100.0)
        } else {
            None
        };
    }

    let mut signals = vec![Signal::Hold; n];
    for i in window..n {
        if let (Some(lo), Some(up), Some(prev_lo), Some(prev_up)) =
            (lower[i], upper[i], lower[i - 1], upper[i - 1])
        {
            if prices[i] <= lo && prices[i - 1] > prev_lo {
                signals[i] = Signal::Buy;
            } else if prices[i] >= up && prices[i - 1] < prev_up {
                signals[i] = Signal::Sell;
            }
        }
    }

    Ok(BollingerOutput {
        middle,
        upper,
        lower,
        bandwidth,
        percent_b,
        signals,
    })
}
