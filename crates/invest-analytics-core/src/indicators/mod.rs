//! Technical indicators: rolling-window transforms over price series.
//!
//! Every indicator is a pure function aligned to its input: the output
//! has the same length as the price series, with `None` during the
//! warmup window.

pub mod momentum;
pub mod moving_averages;
pub mod trend;
pub mod volatility;

use serde::{Deserialize, Serialize};

use crate::error::InvestError;
use crate::InvestResult;

pub use momentum::{macd, rsi, MacdOutput};
pub use moving_averages::{ema, ma_crossovers, sma};
pub use trend::{adx, AdxOutput, TrendDirection, TrendStrength};
pub use volatility::{bollinger, BollingerOutput};

/// Trading signal at a single observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// Check a rolling window against the series length.
fn validate_window(len: usize, window: usize, field: &str) -> InvestResult<()> {
    if window == 0 {
        return Err(InvestError::InvalidInput {
            field: field.into(),
            reason: "Window must be at least 1".into(),
        });
    }
    if window > len {
        return Err(InvestError::InsufficientData(format!(
            "Window {} exceeds series length {}",
            window, len
        )));
    }
    Ok(())
}
