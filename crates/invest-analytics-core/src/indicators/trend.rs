//! Average Directional Index (ADX) trend-strength indicator.

use serde::{Deserialize, Serialize};

use super::validate_window;
use crate::error::InvestError;
use crate::InvestResult;

/// Trend strength classified from the ADX level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendStrength {
    /// ADX <= 25
    Weak,
    /// 25 < ADX <= 50
    Strong,
    /// ADX > 50
    VeryStrong,
}

/// Trend direction from the directional indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Bullish,
    Bearish,
    Neutral,
}

/// ADX output, aligned to the input series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdxOutput {
    pub adx: Vec<Option<f64>>,
    pub plus_di: Vec<Option<f64>>,
    pub minus_di: Vec<Option<f64>>,
    pub dx: Vec<Option<f64>>,
    /// Classified wherever ADX is defined
    pub trend: Vec<Option<TrendStrength>>,
    /// Classified wherever both DIs are defined
    pub direction: Vec<Option<TrendDirection>>,
}

/// Average Directional Index over high/low/close series (default period 14).
///
/// True range and directional movement need a prior close, so the DIs
/// warm up over `period + 1` observations and the ADX over `2 * period`.
pub fn adx(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
) -> InvestResult<AdxOutput> {
    if high.len() != low.len() || high.len() != close.len() {
        return Err(InvestError::DimensionMismatch(format!(
            "high/low/close lengths differ: {} / {} / {}",
            high.len(),
            low.len(),
            close.len()
        )));
    }
    if high.len() < 2 {
        return Err(InvestError::InsufficientData(
            "ADX requires at least 2 observations".into(),
        ));
    }
    validate_window(high.len() - 1, period, "period")?;

    let n = high.len();

    // True range and directional movement, defined from index 1.
    let mut tr = vec![0.0; n];
    let mut dm_plus = vec![0.0; n];
    let mut dm_minus = vec![0.0; n];
    for i in 1..n {
        let hl = high[i] - low[i];
        let hc = (high[i] - close[i - 1]).abs();
        let lc = (low[i] - close[i - 1]).abs();
        tr[i] = hl.max(hc).max(lc);

        let up_move = high[i] - high[i - 1];
        let down_move = low[i - 1] - low[i];
        if up_move > down_move && up_move > 0.0 {
            dm_plus[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            dm_minus[i] = down_move;
        }
    }

    let mut plus_di = vec![None; n];
    let mut minus_di = vec![None; n];
    let mut dx = vec![None; n];

    for i in period..n {
        let window = (i + 1 - period)..=i;
        let tr_sum: f64 = tr[window.clone()].iter().sum();
        if tr_sum == 0.0 {
            continue;
        }
        let p = 100.0 * dm_plus[window.clone()].iter().sum::<f64>() / tr_sum;
        let m = 100.0 * dm_minus[window].iter().sum::<f64>() / tr_sum;
        plus_di[i] = Some(p);
        minus_di[i] = Some(m);
        if p + m > 0.0 {
            dx[i] = Some(100.0 * (p - m).abs() / (p + m));
        }
    }

    // ADX: rolling mean of DX, defined once a full window of DX exists.
    let mut adx_values = vec![None; n];
    for i in (2 * period - 1)..n {
        let window_dx: Vec<f64> = dx[(i + 1 - period)..=i].iter().flatten().copied().collect();
        if window_dx.len() == period {
            adx_values[i] = Some(window_dx.iter().sum::<f64>() / period as f64);
        }
    }

    let trend = adx_values
        .iter()
        .map(|v| {
            v.map(|a| {
                if a > 50.0 {
                    TrendStrength::VeryStrong
                } else if a > 25.0 {
                    TrendStrength::Strong
                } else {
                    TrendStrength::Weak
                }
            })
        })
        .collect();

    let direction = plus_di
        .iter()
        .zip(&minus_di)
        .map(|(p, m)| match (p, m) {
            (Some(p), Some(m)) if p > m => Some(TrendDirection::Bullish),
            (Some(p), Some(m)) if m > p => Some(TrendDirection::Bearish),
            (Some(_), Some(_)) => Some(TrendDirection::Neutral),
            _ => None,
        })
        .collect();

    Ok(AdxOutput {
        adx: adx_values,
        plus_di,
        minus_di,
        dx,
        trend,
        direction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trending_up(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let close: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 0.5).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 0.5).collect();
        (high, low, close)
    }

    #[test]
    fn test_strong_uptrend_is_bullish() {
        let (high, low, close) = trending_up(40);
        let out = adx(&high, &low, &close, 14).unwrap();
        let last = close.len() - 1;
        assert_eq!(out.direction[last], Some(TrendDirection::Bullish));
        // Monotone trend saturates the DX, so the ADX reads very strong
        assert_eq!(out.trend[last], Some(TrendStrength::VeryStrong));
        assert!(out.adx[last].unwrap() > 50.0);
    }

    #[test]
    fn test_warmup_lengths() {
        let (high, low, close) = trending_up(40);
        let out = adx(&high, &low, &close, 14).unwrap();
        assert!(out.plus_di[..14].iter().all(Option::is_none));
        assert!(out.plus_di[14].is_some());
        assert!(out.adx[..27].iter().all(Option::is_none));
        assert!(out.adx[27].is_some());
    }

    #[test]
    fn test_downtrend_is_bearish() {
        let (high, low, close) = trending_up(40);
        let rev_close: Vec<f64> = close.into_iter().rev().collect();
        let rev_high: Vec<f64> = rev_close.iter().map(|c| c + 0.5).collect();
        let rev_low: Vec<f64> = rev_close.iter().map(|c| c - 0.5).collect();
        let out = adx(&rev_high, &rev_low, &rev_close, 14).unwrap();
        assert_eq!(out.direction[39], Some(TrendDirection::Bearish));
    }

    #[test]
    fn test_di_bounded() {
        let close: Vec<f64> = (0..50)
            .map(|i| 100.0 + (i as f64 * 0.9).sin() * 3.0)
            .collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        let out = adx(&high, &low, &close, 14).unwrap();
        for v in out.plus_di.iter().chain(&out.minus_di).flatten() {
            assert!((0.0..=100.0).contains(v));
        }
        for v in out.adx.iter().flatten() {
            assert!((0.0..=100.0).contains(v));
        }
    }

    #[test]
    fn test_mismatched_lengths() {
        let result = adx(&[1.0, 2.0, 3.0], &[1.0, 2.0], &[1.0, 2.0, 3.0], 1);
        assert!(matches!(result, Err(InvestError::DimensionMismatch(_))));
    }

    #[test]
    fn test_invalid_period() {
        let (high, low, close) = trending_up(10);
        assert!(adx(&high, &low, &close, 0).is_err());
        assert!(adx(&high, &low, &close, 10).is_err());
    }
}
