//! Shared statistics over aligned return series: mean vector, sample
//! covariance and correlation matrices, annualisation scaling.

use crate::error::InvestError;
use crate::types::AssetSeries;
use crate::InvestResult;

/// Validate that the series are aligned: at least one series, all of equal
/// length, with at least 2 observations each. Returns the common length.
pub fn validate_aligned(series: &[AssetSeries]) -> InvestResult<usize> {
    let first = series.first().ok_or_else(|| {
        InvestError::DimensionMismatch("At least one return series required".into())
    })?;

    let len = first.returns.len();
    if len < 2 {
        return Err(InvestError::DimensionMismatch(format!(
            "Series '{}' has {} observations, need at least 2",
            first.ticker, len
        )));
    }

    for s in &series[1..] {
        if s.returns.len() != len {
            return Err(InvestError::DimensionMismatch(format!(
                "Series '{}' has {} observations, expected {} (all series must be aligned)",
                s.ticker,
                s.returns.len(),
                len
            )));
        }
    }

    Ok(len)
}

/// Periodic mean return per asset.
pub fn mean_returns(series: &[AssetSeries]) -> Vec<f64> {
    series.iter().map(|s| mean(&s.returns)).collect()
}

/// Sample covariance matrix (n-1 denominator), symmetric by construction.
pub fn covariance_matrix(series: &[AssetSeries]) -> Vec<Vec<f64>> {
    let n_assets = series.len();
    let means: Vec<f64> = series.iter().map(|s| mean(&s.returns)).collect();

    let mut cov = vec![vec![0.0; n_assets]; n_assets];
    for i in 0..n_assets {
        for j in i..n_assets {
            let c = covariance(&series[i].returns, &series[j].returns, means[i], means[j]);
            cov[i][j] = c;
            cov[j][i] = c;
        }
    }
    cov
}

/// Pearson correlation matrix. Zero-variance assets get 0 off-diagonal
/// entries instead of NaN; the diagonal is always 1.
pub fn correlation_matrix(series: &[AssetSeries]) -> Vec<Vec<f64>> {
    let cov = covariance_matrix(series);
    let n = cov.len();
    let stds: Vec<f64> = (0..n).map(|i| cov[i][i].max(0.0).sqrt()).collect();

    let mut corr = vec![vec![0.0; n]; n];
    for (i, row) in corr.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            if i == j {
                *cell = 1.0;
            } else if stds[i] > 0.0 && stds[j] > 0.0 {
                *cell = cov[i][j] / (stds[i] * stds[j]);
            }
        }
    }
    corr
}

/// Annualise a periodic mean-return vector: mean scales linearly.
pub fn annualize_means(means: &[f64], periods_per_year: f64) -> Vec<f64> {
    means.iter().map(|m| m * periods_per_year).collect()
}

/// Annualise a periodic covariance matrix: variance scales linearly with
/// the number of periods.
pub fn annualize_covariance(cov: &[Vec<f64>], periods_per_year: f64) -> Vec<Vec<f64>> {
    cov.iter()
        .map(|row| row.iter().map(|c| c * periods_per_year).collect())
        .collect()
}

pub(crate) fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample variance (n-1 denominator)
pub(crate) fn sample_variance(data: &[f64], mean: f64) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let sum_sq: f64 = data.iter().map(|x| (x - mean) * (x - mean)).sum();
    sum_sq / (n - 1) as f64
}

/// Covariance between two series (sample, n-1)
fn covariance(x: &[f64], y: &[f64], x_mean: f64, y_mean: f64) -> f64 {
    let n = x.len();
    if n < 2 {
        return 0.0;
    }
    let sum: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(xi, yi)| (xi - x_mean) * (yi - y_mean))
        .sum();
    sum / (n - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_series() -> Vec<AssetSeries> {
        vec![
            AssetSeries {
                ticker: "A".into(),
                returns: vec![0.01, -0.02, 0.015, 0.00],
            },
            AssetSeries {
                ticker: "B".into(),
                returns: vec![0.00, 0.01, -0.01, 0.02],
            },
        ]
    }

    #[test]
    fn test_validate_aligned_ok() {
        assert_eq!(validate_aligned(&two_series()).unwrap(), 4);
    }

    #[test]
    fn test_validate_empty() {
        assert!(validate_aligned(&[]).is_err());
    }

    #[test]
    fn test_validate_short_series() {
        let series = vec![AssetSeries {
            ticker: "A".into(),
            returns: vec![0.01],
        }];
        assert!(validate_aligned(&series).is_err());
    }

    #[test]
    fn test_validate_mismatched_lengths() {
        let mut series = two_series();
        series[1].returns.pop();
        assert!(validate_aligned(&series).is_err());
    }

    #[test]
    fn test_mean_returns() {
        let means = mean_returns(&two_series());
        assert!((means[0] - 0.00125).abs() < 1e-12);
        assert!((means[1] - 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_covariance_symmetric() {
        let cov = covariance_matrix(&two_series());
        assert_eq!(cov.len(), 2);
        assert!((cov[0][1] - cov[1][0]).abs() < 1e-15);
        // Diagonal entries are sample variances, always non-negative
        assert!(cov[0][0] >= 0.0);
        assert!(cov[1][1] >= 0.0);
    }

    #[test]
    fn test_covariance_diagonal_matches_variance() {
        let series = two_series();
        let cov = covariance_matrix(&series);
        let m = mean(&series[0].returns);
        let var = sample_variance(&series[0].returns, m);
        assert!((cov[0][0] - var).abs() < 1e-15);
    }

    #[test]
    fn test_correlation_unit_diagonal() {
        let corr = correlation_matrix(&two_series());
        assert!((corr[0][0] - 1.0).abs() < 1e-12);
        assert!((corr[1][1] - 1.0).abs() < 1e-12);
        assert!(corr[0][1].abs() <= 1.0 + 1e-12);
    }

    #[test]
    fn test_correlation_perfectly_correlated() {
        let series = vec![
            AssetSeries {
                ticker: "A".into(),
                returns: vec![0.01, 0.02, 0.03, 0.04],
            },
            AssetSeries {
                ticker: "2A".into(),
                returns: vec![0.02, 0.04, 0.06, 0.08],
            },
        ];
        let corr = correlation_matrix(&series);
        assert!((corr[0][1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_correlation_zero_variance_asset() {
        let series = vec![
            AssetSeries {
                ticker: "FLAT".into(),
                returns: vec![0.01, 0.01, 0.01],
            },
            AssetSeries {
                ticker: "B".into(),
                returns: vec![0.00, 0.02, -0.01],
            },
        ];
        let corr = correlation_matrix(&series);
        assert_eq!(corr[0][1], 0.0);
        assert_eq!(corr[0][0], 1.0);
    }

    #[test]
    fn test_annualize_scaling() {
        let means = annualize_means(&[0.001], 252.0);
        assert!((means[0] - 0.252).abs() < 1e-12);

        let cov = annualize_covariance(&[vec![0.0001]], 252.0);
        assert!((cov[0][0] - 0.0252).abs() < 1e-12);
    }
}
