use invest_analytics_core::risk::{asset_risk_metrics, RiskMetricsInput};
use invest_analytics_core::{AssetSeries, InvestError, ReturnFrequency};

// ===========================================================================
// Fixtures
// ===========================================================================

fn mixed_series() -> Vec<AssetSeries> {
    vec![
        AssetSeries {
            ticker: "GGAL".into(),
            returns: vec![
                0.021, -0.012, 0.008, 0.017, -0.032, 0.011, 0.003, -0.009, 0.024, -0.018, 0.006,
                0.013, -0.004, 0.009, -0.021, 0.015,
            ],
        },
        AssetSeries {
            ticker: "BOND".into(),
            returns: vec![
                0.002, 0.001, -0.001, 0.002, 0.001, 0.000, 0.002, -0.002, 0.001, 0.002, 0.001,
                -0.001, 0.002, 0.001, 0.000, 0.001,
            ],
        },
    ]
}

fn input_at(confidence: f64) -> RiskMetricsInput {
    RiskMetricsInput {
        series: mixed_series(),
        frequency: ReturnFrequency::Daily,
        confidence_level: confidence,
        risk_free_rate: 0.04,
    }
}

// ===========================================================================
// Metric sanity
// ===========================================================================

#[test]
fn test_metrics_per_asset() {
    let result = asset_risk_metrics(&input_at(0.95)).unwrap();
    let assets = &result.result.assets;
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].ticker, "GGAL");
    assert_eq!(assets[1].ticker, "BOND");

    // The equity series is clearly more volatile than the bond series
    assert!(assets[0].annualized_volatility > assets[1].annualized_volatility);
    assert!(assets[0].var_parametric > assets[1].var_parametric);
    assert!(assets[0].max_drawdown > assets[1].max_drawdown);
}

#[test]
fn test_cvar_at_least_var() {
    let result = asset_risk_metrics(&input_at(0.95)).unwrap();
    for asset in &result.result.assets {
        // Expected shortfall averages the tail beyond the VaR threshold
        assert!(asset.cvar >= asset.var_historical - 1e-12);
    }
}

#[test]
fn test_var_monotone_in_confidence() {
    let r95 = asset_risk_metrics(&input_at(0.95)).unwrap();
    let r99 = asset_risk_metrics(&input_at(0.99)).unwrap();
    for (a95, a99) in r95.result.assets.iter().zip(&r99.result.assets) {
        assert!(a99.var_parametric > a95.var_parametric);
        assert!(a99.var_historical >= a95.var_historical);
    }
}

#[test]
fn test_unaligned_series_accepted() {
    // Risk metrics are per asset, so series lengths may differ
    let mut input = input_at(0.95);
    input.series[1].returns.truncate(10);
    assert!(asset_risk_metrics(&input).is_ok());
}

#[test]
fn test_drawdown_in_unit_range() {
    let result = asset_risk_metrics(&input_at(0.95)).unwrap();
    for asset in &result.result.assets {
        assert!(asset.max_drawdown >= 0.0 && asset.max_drawdown < 1.0);
    }
}

#[test]
fn test_jarque_bera_present() {
    let result = asset_risk_metrics(&input_at(0.95)).unwrap();
    for asset in &result.result.assets {
        let jb = asset.jarque_bera.as_ref().unwrap();
        assert!(jb.statistic >= 0.0);
        assert!((0.0..=1.0).contains(&jb.p_value));
    }
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_confidence_bounds_enforced() {
    assert!(matches!(
        asset_risk_metrics(&input_at(0.0)),
        Err(InvestError::InvalidInput { .. })
    ));
    assert!(matches!(
        asset_risk_metrics(&input_at(1.0)),
        Err(InvestError::InvalidInput { .. })
    ));
}

#[test]
fn test_short_series_rejected() {
    let input = RiskMetricsInput {
        series: vec![AssetSeries {
            ticker: "X".into(),
            returns: vec![0.01, -0.01],
        }],
        frequency: ReturnFrequency::Daily,
        confidence_level: 0.95,
        risk_free_rate: 0.0,
    };
    assert!(matches!(
        asset_risk_metrics(&input),
        Err(InvestError::InsufficientData(_))
    ));
}

#[test]
fn test_empty_input_rejected() {
    let input = RiskMetricsInput {
        series: vec![],
        frequency: ReturnFrequency::Daily,
        confidence_level: 0.95,
        risk_free_rate: 0.0,
    };
    assert!(asset_risk_metrics(&input).is_err());
}
