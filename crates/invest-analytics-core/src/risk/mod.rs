pub mod metrics;

pub use metrics::{asset_risk_metrics, AssetRiskMetrics, RiskMetricsInput, RiskMetricsOutput};
