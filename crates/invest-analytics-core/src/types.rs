use serde::{Deserialize, Serialize};

/// A single asset with its historical periodic returns.
///
/// Returns are simple returns as decimals (0.05 = 5%), in chronological
/// order, one per trading period. All series passed to a computation must
/// be aligned to the same dates; alignment is the caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetSeries {
    /// Ticker or display name
    pub ticker: String,
    /// Periodic returns, chronological
    pub returns: Vec<f64>,
}

/// Frequency of return observations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnFrequency {
    /// Trading days (252 periods per year)
    #[default]
    Daily,
    /// Calendar days (365 periods per year)
    CalendarDaily,
    Weekly,
    Monthly,
    Quarterly,
    Annual,
}

impl ReturnFrequency {
    /// Number of periods in a year for annualisation
    pub fn periods_per_year(&self) -> f64 {
        match self {
            ReturnFrequency::Daily => 252.0,
            ReturnFrequency::CalendarDaily => 365.0,
            ReturnFrequency::Weekly => 52.0,
            ReturnFrequency::Monthly => 12.0,
            ReturnFrequency::Quarterly => 4.0,
            ReturnFrequency::Annual => 1.0,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "ieee754_f64".to_string(),
        },
    }
}
