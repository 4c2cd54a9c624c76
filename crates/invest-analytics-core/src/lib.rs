//! Investment analytics: Markowitz portfolio simulation, per-asset risk
//! metrics and technical indicators over historical return/price series.
//!
//! Data acquisition, plotting and report generation are out of scope;
//! callers supply aligned return series and consume the JSON-serialisable
//! outputs.

pub mod error;
pub mod series;
pub mod types;

#[cfg(feature = "optimizer")]
pub mod optimizer;

#[cfg(feature = "risk")]
pub mod risk;

#[cfg(feature = "indicators")]
pub mod indicators;

pub use error::InvestError;
pub use types::*;

/// Standard result type for all invest-analytics operations
pub type InvestResult<T> = Result<T, InvestError>;
