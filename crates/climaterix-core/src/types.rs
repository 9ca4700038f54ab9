use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages expressed as whole numbers (5 = 5%). The model's external
/// contract uses percentage points for discount and renewable rates.
pub type Percent = Decimal;

/// Emission quantities in tonnes of CO2-equivalent.
pub type Tonnes = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// A generic (x, y) pair for chart-ready series: sensitivity curves,
/// projection paths. Order of points is always the order of computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: Decimal,
    pub y: Decimal,
}

/// One point of a cumulative discounted cash-flow series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPoint {
    /// Year index, 0-based; year 0 is the pre-investment point.
    pub year: u32,
    /// Cumulative discounted cash flow through this year.
    pub cumulative: Money,
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
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
