use chrono::TimeDelta;
use thiserror::Error;

/// All errors generated in `aurum-ta`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaError {
    #[error("insufficient data: {required} candles required, {available} available")]
    InsufficientData { required: usize, available: usize },

    #[error("candle at index {index} is not later than the previous candle")]
    NonMonotonic { index: usize },

    #[error("candle at index {index} is {actual} after the previous candle, expected {expected}")]
    IrregularSpacing {
        index: usize,
        expected: TimeDelta,
        actual: TimeDelta,
    },

    #[error("invalid indicator period: {0}")]
    InvalidPeriod(usize),
}
