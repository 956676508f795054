//! Error types for timehash encoding, decoding and navigation.

use thiserror::Error;

use crate::constants::{LOWER_BOUND, MAX_PRECISION, UPPER_BOUND};

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TimeHashError>;

/// Error returned by every fallible timehash operation.
///
/// All failures are local: no output is produced and nothing is retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeHashError {
    /// A character of the code is not one of `01abcdef`
    #[error("invalid symbol {symbol:?} at position {position}, expected one of \"01abcdef\"")]
    InvalidSymbol { symbol: char, position: usize },

    /// The code has no symbols
    #[error("timehash is empty")]
    EmptyCode,

    /// Precision outside `0..=MAX_PRECISION` passed to an encoder
    #[error("invalid precision {precision}, must be 0 (default) to {}", MAX_PRECISION)]
    InvalidPrecision { precision: i32 },

    /// `before` on the earliest code of its precision
    #[error("no window before {code:?}: it is the earliest at precision {}", .code.len())]
    BoundaryUnderflow { code: String },

    /// `after` on the latest code of its precision
    #[error("no window after {code:?}: it is the latest at precision {}", .code.len())]
    BoundaryOverflow { code: String },

    /// Timestamp is NaN or outside `[LOWER_BOUND, UPPER_BOUND)`
    #[error("timestamp {seconds} is outside the encodable domain [{}, {})", LOWER_BOUND, UPPER_BOUND)]
    OutOfDomain { seconds: f64 },

    /// Range query with `start > end`
    #[error("range start {start} is after range end {end}")]
    InvertedRange { start: f64, end: f64 },
}
