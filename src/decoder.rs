//! Timehash to timestamp decoding.

use chrono::{DateTime, Utc};

use crate::constants::{LOWER_BOUND, MASKS, SPAN, UPPER_BOUND};
use crate::error::Result;
use crate::symbol::{self, Symbol};

/// Decode a code to the center of its window and the margin of error.
///
/// The margin is half the window width, so the original instant lies within
/// `center ± margin`.
///
/// # Errors
/// - `EmptyCode` if `code` is empty
/// - `InvalidSymbol` if any character is outside the alphabet
///
/// # Example
/// ```
/// let (center, margin) = timehash::decode_exactly("af1cef0").unwrap();
/// assert!((center - 1_464_332_157.202).abs() < 0.001);
/// assert!((margin - 963.061_523_437_5).abs() < 1e-9);
/// ```
pub fn decode_exactly(code: &str) -> Result<(f64, f64)> {
    let symbols = symbol::parse(code)?;
    Ok(decode_symbols(&symbols))
}

/// Decode a code to the center of its window, dropping the margin
///
/// # Errors
/// Same as [`decode_exactly`].
pub fn decode(code: &str) -> Result<f64> {
    decode_exactly(code).map(|(center, _)| center)
}

/// The window a code denotes, as `(start, end)` in epoch seconds.
///
/// Instants in `(start, end]` encode to this code; `start` itself belongs to
/// the previous window, except `LOWER_BOUND`, which belongs to the first.
///
/// # Errors
/// Same as [`decode_exactly`].
pub fn bounds(code: &str) -> Result<(f64, f64)> {
    let (center, margin) = decode_exactly(code)?;
    Ok((center - margin, center + margin))
}

/// Convert epoch seconds to a UTC date-time, `None` if not representable
#[must_use]
pub fn to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

pub(crate) fn decode_symbols(symbols: &[Symbol]) -> (f64, f64) {
    let mut lower = LOWER_BOUND;
    let mut upper = UPPER_BOUND;
    let mut margin = SPAN / 2.0;

    for symbol in symbols {
        let ordinal = symbol.ordinal();
        for mask in MASKS {
            margin /= 2.0;
            let mid = (lower + upper) / 2.0;
            if ordinal & mask != 0 {
                lower = mid;
            } else {
                upper = mid;
            }
        }
    }

    ((lower + upper) / 2.0, margin)
}
