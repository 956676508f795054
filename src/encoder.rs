//! Timestamp to timehash encoding.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::constants::{
    ALPHABET, DEFAULT_PRECISION, LOWER_BOUND, MASKS, MAX_PRECISION, UPPER_BOUND,
};
use crate::error::{Result, TimeHashError};

/// What to do with timestamps outside `[LOWER_BOUND, UPPER_BOUND)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainPolicy {
    /// Fail with `OutOfDomain`
    #[default]
    Reject,
    /// Saturate to the earliest or latest code. NaN is still rejected.
    Clamp,
}

/// Encoder configuration: target precision and out-of-domain policy.
///
/// The zero value of `precision` means [`DEFAULT_PRECISION`]. Derives serde so it
/// can live inside a larger configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Encoder {
    precision: i32,
    policy: DomainPolicy,
}

impl Encoder {
    /// Encoder at the default precision that rejects out-of-domain input
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            precision: 0,
            policy: DomainPolicy::Reject,
        }
    }

    /// Set the number of symbols per code (`0` = default)
    #[inline]
    #[must_use]
    pub const fn precision(mut self, precision: i32) -> Self {
        self.precision = precision;
        self
    }

    #[inline]
    #[must_use]
    pub const fn policy(mut self, policy: DomainPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Shorthand for `policy(DomainPolicy::Clamp)`
    #[inline]
    #[must_use]
    pub const fn clamp(self) -> Self {
        self.policy(DomainPolicy::Clamp)
    }

    /// Encode epoch seconds with this configuration
    ///
    /// # Errors
    /// - `InvalidPrecision` if the configured precision is negative or above `MAX_PRECISION`
    /// - `OutOfDomain` if `seconds` is NaN, or outside the domain under `Reject`
    pub fn encode(&self, seconds: f64) -> Result<String> {
        encode_with(seconds, self.precision, self.policy)
    }

    /// Encode a date-time with this configuration
    ///
    /// # Errors
    /// Same as [`Encoder::encode`].
    pub fn encode_date<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> Result<String> {
        self.encode(epoch_seconds(instant))
    }
}

/// Encode epoch seconds into a timehash of `precision` symbols.
///
/// `precision == 0` selects [`DEFAULT_PRECISION`].
///
/// # Errors
/// - `InvalidPrecision` if `precision < 0` or `precision > MAX_PRECISION`
/// - `OutOfDomain` if `seconds` is NaN or outside `[LOWER_BOUND, UPPER_BOUND)`
///
/// # Example
/// ```
/// assert_eq!(timehash::encode(0.0, 10).unwrap(), "0000000000");
/// assert_eq!(timehash::encode(1_464_332_157.2, 7).unwrap(), "af1cef0");
/// ```
pub fn encode(seconds: f64, precision: i32) -> Result<String> {
    encode_with(seconds, precision, DomainPolicy::Reject)
}

/// Encode with an explicit out-of-domain policy
///
/// # Errors
/// See [`encode`]. Under [`DomainPolicy::Clamp`] only NaN is out of domain.
pub fn encode_with(seconds: f64, precision: i32, policy: DomainPolicy) -> Result<String> {
    let precision = resolve_precision(precision)?;
    check_domain(seconds, policy)?;
    Ok(encode_unchecked(seconds, precision))
}

/// Encode a date-time at the default precision.
///
/// Sub-second precision of the instant is kept.
///
/// # Errors
/// `OutOfDomain` for instants before 1970 or from 2098 on.
pub fn encode_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> Result<String> {
    Encoder::new().encode_date(instant)
}

/// Map a caller-supplied precision onto a symbol count
pub(crate) fn resolve_precision(precision: i32) -> Result<usize> {
    match precision {
        0 => Ok(DEFAULT_PRECISION),
        p if p < 0 || p as usize > MAX_PRECISION => {
            Err(TimeHashError::InvalidPrecision { precision })
        }
        p => Ok(p as usize),
    }
}

fn check_domain(seconds: f64, policy: DomainPolicy) -> Result<()> {
    if seconds.is_nan() {
        return Err(TimeHashError::OutOfDomain { seconds });
    }
    match policy {
        DomainPolicy::Clamp => Ok(()),
        DomainPolicy::Reject if (LOWER_BOUND..UPPER_BOUND).contains(&seconds) => Ok(()),
        DomainPolicy::Reject => Err(TimeHashError::OutOfDomain { seconds }),
    }
}

/// Interval halving, three bits per symbol, most significant bit first.
///
/// Out-of-range input saturates toward the nearer boundary.
pub(crate) fn encode_unchecked(seconds: f64, precision: usize) -> String {
    let mut lower = LOWER_BOUND;
    let mut upper = UPPER_BOUND;
    let mut code = String::with_capacity(precision);

    for _ in 0..precision {
        let mut ordinal = 0u8;
        for mask in MASKS {
            let mid = (lower + upper) / 2.0;
            if seconds > mid {
                ordinal |= mask;
                lower = mid;
            } else {
                upper = mid;
            }
        }
        code.push(ALPHABET[ordinal as usize] as char);
    }
    code
}

/// Epoch seconds of a date-time, including the fractional part
pub(crate) fn epoch_seconds<Tz: TimeZone>(instant: &DateTime<Tz>) -> f64 {
    instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) / 1e9
}
