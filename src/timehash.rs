//! `TimeHash` value type: a validated code together with its decoded window.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::LOWER_BOUND;
use crate::decoder::{decode_symbols, to_datetime};
use crate::encoder::{encode_with, epoch_seconds, DomainPolicy};
use crate::error::{Result, TimeHashError};
use crate::neighbors;
use crate::symbol;

/// A decoded timehash.
///
/// Equality and hashing use the code. Ordering is by window center, ties
/// broken by code, so codes of one precision sort in time order and a coarse
/// code sorts among the finer codes around its midpoint.
///
/// Serializes as the bare code string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeHash {
    code: String,
    center: f64,
    error: f64,
}

impl TimeHash {
    /// Validate and decode `code`
    ///
    /// # Errors
    /// `EmptyCode` or `InvalidSymbol` if `code` is malformed.
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        let symbols = symbol::parse(&code)?;
        let (center, error) = decode_symbols(&symbols);
        Ok(Self { code, center, error })
    }

    /// Encode epoch seconds at `precision` (`0` = default)
    ///
    /// # Errors
    /// Same as [`crate::encode`].
    pub fn from_seconds(seconds: f64, precision: i32) -> Result<Self> {
        Self::new(encode_with(seconds, precision, DomainPolicy::Reject)?)
    }

    /// Encode a date-time at `precision` (`0` = default)
    ///
    /// # Errors
    /// Same as [`crate::encode`].
    pub fn from_datetime<Tz: TimeZone>(instant: &DateTime<Tz>, precision: i32) -> Result<Self> {
        Self::from_seconds(epoch_seconds(instant), precision)
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Center of the window in epoch seconds
    #[must_use]
    pub fn center(&self) -> f64 {
        self.center
    }

    /// Half the window width in seconds
    #[must_use]
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Start of the window, exclusive except for the first window
    #[must_use]
    pub fn start(&self) -> f64 {
        self.center - self.error
    }

    /// Inclusive end of the window
    #[must_use]
    pub fn end(&self) -> f64 {
        self.center + self.error
    }

    /// Number of symbols
    #[must_use]
    pub fn precision(&self) -> usize {
        self.code.len()
    }

    /// Whether `seconds` encodes into this window at this precision.
    ///
    /// Windows are `(start, end]`: an instant on a boundary belongs to the
    /// earlier window. The first window also holds `LOWER_BOUND` itself.
    #[must_use]
    pub fn contains(&self, seconds: f64) -> bool {
        let (start, end) = (self.start(), self.end());
        (start < seconds && seconds <= end) || (seconds == LOWER_BOUND && start == LOWER_BOUND)
    }

    /// Center of the window as a UTC date-time
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        to_datetime(self.center)
    }

    /// The preceding window
    ///
    /// # Errors
    /// `BoundaryUnderflow` if this is the earliest code of its precision.
    pub fn before(&self) -> Result<Self> {
        Self::new(neighbors::before(&self.code)?)
    }

    /// The following window
    ///
    /// # Errors
    /// `BoundaryOverflow` if this is the latest code of its precision.
    pub fn after(&self) -> Result<Self> {
        Self::new(neighbors::after(&self.code)?)
    }

    /// The window `n` steps away (negative = earlier)
    ///
    /// # Errors
    /// `BoundaryUnderflow` / `BoundaryOverflow` past either end.
    pub fn shift(&self, n: i64) -> Result<Self> {
        Self::new(neighbors::shift(&self.code, n)?)
    }
}

impl fmt::Display for TimeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl FromStr for TimeHash {
    type Err = TimeHashError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for TimeHash {
    type Error = TimeHashError;

    fn try_from(code: String) -> Result<Self> {
        Self::new(code)
    }
}

impl From<TimeHash> for String {
    fn from(hash: TimeHash) -> Self {
        hash.code
    }
}

impl AsRef<str> for TimeHash {
    fn as_ref(&self) -> &str {
        &self.code
    }
}

impl PartialEq for TimeHash {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for TimeHash {}

impl Hash for TimeHash {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl PartialOrd for TimeHash {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeHash {
    fn cmp(&self, other: &Self) -> Ordering {
        self.center
            .total_cmp(&other.center)
            .then_with(|| self.code.cmp(&other.code))
    }
}
