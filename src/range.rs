//! Range queries: every code of one precision covering a span of time.

use std::iter::FusedIterator;

use crate::constants::{LOWER_BOUND, UPPER_BOUND};
use crate::encoder::{encode_unchecked, resolve_precision};
use crate::error::{Result, TimeHashError};
use crate::neighbors::{step_back, step_forward};
use crate::symbol::{self, Symbol};

/// Iterator over consecutive codes of one precision, earliest first.
///
/// Created by [`range`].
#[derive(Debug, Clone)]
pub struct Range {
    next: Option<Vec<Symbol>>,
    last: Vec<Symbol>,
    remaining: Option<u64>,
}

/// Codes at `precision` whose windows cover `[start, end]`.
///
/// # Errors
/// - `InvalidPrecision` if `precision < 0` or `precision > MAX_PRECISION`
/// - `OutOfDomain` if either end is NaN or outside the domain
/// - `InvertedRange` if `start > end`
///
/// # Example
/// ```
/// let day = 86_400.0;
/// let codes: Vec<String> = timehash::range(1_700_000_000.0, 1_700_000_000.0 + day, 5)
///     .unwrap()
///     .collect();
/// assert!(!codes.is_empty() && codes.len() <= 3);
/// ```
pub fn range(start: f64, end: f64, precision: i32) -> Result<Range> {
    let precision = resolve_precision(precision)?;
    for seconds in [start, end] {
        if !(LOWER_BOUND..UPPER_BOUND).contains(&seconds) {
            return Err(TimeHashError::OutOfDomain { seconds });
        }
    }
    if start > end {
        return Err(TimeHashError::InvertedRange { start, end });
    }

    // encode_unchecked only emits alphabet symbols
    let first = symbol::parse(&encode_unchecked(start, precision))?;
    let last = symbol::parse(&encode_unchecked(end, precision))?;
    let remaining = distance(&first, &last).and_then(|d| d.checked_add(1));

    Ok(Range {
        next: Some(first),
        last,
        remaining,
    })
}

impl Range {
    /// Widen the range by one window on each side, where such a window exists.
    ///
    /// Intended to be called before iterating; codes already yielded are not
    /// revisited.
    #[must_use]
    pub fn padded(mut self) -> Self {
        if let Some(next) = self.next.as_mut() {
            if step_back(next) {
                self.remaining = self.remaining.and_then(|r| r.checked_add(1));
            }
            if step_forward(&mut self.last) {
                self.remaining = self.remaining.and_then(|r| r.checked_add(1));
            }
        }
        self
    }
}

impl Iterator for Range {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let mut current = self.next.take()?;
        let code = symbol::render(&current);
        if current != self.last && step_forward(&mut current) {
            self.next = Some(current);
        }
        self.remaining = self.remaining.map(|r| r.saturating_sub(1));
        Some(code)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.next.is_none() {
            return (0, Some(0));
        }
        match self.remaining.and_then(|r| usize::try_from(r).ok()) {
            Some(n) => (n, Some(n)),
            None => (0, None),
        }
    }
}

impl FusedIterator for Range {}

// Steps from `from` to `to` (same width), None if `to < from` or the count overflows u64.
// Subtracts digit by digit so long codes with a shared prefix still fit.
fn distance(from: &[Symbol], to: &[Symbol]) -> Option<u64> {
    let mut digits = vec![0u8; to.len()];
    let mut borrow = 0u8;
    for (i, (f, t)) in from.iter().zip(to).enumerate().rev() {
        let subtrahend = f.ordinal() + borrow;
        if t.ordinal() >= subtrahend {
            digits[i] = t.ordinal() - subtrahend;
            borrow = 0;
        } else {
            digits[i] = t.ordinal() + 8 - subtrahend;
            borrow = 1;
        }
    }
    if borrow != 0 {
        return None;
    }
    digits
        .iter()
        .try_fold(0u64, |acc, &d| acc.checked_mul(8)?.checked_add(u64::from(d)))
}
