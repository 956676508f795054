//! Navigation to adjacent windows at the same precision.
//!
//! A code is treated as a fixed-width base-8 numeral whose digits are the symbol
//! ordinals. Moving one window is a decrement or increment with borrow/carry
//! running from the rightmost symbol; the width never changes, so running off
//! either end is an error rather than a change of precision.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimeHashError};
use crate::symbol::{self, Symbol};

/// The windows on either side of a code, excluding the code itself
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Neighbors {
    pub before: String,
    pub after: String,
}

/// The windows on either side of a code, including the code itself
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Neighborhood {
    pub before: String,
    pub center: String,
    pub after: String,
}

impl Neighborhood {
    /// The three codes in time order
    #[must_use]
    pub fn to_array(&self) -> [&str; 3] {
        [&self.before, &self.center, &self.after]
    }
}

/// The code of the window directly preceding `code`.
///
/// # Errors
/// - `EmptyCode` / `InvalidSymbol` if `code` is malformed
/// - `BoundaryUnderflow` if every symbol is already `0`
///
/// # Example
/// ```
/// assert_eq!(timehash::before("af1cef0").unwrap(), "af1ceef");
/// ```
pub fn before(code: &str) -> Result<String> {
    let mut symbols = symbol::parse(code)?;
    if step_back(&mut symbols) {
        Ok(symbol::render(&symbols))
    } else {
        Err(TimeHashError::BoundaryUnderflow { code: code.to_owned() })
    }
}

/// The code of the window directly following `code`.
///
/// # Errors
/// - `EmptyCode` / `InvalidSymbol` if `code` is malformed
/// - `BoundaryOverflow` if every symbol is already `f`
///
/// # Example
/// ```
/// assert_eq!(timehash::after("af1cef0").unwrap(), "af1cef1");
/// ```
pub fn after(code: &str) -> Result<String> {
    let mut symbols = symbol::parse(code)?;
    if step_forward(&mut symbols) {
        Ok(symbol::render(&symbols))
    } else {
        Err(TimeHashError::BoundaryOverflow { code: code.to_owned() })
    }
}

/// Preceding and following windows of `code`
///
/// # Errors
/// Any error of [`before`] or [`after`].
pub fn neighbors(code: &str) -> Result<Neighbors> {
    Ok(Neighbors {
        before: before(code)?,
        after: after(code)?,
    })
}

/// Preceding window, `code` itself, and following window
///
/// # Errors
/// Any error of [`before`] or [`after`].
pub fn expand(code: &str) -> Result<Neighborhood> {
    let Neighbors { before, after } = neighbors(code)?;
    Ok(Neighborhood {
        before,
        center: code.to_owned(),
        after,
    })
}

/// Move `n` windows from `code` at the same precision; negative `n` moves earlier.
///
/// `shift(code, 1)` equals `after(code)` and `shift(code, -1)` equals `before(code)`.
///
/// # Errors
/// - `EmptyCode` / `InvalidSymbol` if `code` is malformed
/// - `BoundaryUnderflow` / `BoundaryOverflow` if the target falls outside the
///   codes of this precision
pub fn shift(code: &str, n: i64) -> Result<String> {
    let mut symbols = symbol::parse(code)?;
    let steps = n.unsigned_abs();
    if n >= 0 {
        if !add(&mut symbols, steps) {
            return Err(TimeHashError::BoundaryOverflow { code: code.to_owned() });
        }
    } else if !sub(&mut symbols, steps) {
        return Err(TimeHashError::BoundaryUnderflow { code: code.to_owned() });
    }
    Ok(symbol::render(&symbols))
}

/// Decrement in place. Returns `false`, leaving `symbols` untouched, on underflow.
pub(crate) fn step_back(symbols: &mut [Symbol]) -> bool {
    let Some(pivot) = symbols.iter().rposition(|&s| s != Symbol::MIN) else {
        return false;
    };
    symbols[pivot] = symbols[pivot].pred();
    symbols[pivot + 1..].fill(Symbol::MAX);
    true
}

/// Increment in place. Returns `false`, leaving `symbols` untouched, on overflow.
pub(crate) fn step_forward(symbols: &mut [Symbol]) -> bool {
    let Some(pivot) = symbols.iter().rposition(|&s| s != Symbol::MAX) else {
        return false;
    };
    symbols[pivot] = symbols[pivot].succ();
    symbols[pivot + 1..].fill(Symbol::MIN);
    true
}

// Base-8 addition of `n`; false on carry out of the leftmost symbol
fn add(symbols: &mut [Symbol], mut n: u64) -> bool {
    let mut carry = 0u64;
    for s in symbols.iter_mut().rev() {
        if n == 0 && carry == 0 {
            return true;
        }
        let sum = u64::from(s.ordinal()) + (n & 7) + carry;
        *s = Symbol::wrapping(sum as u8);
        carry = sum >> 3;
        n >>= 3;
    }
    n == 0 && carry == 0
}

// Base-8 subtraction of `n`; false on borrow out of the leftmost symbol
fn sub(symbols: &mut [Symbol], mut n: u64) -> bool {
    let mut borrow = 0u64;
    for s in symbols.iter_mut().rev() {
        if n == 0 && borrow == 0 {
            return true;
        }
        let digit = (n & 7) + borrow;
        let ordinal = u64::from(s.ordinal());
        if ordinal >= digit {
            *s = Symbol::wrapping((ordinal - digit) as u8);
            borrow = 0;
        } else {
            *s = Symbol::wrapping((ordinal + 8 - digit) as u8);
            borrow = 1;
        }
        n >>= 3;
    }
    n == 0 && borrow == 0
}
