//! The eight-symbol alphabet as a typed digit.

use std::fmt;

use crate::constants::{ordinal_of, ALPHABET};
use crate::error::{Result, TimeHashError};

/// A single timehash symbol, stored as its 0..=7 ordinal.
///
/// Ordering follows the ordinal, which is also the numeric order of the
/// 3-bit value the symbol carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u8);

impl Symbol {
    /// The symbol `0` (ordinal 0)
    pub const MIN: Self = Self(0);
    /// The symbol `f` (ordinal 7)
    pub const MAX: Self = Self(7);

    /// Symbol for an ordinal, `None` unless `ordinal < 8`
    #[inline]
    #[must_use]
    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        if ordinal < 8 {
            Some(Self(ordinal))
        } else {
            None
        }
    }

    /// Symbol for a character, `None` if it is not in the alphabet
    #[inline]
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        u8::try_from(c).ok().and_then(ordinal_of).map(Self)
    }

    /// Symbol for the low three bits of `value`
    #[inline]
    pub(crate) const fn wrapping(value: u8) -> Self {
        Self(value & 7)
    }

    /// The 3-bit value this symbol carries
    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self.0
    }

    /// The alphabet character for this symbol
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        ALPHABET[self.0 as usize] as char
    }

    /// Wrapping predecessor: `0` wraps to `f`
    #[inline]
    #[must_use]
    pub const fn pred(self) -> Self {
        Self((self.0 + 7) & 7)
    }

    /// Wrapping successor: `f` wraps to `0`
    #[inline]
    #[must_use]
    pub const fn succ(self) -> Self {
        Self((self.0 + 1) & 7)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Parse a code into symbols, most significant first.
///
/// # Errors
/// - `EmptyCode` if `code` is empty
/// - `InvalidSymbol` for the first character outside the alphabet
pub fn parse(code: &str) -> Result<Vec<Symbol>> {
    if code.is_empty() {
        return Err(TimeHashError::EmptyCode);
    }
    code.chars()
        .enumerate()
        .map(|(position, symbol)| {
            Symbol::from_char(symbol).ok_or(TimeHashError::InvalidSymbol { symbol, position })
        })
        .collect()
}

/// Whether `code` is a well-formed, non-empty timehash
#[must_use]
pub fn validate(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| ordinal_of(b).is_some())
}

/// Render symbols back into a code string
#[must_use]
pub fn render(symbols: &[Symbol]) -> String {
    symbols.iter().map(|s| s.to_char()).collect()
}
