//! `timehash` - Variable precision hashes of points in time
//!
//! A timehash encodes an instant as a short string over the alphabet `01abcdef`.
//! It is a one-dimensional geohash: every symbol narrows the window by a factor
//! of 8, so a code's length is its precision and a shared prefix means shared
//! time. Codes of one precision sort in time order.
//!
//! # Features
//! - **Encode**: epoch seconds or `chrono::DateTime` to a code of any precision
//! - **Decode**: code to window center plus exact margin of error
//! - **Navigate**: preceding / following window, `n` windows away
//! - **Range queries**: every code covering a span, optionally padded by one
//!   window on each side
//!
//! # Example
//! ```
//! use timehash::{after, before, decode_exactly, encode};
//!
//! let code = encode(1_464_332_157.202_148, 7).unwrap();
//! assert_eq!(code, "af1cef0");
//!
//! let (center, margin) = decode_exactly(&code).unwrap();
//! assert!((center - 1_464_332_157.202_148).abs() <= margin);
//!
//! assert_eq!(before(&code).unwrap(), "af1ceef");
//! assert_eq!(after(&code).unwrap(), "af1cef1");
//! ```
//!
//! # Format
//!
//! ## Domain
//!
//! All instants are mapped onto `[0, 4_039_372_800)` epoch seconds, i.e.
//! 1970-01-01 to 2098-01-01 UTC. Encoding an instant outside the domain fails
//! with `OutOfDomain` unless [`DomainPolicy::Clamp`] is selected, in which case
//! it saturates to the earliest or latest code.
//!
//! ## Symbols
//!
//! | Symbol | `0` | `1` | `a` | `b` | `c` | `d` | `e` | `f` |
//! |--------|-----|-----|-----|-----|-----|-----|-----|-----|
//! | Bits   | 000 | 001 | 010 | 011 | 100 | 101 | 110 | 111 |
//!
//! Each bit halves the current interval; `1` keeps the upper half. Bits are read
//! most significant first.
//!
//! ## Precision
//!
//! | Symbols | Margin of error (±) |
//! |---------|---------------------|
//! | 1 | 8 years |
//! | 2 | 1 year |
//! | 3 | 45.66 days |
//! | 4 | 5.71 days |
//! | 5 | 17.12 hours |
//! | 6 | 2.14 hours |
//! | 7 | 16.05 minutes |
//! | 8 | 2.01 minutes |
//! | 9 | 15.05 seconds |
//! | 10 | 1.88 seconds |
//!
//! ## Boundaries
//!
//! The neighbours of a code have the same precision. `before` of an all-`0`
//! code and `after` of an all-`f` code fail with `BoundaryUnderflow` and
//! `BoundaryOverflow`.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

mod constants;
mod decoder;
mod encoder;
mod error;
mod neighbors;
mod range;
mod symbol;
mod timehash;

#[cfg(test)]
mod tests;

// Re-export public API
pub use constants::{
    margin_for, ALPHABET, DEFAULT_PRECISION, LOWER_BOUND, MAX_PRECISION, SPAN, UPPER_BOUND,
};
pub use decoder::{bounds, decode, decode_exactly, to_datetime};
pub use encoder::{encode, encode_date, encode_with, DomainPolicy, Encoder};
pub use error::{Result, TimeHashError};
pub use neighbors::{after, before, expand, neighbors, shift, Neighborhood, Neighbors};
pub use range::{range, Range};
pub use symbol::{parse, render, validate, Symbol};
pub use timehash::TimeHash;
