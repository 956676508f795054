//! Alphabet, domain bounds and precomputed lookup tables.

/// The eight timehash symbols in ordinal order.
///
/// Symbol `i` encodes the 3-bit value `i`. The order is part of the wire format
/// and must not change.
pub const ALPHABET: [u8; 8] = *b"01abcdef";

/// Start of the encodable domain: 1970-01-01T00:00:00Z in epoch seconds.
pub const LOWER_BOUND: f64 = 0.0;

/// End (exclusive) of the encodable domain: 2098-01-01T00:00:00Z in epoch seconds.
pub const UPPER_BOUND: f64 = 4_039_372_800.0;

/// Width of the encodable domain in seconds (128 years).
pub const SPAN: f64 = UPPER_BOUND - LOWER_BOUND;

/// Precision used when the caller passes `0`.
pub const DEFAULT_PRECISION: usize = 10;

/// Longest code an encoder will produce.
///
/// Past about 18 symbols the window near present-day timestamps is narrower
/// than one f64 ulp, so further symbols only repeat the saturated tail.
pub const MAX_PRECISION: usize = 32;

/// Every symbol carries three bits of the interval position.
pub(crate) const BITS_PER_SYMBOL: usize = 3;

/// Bit masks of a symbol ordinal, most significant first
pub(crate) const MASKS: [u8; BITS_PER_SYMBOL] = [4, 2, 1];

/// Marker for bytes outside the alphabet in [`DECODE`]
pub(crate) const INVALID: u8 = 0xFF;

// Reverse lookup: ASCII byte -> ordinal, INVALID for everything else
pub(crate) const DECODE: [u8; 128] = build_decode_table();

const fn build_decode_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Ordinal of an ASCII byte, or `None` if it is not a timehash symbol
#[inline]
pub(crate) fn ordinal_of(byte: u8) -> Option<u8> {
    match DECODE.get(byte as usize) {
        Some(&ord) if ord != INVALID => Some(ord),
        _ => None,
    }
}

/// Margin of error (half the window width) for codes of `precision` symbols.
///
/// `SPAN / 8^precision / 2`, computed by exact power-of-two scaling.
#[must_use]
pub fn margin_for(precision: usize) -> f64 {
    let bits = precision.saturating_mul(BITS_PER_SYMBOL).saturating_add(1);
    let exponent = i32::try_from(bits).unwrap_or(i32::MAX);
    SPAN * 2f64.powi(-exponent)
}

/// Width of the window denoted by a code of `precision` symbols
#[inline]
pub(crate) fn window_for(precision: usize) -> f64 {
    margin_for(precision) * 2.0
}
