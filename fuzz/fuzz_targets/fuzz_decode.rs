#![no_main]

use libfuzzer_sys::fuzz_target;
use timehash::{decode_exactly, validate, TimeHashError, LOWER_BOUND, UPPER_BOUND};

fuzz_target!(|data: &[u8]| {
    let Ok(code) = std::str::from_utf8(data) else {
        return;
    };

    // Property 1: decoding never panics and agrees with validate()
    match decode_exactly(code) {
        Ok((center, margin)) => {
            assert!(validate(code), "decoded an invalid code {code:?}");
            // Property 2: the window lies inside the domain (exact up to 11 symbols)
            if code.len() <= 11 {
                assert!(center - margin >= LOWER_BOUND);
                assert!(center + margin <= UPPER_BOUND);
            }
        }
        Err(TimeHashError::EmptyCode) => assert!(code.is_empty()),
        Err(TimeHashError::InvalidSymbol { symbol, position }) => {
            assert!(!validate(code));
            assert_eq!(code.chars().nth(position), Some(symbol));
        }
        Err(e) => panic!("unexpected decode error {e}"),
    }
});
