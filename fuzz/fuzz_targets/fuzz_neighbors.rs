#![no_main]

use libfuzzer_sys::fuzz_target;
use timehash::{after, before, shift, TimeHashError, ALPHABET};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > 32 {
        return;
    }
    let code: String = data.iter().map(|b| ALPHABET[(b & 7) as usize] as char).collect();

    // Property 1: after(before(c)) == c unless c is the first code
    match before(&code) {
        Ok(prev) => {
            assert_eq!(prev.len(), code.len());
            assert_eq!(after(&prev).unwrap(), code);
            assert_eq!(shift(&code, -1).unwrap(), prev);
        }
        Err(TimeHashError::BoundaryUnderflow { .. }) => assert!(code.bytes().all(|b| b == b'0')),
        Err(e) => panic!("unexpected error {e}"),
    }

    // Property 2: before(after(c)) == c unless c is the last code
    match after(&code) {
        Ok(next) => {
            assert_eq!(next.len(), code.len());
            assert_eq!(before(&next).unwrap(), code);
            assert_eq!(shift(&code, 1).unwrap(), next);
        }
        Err(TimeHashError::BoundaryOverflow { .. }) => assert!(code.bytes().all(|b| b == b'f')),
        Err(e) => panic!("unexpected error {e}"),
    }
});
