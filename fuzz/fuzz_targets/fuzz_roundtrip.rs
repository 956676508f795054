#![no_main]

use libfuzzer_sys::fuzz_target;
use timehash::{decode_exactly, encode, UPPER_BOUND};

fuzz_target!(|data: &[u8]| {
    // 8 bytes of instant + 1 byte of precision
    if data.len() < 9 {
        return;
    }
    let raw = u64::from_le_bytes(data[..8].try_into().unwrap());
    let t = (raw as f64 / u64::MAX as f64) * UPPER_BOUND;
    let precision = i32::from(data[8] % 20) + 1;

    let Ok(code) = encode(t, precision) else {
        // Only the very top of the scaled range can round up to UPPER_BOUND
        assert!(t >= UPPER_BOUND);
        return;
    };

    // Property 1: length equals precision
    assert_eq!(code.len(), precision as usize);

    // Property 2: decoded center is within the margin, plus float slack
    let (center, margin) = decode_exactly(&code).unwrap();
    let slack = t.max(1.0) * f64::EPSILON * 4.0;
    assert!(
        (center - t).abs() <= margin + slack,
        "t={t} code={code} center={center} margin={margin}"
    );
});
