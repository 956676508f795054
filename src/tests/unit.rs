use chrono::{DateTime, TimeZone, Utc};

use crate::constants::{ordinal_of, window_for};
use crate::{
    after, before, bounds, decode, decode_exactly, encode, encode_date, encode_with, expand,
    margin_for, neighbors, range, shift, to_datetime, validate, DomainPolicy, Encoder, Neighbors,
    Symbol, TimeHash, TimeHashError, LOWER_BOUND, MAX_PRECISION, SPAN, UPPER_BOUND,
};

/// 2016-05-27T01:55:57.202148, recorded at UTC-05:00
const WORKED_EXAMPLE: &str = "2016-05-27T01:55:57.202148-05:00";

fn worked_example_seconds() -> f64 {
    let dt = DateTime::parse_from_rfc3339(WORKED_EXAMPLE).unwrap();
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9
}

// ----------------------------------------------------------------------------
// Alphabet
// ----------------------------------------------------------------------------

#[test]
fn test_alphabet_ordinals() {
    for (i, c) in "01abcdef".chars().enumerate() {
        let symbol = Symbol::from_char(c).unwrap();
        assert_eq!(symbol.ordinal() as usize, i, "ordinal of {c}");
        assert_eq!(symbol.to_char(), c);
        assert_eq!(Symbol::from_ordinal(i as u8), Some(symbol));
    }
    assert_eq!(Symbol::from_ordinal(8), None);
    for c in ['g', 'A', 'F', '2', ' ', 'é'] {
        assert_eq!(Symbol::from_char(c), None, "{c:?} must not be a symbol");
    }
}

#[test]
fn test_decode_table_covers_exactly_the_alphabet() {
    let valid: Vec<u8> = (0..=u8::MAX).filter(|&b| ordinal_of(b).is_some()).collect();
    assert_eq!(valid, b"01abcdef".to_vec());
}

#[test]
fn test_pred_succ_wraparound() {
    assert_eq!(Symbol::MIN.pred(), Symbol::MAX);
    assert_eq!(Symbol::MAX.succ(), Symbol::MIN);

    let before: String = "01abcdef"
        .chars()
        .map(|c| Symbol::from_char(c).unwrap().pred().to_char())
        .collect();
    let after: String = "01abcdef"
        .chars()
        .map(|c| Symbol::from_char(c).unwrap().succ().to_char())
        .collect();
    assert_eq!(before, "f01abcde");
    assert_eq!(after, "1abcdef0");
}

#[test]
fn test_validate() {
    assert!(validate("af1cef0"));
    assert!(validate("0"));
    assert!(!validate(""));
    assert!(!validate("AF1CEF0"));
    assert!(!validate("0g"));
    assert!(!validate("ab é"));
}

// ----------------------------------------------------------------------------
// Encoding
// ----------------------------------------------------------------------------

#[test]
fn test_encode_lower_bound() {
    assert_eq!(encode(0.0, 10).unwrap(), "0000000000");
}

#[test]
fn test_encode_default_precision() {
    let code = encode(1_700_000_000.0, 0).unwrap();
    assert_eq!(code.len(), 10);
    assert_eq!(code, encode(1_700_000_000.0, 10).unwrap());
}

#[test]
fn test_encode_worked_example() {
    assert_eq!(encode(worked_example_seconds(), 7).unwrap(), "af1cef0");
}

#[test]
fn test_encode_known_dates() {
    let y2k = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    let y2024 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(encode_date(&y2k).unwrap(), "1efffd1ccc");
    assert_eq!(encode_date(&y2024).unwrap(), "bafffd1ccc");
    assert_eq!(encode(1_700_000_000.0, 5).unwrap(), "bafbe");
}

#[test]
fn test_encode_date_keeps_subseconds() {
    let whole = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let fractional = Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap();
    let enc = Encoder::new().precision(16);
    assert_eq!(enc.encode_date(&whole).unwrap(), encode(1_700_000_000.0, 16).unwrap());
    assert_eq!(enc.encode_date(&fractional).unwrap(), encode(1_700_000_000.5, 16).unwrap());
}

#[test]
fn test_window_boundary_belongs_to_lower_window() {
    // An instant exactly on a boundary is not greater than the midpoint
    assert_eq!(encode(SPAN / 8.0, 1).unwrap(), "0");
    assert_eq!(encode(SPAN / 8.0 + 1.0, 1).unwrap(), "1");
}

#[test]
fn test_encode_negative_precision() {
    assert_eq!(
        encode(1_700_000_000.0, -1),
        Err(TimeHashError::InvalidPrecision { precision: -1 })
    );
}

#[test]
fn test_encode_precision_cap() {
    let t = 1_700_000_000.0;
    assert_eq!(encode(t, 32).unwrap().len(), MAX_PRECISION);
    assert_eq!(
        encode(t, 33),
        Err(TimeHashError::InvalidPrecision { precision: 33 })
    );
    assert_eq!(
        encode(t, i32::MAX),
        Err(TimeHashError::InvalidPrecision { precision: i32::MAX })
    );
    assert!(Encoder::new().precision(33).encode(t).is_err());
    assert!(range(t, t, 33).is_err());
}

#[test]
fn test_encode_out_of_domain() {
    for seconds in [-1.0, UPPER_BOUND, UPPER_BOUND + 1.0, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(
            encode(seconds, 10),
            Err(TimeHashError::OutOfDomain { seconds }),
            "{seconds} should be rejected"
        );
    }
    assert!(matches!(encode(f64::NAN, 10), Err(TimeHashError::OutOfDomain { .. })));
}

#[test]
fn test_encode_clamp_saturates() {
    assert_eq!(encode_with(-100.0, 4, DomainPolicy::Clamp).unwrap(), "0000");
    assert_eq!(encode_with(1e12, 4, DomainPolicy::Clamp).unwrap(), "ffff");
    assert_eq!(encode_with(f64::INFINITY, 3, DomainPolicy::Clamp).unwrap(), "fff");
    assert_eq!(encode_with(UPPER_BOUND, 3, DomainPolicy::Clamp).unwrap(), "fff");
    assert!(matches!(
        encode_with(f64::NAN, 4, DomainPolicy::Clamp),
        Err(TimeHashError::OutOfDomain { .. })
    ));
}

#[test]
fn test_encoder_builder() {
    let enc = Encoder::new().precision(5);
    assert_eq!(enc.encode(1_700_000_000.0).unwrap(), "bafbe");
    assert!(enc.encode(-1.0).is_err());
    assert_eq!(enc.clamp().encode(-1.0).unwrap(), "00000");
    assert_eq!(Encoder::default(), Encoder::new());
}

#[test]
fn test_encoder_deserializes_from_config() {
    let enc: Encoder = serde_json::from_str(r#"{"precision": 12, "policy": "clamp"}"#).unwrap();
    assert_eq!(enc, Encoder::new().precision(12).clamp());

    let enc: Encoder = serde_json::from_str("{}").unwrap();
    assert_eq!(enc, Encoder::new());
}

// ----------------------------------------------------------------------------
// Decoding
// ----------------------------------------------------------------------------

#[test]
fn test_decode_exactly_worked_example() {
    let (center, margin) = decode_exactly("af1cef0").unwrap();
    let expected = worked_example_seconds();
    assert!(
        (center - expected).abs() <= margin,
        "center {center} is more than {margin}s from {expected}"
    );
    assert_eq!(margin, 963.061_523_437_5);
    assert_eq!(decode("af1cef0").unwrap(), center);
}

#[test]
fn test_margin_table() {
    for p in 1..=12 {
        let (_, margin) = decode_exactly(&"0".repeat(p)).unwrap();
        assert_eq!(margin, margin_for(p), "precision {p}");
        assert_eq!(margin, SPAN / 8f64.powi(p as i32) / 2.0, "precision {p}");
    }
    assert_eq!(margin_for(1), 252_460_800.0);
    assert_eq!(margin_for(10), 1.880_979_537_963_867_2);
    assert_eq!(window_for(3), 7_889_400.0);
}

#[test]
fn test_decode_rejects_invalid_symbols() {
    assert_eq!(
        decode_exactly("af1xef0"),
        Err(TimeHashError::InvalidSymbol { symbol: 'x', position: 3 })
    );
    assert_eq!(
        decode("AF"),
        Err(TimeHashError::InvalidSymbol { symbol: 'A', position: 0 })
    );
    assert_eq!(decode(""), Err(TimeHashError::EmptyCode));
}

#[test]
fn test_bounds() {
    assert_eq!(bounds("0").unwrap(), (0.0, SPAN / 8.0));
    assert_eq!(bounds("f").unwrap(), (SPAN * 7.0 / 8.0, SPAN));
    let (start, end) = bounds("af1cef0").unwrap();
    assert!(start < worked_example_seconds() && worked_example_seconds() < end);
}

#[test]
fn test_to_datetime() {
    assert_eq!(to_datetime(0.0), Some(Utc.timestamp_opt(0, 0).unwrap()));
    assert_eq!(
        to_datetime(1.5),
        Some(Utc.timestamp_opt(1, 500_000_000).unwrap())
    );
    assert_eq!(to_datetime(f64::NAN), None);
    assert_eq!(to_datetime(f64::INFINITY), None);
}

// ----------------------------------------------------------------------------
// Neighbours
// ----------------------------------------------------------------------------

#[test]
fn test_before_after_worked_example() {
    assert_eq!(before("af1cef0").unwrap(), "af1ceef");
    assert_eq!(after("af1cef0").unwrap(), "af1cef1");
}

#[test]
fn test_borrow_and_carry() {
    assert_eq!(before("a0000").unwrap(), "1ffff");
    assert_eq!(after("afff").unwrap(), "b000");
    assert_eq!(before("1").unwrap(), "0");
    assert_eq!(after("e").unwrap(), "f");
    assert_eq!(after("0fff").unwrap(), "1000");
}

#[test]
fn test_boundary_codes() {
    assert_eq!(
        before("0000000000"),
        Err(TimeHashError::BoundaryUnderflow { code: "0000000000".into() })
    );
    assert_eq!(
        after("ffffffffff"),
        Err(TimeHashError::BoundaryOverflow { code: "ffffffffff".into() })
    );
    // The opposite direction still works
    assert_eq!(after("0000000000").unwrap(), "0000000001");
    assert_eq!(before("ffffffffff").unwrap(), "fffffffffe");
}

#[test]
fn test_neighbors_reject_invalid_symbols() {
    assert_eq!(
        before("ab!"),
        Err(TimeHashError::InvalidSymbol { symbol: '!', position: 2 })
    );
    assert_eq!(after(""), Err(TimeHashError::EmptyCode));
}

#[test]
fn test_neighbors_and_expand() {
    assert_eq!(
        neighbors("bafbe").unwrap(),
        Neighbors {
            before: "bafbd".into(),
            after: "bafbf".into(),
        }
    );
    assert_eq!(expand("bafbe").unwrap().to_array(), ["bafbd", "bafbe", "bafbf"]);
    assert!(neighbors("00000").is_err());
    assert!(expand("fffff").is_err());
}

#[test]
fn test_neighbors_match_adjacent_encodings() {
    let now = 1_700_000_123.0;
    for precision in [8, 9, 10] {
        let window = window_for(precision);
        let code = encode(now, precision as i32).unwrap();
        assert_eq!(
            before(&code).unwrap(),
            encode(now - window, precision as i32).unwrap(),
            "before at precision {precision}"
        );
        assert_eq!(
            after(&code).unwrap(),
            encode(now + window, precision as i32).unwrap(),
            "after at precision {precision}"
        );
    }
}

#[test]
fn test_shift() {
    assert_eq!(shift("af1cef0", 1).unwrap(), after("af1cef0").unwrap());
    assert_eq!(shift("af1cef0", -1).unwrap(), before("af1cef0").unwrap());
    assert_eq!(shift("af1cef0", 0).unwrap(), "af1cef0");
    assert_eq!(shift("af1cef0", 2).unwrap(), "af1cefa");
    assert_eq!(shift("0000", 8).unwrap(), "0010");
    assert_eq!(shift("0010", -8).unwrap(), "0000");
    assert_eq!(shift("0000", 4095).unwrap(), "ffff");
}

#[test]
fn test_shift_past_boundaries() {
    assert_eq!(
        shift("0010", -9),
        Err(TimeHashError::BoundaryUnderflow { code: "0010".into() })
    );
    assert_eq!(
        shift("0000", 4096),
        Err(TimeHashError::BoundaryOverflow { code: "0000".into() })
    );
    assert_eq!(
        shift("ffff", 1),
        Err(TimeHashError::BoundaryOverflow { code: "ffff".into() })
    );
    assert!(matches!(
        shift("ffff", i64::MIN),
        Err(TimeHashError::BoundaryUnderflow { .. })
    ));
    assert!(matches!(
        shift("0000000000000000000000000", i64::MAX),
        Ok(code) if code.len() == 25
    ));
}

// ----------------------------------------------------------------------------
// Range queries
// ----------------------------------------------------------------------------

#[test]
fn test_range_single_window() {
    let t = 1_700_000_000.0;
    let codes: Vec<String> = range(t, t, 10).unwrap().collect();
    assert_eq!(codes, vec![encode(t, 10).unwrap()]);
}

#[test]
fn test_range_covers_day() {
    let start = 1_700_000_000.0;
    let r = range(start, start + 86_400.0, 5).unwrap();
    assert_eq!(r.size_hint(), (2, Some(2)));
    let codes: Vec<String> = r.collect();
    assert_eq!(codes, vec!["bafbe", "bafbf"]);
}

#[test]
fn test_range_padded() {
    let start = 1_700_000_000.0;
    let r = range(start, start + 86_400.0, 5).unwrap().padded();
    assert_eq!(r.size_hint(), (4, Some(4)));
    let codes: Vec<String> = r.collect();
    assert_eq!(codes, vec!["bafbd", "bafbe", "bafbf", "bafc0"]);
}

#[test]
fn test_range_padded_at_domain_start() {
    let codes: Vec<String> = range(0.0, 0.0, 3).unwrap().padded().collect();
    assert_eq!(codes, vec!["000", "001"]);
}

#[test]
fn test_range_errors() {
    assert_eq!(
        range(10.0, 5.0, 3).unwrap_err(),
        TimeHashError::InvertedRange { start: 10.0, end: 5.0 }
    );
    assert_eq!(
        range(-5.0, 5.0, 3).unwrap_err(),
        TimeHashError::OutOfDomain { seconds: -5.0 }
    );
    assert_eq!(
        range(0.0, 5.0, -3).unwrap_err(),
        TimeHashError::InvalidPrecision { precision: -3 }
    );
}

#[test]
fn test_range_size_hint_at_high_precision() {
    let t = 3_000_000_000.0;
    assert_eq!(range(t, t, 22).unwrap().size_hint(), (1, Some(1)));

    // Two ulps at this magnitude span thousands of 22-symbol windows
    let r = range(t, t + 1e-6, 22).unwrap();
    let (lower, upper) = r.size_hint();
    assert!(lower > 1);
    assert_eq!(upper, Some(lower));
    assert_eq!(r.count(), lower);
}

#[test]
fn test_range_size_hint_unknown_when_count_overflows() {
    let r = range(LOWER_BOUND, UPPER_BOUND - 1.0, 22).unwrap();
    assert_eq!(r.size_hint(), (0, None));
}

#[test]
fn test_range_is_fused() {
    let mut r = range(0.0, 0.0, 2).unwrap();
    assert_eq!(r.next().as_deref(), Some("00"));
    assert_eq!(r.next(), None);
    assert_eq!(r.next(), None);
    assert_eq!(r.size_hint(), (0, Some(0)));
}

// ----------------------------------------------------------------------------
// TimeHash value type
// ----------------------------------------------------------------------------

#[test]
fn test_timehash_accessors() {
    let th = TimeHash::new("af1cef0").unwrap();
    assert_eq!(th.code(), "af1cef0");
    assert_eq!(th.precision(), 7);
    assert_eq!(th.error(), 963.061_523_437_5);
    assert_eq!(th.start(), th.center() - th.error());
    assert_eq!(th.end(), th.center() + th.error());
    assert!(th.contains(worked_example_seconds()));
    assert_eq!(th.to_string(), "af1cef0");
}

#[test]
fn test_timehash_contains_agrees_with_encode() {
    let first = TimeHash::new("0").unwrap();
    let boundary = first.end();
    assert_eq!(boundary, SPAN / 8.0);
    assert_eq!(encode(boundary, 1).unwrap(), "0");
    assert!(first.contains(boundary));
    assert!(!TimeHash::new("1").unwrap().contains(boundary));

    // The domain start belongs to the first window only
    assert!(first.contains(LOWER_BOUND));
    assert!(TimeHash::new("000").unwrap().contains(LOWER_BOUND));
    assert!(!first.contains(-1.0));

    for t in [LOWER_BOUND, 1.0, boundary, worked_example_seconds(), UPPER_BOUND - 1.0] {
        for p in 1..=10 {
            let th = TimeHash::from_seconds(t, p).unwrap();
            assert!(th.contains(t), "{th} should contain {t}");
        }
    }
}

#[test]
fn test_timehash_parse() {
    let th: TimeHash = "bafbe".parse().unwrap();
    assert_eq!(th, TimeHash::from_seconds(1_700_000_000.0, 5).unwrap());
    assert_eq!(
        "xyz".parse::<TimeHash>(),
        Err(TimeHashError::InvalidSymbol { symbol: 'x', position: 0 })
    );
}

#[test]
fn test_timehash_ordering() {
    let mut hashes: Vec<TimeHash> = ["b", "a", "af", "0"]
        .into_iter()
        .map(|c| TimeHash::new(c).unwrap())
        .collect();
    hashes.sort();
    let codes: Vec<&str> = hashes.iter().map(TimeHash::code).collect();
    assert_eq!(codes, ["0", "a", "af", "b"]);
    assert!(TimeHash::new("af1cef0").unwrap() < TimeHash::new("af1cef1").unwrap());
}

#[test]
fn test_timehash_navigation() {
    let th = TimeHash::new("af1cef0").unwrap();
    assert_eq!(th.before().unwrap().code(), "af1ceef");
    assert_eq!(th.after().unwrap().code(), "af1cef1");
    assert_eq!(th.shift(2).unwrap().code(), "af1cefa");
    assert!(th.before().unwrap() < th);
    assert!(TimeHash::new("000").unwrap().before().is_err());
}

#[test]
fn test_timehash_from_datetime() {
    let dt = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let th = TimeHash::from_datetime(&dt, 3).unwrap();
    assert_eq!(th.code(), "baf");
    assert!(th.contains(1_704_067_200.0));

    let fine = TimeHash::from_datetime(&dt, 0).unwrap();
    assert_eq!(fine.precision(), 10);
    let roundtrip = fine.to_datetime().unwrap();
    assert!((roundtrip - dt).num_milliseconds().abs() as f64 <= fine.error() * 1000.0);
}

#[test]
fn test_timehash_serde() {
    let th = TimeHash::new("af1cef0").unwrap();
    assert_eq!(serde_json::to_string(&th).unwrap(), "\"af1cef0\"");

    let back: TimeHash = serde_json::from_str("\"af1cef0\"").unwrap();
    assert_eq!(back, th);
    assert_eq!(back.center(), th.center());

    assert!(serde_json::from_str::<TimeHash>("\"af1g\"").is_err());
    assert!(serde_json::from_str::<TimeHash>("\"\"").is_err());
}

// ----------------------------------------------------------------------------
// Errors
// ----------------------------------------------------------------------------

#[test]
fn test_error_messages() {
    let err = TimeHashError::InvalidSymbol { symbol: 'x', position: 3 };
    assert_eq!(
        err.to_string(),
        "invalid symbol 'x' at position 3, expected one of \"01abcdef\""
    );
    let err = TimeHashError::BoundaryUnderflow { code: "0000".into() };
    assert!(err.to_string().contains("precision 4"), "{err}");
    let err = TimeHashError::OutOfDomain { seconds: -1.0 };
    assert!(err.to_string().contains("[0, 4039372800)"), "{err}");
}
