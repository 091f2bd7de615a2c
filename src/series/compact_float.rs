//! Compact decimal text for series coefficients.
//!
//! The storage cost the truncation engine optimizes is the number of characters the
//! coefficients occupy in the JSON output. This module provides:
//!
//! * [`shortest_decimal`] – shortest round-trip decimal digits of an `f64`,
//! * [`round_sig`] – correct rounding to a number of significant digits,
//! * [`compact_text`] – the shortest JSON-valid spelling of a value, choosing between
//!   standard form (`1.5e-7`) and positional form (`0.015`, `1500`),
//! * [`CompactFloat`] – a serde wrapper writing [`compact_text`] verbatim.
//!
//! The compact text always parses back to the identical `f64`, so encoding is lossless.

use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

/// Decimal expansion `±d₁.d₂d₃… × 10^exponent` with no trailing zeros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    pub negative: bool,
    pub digits: String,
    pub exponent: i32,
}

/// Shortest decimal digits that round-trip to `x`.
///
/// Return
/// ----------
/// * `None` for zero and non-finite values.
pub fn shortest_decimal(x: f64) -> Option<Decimal> {
    if x == 0.0 || !x.is_finite() {
        return None;
    }
    // `{:e}` without precision yields the shortest round-trip representation.
    let text = format!("{:e}", x.abs());
    let (mantissa, exponent) = text.split_once('e')?;
    Some(Decimal {
        negative: x < 0.0,
        digits: mantissa.chars().filter(|c| *c != '.').collect(),
        exponent: exponent.parse().ok()?,
    })
}

/// Number of significant digits in the shortest text of `x` (0 for zero).
pub fn significant_digits(x: f64) -> usize {
    shortest_decimal(x).map_or(0, |d| d.digits.len())
}

/// Round `x` to `sig_figs` significant digits; `sig_figs == 0` gives `0`.
pub fn round_sig(x: f64, sig_figs: usize) -> f64 {
    if sig_figs == 0 || x == 0.0 || !x.is_finite() {
        return if sig_figs == 0 { 0.0 } else { x };
    }
    format!("{:.*e}", sig_figs - 1, x).parse().unwrap_or(x)
}

/// Shortest JSON-valid text of `x` that parses back to `x`.
///
/// Positional form is preferred when both forms have the same length. Integers are
/// written without a decimal point, zero (of either sign) as `0`.
pub fn compact_text(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    let Some(decimal) = shortest_decimal(x) else {
        return format!("{x}");
    };
    let sign = if decimal.negative { "-" } else { "" };
    let digits = decimal.digits.as_str();
    let n = digits.len() as i32;
    let e = decimal.exponent;

    let mut standard = format!("{sign}{}", &digits[..1]);
    if n > 1 {
        standard.push('.');
        standard.push_str(&digits[1..]);
    }
    if e != 0 {
        standard.push_str(&format!("e{e}"));
    }

    let positional = if e >= 0 {
        if n - 1 <= e {
            format!("{sign}{digits}{}", "0".repeat((e - (n - 1)) as usize))
        } else {
            let split = (e + 1) as usize;
            format!("{sign}{}.{}", &digits[..split], &digits[split..])
        }
    } else {
        format!("{sign}0.{}{digits}", "0".repeat((-e - 1) as usize))
    };

    if standard.len() < positional.len() {
        standard
    } else {
        positional
    }
}

/// Length in characters of [`compact_text`].
pub fn compact_len(x: f64) -> usize {
    compact_text(x).len()
}

/// Values reachable from `x` by dropping significant digits from the least-significant
/// end, fewest digits dropped first.
///
/// With `allow_zero`, the last candidate is `0` (no significant digit left).
pub fn rounding_candidates(x: f64, allow_zero: bool) -> impl Iterator<Item = f64> {
    let n = significant_digits(x);
    let lowest = if allow_zero { 0 } else { 1 };
    (lowest..n).rev().map(move |k| round_sig(x, k))
}

/// `f64` serialized with its [`compact_text`] in JSON output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactFloat(pub f64);

impl Serialize for CompactFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(compact_text(self.0)).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

/// `serialize_with` helper writing a fixed-size array of floats in compact form.
pub fn serialize_array<S: Serializer, const N: usize>(
    values: &[f64; N],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(|v| CompactFloat(*v)))
}

/// `serialize_with` helper writing a row-major 3×3 matrix in compact form.
pub fn serialize_rows<S: Serializer>(
    rows: &[[f64; 3]; 3],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(rows.iter().map(|row| row.map(CompactFloat)))
}

/// `serialize_with` helper writing one float in compact form.
pub fn serialize_scalar<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    CompactFloat(*value).serialize(serializer)
}

#[cfg(test)]
mod compact_float_test {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_shortest_decimal() {
        let d = shortest_decimal(-1.2345e-7).unwrap();
        assert!(d.negative);
        assert_eq!(d.digits, "12345");
        assert_eq!(d.exponent, -7);

        let d = shortest_decimal(1500.0).unwrap();
        assert_eq!(d.digits, "15");
        assert_eq!(d.exponent, 3);

        assert_eq!(shortest_decimal(0.0), None);
        assert_eq!(shortest_decimal(f64::NAN), None);
    }

    #[test]
    fn test_compact_text_forms() {
        assert_eq!(compact_text(0.0), "0");
        assert_eq!(compact_text(-0.0), "0");
        assert_eq!(compact_text(1.0), "1");
        assert_eq!(compact_text(-3.0), "-3");
        assert_eq!(compact_text(1500.0), "1500");
        assert_eq!(compact_text(8.1e6), "8.1e6");
        assert_eq!(compact_text(1e21), "1e21");
        assert_eq!(compact_text(0.5), "0.5");
        assert_eq!(compact_text(0.00015), "1.5e-4");
        assert_eq!(compact_text(0.01), "0.01");
        assert_eq!(compact_text(1.5e-7), "1.5e-7");
        assert_eq!(compact_text(-2.5e-9), "-2.5e-9");
        assert_eq!(compact_text(123.456), "123.456");
        assert_eq!(compact_text(0.001), "1e-3");
    }

    #[test]
    fn test_round_sig() {
        assert_eq!(round_sig(1.23456, 3), 1.23);
        assert_eq!(round_sig(-1.23456, 2), -1.2);
        assert_eq!(round_sig(9.96, 2), 10.0);
        assert_eq!(round_sig(123456.0, 1), 100000.0);
        assert_eq!(round_sig(4.4036e-7, 2), 4.4e-7);
        assert_eq!(round_sig(1.5, 0), 0.0);
    }

    #[test]
    fn test_rounding_candidates_order() {
        let candidates: Vec<f64> = rounding_candidates(1.2345, true).collect();
        assert_eq!(candidates, vec![1.235, 1.23, 1.2, 1.0, 0.0]);

        let candidates: Vec<f64> = rounding_candidates(1.2345, false).collect();
        assert_eq!(candidates.last(), Some(&1.0));

        assert_eq!(rounding_candidates(0.0, true).count(), 0);
        assert_eq!(rounding_candidates(7.0, false).count(), 0);
    }

    #[test]
    fn test_compact_text_round_trips_and_is_short() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..5_000 {
            let exponent: f64 = rng.random_range(-15.0..15.0);
            let mantissa: f64 = rng.random_range(-1.0..1.0);
            let mut x = mantissa * 10f64.powf(exponent);
            if rng.random_bool(0.5) {
                x = round_sig(x, rng.random_range(1..10));
            }
            let text = compact_text(x);
            assert_eq!(text.parse::<f64>().unwrap(), x, "{text}");
            assert!(text.len() <= format!("{x}").len(), "{text} vs {x}");
            assert!(text.len() <= format!("{x:e}").len(), "{text} vs {x:e}");
        }
    }

    #[test]
    fn test_compact_float_json() {
        let values = vec![CompactFloat(8.1e6), CompactFloat(0.25), CompactFloat(-1e-9)];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, "[8.1e6,0.25,-1e-9]");

        let back: Vec<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![8.1e6, 0.25, -1e-9]);
    }
}
