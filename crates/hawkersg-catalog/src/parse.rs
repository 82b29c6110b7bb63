//! Lenient coercion of loosely typed backend JSON fields.
//!
//! The backend is inconsistent about types: ids arrive as numbers or
//! strings, ratings as numbers or numeric strings, flags occasionally as
//! strings. These helpers coerce what can be coerced and report everything
//! else as absent. None of them fail.

use rust_decimal::Decimal;
use serde_json::{Number, Value};

/// Text form of a scalar field.
///
/// Strings pass through untouched (including empty ones). Numbers render
/// as the browser client renders them, so `1.0` becomes `"1"`; ids and
/// rating seeds depend on this. Booleans print as JSON. Null, arrays and
/// objects are absent.
#[must_use]
pub(crate) fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Whole-valued floats drop their fractional part; everything else keeps
/// its JSON text.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f)
            if n.is_f64()
                && f.fract() == 0.0
                && f >= i64::MIN as f64
                && f < i64::MAX as f64 =>
        {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

/// Finite number from a JSON number or a numeric string.
#[must_use]
pub(crate) fn number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Non-negative whole count. Fractional or negative numbers are absent.
#[must_use]
pub(crate) fn count(value: Option<&Value>) -> Option<u32> {
    let n = number(value)?;
    if n < 0.0 || n.fract() != 0.0 || n > f64::from(u32::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(n as u32)
}

/// `true` only for a JSON boolean `true`; `"true"` and `1` do not count.
#[must_use]
pub(crate) fn strict_true(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

/// Decimal price from a number or a numeric string (`"3.50"`).
///
/// Numbers go through their JSON text form so `3.5` stays `3.5` rather
/// than picking up binary floating-point noise.
#[must_use]
pub(crate) fn price(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    }
}

/// First field of `keys` present on `obj` with a non-null value.
///
/// Mirrors a `a ?? b ?? c` chain: an empty string is present and stops
/// the search.
#[must_use]
pub(crate) fn first_present<'a>(
    obj: &'a serde_json::Map<String, Value>,
    keys: &[&str],
) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_renders_numbers_and_keeps_empty_strings() {
        assert_eq!(text(Some(&json!(42))).as_deref(), Some("42"));
        assert_eq!(text(Some(&json!(""))).as_deref(), Some(""));
        assert_eq!(text(Some(&json!(null))), None);
        assert_eq!(text(Some(&json!({"a": 1}))), None);
        assert_eq!(text(None), None);
    }

    #[test]
    fn text_drops_fraction_from_whole_floats() {
        assert_eq!(text(Some(&json!(1.0))).as_deref(), Some("1"));
        assert_eq!(text(Some(&json!(-0.0))).as_deref(), Some("0"));
        assert_eq!(text(Some(&json!(510_131_002.0))).as_deref(), Some("510131002"));
        assert_eq!(text(Some(&json!(2.5))).as_deref(), Some("2.5"));
        assert_eq!(text(Some(&json!(-7))).as_deref(), Some("-7"));
    }

    #[test]
    fn number_accepts_numeric_strings() {
        assert_eq!(number(Some(&json!("1.28"))), Some(1.28));
        assert_eq!(number(Some(&json!(" 103.82 "))), Some(103.82));
        assert_eq!(number(Some(&json!("north"))), None);
        assert_eq!(number(Some(&json!("NaN"))), None);
        assert_eq!(number(Some(&json!(true))), None);
    }

    #[test]
    fn count_rejects_fractional_and_negative() {
        assert_eq!(count(Some(&json!(12))), Some(12));
        assert_eq!(count(Some(&json!("7"))), Some(7));
        assert_eq!(count(Some(&json!(2.5))), None);
        assert_eq!(count(Some(&json!(-1))), None);
    }

    #[test]
    fn strict_true_only_for_boolean_true() {
        assert!(strict_true(Some(&json!(true))));
        assert!(!strict_true(Some(&json!("true"))));
        assert!(!strict_true(Some(&json!(1))));
        assert!(!strict_true(None));
    }

    #[test]
    fn price_parses_strings_and_numbers_exactly() {
        assert_eq!(price(Some(&json!("3.50"))), Some(Decimal::new(350, 2)));
        assert_eq!(price(Some(&json!(3.5))), Some(Decimal::new(35, 1)));
        assert_eq!(price(Some(&json!("free"))), None);
    }

    #[test]
    fn first_present_skips_null_but_not_empty() {
        let obj = json!({"id": null, "hawker_id": "", "slug": "tiong-bahru"});
        let obj = obj.as_object().unwrap();
        assert_eq!(
            first_present(obj, &["id", "hawker_id", "slug"]),
            Some(&json!(""))
        );
        assert_eq!(first_present(obj, &["missing"]), None);
    }
}
