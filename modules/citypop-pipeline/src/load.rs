//! Turning the fetched JSON array into typed records.
//!
//! Numeric fields follow browser `Number()` coercion: bad input becomes NaN
//! instead of an error. `CoercionMode::Strict` drops such records instead.

use serde_json::Value;
use tracing::warn;

use citypop_common::{CityRecord, CoercionMode};

/// Outcome counts of one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Records kept in the dataset.
    pub loaded: usize,
    /// Records with at least one field that did not coerce to a number.
    pub malformed: usize,
    /// Malformed records dropped under strict coercion.
    pub rejected: usize,
}

pub fn load_records(raw: &[Value], mode: CoercionMode) -> (Vec<CityRecord>, LoadReport) {
    let mut records = Vec::with_capacity(raw.len());
    let mut report = LoadReport::default();

    for (index, value) in raw.iter().enumerate() {
        let record = record_from_json(value);
        if !record.has_numeric_fields() {
            report.malformed += 1;
            warn!(index, city = %record.city, mode = %mode, "Record has non-numeric census fields");
            if mode == CoercionMode::Strict {
                report.rejected += 1;
                continue;
            }
        }
        records.push(record);
    }

    report.loaded = records.len();
    (records, report)
}

pub fn record_from_json(value: &Value) -> CityRecord {
    let number = |key: &str| coerce_number(value.get(key));
    let rank = number("Rank");

    CityRecord {
        rank: if rank.is_finite() { rank.trunc() as i64 } else { 0 },
        city: coerce_text(value.get("City")),
        province: coerce_text(value.get("Province")),
        population_2017: number("Population_2017_Census"),
        population_1998: number("Population_1998_Census"),
        change: number("Change"),
    }
}

/// `Number(x)` semantics for a JSON value. A missing field is `undefined`.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => parse_numeric_text(s),
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

fn parse_numeric_text(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let (sign, unsigned) = match text.as_bytes()[0] {
        b'-' => (-1.0, &text[1..]),
        b'+' => (1.0, &text[1..]),
        _ => (1.0, text),
    };

    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    // Radix prefixes carry no sign.
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = text.strip_prefix(prefix) {
            if digits.starts_with(['+', '-']) {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix)
                .map(|v| v as f64)
                .unwrap_or(f64::NAN);
        }
    }

    // Rust accepts spellings like "inf" and "nan" that the browser does not.
    if unsigned.starts_with(['+', '-'])
        || !unsigned
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }

    unsigned.parse::<f64>().map(|v| sign * v).unwrap_or(f64::NAN)
}

pub fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numbers_pass_through() {
        assert_eq!(coerce_number(Some(&json!(1000))), 1000.0);
        assert_eq!(coerce_number(Some(&json!(-16.7))), -16.7);
    }

    #[test]
    fn strings_follow_browser_number_rules() {
        assert_eq!(coerce_number(Some(&json!(" 42 "))), 42.0);
        assert_eq!(coerce_number(Some(&json!(""))), 0.0);
        assert_eq!(coerce_number(Some(&json!("1e3"))), 1000.0);
        assert_eq!(coerce_number(Some(&json!("-Infinity"))), f64::NEG_INFINITY);
        assert_eq!(coerce_number(Some(&json!("0x1A"))), 26.0);
        assert!(coerce_number(Some(&json!("12px"))).is_nan());
        assert!(coerce_number(Some(&json!("inf"))).is_nan());
        assert!(coerce_number(Some(&json!("NaN"))).is_nan());
        assert!(coerce_number(Some(&json!("1,234"))).is_nan());
        assert!(coerce_number(Some(&json!("--5"))).is_nan());
    }

    #[test]
    fn radix_digits_take_no_sign() {
        assert!(coerce_number(Some(&json!("0x+1A"))).is_nan());
        assert!(coerce_number(Some(&json!("0b-1"))).is_nan());
        assert!(coerce_number(Some(&json!("0x"))).is_nan());
        assert_eq!(coerce_number(Some(&json!("0o17"))), 15.0);
    }

    #[test]
    fn null_is_zero_and_missing_is_nan() {
        assert_eq!(coerce_number(Some(&Value::Null)), 0.0);
        assert!(coerce_number(None).is_nan());
        assert!(coerce_number(Some(&json!([1]))).is_nan());
        assert_eq!(coerce_number(Some(&json!(true))), 1.0);
    }

    #[test]
    fn record_from_json_coerces_string_fields() {
        let record = record_from_json(&json!({
            "_id": "65f0",
            "Rank": 3,
            "City": "Faisalabad",
            "Province": "Punjab",
            "Population_2017_Census": "3203846",
            "Population_1998_Census": 2008861,
            "Change": "59.49"
        }));
        assert_eq!(record.rank, 3);
        assert_eq!(record.population_2017, 3_203_846.0);
        assert_eq!(record.change, 59.49);
    }

    #[test]
    fn lenient_keeps_malformed_records_as_nan() {
        let raw = vec![
            json!({"Rank": 1, "City": "A", "Province": "P", "Population_2017_Census": 10, "Population_1998_Census": 5, "Change": 100}),
            json!({"Rank": 2, "City": "B", "Province": "P", "Population_2017_Census": "n/a", "Population_1998_Census": 5, "Change": 1}),
        ];
        let (records, report) = load_records(&raw, CoercionMode::Lenient);
        assert_eq!(records.len(), 2);
        assert!(records[1].population_2017.is_nan());
        assert_eq!(report, LoadReport { loaded: 2, malformed: 1, rejected: 0 });
    }

    #[test]
    fn strict_rejects_malformed_records() {
        let raw = vec![
            json!({"Rank": 1, "City": "A", "Province": "P", "Population_2017_Census": 10, "Population_1998_Census": 5, "Change": 100}),
            json!({"Rank": 2, "City": "B", "Province": "P", "Population_1998_Census": 5, "Change": 1}),
        ];
        let (records, report) = load_records(&raw, CoercionMode::Strict);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].city, "A");
        assert_eq!(report, LoadReport { loaded: 1, malformed: 1, rejected: 1 });
    }
}
