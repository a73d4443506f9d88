use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

use super::FromRowValue;
use super::macros::impl_integer_value;
use crate::types::RowValues;

/// `Some(n)` when `f` is exactly an integer that fits in an `i128`.
fn integral_float(f: f64) -> Option<i128> {
    let n = f as i128;
    (n as f64 == f).then_some(n)
}

/// `Some(n as f64)` when the round trip through `f64` gives `n` back.
fn exact_f64(n: i64) -> Option<f64> {
    let f = n as f64;
    (f as i128 == i128::from(n)).then_some(f)
}

impl_integer_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromRowValue for bool {
    fn from_null() -> Self {
        false
    }

    fn from_present(value: &RowValues) -> Option<Self> {
        value.as_bool().copied()
    }

    fn target_name() -> &'static str {
        "bool"
    }
}

impl FromRowValue for f64 {
    fn from_null() -> Self {
        0.0
    }

    fn from_present(value: &RowValues) -> Option<Self> {
        match value {
            RowValues::Float(f) => Some(*f),
            RowValues::Int(i) => exact_f64(*i),
            _ => None,
        }
    }

    fn target_name() -> &'static str {
        "f64"
    }
}

impl FromRowValue for f32 {
    fn from_null() -> Self {
        0.0
    }

    fn from_present(value: &RowValues) -> Option<Self> {
        match value {
            // narrowing keeps precision loss but not overflow
            RowValues::Float(f) => {
                let narrowed = *f as f32;
                (narrowed.is_finite() || !f.is_finite()).then_some(narrowed)
            }
            RowValues::Int(i) => {
                let narrowed = *i as f32;
                (narrowed as i128 == i128::from(*i)).then_some(narrowed)
            }
            _ => None,
        }
    }

    fn target_name() -> &'static str {
        "f32"
    }
}

impl FromRowValue for char {
    fn from_null() -> Self {
        '\0'
    }

    fn from_present(value: &RowValues) -> Option<Self> {
        match value {
            RowValues::Text(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            RowValues::Int(i) => u32::try_from(*i).ok().and_then(char::from_u32),
            _ => None,
        }
    }

    fn target_name() -> &'static str {
        "char"
    }
}

impl FromRowValue for String {
    fn from_null() -> Self {
        String::new()
    }

    fn from_present(value: &RowValues) -> Option<Self> {
        value.as_text().map(str::to_owned)
    }

    fn target_name() -> &'static str {
        "String"
    }
}

impl FromRowValue for Vec<u8> {
    fn from_null() -> Self {
        Vec::new()
    }

    fn from_present(value: &RowValues) -> Option<Self> {
        value.as_blob().map(<[u8]>::to_vec)
    }

    fn target_name() -> &'static str {
        "Vec<u8>"
    }
}

impl FromRowValue for NaiveDateTime {
    fn from_null() -> Self {
        NaiveDateTime::default()
    }

    fn from_present(value: &RowValues) -> Option<Self> {
        value.as_timestamp()
    }

    fn target_name() -> &'static str {
        "NaiveDateTime"
    }
}

impl FromRowValue for JsonValue {
    fn from_null() -> Self {
        JsonValue::Null
    }

    fn from_present(value: &RowValues) -> Option<Self> {
        match value {
            RowValues::JSON(v) => Some(v.clone()),
            RowValues::Text(s) => serde_json::from_str(s).ok(),
            _ => None,
        }
    }

    fn target_name() -> &'static str {
        "serde_json::Value"
    }
}

/// The raw stored value, untouched.
impl FromRowValue for RowValues {
    fn from_null() -> Self {
        RowValues::Null
    }

    fn from_present(value: &RowValues) -> Option<Self> {
        Some(value.clone())
    }

    fn target_name() -> &'static str {
        "RowValues"
    }
}

impl<T: FromRowValue> FromRowValue for Option<T> {
    fn from_null() -> Self {
        None
    }

    fn from_present(value: &RowValues) -> Option<Self> {
        T::from_present(value).map(Some)
    }

    fn target_name() -> &'static str {
        T::target_name()
    }
}
