//! Serde helpers for tolerant wire decoding
//!
//! The upstream API is loose about scalar types: ids arrive as numbers or
//! numeric strings, prices as numbers or strings, booleans sometimes null.
//! These helpers decode every observed shape into one canonical type.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

/// Convert a JSON value into an i64, accepting numbers and numeric strings.
pub fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Convert a JSON value into a Decimal, accepting numbers and numeric strings.
pub fn value_to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Decimal::from(i))
            } else {
                n.as_f64().and_then(|f| Decimal::try_from(f).ok())
            }
        }
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Convert a JSON value into a display string (numbers included), dropping
/// empty strings.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Deserialize an i64 from a number or numeric string.
pub fn flexible_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_i64(&value).ok_or_else(|| de::Error::custom(format!("invalid integer: {value}")))
}

/// Deserialize an optional i64; null, missing and non-numeric become `None`.
pub fn opt_flexible_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_i64))
}

/// Deserialize a Decimal from a number or numeric string; defaults to zero
/// when the field is null or unparseable.
pub fn flexible_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_decimal).unwrap_or_default())
}

/// Deserialize an optional Decimal from a number or numeric string.
pub fn opt_flexible_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_decimal))
}

/// Deserialize a bool that treats null as true.
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}

/// Deserialize a bool that treats null as false.
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

/// Deserialize an optional string, mapping empty strings to `None`.
pub fn opt_nonempty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_i64() {
        assert_eq!(value_to_i64(&json!(42)), Some(42));
        assert_eq!(value_to_i64(&json!("42")), Some(42));
        assert_eq!(value_to_i64(&json!(42.9)), Some(42));
        assert_eq!(value_to_i64(&json!("abc")), None);
        assert_eq!(value_to_i64(&json!(null)), None);
    }

    #[test]
    fn test_value_to_decimal() {
        assert_eq!(value_to_decimal(&json!(25000)), Some(Decimal::from(25000)));
        assert_eq!(
            value_to_decimal(&json!("25000")),
            Some(Decimal::from(25000))
        );
        assert_eq!(
            value_to_decimal(&json!(12.5)),
            Some("12.5".parse().unwrap())
        );
        assert_eq!(value_to_decimal(&json!("")), None);
        assert_eq!(value_to_decimal(&json!(true)), None);
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!("A12")), Some("A12".to_string()));
        assert_eq!(value_to_string(&json!(7)), Some("7".to_string()));
        assert_eq!(value_to_string(&json!("  ")), None);
        assert_eq!(value_to_string(&json!(null)), None);
    }
}
