//! Lenient deserializers for loosely typed host configuration
//!
//! Hosts often hand every value over as a string. These accept the natural
//! conversions between strings, numbers and booleans; `null` decodes to the
//! type's default.

use serde::de::{Deserializer, Error};
use serde::Deserialize;
use serde_json::Value;

pub fn bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => parse_bool(&s)
            .ok_or_else(|| D::Error::custom(format!("cannot parse '{s}' as bool"))),
        other => Err(D::Error::custom(format!("expected bool, found {other}"))),
    }
}

pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Bool(b) => Ok(i64::from(b)),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| D::Error::custom(format!("number {n} out of range"))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| D::Error::custom(format!("cannot parse '{s}' as int: {e}"))),
        other => Err(D::Error::custom(format!("expected int, found {other}"))),
    }
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(if b { "1" } else { "0" }.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string, found {other}"))),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        _ => None,
    }
}
