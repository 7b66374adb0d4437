//! Lenient deserializers for fields the API emits inconsistently.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrStr {
    Num(f64),
    Str(String),
}

/// Money and quantities arrive either as JSON numbers or as decimal strings.
pub fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

pub fn opt_number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumOrStr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumOrStr::Num(n)) => Ok(Some(n)),
        Some(NumOrStr::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(NumOrStr::Str(s)) => {
            s.trim().parse::<f64>().map(Some).map_err(serde::de::Error::custom)
        }
    }
}

/// Parse `YYYY-MM-DD`, naming the offending field on failure.
pub fn parse_date(field: &str, value: &str) -> Result<chrono::NaiveDate, crate::ModelError> {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| crate::ModelError::Validation(format!("{field} must be a YYYY-MM-DD date")))
}

/// Parse `HH:MM` (seconds optional).
pub fn parse_time(field: &str, value: &str) -> Result<chrono::NaiveTime, crate::ModelError> {
    let v = value.trim();
    chrono::NaiveTime::parse_from_str(v, "%H:%M")
        .or_else(|_| chrono::NaiveTime::parse_from_str(v, "%H:%M:%S"))
        .map_err(|_| crate::ModelError::Validation(format!("{field} must be a HH:MM time")))
}
