//! Query-string helpers.
//!
//! An empty parameter such as `?maxGuests=` means "no filter", not a
//! malformed number.

use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Deserialize an optional query value, reading a missing or blank
/// parameter as `None` and parsing anything else with [`FromStr`].
///
/// # Errors
///
/// Fails deserialization when a non-blank value does not parse.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Q {
        #[serde(default, deserialize_with = "blank_as_none")]
        n: Option<i64>,
    }

    #[test]
    fn blank_and_missing_are_none() {
        let q: Q = serde_json::from_str(r#"{"n": ""}"#).unwrap();
        assert_eq!(q.n, None);
        let q: Q = serde_json::from_str(r#"{"n": "  "}"#).unwrap();
        assert_eq!(q.n, None);
        let q: Q = serde_json::from_str("{}").unwrap();
        assert_eq!(q.n, None);
    }

    #[test]
    fn values_are_parsed() {
        let q: Q = serde_json::from_str(r#"{"n": "7"}"#).unwrap();
        assert_eq!(q.n, Some(7));
        assert!(serde_json::from_str::<Q>(r#"{"n": "seven"}"#).is_err());
    }
}
