//! Lenient date parsing for request bodies and query strings.
//!
//! Clients send either a full RFC 3339 timestamp or a bare `YYYY-MM-DD`
//! date. Bare dates are read as midnight UTC. Instants keep millisecond
//! precision; finer digits are dropped.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns a message describing the expected formats when neither matches.
pub fn parse_date_input(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc).trunc_subsecs(3));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid date '{raw}': expected RFC 3339 or YYYY-MM-DD"))
}

/// Serde adapter for a required flexible date.
///
/// # Errors
///
/// Fails deserialization when the string is not a recognised date.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_input(&raw).map_err(serde::de::Error::custom)
}

/// Serde adapter for an optional flexible date.
pub mod option {
    use super::parse_date_input;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    /// Deserialize `null`, a missing field or an empty string as `None`.
    ///
    /// # Errors
    ///
    /// Fails deserialization when a non-empty string is not a recognised date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse_date_input(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
