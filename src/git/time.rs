//! Timestamp conversions for the wire format and for display.
//!
//! The backend sends most timestamps as epoch milliseconds, but remote
//! commits carry epoch seconds. Either may arrive as a JSON number or as a
//! numeric string.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Deserializer};

use crate::config::DateFormat;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawTimestamp {
    fn scaled(self, factor: i64) -> Result<i64, String> {
        match self {
            RawTimestamp::Int(n) => n
                .checked_mul(factor)
                .ok_or_else(|| format!("timestamp {} out of range", n)),
            RawTimestamp::Float(f) => {
                let scaled = f * factor as f64;
                if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
                    return Err(format!("timestamp {} out of range", f));
                }
                Ok(scaled as i64)
            }
            RawTimestamp::Text(s) => {
                let trimmed = s.trim();
                if let Ok(n) = trimmed.parse::<i64>() {
                    RawTimestamp::Int(n).scaled(factor)
                } else if let Ok(f) = trimmed.parse::<f64>() {
                    RawTimestamp::Float(f).scaled(factor)
                } else {
                    Err(format!("invalid timestamp '{}'", s))
                }
            }
        }
    }
}

fn from_millis<E: serde::de::Error>(ms: i64) -> Result<DateTime<Utc>, E> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| E::custom(format!("timestamp {}ms out of range", ms)))
}

/// Epoch milliseconds.
pub mod millis {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawTimestamp::deserialize(deserializer)?;
        let ms = raw.scaled(1).map_err(serde::de::Error::custom)?;
        from_millis(ms)
    }
}

/// Epoch seconds, stored as `raw * 1000` milliseconds.
pub mod seconds {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawTimestamp::deserialize(deserializer)?;
        let ms = raw.scaled(1000).map_err(serde::de::Error::custom)?;
        from_millis(ms)
    }
}

/// Optional epoch milliseconds; `null` maps to `None`.
pub mod option_millis {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawTimestamp>::deserialize(deserializer)? {
            Some(raw) => {
                let ms = raw.scaled(1).map_err(serde::de::Error::custom)?;
                from_millis(ms).map(Some)
            }
            None => Ok(None),
        }
    }
}

pub fn format_timestamp(ts: DateTime<Utc>, format: DateFormat, now: DateTime<Utc>) -> String {
    match format {
        DateFormat::Relative => relative_time(ts, now),
        DateFormat::Iso => ts.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        DateFormat::Local => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    }
}

fn relative_time(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - ts).num_seconds();

    let (count, unit) = if diff < 60 {
        return "just now".to_string();
    } else if diff < 3600 {
        (diff / 60, "minute")
    } else if diff < 86400 {
        (diff / 3600, "hour")
    } else if diff < 2592000 {
        (diff / 86400, "day")
    } else if diff < 31536000 {
        (diff / 2592000, "month")
    } else {
        (diff / 31536000, "year")
    };

    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}
