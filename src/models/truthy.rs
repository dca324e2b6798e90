//! Deserializers that treat falsy JSON values as missing.
//!
//! The store API uses `0`, `""` and `false` interchangeably with an omitted
//! key, so a field holding one of those decodes to `None`.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for i32 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for i64 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

/// Use with `#[serde(default, deserialize_with = "truthy::deserialize")]`.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Truthy,
{
    Ok(Option::<T>::deserialize(deserializer)?.filter(Truthy::is_truthy))
}

/// RFC 3339 timestamp; `null` and `""` decode to `None`.
pub fn date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.filter(Truthy::is_truthy) {
        Some(text) => text
            .parse::<DateTime<Utc>>()
            .map(Some)
            .map_err(D::Error::custom),
        None => Ok(None),
    }
}

/// Accepts a JSON string or number and keeps its string form.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}
