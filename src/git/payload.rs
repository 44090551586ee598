//! Entry points turning backend JSON into model types.
//!
//! The field-level conversions live in each type's serde attributes; these
//! functions only map failures onto [`Error::Deserialization`].

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

pub fn from_str<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| {
        tracing::warn!(error = %e, kind = std::any::type_name::<T>(), "payload rejected");
        Error::Deserialization(e)
    })
}

pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        tracing::warn!(error = %e, kind = std::any::type_name::<T>(), "payload rejected");
        Error::Deserialization(e)
    })
}

pub fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(error = %e, kind = std::any::type_name::<T>(), "payload rejected");
        Error::Deserialization(e)
    })
}
