//! Serialization of options into query strings and request bodies.

use crate::errors::SonarError;
use serde::Serialize;

/// Encode options as a URL query string, e.g. `p=1&ps=50`.
pub(crate) fn to_query<O: Serialize + ?Sized>(options: &O) -> Result<String, SonarError> {
    Ok(serde_urlencoded::to_string(options)?)
}

/// Encode options as a flat JSON object.
pub(crate) fn to_body<O: Serialize + ?Sized>(options: &O) -> Result<Vec<u8>, SonarError> {
    serde_json::to_vec(options).map_err(SonarError::BodyEncode)
}

/// Serde helper for list-valued parameters which SonarQube expects as a
/// single comma-joined value, e.g. `status=SUCCESS,FAILED`.
///
/// Use with `#[serde(with = "comma_separated")]`, usually together with
/// `skip_serializing_if = "Vec::is_empty"` and `default`.
pub mod comma_separated {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(values: &[String], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&values.join(","))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let joined = String::deserialize(deserializer)?;
        if joined.is_empty() {
            return Ok(Vec::new());
        }
        Ok(joined.split(',').map(str::to_string).collect())
    }
}
