use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Granularity of a region in the drill-down hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    National,
    State,
    District,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::National => write!(f, "national"),
            Level::State => write!(f, "state"),
            Level::District => write!(f, "district"),
        }
    }
}

/// A named region with its record count, as returned by the geo endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Canonical backend name
    pub name: String,

    /// Record count; `null` or missing values normalize to zero
    #[serde(default, deserialize_with = "null_as_zero")]
    pub value: u64,

    /// Optional backend identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Region {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
            id: None,
        }
    }
}

/// Accepts integers, floats, or `null`; negative and non-finite values clamp to zero.
pub(crate) fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<f64> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(v) if v.is_finite() && v > 0.0 => v.round() as u64,
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_deserialize_plain() {
        let region: Region = serde_json::from_str(r#"{"name":"Odisha","value":4200}"#).unwrap();
        assert_eq!(region.name, "Odisha");
        assert_eq!(region.value, 4200);
        assert!(region.id.is_none());
    }

    #[test]
    fn test_region_null_and_missing_values_are_zero() {
        let null: Region = serde_json::from_str(r#"{"name":"Goa","value":null}"#).unwrap();
        let missing: Region = serde_json::from_str(r#"{"name":"Goa"}"#).unwrap();
        let negative: Region = serde_json::from_str(r#"{"name":"Goa","value":-3}"#).unwrap();
        assert_eq!(null.value, 0);
        assert_eq!(missing.value, 0);
        assert_eq!(negative.value, 0);
    }

    #[test]
    fn test_region_float_value_rounds() {
        let region: Region =
            serde_json::from_str(r#"{"name":"Pune","value":12.6,"id":"MH-25"}"#).unwrap();
        assert_eq!(region.value, 13);
        assert_eq!(region.id.as_deref(), Some("MH-25"));
    }
}
