// src/reference/entry.rs - Typed reference records for organizations and locations
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::utils::constants::{LocationLevel, UNKNOWN_SCOPE};
use crate::utils::text::normalize;

/// What the lookup table builder needs from a dataset entry.
pub trait ReferenceRecord: DeserializeOwned {
    /// Canonical display name, if the entry declares one.
    fn name(&self) -> Option<&str>;

    /// Alternate names that should resolve to this entry.
    fn synonyms(&self) -> &[String];
}

/// An organization from the organization map, or a placeholder for an unknown one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrgEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_synonyms",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub synonyms: Vec<String>,
    /// Any other fields carried by the dataset
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OrgEntry {
    /// Placeholder for a name the organization map does not know.
    pub fn unknown(raw_name: &str) -> Self {
        Self {
            name: normalize(Some(raw_name)),
            scope: Some(UNKNOWN_SCOPE.to_string()),
            ..Self::default()
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.scope.as_deref() == Some(UNKNOWN_SCOPE)
    }
}

impl ReferenceRecord for OrgEntry {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn synonyms(&self) -> &[String] {
        &self.synonyms
    }
}

/// A region, district or unclassified site. Districts carry their region in
/// `admin1`; sites carry both `admin1` and `admin2`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin2: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_synonyms",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub synonyms: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LocationEntry {
    /// Placeholder for a location that is not in the location map.
    pub fn unresolved(raw_name: &str, level: LocationLevel) -> Self {
        Self {
            level: Some(level.as_str().to_string()),
            name: normalize(Some(raw_name)),
            ..Self::default()
        }
    }
}

impl ReferenceRecord for LocationEntry {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn synonyms(&self) -> &[String] {
        &self.synonyms
    }
}

/// Accepts a list of names, a single name, or null. Null list members are dropped.
fn lenient_synonyms<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Synonyms {
        One(String),
        Many(Vec<Option<String>>),
    }

    Ok(match Option::<Synonyms>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Synonyms::One(name)) => vec![name],
        Some(Synonyms::Many(names)) => names.into_iter().flatten().collect(),
    })
}
