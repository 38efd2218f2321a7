// src/index/activity.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Raw strings grouped by a classifier (location type, org role or sector type).
/// List members may be null or blank in the source data.
pub type Classified = HashMap<String, Vec<Option<String>>>;

/// One activity record from the processed activity file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Activity {
    /// Copied into the index as-is, whatever its JSON type
    pub identifier: Value,
    #[serde(default)]
    pub title: Value,
    #[serde(default)]
    pub source: Value,
    #[serde(default)]
    pub locations: Classified,
    #[serde(default)]
    pub orgs: Classified,
    #[serde(default)]
    pub sectors: Classified,
}

impl Activity {
    /// Raw strings under `class`, in source order, with nulls dropped.
    pub fn values<'a>(map: &'a Classified, class: &str) -> impl Iterator<Item = &'a str> + 'a {
        map.get(class)
            .into_iter()
            .flatten()
            .filter_map(|value| value.as_deref())
    }
}

/// Read the JSON array of activities at `path`.
pub fn load_activities(path: &Path) -> Result<Vec<Activity>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open activity file {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse activity file {}", path.display()))
}
