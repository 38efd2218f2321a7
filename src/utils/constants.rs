// src/utils/constants.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organization roles on an activity. The index merges them into one counter.
pub const ROLES: [&str; 3] = ["implementing", "programming", "funding"];

/// Organization scopes. `unknown` is what an unresolved organization gets.
pub const SCOPES: [&str; 4] = ["local", "regional", "international", "unknown"];
pub const UNKNOWN_SCOPE: &str = "unknown";

pub const SECTOR_TYPES: [&str; 2] = ["dac", "humanitarian"];

pub const LOCATION_TYPES: [&str; 3] = ["admin1", "admin2", "unclassified"];

pub const DEFAULT_ORG_MAP_PATH: &str = "inputs/org-map.json";
pub const DEFAULT_LOCATION_MAP_PATH: &str = "inputs/location-map.json";

/// Sub-national location level: region, district or unclassified site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationLevel {
    Admin1,
    Admin2,
    #[default]
    Unclassified,
}

impl LocationLevel {
    pub const ALL: [LocationLevel; 3] = [
        LocationLevel::Admin1,
        LocationLevel::Admin2,
        LocationLevel::Unclassified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationLevel::Admin1 => "admin1",
            LocationLevel::Admin2 => "admin2",
            LocationLevel::Unclassified => "unclassified",
        }
    }

    pub fn from_type(location_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == location_type)
    }
}

impl fmt::Display for LocationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
