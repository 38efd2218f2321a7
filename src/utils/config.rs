//! Locations of the reference datasets used for name resolution

use log::{debug, info};
use std::env;
use std::path::PathBuf;

use crate::utils::constants::{DEFAULT_LOCATION_MAP_PATH, DEFAULT_ORG_MAP_PATH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceConfig {
    /// Flat organization map, keyed by canonical name
    pub org_map_path: PathBuf,
    /// Hierarchical region/district/site map
    pub location_map_path: PathBuf,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            org_map_path: PathBuf::from(DEFAULT_ORG_MAP_PATH),
            location_map_path: PathBuf::from(DEFAULT_LOCATION_MAP_PATH),
        }
    }
}

impl ReferenceConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let org_map_path = env::var("ORG_MAP_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ORG_MAP_PATH.to_string());
        let location_map_path = env::var("LOCATION_MAP_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION_MAP_PATH.to_string());

        debug!(
            "Reference config: org_map={}, location_map={}",
            org_map_path, location_map_path
        );

        Self {
            org_map_path: PathBuf::from(org_map_path),
            location_map_path: PathBuf::from(location_map_path),
        }
    }

    /// Log the current configuration
    pub fn log_config(&self) {
        info!("Organization map: {}", self.org_map_path.display());
        info!("Location map: {}", self.location_map_path.display());
    }
}
