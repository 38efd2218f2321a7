// src/reference/context.rs - Reference data shared by the resolvers for one run
use std::io::Write;
use std::rc::Rc;

use crate::reference::dataset::DatasetCache;
use crate::reference::entry::{LocationEntry, OrgEntry};
use crate::reference::error::Result;
use crate::reference::location::{build_location_table, LocationResolver};
use crate::reference::lookup_table::{LookupTable, TableCache};
use crate::reference::org::OrgResolver;
use crate::utils::config::ReferenceConfig;

/// Owns every cache for a run: raw datasets, the flat organization tables and the
/// flattened location hierarchy. Nothing is built until a resolver first needs it,
/// and nothing is ever invalidated.
///
/// Single-threaded by construction; build one per worker if that ever changes.
#[derive(Debug, Default)]
pub struct ReferenceContext {
    config: ReferenceConfig,
    datasets: DatasetCache,
    org_tables: TableCache<OrgEntry>,
    location_tables: TableCache<LocationEntry>,
}

impl ReferenceContext {
    pub fn new(config: ReferenceConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ReferenceConfig {
        &self.config
    }

    pub fn datasets(&self) -> &DatasetCache {
        &self.datasets
    }

    /// Organization table for the configured organization map.
    pub fn org_table(&self) -> Result<Rc<LookupTable<OrgEntry>>> {
        self.org_tables.get_or_build(
            &self.datasets,
            &self.config.org_map_path,
            LookupTable::from_dataset,
        )
    }

    /// Flattened location hierarchy for the configured location map.
    pub fn location_table(&self) -> Result<Rc<LookupTable<LocationEntry>>> {
        self.location_tables.get_or_build(
            &self.datasets,
            &self.config.location_map_path,
            build_location_table,
        )
    }

    /// Organization resolver reporting failed lookups on stderr.
    pub fn org_resolver(&self) -> OrgResolver<'_> {
        OrgResolver::new(self)
    }

    /// Organization resolver reporting failed lookups to `diagnostics`.
    pub fn org_resolver_with<'a>(&'a self, diagnostics: Box<dyn Write + 'a>) -> OrgResolver<'a> {
        OrgResolver::with_diagnostics(self, diagnostics)
    }

    pub fn location_resolver(&self) -> LocationResolver<'_> {
        LocationResolver::new(self)
    }
}
