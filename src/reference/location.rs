// src/reference/location.rs - Region / district / unclassified site resolution
//
// The location map nests districts under each region's "admin2" object and
// unclassified sites under each district's "unclassified" object. Everything is
// flattened into one token table. Insertion order decides precedence: a region key
// first, then its districts, each followed by its sites and their synonyms, then the
// district synonyms, and the region synonyms last. Only region keys overwrite; every
// other token is first-writer-wins.

use log::warn;
use serde_json::Value;
use std::path::Path;
use std::rc::Rc;

use crate::reference::context::ReferenceContext;
use crate::reference::entry::LocationEntry;
use crate::reference::error::{ReferenceError, Result};
use crate::reference::lookup_table::{as_object, parse_entry, LookupTable};
use crate::utils::constants::LocationLevel;
use crate::utils::text::{is_blank, tokenize};

const DISTRICTS_KEY: &str = "admin2";
const SITES_KEY: &str = "unclassified";

/// Flatten the hierarchical location map into a single lookup table.
pub fn build_location_table(path: &Path, dataset: &Value) -> Result<LookupTable<LocationEntry>> {
    let regions = as_object(path, dataset, "top level")?;
    let mut table = LookupTable::new();

    for (region_key, region_info) in regions {
        let (region, districts) = split_node(path, region_key, region_info, DISTRICTS_KEY)?;
        let region = Rc::new(region);
        table.insert(tokenize(region_key), Rc::clone(&region));
        let region_name = display_name(&region, region_key);

        if let Some(districts) = districts {
            for (district_key, district_info) in as_object(path, districts, "districts")? {
                let (mut district, sites) =
                    split_node(path, district_key, district_info, SITES_KEY)?;
                district.admin1 = Some(region_name.clone());
                let district = Rc::new(district);
                table.insert_if_absent(tokenize(district_key), &district);
                let district_name = display_name(&district, district_key);

                if let Some(sites) = sites {
                    for (site_key, site_info) in as_object(path, sites, "sites")? {
                        let mut site: LocationEntry = parse_entry(path, site_key, site_info.clone())?;
                        site.admin1 = Some(region_name.clone());
                        site.admin2 = Some(district_name.clone());
                        let site = Rc::new(site);
                        table.insert_if_absent(tokenize(site_key), &site);
                        for synonym in &site.synonyms {
                            table.insert_if_absent(tokenize(synonym), &site);
                        }
                    }
                }

                for synonym in &district.synonyms {
                    table.insert_if_absent(tokenize(synonym), &district);
                }
            }
        }

        for synonym in &region.synonyms {
            table.insert_if_absent(tokenize(synonym), &region);
        }
    }

    Ok(table)
}

/// Parse one hierarchy node, detaching its child map so it does not end up in the entry.
/// A missing or null child map means no children; anything else but an object is malformed.
fn split_node<'a>(
    path: &Path,
    key: &str,
    info: &'a Value,
    child_key: &str,
) -> Result<(LocationEntry, Option<&'a Value>)> {
    let children = match info.get(child_key) {
        None | Some(Value::Null) => None,
        Some(children @ Value::Object(_)) => Some(children),
        Some(_) => {
            return Err(ReferenceError::malformed(
                path,
                format!("{:?}.{} is not a JSON object", key, child_key),
            ))
        }
    };
    let mut own = info.clone();
    if let Some(fields) = own.as_object_mut() {
        fields.remove(child_key);
    }
    Ok((parse_entry(path, key, own)?, children))
}

/// Name stamped onto descendants. Falls back to the dataset key when the entry has none.
fn display_name(entry: &LocationEntry, key: &str) -> String {
    match entry.name.as_deref() {
        Some(name) => name.to_string(),
        None => {
            warn!("Location {:?} has no name; using its key for descendants", key);
            key.to_string()
        }
    }
}

/// Resolves free-text location names against the location map.
pub struct LocationResolver<'a> {
    context: &'a ReferenceContext,
}

impl<'a> LocationResolver<'a> {
    pub fn new(context: &'a ReferenceContext) -> Self {
        Self { context }
    }

    /// Resolve `name`, falling back to an `unclassified` placeholder.
    pub fn resolve(&self, name: Option<&str>) -> Result<Option<Rc<LocationEntry>>> {
        self.resolve_as(name, LocationLevel::Unclassified)
    }

    /// Resolve `name`. Blank names give `None`. Names not in the map give a
    /// placeholder at `fallback` level carrying the normalized name.
    pub fn resolve_as(
        &self,
        name: Option<&str>,
        fallback: LocationLevel,
    ) -> Result<Option<Rc<LocationEntry>>> {
        let name = match name {
            Some(name) if !is_blank(Some(name)) => name,
            _ => return Ok(None),
        };

        let table = self.context.location_table()?;
        Ok(Some(match table.lookup(name) {
            Some(entry) => Rc::clone(entry),
            None => Rc::new(LocationEntry::unresolved(name, fallback)),
        }))
    }
}
