// src/index/aggregator.rs - Fold activities into a per-location counting index
//
// Keys are the raw location, org and sector strings with surrounding whitespace
// trimmed. No token lookup happens here, so two spellings of one place make two
// buckets.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::io::Write;

use crate::index::activity::Activity;
use crate::utils::constants::{LOCATION_TYPES, ROLES, SECTOR_TYPES};
use crate::utils::text::is_blank;

/// The parts of an activity kept in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub identifier: Value,
    pub title: Value,
    pub source: Value,
}

impl From<&Activity> for ActivitySummary {
    fn from(activity: &Activity) -> Self {
        Self {
            identifier: activity.identifier.clone(),
            title: activity.title.clone(),
            source: activity.source.clone(),
        }
    }
}

/// Everything the index knows about one location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Every activity seen at this location, repeats included
    pub activities: Vec<ActivitySummary>,
    /// Org name to occurrence count, all roles merged
    pub orgs: IndexMap<String, u64>,
    /// Sector type to sector name to occurrence count
    pub sectors: IndexMap<String, IndexMap<String, u64>>,
}

/// Location type to trimmed location string to entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationIndex(IndexMap<String, IndexMap<String, IndexEntry>>);

impl Default for LocationIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationIndex {
    /// An index with an empty bucket for every location type.
    pub fn new() -> Self {
        Self(
            LOCATION_TYPES
                .iter()
                .map(|loctype| (loctype.to_string(), IndexMap::new()))
                .collect(),
        )
    }

    /// Build an index from scratch over `activities`.
    pub fn build<'a, I>(activities: I) -> Self
    where
        I: IntoIterator<Item = &'a Activity>,
    {
        let mut index = Self::new();
        for activity in activities {
            index.add_activity(activity);
        }
        index
    }

    /// Fold one activity into every location it lists.
    pub fn add_activity(&mut self, activity: &Activity) {
        for loctype in LOCATION_TYPES {
            let bucket = self.0.entry(loctype.to_string()).or_default();
            for location in Activity::values(&activity.locations, loctype) {
                if is_blank(Some(location)) {
                    continue;
                }
                let entry = bucket.entry(location.trim().to_string()).or_default();
                record(entry, activity);
            }
        }
    }

    pub fn locations(&self, loctype: &str) -> Option<&IndexMap<String, IndexEntry>> {
        self.0.get(loctype)
    }

    pub fn entry(&self, loctype: &str, location: &str) -> Option<&IndexEntry> {
        self.0.get(loctype)?.get(location)
    }

    /// Total number of location buckets across all types.
    pub fn location_count(&self) -> usize {
        self.0.values().map(IndexMap::len).sum()
    }

    /// Write the index as JSON indented by four spaces.
    pub fn write_pretty<W: Write>(&self, writer: W) -> Result<()> {
        let mut serializer = Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut serializer)
            .context("Failed to serialize location index")
    }
}

fn record(entry: &mut IndexEntry, activity: &Activity) {
    // No dedup by identifier: a repeated activity is listed again.
    entry.activities.push(ActivitySummary::from(activity));

    for role in ROLES {
        for org in Activity::values(&activity.orgs, role) {
            if is_blank(Some(org)) {
                continue;
            }
            *entry.orgs.entry(org.trim().to_string()).or_insert(0) += 1;
        }
    }

    for sector_type in SECTOR_TYPES {
        let counts = entry.sectors.entry(sector_type.to_string()).or_default();
        for sector in Activity::values(&activity.sectors, sector_type) {
            if is_blank(Some(sector)) {
                continue;
            }
            *counts.entry(sector.trim().to_string()).or_insert(0) += 1;
        }
    }

    debug!(
        "Indexed activity {} ({} activities at this location)",
        activity.identifier,
        entry.activities.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn activity(value: serde_json::Value) -> Activity {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_org_counts_sum_across_activities() {
        let a = activity(json!({
            "identifier": "A", "title": "Water", "source": "IATI",
            "locations": {"admin1": ["Bay"]},
            "orgs": {"implementing": ["Oxfam"], "funding": ["ECHO"]},
        }));
        let b = activity(json!({
            "identifier": "B", "title": "Food", "source": "3W",
            "locations": {"admin1": [" Bay "]},
            "orgs": {"implementing": ["Oxfam ", ""], "programming": ["ECHO"]},
        }));

        let index = LocationIndex::build([&a, &b]);
        let entry = index.entry("admin1", "Bay").unwrap();
        assert_eq!(entry.orgs["Oxfam"], 2);
        assert_eq!(entry.orgs["ECHO"], 2);
        assert_eq!(entry.orgs.len(), 2);
        let ids: Vec<&str> = entry
            .activities
            .iter()
            .filter_map(|a| a.identifier.as_str())
            .collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_keys_are_trimmed_but_not_normalized() {
        let a = activity(json!({
            "identifier": "A",
            "locations": {"admin1": ["Capital  City ", "capital city", "   ", null]},
        }));

        let index = LocationIndex::build([&a]);
        let admin1 = index.locations("admin1").unwrap();
        let keys: Vec<&str> = admin1.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Capital  City", "capital city"]);
    }

    #[test]
    fn test_empty_input_keeps_every_location_type() {
        let index = LocationIndex::build(std::iter::empty());
        for loctype in LOCATION_TYPES {
            assert!(index.locations(loctype).unwrap().is_empty());
        }
        assert_eq!(
            serde_json::to_value(&index).unwrap(),
            json!({"admin1": {}, "admin2": {}, "unclassified": {}})
        );
    }

    #[test]
    fn test_types_missing_from_a_loaded_index_are_recreated() {
        let mut index: LocationIndex =
            serde_json::from_value(json!({"admin1": {}, "unclassified": {}})).unwrap();
        let a = activity(json!({
            "identifier": "A",
            "locations": {"admin2": ["Baidoa"]},
            "orgs": {"implementing": ["Oxfam"]},
        }));

        index.add_activity(&a);
        assert_eq!(index.entry("admin2", "Baidoa").unwrap().orgs["Oxfam"], 1);
    }

    #[test]
    fn test_identifiers_pass_through_unchanged() {
        let a = activity(json!({
            "identifier": 4711,
            "title": {"en": "Shelter"},
            "locations": {"admin1": ["Gedo"]},
        }));

        let index = LocationIndex::build([&a]);
        let summary = &index.entry("admin1", "Gedo").unwrap().activities[0];
        assert_eq!(summary.identifier, json!(4711));
        assert_eq!(summary.title, json!({"en": "Shelter"}));
        assert_eq!(summary.source, Value::Null);
    }

    #[test]
    fn test_repeated_activity_is_listed_twice() {
        let a = activity(json!({
            "identifier": "A",
            "locations": {"unclassified": ["Hodan"]},
            "sectors": {"dac": ["Health"], "humanitarian": ["WASH", "Health"]},
        }));

        let index = LocationIndex::build([&a, &a]);
        let entry = index.entry("unclassified", "Hodan").unwrap();
        assert_eq!(entry.activities.len(), 2);
        assert_eq!(entry.sectors["dac"]["Health"], 2);
        assert_eq!(entry.sectors["humanitarian"]["WASH"], 2);
        assert_eq!(entry.sectors["humanitarian"]["Health"], 2);
    }

    #[test]
    fn test_unrecognized_types_are_ignored() {
        let a = activity(json!({
            "identifier": "A",
            "locations": {"country": ["Somalia"], "admin2": ["Baidoa"]},
            "orgs": {"reporting": ["UNICEF"]},
            "sectors": {"other": ["Shelter"]},
        }));

        let index = LocationIndex::build([&a]);
        assert!(index.locations("country").is_none());
        let entry = index.entry("admin2", "Baidoa").unwrap();
        assert!(entry.orgs.is_empty());
        assert_eq!(entry.sectors.len(), 2);
        assert!(entry.sectors.values().all(IndexMap::is_empty));
        assert_eq!(index.location_count(), 1);
    }

    #[test]
    fn test_pretty_output_round_trips() {
        let a = activity(json!({
            "identifier": "A", "title": "Water", "source": "IATI",
            "locations": {"admin1": ["Bay"], "admin2": ["Baidoa"]},
            "orgs": {"implementing": ["Oxfam"]},
            "sectors": {"dac": ["Water supply"]},
        }));
        let index = LocationIndex::build([&a]);

        let mut out: Vec<u8> = Vec::new();
        index.write_pretty(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\n    \"admin1\": {\n        \"Bay\": {"));

        let parsed: LocationIndex = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, index);
    }
}
