// src/reference/lookup_table.rs - Token-keyed lookup tables with synonym expansion
use log::{debug, info};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::reference::dataset::DatasetCache;
use crate::reference::entry::ReferenceRecord;
use crate::reference::error::{ReferenceError, Result};
use crate::utils::text::tokenize;

/// Map from lookup token to a shared reference entry.
///
/// Secondary keys (names, synonyms, lower hierarchy levels) go in with
/// [`LookupTable::insert_if_absent`], so whichever entry claims a token first keeps it.
#[derive(Debug)]
pub struct LookupTable<E> {
    entries: HashMap<String, Rc<E>>,
}

impl<E> Default for LookupTable<E> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<E> LookupTable<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `token` at `entry`, replacing any previous claim. Only for a dataset's own keys.
    pub fn insert(&mut self, token: String, entry: Rc<E>) {
        self.entries.insert(token, entry);
    }

    /// Point `token` at `entry` unless some entry already owns it.
    pub fn insert_if_absent(&mut self, token: String, entry: &Rc<E>) -> bool {
        match self.entries.entry(token) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Rc::clone(entry));
                true
            }
        }
    }

    /// Look up an already tokenized key.
    pub fn get(&self, token: &str) -> Option<&Rc<E>> {
        self.entries.get(token)
    }

    /// Tokenize `name` and look it up.
    pub fn lookup(&self, name: &str) -> Option<&Rc<E>> {
        self.get(&tokenize(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: ReferenceRecord> LookupTable<E> {
    /// Build a flat table from a `{key: entry}` dataset.
    ///
    /// Each key always maps to its entry. The entry's `name` and `synonyms` are
    /// added only where no other entry has taken the token yet.
    pub fn from_dataset(path: &Path, dataset: &Value) -> Result<Self> {
        let map = as_object(path, dataset, "top level")?;
        let mut table = Self::new();

        for (key, info) in map {
            let entry: Rc<E> = Rc::new(parse_entry(path, key, info.clone())?);
            table.insert(tokenize(key), Rc::clone(&entry));
            if let Some(name) = entry.name() {
                table.insert_if_absent(tokenize(name), &entry);
            }
            for synonym in entry.synonyms() {
                table.insert_if_absent(tokenize(synonym), &entry);
            }
        }

        Ok(table)
    }
}

pub(crate) fn as_object<'a>(
    path: &Path,
    value: &'a Value,
    what: &str,
) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ReferenceError::malformed(path, format!("{} is not a JSON object", what)))
}

pub(crate) fn parse_entry<E: ReferenceRecord>(path: &Path, key: &str, info: Value) -> Result<E> {
    if !info.is_object() {
        return Err(ReferenceError::malformed(
            path,
            format!("entry {:?} is not a JSON object", key),
        ));
    }
    serde_json::from_value(info)
        .map_err(|e| ReferenceError::malformed(path, format!("entry {:?}: {}", key, e)))
}

/// Built tables keyed by source path; each path is built at most once.
#[derive(Debug)]
pub struct TableCache<E> {
    tables: RefCell<HashMap<PathBuf, Rc<LookupTable<E>>>>,
}

impl<E> Default for TableCache<E> {
    fn default() -> Self {
        Self {
            tables: RefCell::new(HashMap::new()),
        }
    }
}

impl<E> TableCache<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table for `path`, building it from the cached dataset with `build`
    /// on first request.
    pub fn get_or_build<F>(
        &self,
        datasets: &DatasetCache,
        path: &Path,
        build: F,
    ) -> Result<Rc<LookupTable<E>>>
    where
        F: FnOnce(&Path, &Value) -> Result<LookupTable<E>>,
    {
        if let Some(table) = self.tables.borrow().get(path) {
            debug!("Lookup table cache hit for {}", path.display());
            return Ok(Rc::clone(table));
        }

        let dataset = datasets.load(path)?;
        let table = Rc::new(build(path, &dataset)?);
        info!(
            "Built lookup table from {} ({} tokens)",
            path.display(),
            table.len()
        );

        self.tables
            .borrow_mut()
            .insert(path.to_path_buf(), Rc::clone(&table));
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::entry::OrgEntry;
    use serde_json::json;

    fn org_table(dataset: Value) -> LookupTable<OrgEntry> {
        LookupTable::from_dataset(Path::new("org-map.json"), &dataset).unwrap()
    }

    #[test]
    fn test_keys_names_and_synonyms_are_tokens() {
        let table = org_table(json!({
            "Save the Children": {
                "name": "Save the Children International",
                "scope": "international",
                "synonyms": ["SCI", "Save-the-Children (UK)"],
            },
        }));

        for name in [
            "save the children",
            "SAVE THE CHILDREN INTERNATIONAL",
            "sci",
            "save the children uk",
        ] {
            let entry = table.lookup(name).unwrap_or_else(|| panic!("missing {}", name));
            assert_eq!(entry.scope.as_deref(), Some("international"));
        }
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_synonyms_never_steal_existing_tokens() {
        let table = org_table(json!({
            "CARE": {"name": "CARE International", "scope": "international"},
            "Care Somalia": {"name": "Care Somalia", "scope": "local", "synonyms": ["CARE"]},
        }));

        assert_eq!(table.lookup("care").unwrap().scope.as_deref(), Some("international"));
        assert_eq!(table.lookup("Care Somalia").unwrap().scope.as_deref(), Some("local"));
    }

    #[test]
    fn test_later_key_replaces_earlier_synonym() {
        let table = org_table(json!({
            "World Vision": {"name": "World Vision", "synonyms": ["WV"]},
            "WV": {"name": "WV Local Partner", "scope": "local"},
        }));

        assert_eq!(table.lookup("wv").unwrap().scope.as_deref(), Some("local"));
    }

    #[test]
    fn test_dataset_order_decides_precedence() {
        let table = org_table(json!({
            "Zamzam Foundation": {"name": "Zamzam Foundation", "scope": "local", "synonyms": ["Alpha"]},
            "Alpha Relief": {"name": "Alpha", "scope": "international"},
        }));

        assert_eq!(table.lookup("alpha").unwrap().scope.as_deref(), Some("local"));
        assert_eq!(table.lookup("alpha relief").unwrap().scope.as_deref(), Some("international"));
    }

    #[test]
    fn test_insert_if_absent_keeps_first_writer() {
        let mut table = LookupTable::new();
        let first = Rc::new(1);
        let second = Rc::new(2);
        assert!(table.insert_if_absent("x".to_string(), &first));
        assert!(!table.insert_if_absent("x".to_string(), &second));
        assert_eq!(**table.get("x").unwrap(), 1);
    }

    #[test]
    fn test_non_object_dataset_is_malformed() {
        let err = LookupTable::<OrgEntry>::from_dataset(Path::new("org-map.json"), &json!([1, 2]))
            .unwrap_err();
        assert!(matches!(err, ReferenceError::Malformed { .. }));

        let err = LookupTable::<OrgEntry>::from_dataset(
            Path::new("org-map.json"),
            &json!({"Oxfam": "not an object"}),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Oxfam"));
    }
}
