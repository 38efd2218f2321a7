// src/reference/dataset.rs - Load-once cache of raw reference JSON
use log::{debug, info};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::reference::error::{ReferenceError, Result};

/// Parsed reference datasets keyed by path. Each path is read from disk at most
/// once for the lifetime of the cache.
#[derive(Debug, Default)]
pub struct DatasetCache {
    loaded: RefCell<HashMap<PathBuf, Rc<Value>>>,
    reads: Cell<usize>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the parsed JSON at `path`, reading it on first request.
    pub fn load(&self, path: &Path) -> Result<Rc<Value>> {
        if let Some(value) = self.loaded.borrow().get(path) {
            debug!("Dataset cache hit for {}", path.display());
            return Ok(Rc::clone(value));
        }

        let value = Rc::new(read_json(path)?);
        self.reads.set(self.reads.get() + 1);
        info!("Loaded dataset {}", path.display());

        self.loaded
            .borrow_mut()
            .insert(path.to_path_buf(), Rc::clone(&value));
        Ok(value)
    }

    /// Number of files actually read from disk so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|error| ReferenceError::Io {
        path: path.to_path_buf(),
        error,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|error| ReferenceError::Parse {
        path: path.to_path_buf(),
        error,
    })
}
