//! Shared list store handles.
//!
//! Every caller asking for the same path gets the same `Arc<ListStore>`, and
//! therefore the same connection. For `:memory:` that means the same database.
//! In-memory stores are additionally keyed by name so two lists never share
//! one table.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::DatabaseError;
use crate::trail::TrailWriter;
use crate::{ListStore, MEMORY};

/// Process-wide cache of open list stores, keyed by path.
#[derive(Debug, Default)]
pub struct StoreRegistry {
    stores: Mutex<HashMap<String, Arc<ListStore>>>,
    trail_dir: Option<PathBuf>,
}

impl StoreRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record mutations of every store opened through this registry under `trail_dir`.
    #[must_use]
    pub fn with_trail_dir(mut self, trail_dir: Option<PathBuf>) -> Self {
        self.trail_dir = trail_dir;
        self
    }

    /// Return the shared handle for `path`, opening it on first use.
    ///
    /// A missing file is initialized. `name` labels the store in trail
    /// records and logs; only the first caller's name is kept.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store cannot be opened or created.
    pub async fn get_liststore(
        &self,
        path: &str,
        name: &str,
    ) -> Result<Arc<ListStore>, DatabaseError> {
        let key = if path == MEMORY {
            format!("{MEMORY}{name}")
        } else {
            path.to_string()
        };
        if let Some(store) = self.cached(&key) {
            return Ok(store);
        }

        let trail = match &self.trail_dir {
            Some(dir) => TrailWriter::new(dir.clone())?,
            None => TrailWriter::disabled(),
        };
        let opened = Arc::new(
            ListStore::open_or_initialize(path)
                .await?
                .with_name(name)
                .with_trail(trail),
        );

        // Another task may have opened the same path while we awaited; first insert wins.
        let mut stores = self.stores.lock().unwrap_or_else(PoisonError::into_inner);
        let store = stores
            .entry(key)
            .or_insert_with(|| {
                tracing::info!(path, store = name, "list store registered");
                opened
            })
            .clone();
        Ok(store)
    }

    /// Handles currently held by the registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cached(&self, key: &str) -> Option<Arc<ListStore>> {
        self.stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}
