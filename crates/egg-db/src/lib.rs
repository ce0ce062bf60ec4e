//! # egg-db
//!
//! libSQL list stores for objeggtives.
//!
//! Each list lives in its own database file holding a single `liststore`
//! table. A `ListStore` owns one connection; the `StoreRegistry` hands out
//! shared handles so every caller asking for the same file talks to the same
//! connection.

pub mod error;
pub mod helpers;
pub mod items;
mod migrations;
pub mod registry;
pub mod trail;

#[cfg(test)]
mod test_support;

use std::path::Path;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::Mutex;
use trail::TrailWriter;

pub use registry::StoreRegistry;

pub use egg_core::MEMORY;

/// Handle to one list store file.
///
/// Reads go straight to the connection. Mutations hold `write_lock` for the
/// statement and its read-back, so concurrent writers on a shared handle are
/// serialized.
pub struct ListStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    path: String,
    name: String,
    trail: TrailWriter,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for ListStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListStore")
            .field("path", &self.path)
            .field("name", &self.name)
            .field("trail", &self.trail)
            .finish_non_exhaustive()
    }
}

impl ListStore {
    /// Create the store file and its schema.
    ///
    /// `:memory:` is always accepted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::AlreadyExists` if the file exists, or
    /// `DatabaseError` if it cannot be created or migrated.
    pub async fn initialize(path: &str) -> Result<Self, DatabaseError> {
        if path != MEMORY && Path::new(path).exists() {
            return Err(DatabaseError::AlreadyExists(path.to_string()));
        }
        tracing::info!(path, "initializing list store");
        Self::connect(path).await
    }

    /// Open an existing store file. Migrations run on every open.
    ///
    /// `:memory:` is always accepted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the file does not exist, or
    /// `DatabaseError` if it cannot be opened or migrated.
    pub async fn open(path: &str) -> Result<Self, DatabaseError> {
        if path != MEMORY && !Path::new(path).exists() {
            return Err(DatabaseError::NotFound(path.to_string()));
        }
        Self::connect(path).await
    }

    /// Open the store file, creating it first when missing.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store cannot be opened or created.
    pub async fn open_or_initialize(path: &str) -> Result<Self, DatabaseError> {
        if path == MEMORY || Path::new(path).exists() {
            Self::open(path).await
        } else {
            Self::initialize(path).await
        }
    }

    async fn connect(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let store = Self {
            db,
            conn,
            path: path.to_string(),
            name: store_name(path),
            trail: TrailWriter::disabled(),
            write_lock: Mutex::new(()),
        };
        store.run_migrations().await?;
        tracing::debug!(path, store = %store.name, "list store connected");
        Ok(store)
    }

    /// Record every mutation in the given trail.
    #[must_use]
    pub fn with_trail(mut self, trail: TrailWriter) -> Self {
        self.trail = trail;
        self
    }

    /// Override the name used in trail records and logs.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Path the store was opened with.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Store name used in trail records and logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn trail(&self) -> &TrailWriter {
        &self.trail
    }

    /// Whether the connection answers a trivial query.
    pub async fn connected(&self) -> bool {
        match self.conn.query("SELECT 1", ()).await {
            Ok(mut rows) => matches!(rows.next().await, Ok(Some(_))),
            Err(error) => {
                tracing::warn!(store = %self.name, %error, "connection check failed");
                false
            }
        }
    }
}

/// Derive a store name from its path: the file stem, or `memory`.
fn store_name(path: &str) -> String {
    if path == MEMORY {
        return "memory".to_string();
    }
    Path::new(path)
        .file_stem()
        .map_or_else(|| path.to_string(), |stem| stem.to_string_lossy().into_owned())
}
