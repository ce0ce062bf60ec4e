//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::ListStore;
use crate::error::DatabaseError;

/// `liststore` table, unique `(author, message_reference)` index, `closed_at` index.
const MIGRATION_001: &str = include_str!("../migrations/001_liststore.sql");

impl ListStore {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.ensure_priority_column().await?;
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_liststore: {e}")))?;
        Ok(())
    }

    /// Store files created before priorities existed lack the column.
    async fn ensure_priority_column(&self) -> Result<(), DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT name FROM pragma_table_info('liststore')", ())
            .await?;

        let mut has_table = false;
        while let Some(row) = rows.next().await? {
            has_table = true;
            if row.get::<String>(0)? == "priority" {
                return Ok(());
            }
        }

        if has_table {
            tracing::info!(store = %self.name, "adding priority column to legacy store");
            self.conn
                .execute(
                    "ALTER TABLE liststore ADD COLUMN priority INTEGER NOT NULL DEFAULT 0",
                    (),
                )
                .await
                .map_err(|e| DatabaseError::Migration(format!("priority column: {e}")))?;
        }
        Ok(())
    }
}
