//! List item repository: upsert, lookups, counts, and status changes.

use chrono::{DateTime, Utc};

use egg_core::entities::ListItem;
use egg_core::enums::{ItemStatus, Priority, TrailOp};
use egg_core::trail::TrailOperation;

use crate::ListStore;
use crate::error::DatabaseError;
use crate::helpers::{
    closed_at_value, from_sql_id, parse_closed_at, parse_priority, parse_timestamp, to_sql_id,
};

const SELECT_COLS: &str =
    "id, author, created_at, updated_at, closed_at, message_reference, message, priority";

/// Open items first by urgency, then oldest first.
const OPEN_ORDER: &str = "priority DESC, created_at ASC, id ASC";

fn row_to_item(row: &libsql::Row) -> Result<ListItem, DatabaseError> {
    Ok(ListItem {
        id: row.get(0)?,
        author: from_sql_id(row.get(1)?)?,
        created_at: parse_timestamp(row.get(2)?)?,
        updated_at: parse_timestamp(row.get(3)?)?,
        closed_at: parse_closed_at(row.get::<Option<i64>>(4)?)?,
        message_reference: row
            .get::<Option<i64>>(5)?
            .map(from_sql_id)
            .transpose()?,
        message: row.get(6)?,
        priority: parse_priority(row.get(7)?)?,
    })
}

/// Totals reported by [`ListStore::counts`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ItemCounts {
    pub total: u64,
    pub closed: u64,
}

impl ItemCounts {
    #[must_use]
    pub const fn open(self) -> u64 {
        self.total.saturating_sub(self.closed)
    }

    /// Share of closed items in percent; `0.0` for an empty list.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_closed(self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.closed as f64 / self.total as f64) * 100.0
        }
    }
}

impl ListStore {
    /// Insert an item, or update the existing one with the same
    /// `(author, message_reference)`.
    ///
    /// An update replaces `updated_at`, `closed_at`, `message` and `priority`;
    /// `id`, `author` and `created_at` keep their stored values. Returns the
    /// stored row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if an id does not fit the column or the
    /// statement fails.
    pub async fn write(&self, item: &ListItem) -> Result<ListItem, DatabaseError> {
        let author = to_sql_id(item.author)?;
        let reference = item.message_reference.map(to_sql_id).transpose()?;
        let closed_at = closed_at_value(item.closed_at)?;

        let _guard = self.write_lock.lock().await;

        let mut rows = self
            .conn
            .query(
                "INSERT INTO liststore
                    (author, created_at, updated_at, closed_at, message_reference, message, priority)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT (author, message_reference) DO UPDATE SET
                    updated_at = excluded.updated_at,
                    closed_at = excluded.closed_at,
                    message = excluded.message,
                    priority = excluded.priority
                 RETURNING id",
                libsql::params![
                    author,
                    item.created_at.timestamp(),
                    item.updated_at.timestamp(),
                    closed_at,
                    reference,
                    item.message.as_str(),
                    item.priority.as_i64()
                ],
            )
            .await?;
        let id: i64 = rows.next().await?.ok_or(DatabaseError::NoResult)?.get(0)?;
        drop(rows);

        let stored = self.get(id).await?;
        tracing::debug!(store = %self.name, id, author = item.author, "list item written");

        self.record(TrailOp::Write, id, &stored)?;
        Ok(stored)
    }

    /// Fetch one item by row id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no such row exists.
    pub async fn get(&self, id: i64) -> Result<ListItem, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT {SELECT_COLS} FROM liststore WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_item(&row)
    }

    /// Fetch the most recently created item linked to a message.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no item references the message.
    pub async fn find_by_reference(&self, message_reference: u64) -> Result<ListItem, DatabaseError> {
        let reference = to_sql_id(message_reference)?;
        let mut rows = self
            .conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM liststore WHERE message_reference = ?1
                     ORDER BY created_at DESC, id DESC LIMIT 1"
                ),
                [reference],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_item(&row)
    }

    /// All items that are not closed, most urgent first.
    pub async fn get_open(&self) -> Result<Vec<ListItem>, DatabaseError> {
        self.select_items(&format!(
            "SELECT {SELECT_COLS} FROM liststore
             WHERE COALESCE(closed_at, 0) = 0
             ORDER BY {OPEN_ORDER}"
        ))
        .await
    }

    /// Every item, open before closed. `limit` caps the rows when given.
    pub async fn get_all(&self, limit: Option<u32>) -> Result<Vec<ListItem>, DatabaseError> {
        let limit = limit.map_or_else(String::new, |limit| format!(" LIMIT {limit}"));
        self.select_items(&format!(
            "SELECT {SELECT_COLS} FROM liststore
             ORDER BY COALESCE(closed_at, 0) != 0, {OPEN_ORDER}{limit}"
        ))
        .await
    }

    async fn select_items(&self, sql: &str) -> Result<Vec<ListItem>, DatabaseError> {
        let mut rows = self.conn.query(sql, ()).await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_item(&row)?);
        }
        Ok(items)
    }

    /// Total and closed item counts.
    pub async fn counts(&self) -> Result<ItemCounts, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT COUNT(*), COALESCE(SUM(COALESCE(closed_at, 0) != 0), 0) FROM liststore",
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(ItemCounts {
            total: from_sql_id(row.get(0)?)?,
            closed: from_sql_id(row.get(1)?)?,
        })
    }

    /// Mark an item closed at `at`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if the item is already closed,
    /// or `DatabaseError::NoResult` if it does not exist.
    pub async fn close(&self, id: i64, at: DateTime<Utc>) -> Result<ListItem, DatabaseError> {
        self.transition(id, ItemStatus::Closed, at).await
    }

    /// Reopen a closed item.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if the item is open, or
    /// `DatabaseError::NoResult` if it does not exist.
    pub async fn reopen(&self, id: i64, at: DateTime<Utc>) -> Result<ListItem, DatabaseError> {
        self.transition(id, ItemStatus::Open, at).await
    }

    async fn transition(
        &self,
        id: i64,
        next: ItemStatus,
        at: DateTime<Utc>,
    ) -> Result<ListItem, DatabaseError> {
        let _guard = self.write_lock.lock().await;

        let current = self.get(id).await?;
        if !current.status().can_transition_to(next) {
            return Err(DatabaseError::InvalidState(format!(
                "Cannot transition item {id} from {} to {next}",
                current.status()
            )));
        }

        let closed_at = match next {
            ItemStatus::Closed => Some(at),
            ItemStatus::Open => None,
        };
        self.conn
            .execute(
                "UPDATE liststore SET closed_at = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![closed_at_value(closed_at)?, at.timestamp(), id],
            )
            .await?;

        let updated = self.get(id).await?;
        tracing::info!(store = %self.name, id, from = %current.status(), to = %next, "list item transitioned");

        let op = match next {
            ItemStatus::Closed => TrailOp::Close,
            ItemStatus::Open => TrailOp::Reopen,
        };
        self.record(
            op,
            id,
            &serde_json::json!({ "closed_at": updated.closed_at, "updated_at": updated.updated_at }),
        )?;
        Ok(updated)
    }

    /// Change an item's priority.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the item does not exist.
    pub async fn set_priority(
        &self,
        id: i64,
        priority: Priority,
        at: DateTime<Utc>,
    ) -> Result<ListItem, DatabaseError> {
        let _guard = self.write_lock.lock().await;

        let changed = self
            .conn
            .execute(
                "UPDATE liststore SET priority = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![priority.as_i64(), at.timestamp(), id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        let updated = self.get(id).await?;
        tracing::info!(store = %self.name, id, %priority, "list item prioritized");

        self.record(
            TrailOp::Prioritize,
            id,
            &serde_json::json!({ "priority": priority, "updated_at": updated.updated_at }),
        )?;
        Ok(updated)
    }

    fn record<T: serde::Serialize>(
        &self,
        op: TrailOp,
        id: i64,
        data: &T,
    ) -> Result<(), DatabaseError> {
        if !self.trail.is_enabled() {
            return Ok(());
        }
        self.trail.append(&TrailOperation {
            v: 1,
            ts: Utc::now().to_rfc3339(),
            store: self.name.clone(),
            op,
            id,
            data: serde_json::to_value(data).map_err(|e| DatabaseError::Other(e.into()))?,
        })
    }
}
