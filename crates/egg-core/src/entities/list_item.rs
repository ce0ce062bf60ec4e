use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ItemStatus, Priority};

/// A single entry in a list, created from a chat message.
///
/// `(author, message_reference)` identifies the item: writing the same pair
/// again updates the existing row instead of inserting a new one.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ListItem {
    /// Row id. `0` until the item has been written.
    #[serde(default)]
    pub id: i64,
    pub author: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub message_reference: Option<u64>,
    pub message: String,
    pub priority: Priority,
}

impl ListItem {
    /// Build a new open item stamped with `now`.
    #[must_use]
    pub fn new(
        author: u64,
        message_reference: Option<u64>,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            author,
            created_at: now,
            updated_at: now,
            closed_at: None,
            message_reference,
            message: message.into(),
            priority: Priority::None,
        }
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub const fn status(&self) -> ItemStatus {
        if self.closed_at.is_some() {
            ItemStatus::Closed
        } else {
            ItemStatus::Open
        }
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed_at.is_some()
    }
}
