//! Shared test utilities for egg-db unit tests.

pub(crate) mod helpers {
    use chrono::{DateTime, TimeZone, Utc};
    use egg_core::entities::ListItem;

    use crate::{ListStore, MEMORY};

    /// Create an in-memory store with trail disabled.
    pub async fn memory_store() -> ListStore {
        ListStore::open(MEMORY).await.unwrap()
    }

    /// Unix timestamp `secs` as a UTC datetime.
    pub fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    /// Open item linked to `reference`, stamped at t=1000.
    pub fn item(author: u64, reference: u64, message: &str) -> ListItem {
        ListItem::new(author, Some(reference), message, at(1_000))
    }
}
