//! File-backed list store behavior: creation rules, persistence, and
//! concurrent writers sharing one handle.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use egg_core::entities::ListItem;
use egg_core::enums::Priority;
use egg_db::error::DatabaseError;
use egg_db::{ListStore, MEMORY, StoreRegistry};
use tokio::sync::Barrier;

fn item(author: u64, reference: u64, message: &str, priority: Priority) -> ListItem {
    let now = Utc.timestamp_opt(3, 0).unwrap();
    ListItem {
        created_at: Utc.timestamp_opt(2, 0).unwrap(),
        ..ListItem::new(author, Some(reference), message, now).with_priority(priority)
    }
}

/// Read every row through a separate connection, as an outside reader would.
async fn raw_rows(path: &str) -> Vec<(i64, i64, i64, i64, i64, i64, String, i64)> {
    let db = libsql::Builder::new_local(path).build().await.unwrap();
    let conn = db.connect().unwrap();
    let mut rows = conn
        .query("SELECT * FROM liststore ORDER BY id", ())
        .await
        .unwrap();
    let mut out = Vec::new();
    while let Some(row) = rows.next().await.unwrap() {
        out.push((
            row.get(0).unwrap(),
            row.get(1).unwrap(),
            row.get(2).unwrap(),
            row.get(3).unwrap(),
            row.get(4).unwrap(),
            row.get(5).unwrap(),
            row.get(6).unwrap(),
            row.get(7).unwrap(),
        ));
    }
    out
}

#[tokio::test]
async fn initialize_refuses_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    std::fs::write(&path, "").unwrap();

    let result = ListStore::initialize(&path.to_string_lossy()).await;
    assert!(matches!(result, Err(DatabaseError::AlreadyExists(_))));
}

#[tokio::test]
async fn initialize_creates_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db").to_string_lossy().into_owned();

    ListStore::initialize(&path).await.unwrap();

    let db = libsql::Builder::new_local(&path).build().await.unwrap();
    let conn = db.connect().unwrap();
    let mut rows = conn
        .query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='liststore'",
            (),
        )
        .await
        .unwrap();
    assert!(rows.next().await.unwrap().is_some());
}

#[tokio::test]
async fn open_requires_existing_file() {
    let result = ListStore::open("thisfiledoesnotexist.db").await;
    assert!(matches!(result, Err(DatabaseError::NotFound(_))));
}

#[tokio::test]
async fn memory_is_always_allowed() {
    ListStore::open(MEMORY).await.unwrap();
    ListStore::initialize(MEMORY).await.unwrap();
}

#[tokio::test]
async fn open_after_initialize_sees_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db").to_string_lossy().into_owned();
    ListStore::initialize(&path).await.unwrap();

    let store = ListStore::open(&path).await.unwrap();
    assert!(store.connected().await);
    assert_eq!(store.counts().await.unwrap().total, 0);
}

#[tokio::test]
async fn writes_are_persisted_with_priority_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db").to_string_lossy().into_owned();

    {
        let store = ListStore::initialize(&path).await.unwrap();
        store
            .write(&item(1, 5, "message", Priority::Low))
            .await
            .unwrap();
        store
            .write(&item(1, 6, "other message", Priority::High))
            .await
            .unwrap();
    }

    let rows = raw_rows(&path).await;
    assert_eq!(
        rows,
        vec![
            (1, 1, 2, 3, 0, 5, "message".to_string(), 1),
            (2, 1, 2, 3, 0, 6, "other message".to_string(), 3),
        ]
    );
}

#[tokio::test]
async fn rewrite_updates_existing_row_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db").to_string_lossy().into_owned();

    {
        let store = ListStore::initialize(&path).await.unwrap();
        store
            .write(&item(1, 5, "message", Priority::Low))
            .await
            .unwrap();
        store
            .write(&ListItem {
                updated_at: Utc.timestamp_opt(8, 0).unwrap(),
                closed_at: Some(Utc.timestamp_opt(9, 0).unwrap()),
                ..item(1, 5, "new message", Priority::High)
            })
            .await
            .unwrap();
    }

    let rows = raw_rows(&path).await;
    assert_eq!(rows, vec![(1, 1, 2, 8, 9, 5, "new message".to_string(), 3)]);
}

#[tokio::test]
async fn registry_creates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");

    let registry = StoreRegistry::new();
    registry
        .get_liststore(&path.to_string_lossy(), "test")
        .await
        .unwrap();

    assert!(path.exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_share_one_handle() {
    const WRITERS: u64 = 10;
    const ROWS_PER_WRITER: u64 = 60;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db").to_string_lossy().into_owned();
    let store = Arc::new(ListStore::initialize(&path).await.unwrap());
    let start = Arc::new(Barrier::new(usize::try_from(WRITERS).unwrap()));

    let mut handles = Vec::new();
    for writer in 0..WRITERS {
        let store = Arc::clone(&store);
        let start = Arc::clone(&start);
        handles.push(tokio::spawn(async move {
            start.wait().await;
            for idx in 0..ROWS_PER_WRITER {
                store
                    .write(&item(writer, idx, "foo", Priority::Low))
                    .await
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.counts().await.unwrap().total, WRITERS * ROWS_PER_WRITER);
    drop(store);

    let rows = raw_rows(&path).await;
    assert_eq!(rows.len(), usize::try_from(WRITERS * ROWS_PER_WRITER).unwrap());
}
