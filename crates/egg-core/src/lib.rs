//! # egg-core
//!
//! Core types and error types for objeggtives.
//!
//! This crate provides the foundational types shared across all objeggtives crates:
//! - The `ListItem` entity stored in every list
//! - Priority and status enums
//! - The core validation error
//! - Trail operation envelope for JSONL persistence

pub mod entities;
pub mod enums;
pub mod errors;
pub mod trail;

/// Store path that keeps a list in memory instead of a file.
///
/// libSQL opens this path as an in-memory database; config and the store
/// registry both compare against it.
pub const MEMORY: &str = ":memory:";
