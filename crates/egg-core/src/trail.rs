//! JSONL trail operation envelope.
//!
//! Every store mutation can be recorded as a `TrailOperation` in per-list
//! `{trail_dir}/{store}.jsonl` files.
//!
//! Old trail files without a `v` field deserialize with `v == 1` via
//! `#[serde(default)]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TrailOp;

/// Default trail version for trail lines written before versioning.
const fn default_trail_version() -> u32 {
    1
}

/// A single operation recorded in the JSONL trail.
///
/// `data` holds the full item for `Write`, and the changed fields for the
/// other operations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrailOperation {
    /// Schema version. Defaults to 1 for old trails without this field.
    #[serde(default = "default_trail_version")]
    pub v: u32,

    /// RFC 3339 timestamp of the operation.
    pub ts: String,

    /// Name of the list store that was mutated.
    pub store: String,

    /// What kind of mutation this represents.
    pub op: TrailOp,

    /// Row id of the affected item.
    pub id: i64,

    /// Operation payload.
    pub data: serde_json::Value,
}
