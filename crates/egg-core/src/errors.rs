//! Errors raised by the core types.
//!
//! Store and bot failures have their own enums in `egg-db` and `egg-bot`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A value outside what a core type accepts, e.g. priority `7`.
    #[error("invalid value: {0}")]
    Validation(String),
}
