//! Bot error types.

use egg_db::error::DatabaseError;
use thiserror::Error;

/// Errors from handling a chat message.
#[derive(Debug, Error)]
pub enum BotError {
    /// The store failed underneath a command.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// The command was malformed; the text explains the expected usage.
    #[error("{0}")]
    Usage(String),

    /// The command was well formed but cannot be applied (unknown item,
    /// item already closed).
    #[error("{0}")]
    Rejected(String),
}

impl BotError {
    /// Whether the error should be reported back to the sender instead of
    /// failing the handler.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Usage(_) | Self::Rejected(_))
    }
}
