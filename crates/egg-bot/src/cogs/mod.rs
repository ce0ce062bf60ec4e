//! Command groups.
//!
//! A cog owns a set of command names and whatever state its commands need.
//! The bot routes each parsed invocation to the first cog claiming the name.

pub mod debug;
pub mod list;

use chrono::{DateTime, Utc};

use crate::command::Invocation;
use crate::message::MessageEvent;

pub use debug::DebugCog;
pub use list::{ListCog, ListCommand, ListKind};

/// Everything a command handler gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    pub event: &'a MessageEvent,
    pub invocation: &'a Invocation<'a>,
    /// Command prefix in use, for usage messages.
    pub prefix: &'a str,
    /// Time the message is being handled.
    pub now: DateTime<Utc>,
}

impl CommandContext<'_> {
    /// The invoked command as the sender typed it, e.g. `!egg`.
    #[must_use]
    pub fn command(&self) -> String {
        format!("{}{}", self.prefix, self.invocation.name)
    }
}
