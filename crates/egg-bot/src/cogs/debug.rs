//! Liveness commands.

use crate::cogs::CommandContext;
use crate::message::Reply;

/// Seconds before the ping reply removes itself.
const PING_DELETE_AFTER_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct DebugCog;

impl DebugCog {
    pub const COMMANDS: &'static [&'static str] = &["ping"];

    #[must_use]
    pub fn handles(name: &str) -> bool {
        Self::COMMANDS.contains(&name)
    }

    /// Reply with the time between the message being sent and handled.
    #[must_use]
    pub fn ping(ctx: &CommandContext<'_>) -> Reply {
        let elapsed = (ctx.now - ctx.event.created_at).num_milliseconds().max(0);
        #[allow(clippy::cast_precision_loss)]
        let seconds = elapsed as f64 / 1000.0;
        Reply::Text {
            content: format!("Pong! {seconds:.2}s"),
            delete_after_secs: Some(PING_DELETE_AFTER_SECS),
        }
    }
}
