//! # egg-bot
//!
//! Chat-platform-agnostic core of the objeggtives bot.
//!
//! A gateway turns platform messages into [`MessageEvent`]s, hands them to
//! [`Bot::handle`], and carries out the returned [`Reply`]s. Commands are
//! prefix-based (`!egg buy milk`) and grouped into cogs:
//!
//! - `debug`: `ping`
//! - `list`: write, list, info, close and prioritize items, once per list
//!   kind (`shopping`, `objeggtives`)

mod bot;
pub mod cogs;
pub mod command;
pub mod error;
pub mod message;

pub use bot::Bot;
pub use error::BotError;
pub use message::{MessageEvent, Reply, ReplyEnvelope};
