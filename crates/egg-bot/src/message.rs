//! Incoming message events and outgoing replies.
//!
//! These are the only types a gateway has to produce and consume. Both sides
//! serialize to JSON so any transport that can carry JSON can drive the bot.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The user who sent a message.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Author {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Messages from bots are never treated as commands.
    #[serde(default)]
    pub bot: bool,
}

impl Author {
    /// Display name, falling back to the account name.
    #[must_use]
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// The message a command replied to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReferencedMessage {
    pub id: u64,
    #[serde(default)]
    pub content: String,
}

/// A chat message as delivered by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MessageEvent {
    pub id: u64,
    pub author: Author,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced: Option<ReferencedMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EmbedAuthor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

/// Rich message card.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// RGB color, e.g. `0x9900CC`.
    pub color: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

/// Something the bot wants the gateway to do in response to a message.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    /// Send a plain message to the channel.
    Text {
        content: String,
        /// Delete the sent message after this many seconds.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delete_after_secs: Option<u64>,
    },
    /// Send an embed to the channel.
    Embed(Embed),
    /// React to the triggering message.
    React { emoji: String },
}

impl Reply {
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            delete_after_secs: None,
        }
    }

    #[must_use]
    pub fn react(emoji: impl Into<String>) -> Self {
        Self::React {
            emoji: emoji.into(),
        }
    }
}

/// A reply tagged with the message it answers, as written by the console gateway.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReplyEnvelope {
    pub message_id: u64,
    pub reply: Reply,
}
