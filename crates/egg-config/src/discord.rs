//! Chat platform connection settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_command_prefix() -> String {
    "!".to_string()
}

const fn default_true() -> bool {
    true
}

/// Gateway intents requested when connecting.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct IntentsConfig {
    #[serde(default = "default_true")]
    pub presences: bool,
    #[serde(default = "default_true")]
    pub members: bool,
    #[serde(default = "default_true")]
    pub message_content: bool,
}

impl Default for IntentsConfig {
    fn default() -> Self {
        Self {
            presences: true,
            members: true,
            message_content: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscordConfig {
    /// Bot token. Also read from the bare `DISCORD_TOKEN` variable.
    #[serde(default)]
    pub token: String,

    /// Guild the bot operates in. Also read from the bare `GUILD_ID` variable.
    #[serde(default)]
    pub guild_id: Option<u64>,

    /// Prefix that marks a message as a command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    #[serde(default)]
    pub intents: IntentsConfig,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            guild_id: None,
            command_prefix: default_command_prefix(),
            intents: IntentsConfig::default(),
        }
    }
}

impl DiscordConfig {
    /// Check if a token is available for a real gateway connection.
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }

    /// Return the token or a `NotConfigured` error.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        if self.is_configured() {
            Ok(&self.token)
        } else {
            Err(ConfigError::NotConfigured {
                section: "discord".into(),
            })
        }
    }

    /// Reject prefixes the command parser cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command_prefix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "discord.command_prefix".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.command_prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue {
                field: "discord.command_prefix".into(),
                reason: "must not contain whitespace".into(),
            });
        }
        Ok(())
    }

    /// Token with everything but the last four characters masked.
    pub fn redacted_token(&self) -> String {
        let count = self.token.chars().count();
        if count <= 4 {
            return "*".repeat(count);
        }
        let tail: String = self.token.chars().skip(count - 4).collect();
        format!("****{tail}")
    }
}
