//! Message routing.

use chrono::{DateTime, Utc};
use egg_config::EggConfig;
use egg_db::StoreRegistry;

use crate::cogs::{CommandContext, DebugCog, ListCog, ListKind};
use crate::command::{self, Invocation};
use crate::error::BotError;
use crate::message::{MessageEvent, Reply};

/// Routes chat messages to cogs and collects their replies.
#[derive(Debug)]
pub struct Bot {
    prefix: String,
    lists: Vec<ListCog>,
}

impl Bot {
    /// A bot with only the debug commands.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            lists: Vec::new(),
        }
    }

    /// Add a list cog. Earlier cogs win when command names overlap.
    #[must_use]
    pub fn with_list(mut self, cog: ListCog) -> Self {
        self.lists.push(cog);
        self
    }

    /// Build a bot serving every known list, opening stores through `registry`.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Database` if a store cannot be opened.
    pub async fn from_config(
        config: &EggConfig,
        registry: &StoreRegistry,
    ) -> Result<Self, BotError> {
        let mut bot = Self::new(config.discord.command_prefix.clone());
        for kind in ListKind::ALL {
            let path = config.store.resolve(kind.store_file);
            let store = registry.get_liststore(&path, kind.name).await?;
            bot = bot.with_list(ListCog::new(kind, store));
        }
        Ok(bot)
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn lists(&self) -> &[ListCog] {
        &self.lists
    }

    /// Every command name the bot answers to.
    #[must_use]
    pub fn command_names(&self) -> Vec<&'static str> {
        let mut names = DebugCog::COMMANDS.to_vec();
        for cog in &self.lists {
            names.extend(cog.kind().command_names());
        }
        names
    }

    /// Called once the gateway session is up.
    pub fn on_ready(&self, user: &str) {
        tracing::info!(
            user,
            prefix = %self.prefix,
            commands = self.command_names().len(),
            "{user} has connected"
        );
    }

    /// Handle one message at the current time.
    ///
    /// # Errors
    ///
    /// See [`Self::handle_at`].
    pub async fn handle(&self, event: &MessageEvent) -> Result<Vec<Reply>, BotError> {
        self.handle_at(event, Utc::now()).await
    }

    /// Handle one message as if it arrived at `now`.
    ///
    /// Messages from bots, messages that are not commands, and unknown
    /// commands produce no replies. Mistakes by the sender come back as a
    /// text reply.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Database` when a store operation fails.
    pub async fn handle_at(
        &self,
        event: &MessageEvent,
        now: DateTime<Utc>,
    ) -> Result<Vec<Reply>, BotError> {
        if event.author.bot {
            return Ok(Vec::new());
        }
        let Some(invocation) = command::parse(&self.prefix, &event.content) else {
            return Ok(Vec::new());
        };

        let ctx = CommandContext {
            event,
            invocation: &invocation,
            prefix: &self.prefix,
            now,
        };
        match self.dispatch(&invocation, &ctx).await {
            Ok(replies) => Ok(replies),
            Err(error) if error.is_user_error() => {
                tracing::warn!(
                    command = %invocation.name,
                    message_id = event.id,
                    author_id = event.author.id,
                    %error,
                    "command rejected"
                );
                Ok(vec![Reply::text(error.to_string())])
            }
            Err(error) => {
                tracing::error!(
                    command = %invocation.name,
                    message_id = event.id,
                    %error,
                    "command failed"
                );
                Err(error)
            }
        }
    }

    async fn dispatch(
        &self,
        invocation: &Invocation<'_>,
        ctx: &CommandContext<'_>,
    ) -> Result<Vec<Reply>, BotError> {
        if DebugCog::handles(&invocation.name) {
            return Ok(vec![DebugCog::ping(ctx)]);
        }
        for cog in &self.lists {
            if let Some(command) = cog.kind().command(&invocation.name) {
                return cog.handle(command, ctx).await;
            }
        }
        tracing::debug!(command = %invocation.name, "unknown command");
        Ok(Vec::new())
    }
}
