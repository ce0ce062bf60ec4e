//! `egg run`: the console gateway.
//!
//! Each stdin line is one `MessageEvent` as JSON; each reply is written to
//! stdout as one `ReplyEnvelope` line. This stands in for a chat platform
//! connection, so anything that can speak JSON lines can drive the bot.

use anyhow::Context;
use egg_bot::{Bot, MessageEvent, ReplyEnvelope};
use egg_config::{DiscordConfig, EggConfig};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::bootstrap::{store_path, store_registry};

/// Name the bot reports itself as when connected to the console.
const CONSOLE_USER: &str = "objeggtives#console";

/// Counters reported when the gateway closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GatewayStats {
    pub handled: u64,
    pub replies: u64,
    pub skipped: u64,
    pub failed: u64,
}

/// Handle `egg run`.
pub async fn handle(config: &EggConfig) -> anyhow::Result<()> {
    log_discord_settings(&config.discord);
    for kind in egg_bot::cogs::ListKind::ALL {
        store_path(config, kind.store_file)?;
    }

    let registry = store_registry(config);
    let bot = Bot::from_config(config, &registry)
        .await
        .context("failed to open list stores")?;
    bot.on_ready(CONSOLE_USER);

    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();
    tokio::select! {
        stats = serve(&bot, input, output) => {
            let stats = stats?;
            tracing::info!(
                handled = stats.handled,
                replies = stats.replies,
                skipped = stats.skipped,
                failed = stats.failed,
                "console gateway closed"
            );
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, shutting down");
        }
    }
    Ok(())
}

/// Feed every event line from `input` to `bot` and write the replies to `output`.
///
/// Lines that are not valid events are logged and skipped. A failing
/// message is logged and does not stop the gateway.
pub async fn serve<R, W>(bot: &Bot, input: R, mut output: W) -> anyhow::Result<GatewayStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut stats = GatewayStats::default();
    let mut lines = input.lines();

    while let Some(line) = lines
        .next_line()
        .await
        .context("failed to read gateway input")?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event: MessageEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(error) => {
                tracing::warn!(%error, "skipping invalid gateway line");
                stats.skipped += 1;
                continue;
            }
        };
        stats.handled += 1;

        let replies = match bot.handle(&event).await {
            Ok(replies) => replies,
            Err(error) => {
                tracing::error!(message_id = event.id, %error, "message handling failed");
                stats.failed += 1;
                continue;
            }
        };

        for reply in replies {
            let mut encoded = serde_json::to_vec(&ReplyEnvelope {
                message_id: event.id,
                reply,
            })?;
            encoded.push(b'\n');
            output
                .write_all(&encoded)
                .await
                .context("failed to write gateway output")?;
            stats.replies += 1;
        }
        output.flush().await.context("failed to flush gateway output")?;
    }

    Ok(stats)
}

fn log_discord_settings(discord: &DiscordConfig) {
    if discord.is_configured() {
        tracing::info!(
            token = %discord.redacted_token(),
            guild_id = ?discord.guild_id,
            presences = discord.intents.presences,
            members = discord.intents.members,
            message_content = discord.intents.message_content,
            "discord credentials present; serving the console gateway"
        );
    } else {
        tracing::info!("no discord token configured; serving the console gateway");
    }
}
