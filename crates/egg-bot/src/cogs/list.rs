//! List commands: write, list, info, close and prioritize items of one list.
//!
//! The same cog serves every list; a [`ListKind`] supplies the store file,
//! wording and command names.

use std::sync::Arc;

use egg_core::entities::ListItem;
use egg_core::enums::Priority;
use egg_db::ListStore;
use egg_db::error::DatabaseError;

use crate::cogs::CommandContext;
use crate::error::BotError;
use crate::message::{Embed, EmbedAuthor, Reply};

const INFO_COLOR: u32 = 0x0034_98DB;
const LIST_COLOR: u32 = 0x0099_00CC;

const WRITTEN: &str = "📝";
const CLOSED: &str = "✅";
const PRIORITIZED: &str = "🔺";

/// Operations a list cog understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCommand {
    Info,
    Write,
    List,
    Close,
    Prioritize,
}

/// Static description of one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListKind {
    /// Store name used in logs and trail files.
    pub name: &'static str,
    /// Title-cased name for the info embed.
    pub title: &'static str,
    /// What one entry is called in replies.
    pub noun: &'static str,
    /// Database file name inside the data directory.
    pub store_file: &'static str,
    pub info: &'static [&'static str],
    pub write: &'static [&'static str],
    pub list: &'static [&'static str],
    pub close: &'static [&'static str],
    pub prioritize: &'static [&'static str],
}

impl ListKind {
    pub const SHOPPING: Self = Self {
        name: "shopping",
        title: "Shopping",
        noun: "shopping list",
        store_file: "shopping.db",
        info: &["shoppinginfo"],
        write: &["shoppingwrite", "sget", "shoppingget"],
        list: &["shoppinglist", "slist"],
        close: &["shoppingclose", "sclose"],
        prioritize: &["shoppingprio", "sprio"],
    };

    pub const OBJEGGTIVES: Self = Self {
        name: "objeggtives",
        title: "Objeggtives",
        noun: "objeggtive",
        store_file: "objeggtives.db",
        info: &["egginfo"],
        write: &["egg", "eggadd", "objeggtive"],
        list: &["eggs", "egglist"],
        close: &["eggclose", "eggdone"],
        prioritize: &["eggprio", "eggpriority"],
    };

    pub const ALL: [Self; 2] = [Self::SHOPPING, Self::OBJEGGTIVES];

    /// Map a lowercased command name to the operation it names.
    #[must_use]
    pub fn command(&self, name: &str) -> Option<ListCommand> {
        [
            (self.info, ListCommand::Info),
            (self.write, ListCommand::Write),
            (self.list, ListCommand::List),
            (self.close, ListCommand::Close),
            (self.prioritize, ListCommand::Prioritize),
        ]
        .into_iter()
        .find(|(names, _)| names.contains(&name))
        .map(|(_, command)| command)
    }

    /// Every command name this kind answers to.
    #[must_use]
    pub fn command_names(&self) -> Vec<&'static str> {
        [self.info, self.write, self.list, self.close, self.prioritize].concat()
    }
}

/// Commands for one list backed by a shared store handle.
#[derive(Debug, Clone)]
pub struct ListCog {
    kind: ListKind,
    store: Arc<ListStore>,
}

impl ListCog {
    #[must_use]
    pub fn new(kind: ListKind, store: Arc<ListStore>) -> Self {
        tracing::info!(cog = kind.name, store = store.path(), "list cog initialized");
        Self { kind, store }
    }

    #[must_use]
    pub const fn kind(&self) -> &ListKind {
        &self.kind
    }

    #[must_use]
    pub fn store(&self) -> &ListStore {
        &self.store
    }

    /// Run `command` for the message in `ctx`.
    ///
    /// # Errors
    ///
    /// Returns `BotError::Usage`/`BotError::Rejected` for input the sender
    /// has to fix, and `BotError::Database` when the store fails.
    pub async fn handle(
        &self,
        command: ListCommand,
        ctx: &CommandContext<'_>,
    ) -> Result<Vec<Reply>, BotError> {
        let author = &ctx.event.author;
        tracing::info!(
            cog = self.kind.name,
            command = ?command,
            author = %author.name,
            author_id = author.id,
            "list command requested"
        );

        let reply = match command {
            ListCommand::Info => self.info().await?,
            ListCommand::Write => self.write(ctx).await?,
            ListCommand::List => self.list(ctx).await?,
            ListCommand::Close => self.close(ctx).await?,
            ListCommand::Prioritize => self.prioritize(ctx).await?,
        };
        Ok(vec![reply])
    }

    async fn info(&self) -> Result<Reply, BotError> {
        let connected = self.store.connected().await;
        let counts = self.store.counts().await?;

        let description = format!(
            "Store Name: {}\nConnected: {connected}\nTotal Items: {}\nClosed Items: {}\nPercent Closed: {:.2}%",
            self.kind.store_file,
            counts.total,
            counts.closed,
            counts.percent_closed(),
        );
        Ok(Reply::Embed(Embed {
            title: format!("{} Store Info", self.kind.title),
            description,
            color: INFO_COLOR,
            ..Embed::default()
        }))
    }

    async fn write(&self, ctx: &CommandContext<'_>) -> Result<Reply, BotError> {
        let event = ctx.event;
        let text = if ctx.invocation.args.is_empty() {
            event
                .referenced
                .as_ref()
                .map_or("", |referenced| referenced.content.trim())
        } else {
            ctx.invocation.args
        };
        if text.is_empty() {
            return Err(BotError::Usage(format!(
                "Usage: {} <text>, or reply to a message with {0}",
                ctx.command()
            )));
        }

        let reference = event.referenced.as_ref().map_or(event.id, |r| r.id);
        let item = ListItem::new(event.author.id, Some(reference), text, ctx.now);
        let stored = self.store.write(&item).await?;
        tracing::info!(cog = self.kind.name, id = stored.id, reference, "list item stored");

        Ok(Reply::react(WRITTEN))
    }

    async fn list(&self, ctx: &CommandContext<'_>) -> Result<Reply, BotError> {
        let items = self.store.get_open().await?;
        let description = if items.is_empty() {
            "Nothing here yet.".to_string()
        } else {
            items.iter().map(format_line).collect::<Vec<_>>().join("\n")
        };

        let author = &ctx.event.author;
        Ok(Reply::Embed(Embed {
            title: format!("Active {} items:", self.kind.noun),
            description,
            color: LIST_COLOR,
            author: Some(EmbedAuthor {
                name: author.shown_name().to_string(),
                icon_url: author.avatar_url.clone(),
            }),
            fields: Vec::new(),
        }))
    }

    async fn close(&self, ctx: &CommandContext<'_>) -> Result<Reply, BotError> {
        let target = ctx.invocation.args.split_whitespace().next();
        let item = self.resolve_target(ctx, target).await?;

        match self.store.close(item.id, ctx.now).await {
            Ok(_) => Ok(Reply::react(CLOSED)),
            Err(DatabaseError::InvalidState(_)) => Err(BotError::Rejected(format!(
                "{} #{} is already closed.",
                capitalize(self.kind.noun),
                item.id
            ))),
            Err(error) => Err(error.into()),
        }
    }

    async fn prioritize(&self, ctx: &CommandContext<'_>) -> Result<Reply, BotError> {
        let mut words = ctx.invocation.args.split_whitespace();
        let usage = || {
            BotError::Usage(format!(
                "Usage: {} <none|low|medium|high> [#id]",
                ctx.command()
            ))
        };

        let priority: Priority = words
            .next()
            .ok_or_else(usage)?
            .parse()
            .map_err(|_| usage())?;
        let item = self.resolve_target(ctx, words.next()).await?;

        self.store.set_priority(item.id, priority, ctx.now).await?;
        Ok(Reply::react(PRIORITIZED))
    }

    /// Find the item named by `#id`/`id`, or the one linked to the message
    /// being replied to.
    async fn resolve_target(
        &self,
        ctx: &CommandContext<'_>,
        target: Option<&str>,
    ) -> Result<ListItem, BotError> {
        if let Some(target) = target {
            let id = parse_item_id(target).ok_or_else(|| {
                BotError::Usage(format!(
                    "'{target}' is not an item id. Use #id as shown by the list command."
                ))
            })?;
            return self.store.get(id).await.map_err(|error| match error {
                DatabaseError::NoResult => {
                    BotError::Rejected(format!("No {} item #{id}.", self.kind.noun))
                }
                other => other.into(),
            });
        }

        let Some(referenced) = &ctx.event.referenced else {
            return Err(BotError::Usage(format!(
                "Usage: {} #id, or reply to the item's message",
                ctx.command()
            )));
        };
        self.store
            .find_by_reference(referenced.id)
            .await
            .map_err(|error| match error {
                DatabaseError::NoResult => BotError::Rejected(format!(
                    "That message has no {} item.",
                    self.kind.noun
                )),
                other => other.into(),
            })
    }
}

/// Parse `#12` or `12`.
fn parse_item_id(text: &str) -> Option<i64> {
    text.strip_prefix('#')
        .unwrap_or(text)
        .parse()
        .ok()
        .filter(|id| *id > 0)
}

/// One list line: `- 2026-03-01 [HIGH] #3 buy eggs`.
fn format_line(item: &ListItem) -> String {
    let date = item.created_at.format("%Y-%m-%d");
    // Multi-line item text is joined so each item stays on one line.
    let message = item
        .message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    match item.priority.tag() {
        Some(tag) => format!("- {date} [{tag}] #{} {message}", item.id),
        None => format!("- {date} #{} {message}", item.id),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use egg_db::MEMORY;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::command::parse;
    use crate::message::{Author, MessageEvent, ReferencedMessage};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn message(id: u64, content: &str) -> MessageEvent {
        MessageEvent {
            id,
            author: Author {
                id: 42,
                name: "preocts".into(),
                display_name: Some("Preocts".into()),
                avatar_url: Some("https://cdn.example/avatar.png".into()),
                bot: false,
            },
            content: content.into(),
            created_at: now(),
            referenced: None,
        }
    }

    fn reply_to(id: u64, content: &str, referenced_id: u64, referenced: &str) -> MessageEvent {
        MessageEvent {
            referenced: Some(ReferencedMessage {
                id: referenced_id,
                content: referenced.into(),
            }),
            ..message(id, content)
        }
    }

    async fn cog(kind: ListKind) -> ListCog {
        ListCog::new(kind, Arc::new(ListStore::open(MEMORY).await.unwrap()))
    }

    async fn run(cog: &ListCog, event: &MessageEvent) -> Result<Vec<Reply>, BotError> {
        let invocation = parse("!", &event.content).unwrap();
        let command = cog.kind().command(&invocation.name).unwrap();
        cog.handle(
            command,
            &CommandContext {
                event,
                invocation: &invocation,
                prefix: "!",
                now: now(),
            },
        )
        .await
    }

    fn embed(replies: Vec<Reply>) -> Embed {
        match replies.as_slice() {
            [Reply::Embed(embed)] => embed.clone(),
            other => panic!("expected one embed, got {other:?}"),
        }
    }

    #[rstest]
    #[case("shoppinginfo", ListCommand::Info)]
    #[case("shoppingwrite", ListCommand::Write)]
    #[case("sget", ListCommand::Write)]
    #[case("shoppingget", ListCommand::Write)]
    #[case("slist", ListCommand::List)]
    #[case("sclose", ListCommand::Close)]
    #[case("sprio", ListCommand::Prioritize)]
    fn shopping_command_names(#[case] name: &str, #[case] expected: ListCommand) {
        assert_eq!(ListKind::SHOPPING.command(name), Some(expected));
    }

    #[test]
    fn kinds_do_not_share_command_names() {
        let shopping = ListKind::SHOPPING.command_names();
        for name in ListKind::OBJEGGTIVES.command_names() {
            assert!(!shopping.contains(&name), "{name} is claimed twice");
        }
        assert_eq!(ListKind::OBJEGGTIVES.command("ping"), None);
    }

    #[rstest]
    #[case("#12", Some(12))]
    #[case("7", Some(7))]
    #[case("#0", None)]
    #[case("-3", None)]
    #[case("#abc", None)]
    #[case("", None)]
    fn item_ids(#[case] text: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_item_id(text), expected);
    }

    #[tokio::test]
    async fn write_stores_argument_text_and_reacts() {
        let cog = cog(ListKind::SHOPPING).await;

        let replies = run(&cog, &message(100, "!sget milk and eggs")).await.unwrap();
        assert_eq!(replies, vec![Reply::react("📝")]);

        let stored = cog.store().find_by_reference(100).await.unwrap();
        assert_eq!(stored.message, "milk and eggs");
        assert_eq!(stored.author, 42);
        assert_eq!(stored.created_at, now());
        assert_eq!(stored.priority, Priority::None);
        assert!(!stored.is_closed());
    }

    #[tokio::test]
    async fn write_as_reply_links_the_referenced_message() {
        let cog = cog(ListKind::OBJEGGTIVES).await;

        run(&cog, &reply_to(101, "!egg", 55, "  fix the fence  "))
            .await
            .unwrap();

        let stored = cog.store().find_by_reference(55).await.unwrap();
        assert_eq!(stored.message, "fix the fence");
        assert!(cog.store().find_by_reference(101).await.is_err());
    }

    #[tokio::test]
    async fn write_argument_wins_over_referenced_content() {
        let cog = cog(ListKind::OBJEGGTIVES).await;
        run(&cog, &reply_to(101, "!egg paint it", 55, "fix the fence"))
            .await
            .unwrap();
        assert_eq!(
            cog.store().find_by_reference(55).await.unwrap().message,
            "paint it"
        );
    }

    #[tokio::test]
    async fn write_without_text_is_a_usage_error() {
        let cog = cog(ListKind::OBJEGGTIVES).await;
        let error = run(&cog, &message(100, "!egg")).await.unwrap_err();
        assert!(matches!(error, BotError::Usage(ref text) if text.starts_with("Usage: !egg")));
        assert_eq!(cog.store().counts().await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn rewriting_the_same_reply_updates_the_item() {
        let cog = cog(ListKind::OBJEGGTIVES).await;
        run(&cog, &reply_to(101, "!egg first", 55, "")).await.unwrap();
        run(&cog, &reply_to(102, "!egg second", 55, "")).await.unwrap();

        let counts = cog.store().counts().await.unwrap();
        assert_eq!(counts.total, 1);
        assert_eq!(
            cog.store().find_by_reference(55).await.unwrap().message,
            "second"
        );
    }

    #[tokio::test]
    async fn empty_list_says_so() {
        let cog = cog(ListKind::SHOPPING).await;
        let embed = embed(run(&cog, &message(1, "!slist")).await.unwrap());

        assert_eq!(embed.title, "Active shopping list items:");
        assert_eq!(embed.description, "Nothing here yet.");
        assert_eq!(embed.color, 0x0099_00CC);
        assert_eq!(
            embed.author,
            Some(EmbedAuthor {
                name: "Preocts".into(),
                icon_url: Some("https://cdn.example/avatar.png".into()),
            })
        );
    }

    #[tokio::test]
    async fn list_shows_open_items_by_priority() {
        let cog = cog(ListKind::SHOPPING).await;
        run(&cog, &message(1, "!sget bread")).await.unwrap();
        run(&cog, &message(2, "!sget coffee")).await.unwrap();
        run(&cog, &message(3, "!sget cake")).await.unwrap();
        run(&cog, &message(4, "!sprio high #2")).await.unwrap();
        run(&cog, &message(5, "!sclose #3")).await.unwrap();

        let embed = embed(run(&cog, &message(6, "!slist")).await.unwrap());
        assert_eq!(
            embed.description,
            "- 2026-03-01 [HIGH] #2 coffee\n- 2026-03-01 #1 bread"
        );
    }

    #[tokio::test]
    async fn multiline_items_stay_on_one_list_line() {
        let cog = cog(ListKind::OBJEGGTIVES).await;
        run(&cog, &message(1, "!egg plan trip\n  book hotel\r\n\nrent car"))
            .await
            .unwrap();
        run(&cog, &message(2, "!egg water plants")).await.unwrap();

        let stored = cog.store().find_by_reference(1).await.unwrap();
        assert_eq!(stored.message, "plan trip\n  book hotel\r\n\nrent car");

        let embed = embed(run(&cog, &message(3, "!eggs")).await.unwrap());
        assert_eq!(
            embed.description,
            "- 2026-03-01 #1 plan trip book hotel rent car\n- 2026-03-01 #2 water plants"
        );
    }

    #[tokio::test]
    async fn info_reports_counts_and_percent_closed() {
        let cog = cog(ListKind::SHOPPING).await;
        run(&cog, &message(1, "!sget bread")).await.unwrap();
        run(&cog, &message(2, "!sget coffee")).await.unwrap();
        run(&cog, &message(3, "!sget cake")).await.unwrap();
        run(&cog, &message(4, "!sclose 1")).await.unwrap();

        let embed = embed(run(&cog, &message(5, "!shoppinginfo")).await.unwrap());
        assert_eq!(embed.title, "Shopping Store Info");
        assert_eq!(embed.color, 0x0034_98DB);
        assert_eq!(
            embed.description,
            "Store Name: shopping.db\nConnected: true\nTotal Items: 3\nClosed Items: 1\nPercent Closed: 33.33%"
        );
    }

    #[tokio::test]
    async fn info_on_empty_store_is_zero_percent() {
        let cog = cog(ListKind::OBJEGGTIVES).await;
        let embed = embed(run(&cog, &message(1, "!egginfo")).await.unwrap());
        assert!(embed.description.ends_with("Percent Closed: 0.00%"));
        assert_eq!(embed.title, "Objeggtives Store Info");
    }

    #[tokio::test]
    async fn close_by_reply_and_twice() {
        let cog = cog(ListKind::OBJEGGTIVES).await;
        run(&cog, &reply_to(10, "!egg", 55, "water plants"))
            .await
            .unwrap();

        let replies = run(&cog, &reply_to(11, "!eggdone", 55, "water plants"))
            .await
            .unwrap();
        assert_eq!(replies, vec![Reply::react("✅")]);
        assert!(cog.store().get_open().await.unwrap().is_empty());

        let error = run(&cog, &reply_to(12, "!eggdone", 55, "water plants"))
            .await
            .unwrap_err();
        assert!(
            matches!(error, BotError::Rejected(ref text) if text == "Objeggtive #1 is already closed.")
        );
    }

    #[tokio::test]
    async fn close_unknown_item_is_rejected() {
        let cog = cog(ListKind::OBJEGGTIVES).await;
        let error = run(&cog, &message(1, "!eggclose #9")).await.unwrap_err();
        assert!(matches!(error, BotError::Rejected(ref text) if text == "No objeggtive item #9."));

        let error = run(&cog, &reply_to(2, "!eggclose", 77, "")).await.unwrap_err();
        assert!(matches!(error, BotError::Rejected(_)));
    }

    #[tokio::test]
    async fn close_needs_a_target() {
        let cog = cog(ListKind::OBJEGGTIVES).await;
        let error = run(&cog, &message(1, "!eggclose")).await.unwrap_err();
        assert!(matches!(error, BotError::Usage(_)));

        let error = run(&cog, &message(1, "!eggclose soon")).await.unwrap_err();
        assert!(matches!(error, BotError::Usage(_)));
    }

    #[tokio::test]
    async fn prioritize_by_reply() {
        let cog = cog(ListKind::OBJEGGTIVES).await;
        run(&cog, &reply_to(10, "!egg", 55, "taxes")).await.unwrap();

        let replies = run(&cog, &reply_to(11, "!eggprio med", 55, "taxes"))
            .await
            .unwrap();
        assert_eq!(replies, vec![Reply::react("🔺")]);
        assert_eq!(
            cog.store().find_by_reference(55).await.unwrap().priority,
            Priority::Medium
        );
    }

    #[rstest]
    #[case("!eggprio")]
    #[case("!eggprio urgent #1")]
    #[case("!eggprio 9 #1")]
    #[tokio::test]
    async fn prioritize_rejects_bad_priorities(#[case] content: &str) {
        let cog = cog(ListKind::OBJEGGTIVES).await;
        run(&cog, &message(10, "!egg taxes")).await.unwrap();

        let error = run(&cog, &message(11, content)).await.unwrap_err();
        assert!(matches!(error, BotError::Usage(ref text) if text.starts_with("Usage: !eggprio")));
    }

    #[test]
    fn capitalizes_nouns() {
        assert_eq!(capitalize("shopping list"), "Shopping list");
        assert_eq!(capitalize(""), "");
    }
}
