use clap::{Args, Subcommand, ValueEnum};
use egg_bot::cogs::ListKind;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the bot against the console gateway (JSON lines on stdin/stdout).
    Run,
    /// Create an empty store file for a list.
    Init(ListArgs),
    /// Show item counts for a list.
    Info(ListArgs),
    /// Show the items of a list.
    List(ListItemsArgs),
    /// Print JSON Schemas of the gateway and storage payloads.
    Schema(SchemaArgs),
}

/// Lists the bot knows about.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ListName {
    Shopping,
    Objeggtives,
}

impl ListName {
    #[must_use]
    pub const fn kind(self) -> ListKind {
        match self {
            Self::Shopping => ListKind::SHOPPING,
            Self::Objeggtives => ListKind::OBJEGGTIVES,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Which list.
    pub list: ListName,
}

#[derive(Clone, Debug, Args)]
pub struct ListItemsArgs {
    /// Which list.
    pub list: ListName,

    /// Include closed items.
    #[arg(long)]
    pub all: bool,
}

/// Payload types `egg schema` can describe.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    MessageEvent,
    Reply,
    ReplyEnvelope,
    ListItem,
    TrailOperation,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Only print this type's schema.
    #[arg(long = "type", value_name = "TYPE")]
    pub type_name: Option<SchemaType>,
}
