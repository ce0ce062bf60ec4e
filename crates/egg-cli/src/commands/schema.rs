use std::collections::BTreeMap;

use egg_bot::message::{MessageEvent, Reply, ReplyEnvelope};
use egg_core::entities::ListItem;
use egg_core::trail::TrailOperation;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

const ALL_TYPES: [SchemaType; 5] = [
    SchemaType::MessageEvent,
    SchemaType::Reply,
    SchemaType::ReplyEnvelope,
    SchemaType::ListItem,
    SchemaType::TrailOperation,
];

/// Handle `egg schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    match args.type_name {
        Some(schema_type) => output(&schema_for(schema_type)?, flags.format),
        None => {
            let mut schemas = BTreeMap::new();
            for schema_type in ALL_TYPES {
                schemas.insert(type_name(schema_type), schema_for(schema_type)?);
            }
            output(&schemas, flags.format)
        }
    }
}

const fn type_name(schema_type: SchemaType) -> &'static str {
    match schema_type {
        SchemaType::MessageEvent => "message_event",
        SchemaType::Reply => "reply",
        SchemaType::ReplyEnvelope => "reply_envelope",
        SchemaType::ListItem => "list_item",
        SchemaType::TrailOperation => "trail_operation",
    }
}

fn schema_for(schema_type: SchemaType) -> anyhow::Result<Value> {
    let schema = match schema_type {
        SchemaType::MessageEvent => schemars::schema_for!(MessageEvent),
        SchemaType::Reply => schemars::schema_for!(Reply),
        SchemaType::ReplyEnvelope => schemars::schema_for!(ReplyEnvelope),
        SchemaType::ListItem => schemars::schema_for!(ListItem),
        SchemaType::TrailOperation => schemars::schema_for!(TrailOperation),
    };
    Ok(serde_json::to_value(schema)?)
}
