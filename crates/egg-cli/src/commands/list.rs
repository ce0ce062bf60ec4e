use anyhow::Context;
use egg_config::EggConfig;
use egg_core::entities::ListItem;
use egg_db::ListStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListItemsArgs;
use crate::output::output;

/// Handle `egg list`.
pub async fn handle(
    args: &ListItemsArgs,
    config: &EggConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let items = run(args, config, flags.limit).await?;
    output(&items, flags.format)
}

pub async fn run(
    args: &ListItemsArgs,
    config: &EggConfig,
    limit: Option<u32>,
) -> anyhow::Result<Vec<ListItem>> {
    let kind = args.list.kind();
    let path = config.store.resolve(kind.store_file);
    let store = ListStore::open(&path)
        .await
        .with_context(|| format!("failed to open the {} store", kind.name))?;

    if args.all {
        return Ok(store.get_all(limit).await?);
    }
    let mut items = store.get_open().await?;
    if let Some(limit) = limit {
        items.truncate(usize::try_from(limit)?);
    }
    Ok(items)
}
