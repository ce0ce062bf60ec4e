use anyhow::Context;
use egg_config::EggConfig;
use egg_db::ListStore;
use serde::Serialize;

use crate::bootstrap::store_path;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct InitResponse {
    pub list: &'static str,
    pub path: String,
    pub created: bool,
}

/// Handle `egg init`.
pub async fn handle(args: &ListArgs, config: &EggConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = run(args, config).await?;
    output(&response, flags.format)
}

pub async fn run(args: &ListArgs, config: &EggConfig) -> anyhow::Result<InitResponse> {
    let kind = args.list.kind();
    let path = store_path(config, kind.store_file)?;
    ListStore::initialize(&path)
        .await
        .with_context(|| format!("failed to initialize the {} store", kind.name))?;

    tracing::info!(list = kind.name, path = %path, "list store created");
    Ok(InitResponse {
        list: kind.name,
        path,
        created: true,
    })
}
