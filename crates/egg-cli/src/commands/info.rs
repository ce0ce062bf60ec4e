use anyhow::Context;
use egg_config::EggConfig;
use egg_db::ListStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub list: &'static str,
    pub path: String,
    pub connected: bool,
    pub total: u64,
    pub closed: u64,
    pub open: u64,
    pub percent_closed: f64,
}

/// Handle `egg info`.
pub async fn handle(args: &ListArgs, config: &EggConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let response = run(args, config).await?;
    output(&response, flags.format)
}

pub async fn run(args: &ListArgs, config: &EggConfig) -> anyhow::Result<InfoResponse> {
    let kind = args.list.kind();
    let path = config.store.resolve(kind.store_file);
    let store = ListStore::open(&path)
        .await
        .with_context(|| format!("failed to open the {} store (run 'egg init {}' first)", kind.name, kind.name))?;

    let counts = store.counts().await?;
    Ok(InfoResponse {
        list: kind.name,
        connected: store.connected().await,
        path,
        total: counts.total,
        closed: counts.closed,
        open: counts.open(),
        percent_closed: (counts.percent_closed() * 100.0).round() / 100.0,
    })
}
