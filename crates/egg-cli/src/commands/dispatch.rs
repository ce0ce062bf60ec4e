use egg_config::EggConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &EggConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Run => commands::run::handle(config).await,
        Commands::Init(args) => commands::init::handle(&args, config, flags).await,
        Commands::Info(args) => commands::info::handle(&args, config, flags).await,
        Commands::List(args) => commands::list::handle(&args, config, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
    }
}
