use clap::Parser;
use tracing::Instrument;

mod bootstrap;
mod cli;
mod commands;
mod logging;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("egg error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();

    // Schema output needs neither config nor logging.
    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let config = bootstrap::load_config(&flags)?;
    logging::init_tracing(&config.logging, &flags)?;

    commands::dispatch::dispatch(cli.command, &config, &flags)
        .instrument(logging::root_span())
        .await
}
