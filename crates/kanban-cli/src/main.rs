mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use kanban_db::Db;
use kanban_service::BoardService;
use kanban_store::{create_store, Backend, StoreConfig};
use tracing::debug;

use crate::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = StoreConfig::from_env();
    if let Some(path) = cli.db.clone() {
        config.backend = Backend::Sqlite;
        config.sqlite_path = Some(path);
    }
    debug!(?config, "opening store");
    let svc = BoardService::new(Db::new(create_store(&config)?));

    commands::run(&svc, cli.project.as_deref(), cli.command)
}
