pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod repository;
pub mod scoring;
pub mod services;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use log::info;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: Option<u16>) -> Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(port) = port {
        config.server.port = port;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(config);
        service.run().await
    })
}

pub fn handle_setup(database_path: Option<&str>) -> Result<()> {
    let path = match database_path {
        Some(path) => path.to_string(),
        None => std::env::var("DATABASE_PATH").context("missing env variable: DATABASE_PATH")?,
    };

    let pool = database::create_pool(&path)?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::ensure_schema(&mut conn)?;

    let existing = database::scores::count_all(&mut conn)?;
    info!("Database {} ready with {} score entries", path, existing);
    Ok(())
}
