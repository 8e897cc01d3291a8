use anyhow::{Context, Result};
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::config::{AppConfig, StoreMode};
use crate::database::{self, DbPool};
use crate::repository::{
    JsonFileScoreRepository, MemoryRosterRepository, MemoryScoreRepository, RosterRepository,
    ScoreRepository, SqliteRosterRepository, SqliteScoreRepository,
};
use crate::services::{RosterService, ScoreService};

pub struct ServerService {
    config: AppConfig,
}

impl ServerService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<()> {
        let state = Arc::new(build_state(&self.config)?);

        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.server.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Wire the configured backends into the services; every backend is opened
/// here so a bad database path or snapshot stops startup.
pub fn build_state(config: &AppConfig) -> Result<AppState> {
    let pool = open_database(config)?;

    let roster: Arc<dyn RosterRepository> = match config.members_mode {
        StoreMode::Sqlite => Arc::new(SqliteRosterRepository::new(require_pool(&pool)?)),
        StoreMode::Memory => Arc::new(MemoryRosterRepository::default()),
        StoreMode::File => anyhow::bail!("the roster cannot be served from a file"),
    };

    let scores: Arc<dyn ScoreRepository> = match config.scoreboard_mode {
        StoreMode::Sqlite => Arc::new(SqliteScoreRepository::new(require_pool(&pool)?)),
        StoreMode::Memory => Arc::new(MemoryScoreRepository::default()),
        StoreMode::File => {
            let path = config
                .scoreboard_file
                .as_ref()
                .context("SCOREBOARD_FILE is required in file mode")?;
            Arc::new(JsonFileScoreRepository::open(path)?)
        }
    };

    info!(
        "Scores: {} store, members: {} store, scoreboard policy: {}",
        config.scoreboard_mode, config.members_mode, config.scoreboard_policy
    );

    Ok(AppState {
        scores: ScoreService::new(scores, roster.clone()).with_policy(config.scoreboard_policy),
        members: RosterService::new(roster),
    })
}

fn open_database(config: &AppConfig) -> Result<Option<DbPool>> {
    let uses_sqlite =
        config.scoreboard_mode == StoreMode::Sqlite || config.members_mode == StoreMode::Sqlite;
    if !uses_sqlite {
        return Ok(None);
    }

    let path = config
        .database_path
        .as_deref()
        .context("DATABASE_PATH is required in sqlite mode")?;
    let pool = database::create_pool(path)?;
    let mut conn = pool.get().context("Failed to get database connection from pool")?;
    database::setup::ensure_schema(&mut conn)?;

    Ok(Some(pool))
}

fn require_pool(pool: &Option<DbPool>) -> Result<DbPool> {
    pool.clone().context("database pool was not opened")
}
