use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};

use crate::services::scores::ZeroEntryPolicy;

pub const DEFAULT_PORT: u16 = 3000;

/// Which backend a store is wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Sqlite,
    File,
    Memory,
}

impl FromStr for StoreMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "db" => Ok(Self::Sqlite),
            "file" => Ok(Self::File),
            "memory" | "mock" => Ok(Self::Memory),
            other => Err(format!("invalid mode '{}', expected sqlite, file or memory", other)),
        }
    }
}

impl fmt::Display for StoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scoreboard_mode: StoreMode,
    pub members_mode: StoreMode,
    /// Set whenever either store runs on SQLite
    pub database_path: Option<String>,
    /// Set when the scoreboard runs from a snapshot file
    pub scoreboard_file: Option<PathBuf>,
    pub scoreboard_policy: ZeroEntryPolicy,
    pub server: ServerSettings,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source; every problem is
    /// reported here rather than on the first request.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scoreboard_mode: StoreMode = parse_var(&lookup, "SCOREBOARD_MODE")?
            .ok_or_else(|| missing("SCOREBOARD_MODE"))?;
        let members_mode: StoreMode = parse_var(&lookup, "MEMBERS_MODE")?
            .ok_or_else(|| missing("MEMBERS_MODE"))?;
        if members_mode == StoreMode::File {
            bail!("MEMBERS_MODE cannot be file: the roster needs a writable store");
        }

        let uses_sqlite = scoreboard_mode == StoreMode::Sqlite || members_mode == StoreMode::Sqlite;
        let database_path = non_empty(&lookup, "DATABASE_PATH");
        if uses_sqlite && database_path.is_none() {
            return Err(missing("DATABASE_PATH"));
        }

        let scoreboard_file = non_empty(&lookup, "SCOREBOARD_FILE").map(PathBuf::from);
        if scoreboard_mode == StoreMode::File && scoreboard_file.is_none() {
            return Err(missing("SCOREBOARD_FILE"));
        }

        let scoreboard_policy: ZeroEntryPolicy = parse_var(&lookup, "SCOREBOARD_POLICY")?.unwrap_or_default();
        let port: u16 = parse_var(&lookup, "PORT")?.unwrap_or(DEFAULT_PORT);

        Ok(Self {
            scoreboard_mode,
            members_mode,
            database_path,
            scoreboard_file,
            scoreboard_policy,
            server: ServerSettings { port },
        })
    }

    /// In-memory stores only; handy for demos and tests
    pub fn in_memory() -> Self {
        Self {
            scoreboard_mode: StoreMode::Memory,
            members_mode: StoreMode::Memory,
            database_path: None,
            scoreboard_file: None,
            scoreboard_policy: ZeroEntryPolicy::default(),
            server: ServerSettings::default(),
        }
    }
}

fn missing(key: &str) -> anyhow::Error {
    anyhow!("missing env variable: {}", key)
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    non_empty(lookup, key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| anyhow!("{}", e))
                .with_context(|| format!("invalid value for {}", key))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_memory_modes_need_nothing_else() {
        let cfg = config(&[("SCOREBOARD_MODE", "memory"), ("MEMBERS_MODE", "MOCK")]).unwrap();

        assert_eq!(cfg.scoreboard_mode, StoreMode::Memory);
        assert_eq!(cfg.members_mode, StoreMode::Memory);
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert_eq!(cfg.scoreboard_policy, ZeroEntryPolicy::EntriesOnly);
    }

    #[test]
    fn test_missing_modes_fail_fast() {
        let err = config(&[("MEMBERS_MODE", "memory")]).unwrap_err();
        assert!(err.to_string().contains("SCOREBOARD_MODE"));

        let err = config(&[("SCOREBOARD_MODE", "memory")]).unwrap_err();
        assert!(err.to_string().contains("MEMBERS_MODE"));
    }

    #[test]
    fn test_sqlite_requires_database_path() {
        let err = config(&[("SCOREBOARD_MODE", "sqlite"), ("MEMBERS_MODE", "memory")]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_PATH"));

        let cfg = config(&[
            ("SCOREBOARD_MODE", "memory"),
            ("MEMBERS_MODE", "sqlite"),
            ("DATABASE_PATH", "tour.db"),
        ])
        .unwrap();
        assert_eq!(cfg.database_path.as_deref(), Some("tour.db"));
    }

    #[test]
    fn test_file_mode_requires_snapshot_and_is_scoreboard_only() {
        let err = config(&[("SCOREBOARD_MODE", "file"), ("MEMBERS_MODE", "memory")]).unwrap_err();
        assert!(err.to_string().contains("SCOREBOARD_FILE"));

        assert!(config(&[("SCOREBOARD_MODE", "memory"), ("MEMBERS_MODE", "file")]).is_err());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = config(&[("SCOREBOARD_MODE", "psql"), ("MEMBERS_MODE", "memory")]).unwrap_err();
        assert!(err.to_string().contains("SCOREBOARD_MODE"));

        assert!(config(&[("SCOREBOARD_MODE", "memory"), ("MEMBERS_MODE", "memory"), ("PORT", "http")]).is_err());
        assert!(
            config(&[("SCOREBOARD_MODE", "memory"), ("MEMBERS_MODE", "memory"), ("SCOREBOARD_POLICY", "all")])
                .is_err()
        );
    }

    #[test]
    fn test_policy_and_port_are_read() {
        let cfg = config(&[
            ("SCOREBOARD_MODE", "memory"),
            ("MEMBERS_MODE", "memory"),
            ("SCOREBOARD_POLICY", "roster"),
            ("PORT", "8081"),
        ])
        .unwrap();

        assert_eq!(cfg.scoreboard_policy, ZeroEntryPolicy::FullRoster);
        assert_eq!(cfg.server.port, 8081);
    }
}
