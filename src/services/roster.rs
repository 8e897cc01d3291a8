use std::sync::Arc;

use log::info;

use crate::domain::Player;
use crate::errors::{ServiceContext, ServiceError, StorageError};
use crate::repository::{RosterRepository, generate_id};

/// Member CRUD; every mutation answers with the full roster
pub struct RosterService {
    roster: Arc<dyn RosterRepository>,
}

impl RosterService {
    pub fn new(roster: Arc<dyn RosterRepository>) -> Self {
        Self { roster }
    }

    pub fn get_members(&self) -> Result<Vec<Player>, ServiceError> {
        self.roster.list_players().during("list members")
    }

    pub fn create_member(&self, name: &str) -> Result<Vec<Player>, ServiceError> {
        let name = validate_name(name)?;
        self.ensure_name_free(name, None)?;

        let player = Player {
            id: generate_id(),
            name: name.to_string(),
        };
        let id = player.id.clone();
        self.roster
            .insert_player(player)
            .map_err(|e| name_conflict(e, name))?;

        info!("Created member {} ({})", name, id);
        self.get_members()
    }

    pub fn update_member(&self, id: &str, name: &str) -> Result<Vec<Player>, ServiceError> {
        let name = validate_name(name)?;
        self.ensure_name_free(name, Some(id))?;

        let renamed = self
            .roster
            .rename_player(id, name)
            .map_err(|e| name_conflict(e, name))?;
        if !renamed {
            return Err(ServiceError::validation(format!("player with id {} does not exist", id)));
        }

        info!("Renamed member {} to {}", id, name);
        self.get_members()
    }

    /// Existing score entries keep the name they were recorded with.
    pub fn delete_member(&self, id: &str) -> Result<Vec<Player>, ServiceError> {
        self.roster
            .delete_player(id)
            .during(format!("delete member {}", id))?;

        info!("Deleted member {}", id);
        self.get_members()
    }

    fn ensure_name_free(&self, name: &str, renaming: Option<&str>) -> Result<(), ServiceError> {
        let existing = self
            .roster
            .find_player_by_name(name)
            .during(format!("look up member name {}", name))?;

        match existing {
            Some(player) if Some(player.id.as_str()) != renaming => Err(name_taken(name)),
            _ => Ok(()),
        }
    }
}

fn name_taken(name: &str) -> ServiceError {
    ServiceError::validation(format!("player with name {} already exists.", name))
}

/// A write can still lose a race for the name after `ensure_name_free`.
fn name_conflict(err: StorageError, name: &str) -> ServiceError {
    match err {
        StorageError::Conflict { .. } => name_taken(name),
        source => ServiceError::Storage {
            operation: format!("write member {}", name),
            source,
        },
    }
}

fn validate_name(name: &str) -> Result<&str, ServiceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation("name must not be empty"));
    }
    Ok(trimmed)
}
