use axum::body::Bytes;
use serde::de::DeserializeOwned;

use crate::api::errors::ApiError;
use crate::services::{RosterService, ScoreService};

pub mod members;
pub mod scoreboard;
pub mod scores;

pub struct AppState {
    pub scores: ScoreService,
    pub members: RosterService,
}

/// Decode a JSON body; anything malformed is the client's fault.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        log::debug!("Rejected request body: {}", e);
        ApiError::bad_request("invalid request body")
    })
}
