use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

use super::AppState;
use crate::api::errors::ApiError;
use crate::api::models::{ScoreboardResponse, SeasonQuery};
use crate::api::parsers::parse_season;

pub async fn get_scoreboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeasonQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let season = parse_season(params.season.as_deref())?;

    let board = state.scores.get_scoreboard(season)?;

    Ok(Json(ScoreboardResponse::from(board)))
}
