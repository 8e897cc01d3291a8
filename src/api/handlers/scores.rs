use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use super::{AppState, parse_body};
use crate::api::errors::ApiError;
use crate::api::models::{PlayerScoresResponse, ScoreQuery, ScoreRequest};
use crate::api::parsers::{parse_season, require_param};

pub async fn get_scores(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScoreQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let season = parse_season(params.season.as_deref())?;
    let player_id = require_param(params.player_id.as_deref(), "playerId")?;

    let scores = state.scores.get_player_score_by_season(player_id, season)?;

    Ok(Json(PlayerScoresResponse::new(season, scores)))
}

pub async fn put_score(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: ScoreRequest = parse_body(&body)?;

    let entry = state.scores.add_score(request.into())?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn delete_score(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.scores.delete_score(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
