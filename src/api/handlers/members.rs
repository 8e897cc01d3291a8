use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

use super::{AppState, parse_body};
use crate::api::errors::ApiError;
use crate::api::models::{Member, MemberRequest};
use crate::domain::Player;

fn to_members(players: Vec<Player>) -> Json<Vec<Member>> {
    Json(players.into_iter().map(Member::from).collect())
}

pub async fn get_members(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    Ok(to_members(state.members.get_members()?))
}

pub async fn create_member(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: MemberRequest = parse_body(&body)?;
    Ok(to_members(state.members.create_member(&request.name)?))
}

pub async fn update_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let request: MemberRequest = parse_body(&body)?;
    Ok(to_members(state.members.update_member(&id, &request.name)?))
}

pub async fn delete_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(to_members(state.members.delete_member(&id)?))
}
