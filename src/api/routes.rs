use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::api::handlers::{
    AppState,
    members::{create_member, delete_member, get_members, update_member},
    scoreboard::get_scoreboard,
    scores::{delete_score, get_scores, put_score},
};
use crate::api::middleware::log_requests;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/scoreboard", get(get_scoreboard))
        .route("/scores", get(get_scores).put(put_score))
        .route("/scores/:id", delete(delete_score))
        .route("/members", get(get_members).put(create_member))
        .route("/members/:id", post(update_member).delete(delete_member))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}
