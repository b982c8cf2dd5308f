//! HTTP surface of the leaderboard.
//!
//! Handlers receive an [`AppState`] holding the shared store and the snapshot
//! file, so they can be exercised without a running server.

pub mod handlers;


use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::snapshot::SnapshotFile;
use crate::storage::LeaderboardStore;

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: LeaderboardStore,
    pub snapshot: SnapshotFile,
}

impl AppState {
    pub fn new(store: LeaderboardStore, snapshot: SnapshotFile) -> Self {
        AppState { store, snapshot }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/submit", post(handlers::submit))
        .route("/data", get(handlers::ranked))
        .route("/export", get(handlers::export))
        .route("/save", post(handlers::save))
        .route("/edit", get(handlers::edit_query).post(handlers::edit_json))
        .route("/entries/:name", delete(handlers::remove))
        .with_state(state)
}
