use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use super::AppState;
use crate::board::entry::RankedEntry;
use crate::board::leaderboard::{EntryMap, Leaderboard};
use crate::board::submission::{EditRequest, Submission};
use crate::error::{BoardError, BoardResult};

#[derive(Debug, PartialEq, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    fn new(status: &'static str) -> Json<Self> {
        Json(StatusResponse { status })
    }
}

pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<Submission>, JsonRejection>,
) -> BoardResult<Json<StatusResponse>> {
    let Json(submission) = payload.map_err(rejected)?;
    state.store.upsert(submission)?;
    Ok(StatusResponse::new("ok"))
}

pub async fn ranked(State(state): State<AppState>) -> Json<Vec<RankedEntry>> {
    Json(state.store.list_ranked())
}

pub async fn export(State(state): State<AppState>) -> Json<EntryMap> {
    Json(state.store.export_all())
}

/// Write the listing sent by the client to the snapshot file, keyed by name.
/// The in-memory table is left as is.
pub async fn save(
    State(state): State<AppState>,
    payload: Result<Json<Vec<RankedEntry>>, JsonRejection>,
) -> BoardResult<Json<StatusResponse>> {
    let Json(entries) = payload.map_err(rejected)?;
    let leaderboard: Leaderboard = entries.into();
    if let Err(e) = state.snapshot.save(&leaderboard.export()).await {
        error!("Could not save snapshot. {e}");
        return Err(e);
    }
    Ok(StatusResponse::new("saved"))
}

pub async fn edit_query(
    State(state): State<AppState>,
    query: Result<Query<EditRequest>, QueryRejection>,
) -> BoardResult<Json<EntryMap>> {
    let Query(request) = query.map_err(rejected)?;
    apply_edit(&state, request)
}

pub async fn edit_json(
    State(state): State<AppState>,
    payload: Result<Json<EditRequest>, JsonRejection>,
) -> BoardResult<Json<EntryMap>> {
    let Json(request) = payload.map_err(rejected)?;
    apply_edit(&state, request)
}

fn rejected(rejection: impl Into<BoardError>) -> BoardError {
    let error = rejection.into();
    warn!("Rejected request. {error}");
    error
}

fn apply_edit(state: &AppState, request: EditRequest) -> BoardResult<Json<EntryMap>> {
    let edit = request.validate().map_err(|e| {
        warn!("Rejected edit. {e}");
        e
    })?;
    let name = edit.name().to_string();
    let table = state.store.edit(edit).map_err(|e| {
        warn!("Edit of '{name}' failed. {e}");
        e
    })?;
    Ok(Json(table))
}

pub async fn remove(State(state): State<AppState>, Path(name): Path<String>) -> Json<StatusResponse> {
    match state.store.remove(&name) {
        true => StatusResponse::new("removed"),
        false => StatusResponse::new("absent"),
    }
}
