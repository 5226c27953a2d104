//! Liveness and data status.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use orgquiz_db::DatasetSlot;
use crate::state::SharedState;

/// GET /api/health
pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    let (dataset, compounds, reactions) = match &*state.dataset.read().await {
        DatasetSlot::Ready(ds) => ("ready", ds.compounds().len(), ds.reactions().len()),
        slot => (slot.status(), 0, 0),
    };
    let flashcards = state.deck.read().await.len();
    let phase = state.session.lock().await.phase();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "dataset": dataset,
        "compounds": compounds,
        "reactions": reactions,
        "flashcards": flashcards,
        "phase": phase,
    }))
}
