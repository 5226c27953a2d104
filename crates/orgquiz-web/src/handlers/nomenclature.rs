//! Naming flashcards.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use orgquiz_common::QuizError;
use orgquiz_nomenclature::{NameStyle, PromptMode};
use crate::handlers::ApiError;
use crate::state::SharedState;
use crate::views::{AnswerView, CardView};

#[derive(Debug, Deserialize, Default)]
pub struct CardBody {
    #[serde(default)]
    pub mode: PromptMode,
    #[serde(default)]
    pub style: NameStyle,
}

/// POST /api/nomenclature/cards - draw a new card
pub async fn new_card(
    State(state): State<SharedState>,
    payload: Result<Json<CardBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let card = {
        let deck = state.deck.read().await;
        let mut rng = state.rng.lock().await;
        deck.try_draw(&mut *rng)?
    };

    let view = CardView::new(&card, card.prompt(body.mode, body.style), &state.config.images);
    state.session.lock().await.set_card(card);
    Ok(Json(json!({ "status": "ok", "card": view })))
}

/// POST /api/nomenclature/answer - names for the card on screen
pub async fn answer(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    let session = state.session.lock().await;
    let card = session.card().ok_or(QuizError::NoActiveProblem)?;
    Ok(Json(json!({ "status": "ok", "answer": AnswerView::from(card) })))
}
