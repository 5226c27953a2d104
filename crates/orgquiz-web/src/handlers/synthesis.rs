//! Synthesis quiz: group list, problem generation, solution reveal and the
//! reaction network.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use orgquiz_common::{QuizError, SearchStrategy};
use orgquiz_synthesis::network::{NetworkMode, ReactionNetwork};
use orgquiz_synthesis::{generate, reveal, FilterSelection, ProblemRequest};
use tracing::info;
use crate::handlers::ApiError;
use crate::state::SharedState;
use crate::views::{ProblemView, SolutionView};

/// A step-count field as typed into the form: a number or raw text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StepInput {
    Number(i64),
    Text(String),
}

impl StepInput {
    fn value(&self, label: &str) -> Result<i64, QuizError> {
        match self {
            StepInput::Number(n) => Ok(*n),
            StepInput::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| QuizError::InvalidRange(format!("{label} steps '{text}' is not a number"))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProblemBody {
    /// Selected tags; every tag when absent.
    #[serde(default)]
    pub groups: Option<Vec<String>>,
    pub min_steps: Option<StepInput>,
    pub max_steps: Option<StepInput>,
    #[serde(default)]
    pub strategy: Option<SearchStrategy>,
}

#[derive(Debug, Deserialize, Default)]
pub struct NetworkQuery {
    pub mode: Option<NetworkMode>,
}

/// GET /api/synthesis/groups - tags to offer, with the form defaults
pub async fn groups(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    let dataset = state.dataset().await?;
    let quiz = &state.config.quiz;
    let selected = FilterSelection::all(&dataset, quiz.filter_mode);

    Ok(Json(json!({
        "status": "ok",
        "filter_mode": quiz.filter_mode,
        "groups": selected,
        "reaction_groups": dataset.functional_groups(),
        "compound_groups": dataset.compound_groups(),
        "min_steps": quiz.default_min_steps,
        "max_steps": quiz.default_max_steps,
        "step_floor": quiz.step_bounds.floor,
        "step_ceiling": quiz.step_bounds.ceiling,
    })))
}

/// POST /api/synthesis/problems - generate a new problem
///
/// While the dataset is unavailable this is a no-op that reports why.
pub async fn new_problem(
    State(state): State<SharedState>,
    payload: Result<Json<ProblemBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let dataset = state.dataset().await?;
    let quiz = &state.config.quiz;

    let mut session = state.session.lock().await;
    session.begin_generation();

    let request = build_request(&body, &dataset, quiz);
    if request.is_ok() {
        session.begin_search();
    }
    let outcome = match request {
        Ok(request) => {
            let mut rng = state.rng.lock().await;
            generate(&dataset, &request, quiz, &mut *rng)
        }
        Err(e) => Err(e),
    };

    let generated = session.finish_generation(outcome)?;
    info!(
        "Problem {}: {} starting material(s) -> {}",
        generated.problem.id,
        generated.problem.starting_materials.len(),
        generated.problem.target
    );
    let view = ProblemView::build(&dataset, generated, &state.config.images)?;
    Ok(Json(json!({ "status": "ok", "problem": view })))
}

fn build_request(
    body: &ProblemBody,
    dataset: &orgquiz_db::Dataset,
    quiz: &orgquiz_common::QuizSettings,
) -> Result<ProblemRequest, QuizError> {
    let groups = match &body.groups {
        Some(tags) => FilterSelection::new(tags.iter().cloned()),
        None => FilterSelection::all(dataset, quiz.filter_mode),
    };
    let min_steps = match &body.min_steps {
        Some(input) => input.value("min")?,
        None => i64::from(quiz.default_min_steps),
    };
    let max_steps = match &body.max_steps {
        Some(input) => input.value("max")?,
        None => i64::from(quiz.default_max_steps),
    };
    Ok(ProblemRequest { groups, min_steps, max_steps, strategy: body.strategy })
}

/// POST /api/synthesis/solution - reveal the solution of the current problem
pub async fn solution(State(state): State<SharedState>) -> Result<Json<Value>, ApiError> {
    let dataset = state.dataset().await?;
    let mut session = state.session.lock().await;
    let (problem, path) = session.reveal(|problem| reveal(&dataset, problem))?;
    let view = SolutionView::build(&dataset, problem, &path, &state.config.images)?;
    Ok(Json(json!({ "status": "ok", "solution": view })))
}

/// GET /api/synthesis/network?mode=full|single_reactant
pub async fn network(
    State(state): State<SharedState>,
    Query(query): Query<NetworkQuery>,
) -> Result<Json<Value>, ApiError> {
    let dataset = state.dataset().await?;
    let mode = query.mode.unwrap_or_default();
    let network = ReactionNetwork::build(&dataset, mode);
    Ok(Json(json!({ "status": "ok", "mode": mode, "network": network })))
}
