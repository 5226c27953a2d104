//! Problem generation: validation, filtering, then a bounded number of
//! independent randomised search attempts.

use crate::backward::{self, BackwardOptions};
use crate::fallback;
use crate::filter::{self, FilterSelection, ReactionPool, MIN_POOL_COMPOUNDS};
use crate::forward;
use crate::path::{Path, Solution, SynthesisProblem};
use crate::range::{RangeCorrection, StepRange};
use chrono::Utc;
use orgquiz_common::{Compound, QuizError, QuizSettings, SearchStrategy};
use orgquiz_db::Dataset;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What the user asked for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemRequest {
    pub groups: FilterSelection,
    pub min_steps: i64,
    pub max_steps: i64,
    /// Overrides the configured strategy for this request.
    #[serde(default)]
    pub strategy: Option<SearchStrategy>,
}

/// A problem plus how it was obtained.
#[derive(Debug, Clone, Serialize)]
pub struct Generated {
    pub problem: SynthesisProblem,
    pub range: StepRange,
    pub correction: Option<RangeCorrection>,
    pub attempts: usize,
}

/// Result of one search strategy before it is wrapped into a problem.
struct Candidate {
    starting_materials: Vec<String>,
    target: String,
    key_intermediate: Option<String>,
    solution: Solution,
}

/// Generate a synthesis problem.
///
/// An empty selection or inconsistent settings are rejected before anything
/// random happens, as is a pool too small for the chosen strategy. Each
/// attempt starts from fresh random choices; after `retry_budget` failed
/// attempts the search reports [`QuizError::SearchExhausted`].
pub fn generate<R: Rng + ?Sized>(
    dataset: &Dataset,
    request: &ProblemRequest,
    settings: &QuizSettings,
    rng: &mut R,
) -> Result<Generated, QuizError> {
    if request.groups.is_empty() {
        return Err(QuizError::InsufficientSelection);
    }
    settings.validate().map_err(QuizError::InvalidRange)?;

    let validated = StepRange::validate(request.min_steps, request.max_steps, settings.step_bounds);
    if let Some(correction) = &validated.correction {
        warn!("Step range corrected: {}", correction.message);
    }
    let range = validated.range;

    let pool = filter::apply(dataset, &request.groups, settings.filter_mode)?;
    let strategy = request.strategy.unwrap_or(settings.strategy);
    if !pool_supports(&pool, strategy) {
        debug!("Pool too small for {} search", strategy.as_str());
        return Err(QuizError::InsufficientData {
            reactions: pool.reactions().len(),
            compounds: pool.compounds().len(),
        });
    }
    let budget = settings.retry_budget;

    for attempt in 1..=budget {
        let candidate = match strategy {
            SearchStrategy::Backward => backward_attempt(&pool, range, settings, attempt, rng),
            SearchStrategy::ForwardPair => forward_pair_attempt(&pool, range, rng),
            SearchStrategy::ForwardWalk => forward_walk_attempt(&pool, range, rng),
            SearchStrategy::Fallback => fallback_attempt(&pool, rng),
        };
        let Some(candidate) = candidate else { continue };

        if candidate.starting_materials.contains(&candidate.target) {
            debug!("Attempt {}: target {} is also a starting material", attempt, candidate.target);
            continue;
        }

        info!(
            "Generated {} problem for {} after {} attempt(s)",
            strategy.as_str(),
            candidate.target,
            attempt
        );
        let problem = SynthesisProblem {
            id: Uuid::new_v4(),
            strategy,
            selection: request.groups.clone(),
            filter_mode: settings.filter_mode,
            starting_materials: candidate.starting_materials,
            target: candidate.target,
            key_intermediate: candidate.key_intermediate,
            solution: candidate.solution,
            generated_at: Utc::now(),
        };
        return Ok(Generated { problem, range, correction: validated.correction, attempts: attempt });
    }

    warn!("No {} path found in {} attempts", strategy.as_str(), budget);
    Err(QuizError::SearchExhausted { attempts: budget })
}

/// The step-by-step solution of a problem.
///
/// Deferred problems are looked up now, against the selection they were
/// generated with.
pub fn reveal(dataset: &Dataset, problem: &SynthesisProblem) -> Result<Path, QuizError> {
    match &problem.solution {
        Solution::Known(path) if path.is_empty() => Err(QuizError::NoSolutionAtReveal),
        Solution::Known(path) => Ok(path.clone()),
        Solution::Deferred => {
            let pool = filter::apply(dataset, &problem.selection, problem.filter_mode)?;
            let start = problem.starting_materials.first().ok_or(QuizError::NoSolutionAtReveal)?;
            fallback::short_path(&pool, start, &problem.target).ok_or(QuizError::NoSolutionAtReveal)
        }
    }
}

fn backward_attempt<R: Rng + ?Sized>(
    pool: &ReactionPool<'_>,
    range: StepRange,
    settings: &QuizSettings,
    attempt: usize,
    rng: &mut R,
) -> Option<Candidate> {
    let target = pool.compounds().choose(rng)?;
    let steps = range.sample(rng);
    let options = BackwardOptions { simple: settings.simple_backward_paths };

    match backward::construct(pool, &target.smiles, steps, options, rng) {
        Ok(found) => Some(Candidate {
            starting_materials: found.starting_materials,
            target: target.smiles.clone(),
            key_intermediate: found.key_intermediate,
            solution: Solution::Known(found.path),
        }),
        Err(dead_end) => {
            debug!("Attempt {}: {} steps back from {}: {:?}", attempt, steps, target.smiles, dead_end);
            None
        }
    }
}

/// Whether `pool` can supply the endpoints `strategy` draws.
fn pool_supports(pool: &ReactionPool<'_>, strategy: SearchStrategy) -> bool {
    match strategy {
        SearchStrategy::Backward => !pool.compounds().is_empty(),
        SearchStrategy::ForwardPair | SearchStrategy::ForwardWalk => !forward_starts(pool).is_empty(),
        SearchStrategy::Fallback => pool.compounds().len() >= MIN_POOL_COMPOUNDS,
    }
}

/// Compounds a forward path can start from.
fn forward_starts<'a>(pool: &ReactionPool<'a>) -> Vec<&'a Compound> {
    pool.touched()
        .iter()
        .copied()
        .filter(|c| !pool.linear_successors(&c.smiles).is_empty())
        .collect()
}

fn forward_pair_attempt<R: Rng + ?Sized>(
    pool: &ReactionPool<'_>,
    range: StepRange,
    rng: &mut R,
) -> Option<Candidate> {
    let start = *forward_starts(pool).choose(rng)?;
    let targets: Vec<&Compound> =
        pool.compounds().iter().copied().filter(|c| c.smiles != start.smiles).collect();
    let target = *targets.choose(rng)?;
    let steps = range.sample(rng);

    let path = forward::exact_path(pool, &start.smiles, &target.smiles, steps, rng)?;
    Some(Candidate {
        starting_materials: vec![start.smiles.clone()],
        target: target.smiles.clone(),
        key_intermediate: path.key_intermediate(&target.smiles).map(str::to_string),
        solution: Solution::Known(path),
    })
}

fn forward_walk_attempt<R: Rng + ?Sized>(
    pool: &ReactionPool<'_>,
    range: StepRange,
    rng: &mut R,
) -> Option<Candidate> {
    let start = *forward_starts(pool).choose(rng)?;
    let length = range.sample(rng);

    let path = forward::random_walk(pool, &start.smiles, length, rng)?;
    let target = path.end()?.to_string();
    Some(Candidate {
        starting_materials: vec![start.smiles.clone()],
        key_intermediate: path.key_intermediate(&target).map(str::to_string),
        target,
        solution: Solution::Known(path),
    })
}

fn fallback_attempt<R: Rng + ?Sized>(pool: &ReactionPool<'_>, rng: &mut R) -> Option<Candidate> {
    let (start, target) = fallback::pick_pair(pool, rng)?;
    Some(Candidate {
        starting_materials: vec![start.smiles.clone()],
        target: target.smiles.clone(),
        key_intermediate: None,
        solution: Solution::Deferred,
    })
}
