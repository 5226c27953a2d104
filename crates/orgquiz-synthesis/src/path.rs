//! Problem and solution types.

use crate::filter::FilterSelection;
use chrono::{DateTime, Utc};
use orgquiz_common::{FilterMode, ReactionId, SearchStrategy};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// One reaction applied in a synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub reaction: ReactionId,
    /// Every reactant the reaction consumes.
    pub from: Vec<String>,
    /// The product carried forward.
    pub to: String,
}

/// Steps in forward (reactant → product) order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Product of the last step.
    pub fn end(&self) -> Option<&str> {
        self.steps.last().map(|s| s.to.as_str())
    }

    /// Each step consumes what the previous one produced.
    pub fn is_connected(&self) -> bool {
        self.steps.windows(2).all(|w| w[1].from.contains(&w[0].to))
    }

    /// Starting from `start`, no compound on the main chain is seen twice.
    pub fn is_simple_from(&self, start: &str) -> bool {
        let mut seen = HashSet::from([start]);
        self.steps.iter().all(|s| seen.insert(s.to.as_str()))
    }

    /// Whether some step before the last already produces `target`.
    pub fn reaches_early(&self, target: &str) -> bool {
        let n = self.steps.len();
        self.steps.iter().take(n.saturating_sub(1)).any(|s| s.to == target)
    }

    /// Product of the first convergent step, unless that is the target itself.
    pub fn key_intermediate(&self, target: &str) -> Option<&str> {
        self.steps
            .iter()
            .find(|s| s.from.len() > 1)
            .map(|s| s.to.as_str())
            .filter(|to| *to != target)
    }
}

/// How the answer to a problem is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "path", rename_all = "snake_case")]
pub enum Solution {
    /// Built together with the problem.
    Known(Path),
    /// Only looked up when the user asks for it.
    Deferred,
}

/// A generated problem: get from the starting materials to the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisProblem {
    pub id: Uuid,
    pub strategy: SearchStrategy,
    pub selection: FilterSelection,
    pub filter_mode: FilterMode,
    /// Main starting material first, then any extra reagents fed in by
    /// convergent steps.
    pub starting_materials: Vec<String>,
    pub target: String,
    pub key_intermediate: Option<String>,
    pub solution: Solution,
    pub generated_at: DateTime<Utc>,
}

impl SynthesisProblem {
    pub fn steps(&self) -> Option<usize> {
        match &self.solution {
            Solution::Known(path) => Some(path.len()),
            Solution::Deferred => None,
        }
    }
}
