//! Quiz settings shared by the generators and the presenter.
//!
//! Every field has a serde default so a partial `[quiz]` table in the
//! config file is enough.

use serde::{Deserialize, Serialize};

/// Complete problem-generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSettings {
    /// Domain every step-count input is clamped into
    #[serde(default)]
    pub step_bounds: StepBounds,

    /// Initial value of the minimum-steps field
    #[serde(default = "default_min_steps")]
    pub default_min_steps: u32,

    /// Initial value of the maximum-steps field
    #[serde(default = "default_max_steps")]
    pub default_max_steps: u32,

    /// Independent randomised attempts before giving up
    #[serde(default = "default_retry_budget")]
    pub retry_budget: usize,

    /// Which path-search shape builds problems
    #[serde(default)]
    pub strategy: SearchStrategy,

    /// How the compound pool is derived from the tag selection
    #[serde(default)]
    pub filter_mode: FilterMode,

    /// Refuse to walk back onto a compound already on the path
    #[serde(default)]
    pub simple_backward_paths: bool,

    /// Fixed RNG seed for reproducible sessions
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_min_steps() -> u32 { 1 }
fn default_max_steps() -> u32 { 3 }
fn default_retry_budget() -> usize { 100 }

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            step_bounds: StepBounds::default(),
            default_min_steps: default_min_steps(),
            default_max_steps: default_max_steps(),
            retry_budget: default_retry_budget(),
            strategy: SearchStrategy::default(),
            filter_mode: FilterMode::default(),
            simple_backward_paths: false,
            seed: None,
        }
    }
}

impl QuizSettings {
    /// Check the settings are internally consistent.
    pub fn validate(&self) -> Result<(), String> {
        let bounds = &self.step_bounds;
        if bounds.floor < 1 {
            return Err("step_bounds.floor must be at least 1".to_string());
        }
        if bounds.floor > bounds.ceiling {
            return Err(format!(
                "step_bounds.floor ({}) exceeds step_bounds.ceiling ({})",
                bounds.floor, bounds.ceiling
            ));
        }
        if self.retry_budget == 0 {
            return Err("retry_budget must be positive".to_string());
        }
        if !bounds.contains(self.default_min_steps) || !bounds.contains(self.default_max_steps) {
            return Err(format!(
                "default step range [{}, {}] lies outside [{}, {}]",
                self.default_min_steps, self.default_max_steps, bounds.floor, bounds.ceiling
            ));
        }
        if self.default_min_steps > self.default_max_steps {
            return Err("default_min_steps exceeds default_max_steps".to_string());
        }
        Ok(())
    }
}

// ── Step bounds ──────────────────────────────────────────────────────────────

/// Inclusive domain for step counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepBounds {
    #[serde(default = "default_floor")]
    pub floor: u32,
    #[serde(default = "default_ceiling")]
    pub ceiling: u32,
}

fn default_floor() -> u32 { 1 }
fn default_ceiling() -> u32 { 15 }

impl Default for StepBounds {
    fn default() -> Self {
        Self { floor: default_floor(), ceiling: default_ceiling() }
    }
}

impl StepBounds {
    pub fn contains(&self, steps: u32) -> bool {
        (self.floor..=self.ceiling).contains(&steps)
    }

    /// Clamp into the bounds; an inverted pair collapses onto `floor`.
    pub fn clamp(&self, steps: i64) -> u32 {
        let floor = i64::from(self.floor);
        let ceiling = i64::from(self.ceiling).max(floor);
        steps.max(floor).min(ceiling) as u32
    }
}

// ── Strategy / filter mode ───────────────────────────────────────────────────

/// Path-search shape used to build a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Walk back from a random target through producing reactions.
    #[default]
    Backward,
    /// Fixed start and target, exact step count, depth-first.
    ForwardPair,
    /// Fixed start, random walk of a length drawn from the range.
    ForwardWalk,
    /// Two random compounds; the path is only looked up on reveal.
    Fallback,
}

impl SearchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStrategy::Backward    => "backward",
            SearchStrategy::ForwardPair => "forward_pair",
            SearchStrategy::ForwardWalk => "forward_walk",
            SearchStrategy::Fallback    => "fallback",
        }
    }
}

/// Where the compound pool comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Products of the reactions whose tags match the selection.
    #[default]
    ReactionTags,
    /// Compounds whose own tags match the selection.
    CompoundTags,
}
