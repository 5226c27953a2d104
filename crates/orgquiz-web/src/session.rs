//! Per-session quiz state.
//!
//! One generation cycle runs `Idle → Filtering → Searching`, then either
//! `PresentingProblem` (found) or back to `Idle` (not found). The solution
//! is only shown after an explicit reveal. Starting a new generation resets
//! the cycle from any phase.

use orgquiz_common::QuizError;
use orgquiz_nomenclature::Flashcard;
use orgquiz_synthesis::{Generated, Path, SynthesisProblem};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Filtering,
    Searching,
    PresentingProblem,
    PresentingSolution,
}

#[derive(Debug, Default)]
pub struct Session {
    phase: Phase,
    current: Option<Generated>,
    card: Option<Flashcard>,
}

impl Session {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn problem(&self) -> Option<&SynthesisProblem> {
        self.current.as_ref().map(|g| &g.problem)
    }

    /// Drop whatever is on screen and start filtering.
    pub fn begin_generation(&mut self) {
        self.transition(Phase::Filtering);
        self.current = None;
    }

    /// The filter stage passed; the path search is running.
    pub fn begin_search(&mut self) {
        if self.phase == Phase::Filtering {
            self.transition(Phase::Searching);
        }
    }

    /// Record the outcome of a generation cycle. The new problem replaces the
    /// old one wholesale; any failure leaves nothing on screen.
    pub fn finish_generation(
        &mut self,
        outcome: Result<Generated, QuizError>,
    ) -> Result<&Generated, QuizError> {
        match outcome {
            Ok(generated) => {
                self.transition(Phase::PresentingProblem);
                Ok(self.current.insert(generated))
            }
            Err(e) => {
                self.transition(Phase::Idle);
                self.current = None;
                Err(e)
            }
        }
    }

    /// Work out the solution of the problem on screen with `solve`.
    ///
    /// Only possible while a problem is presented. A failed `solve` keeps
    /// the problem on screen.
    pub fn reveal<F>(&mut self, solve: F) -> Result<(&SynthesisProblem, Path), QuizError>
    where
        F: FnOnce(&SynthesisProblem) -> Result<Path, QuizError>,
    {
        if !matches!(self.phase, Phase::PresentingProblem | Phase::PresentingSolution) {
            return Err(QuizError::NoActiveProblem);
        }
        let problem = self.current.as_ref().map(|g| &g.problem).ok_or(QuizError::NoActiveProblem)?;
        let path = solve(problem)?;
        self.phase = Phase::PresentingSolution;
        debug!("Revealed {} step solution for {}", path.len(), problem.target);
        Ok((problem, path))
    }

    pub fn card(&self) -> Option<&Flashcard> {
        self.card.as_ref()
    }

    pub fn set_card(&mut self, card: Flashcard) {
        self.card = Some(card);
    }

    fn transition(&mut self, next: Phase) {
        debug!("Session {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}
