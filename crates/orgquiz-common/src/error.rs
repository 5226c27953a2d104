use thiserror::Error;

/// Every condition a quiz action can end in besides success.
///
/// None of these are fatal: the presenter renders them inline and the page
/// stays interactive.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Reaction data is unavailable: {0}")]
    DataUnavailable(String),

    #[error("Reaction data is still loading")]
    DatasetNotLoaded,

    #[error("Please select at least one functional group")]
    InsufficientSelection,

    #[error("Not enough data for the selected functional groups ({reactions} reactions, {compounds} compounds)")]
    InsufficientData { reactions: usize, compounds: usize },

    #[error("Invalid step range: {0}")]
    InvalidRange(String),

    #[error("Failed to generate a synthesis path after {attempts} attempts")]
    SearchExhausted { attempts: usize },

    #[error("No solution path found")]
    NoSolutionAtReveal,

    #[error("No problem has been generated yet")]
    NoActiveProblem,

    #[error("Unknown compound: {0}")]
    UnknownCompound(String),
}

impl QuizError {
    /// Stable tag used by the presenter to pick how a condition is rendered.
    pub fn kind(&self) -> &'static str {
        match self {
            QuizError::DataUnavailable(_)       => "data_unavailable",
            QuizError::DatasetNotLoaded         => "dataset_not_loaded",
            QuizError::InsufficientSelection    => "insufficient_selection",
            QuizError::InsufficientData { .. }  => "insufficient_data",
            QuizError::InvalidRange(_)          => "invalid_range",
            QuizError::SearchExhausted { .. }   => "search_exhausted",
            QuizError::NoSolutionAtReveal       => "no_solution_at_reveal",
            QuizError::NoActiveProblem          => "no_active_problem",
            QuizError::UnknownCompound(_)       => "unknown_compound",
        }
    }

    /// Whether the user can fix the condition by changing their input.
    pub fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            QuizError::InsufficientSelection
                | QuizError::InsufficientData { .. }
                | QuizError::InvalidRange(_)
                | QuizError::SearchExhausted { .. }
                | QuizError::NoSolutionAtReveal
                | QuizError::NoActiveProblem
        )
    }

    /// Follow-up advice shown under the error message, if any.
    pub fn guidance(&self) -> Option<&'static str> {
        match self {
            QuizError::InsufficientData { .. } => Some("Please select more functional groups."),
            QuizError::SearchExhausted { .. } => Some(
                "Please try again, select more functional groups, or adjust the step range.",
            ),
            QuizError::InvalidRange(_) => Some("Min steps cannot be greater than max."),
            QuizError::DatasetNotLoaded => Some("Try again in a moment."),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_exhausted_is_actionable() {
        let err = QuizError::SearchExhausted { attempts: 100 };
        assert_eq!(err.kind(), "search_exhausted");
        assert!(err.is_user_actionable());
        assert!(err.guidance().unwrap().contains("step range"));
        assert!(err.to_string().contains("100 attempts"));
    }

    #[test]
    fn test_data_unavailable_is_not_user_actionable() {
        let err = QuizError::DataUnavailable("missing reactions.json".into());
        assert!(!err.is_user_actionable());
        assert_eq!(err.kind(), "data_unavailable");
    }
}
