//! orgquiz-common - Shared types, errors, and settings used across all orgquiz crates.

pub mod error;
pub mod entities;
pub mod quiz_config;

// Re-export commonly used types
pub use error::{QuizError, Result};
pub use entities::{Compound, Reaction, ReactionId};
pub use quiz_config::{FilterMode, QuizSettings, SearchStrategy, StepBounds};
