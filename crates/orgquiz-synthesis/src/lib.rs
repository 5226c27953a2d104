//! orgquiz-synthesis - Retrosynthesis problem generation.
//!
//! The flow for one "new problem" action:
//! 1. [`filter`] narrows the dataset to the selected functional groups
//! 2. [`range`] clamps and validates the requested step counts
//! 3. [`generator`] runs one of the search shapes ([`backward`], [`forward`],
//!    [`fallback`]) under a fixed retry budget
//!
//! Everything here is synchronous and side-effect free apart from logging;
//! randomness is always passed in by the caller.

pub mod range;
pub mod filter;
pub mod path;
pub mod backward;
pub mod forward;
pub mod fallback;
pub mod generator;
pub mod network;

pub use filter::{FilterSelection, ReactionPool};
pub use generator::{generate, reveal, Generated, ProblemRequest};
pub use path::{Path, Solution, Step, SynthesisProblem};
pub use range::{RangeCorrection, StepRange, ValidatedRange};
