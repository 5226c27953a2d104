//! orgquiz-web - browser front end for the organic chemistry quizzes.
//! Serves a JSON API for:
//!   - Synthesis problems (generate, reveal, reaction network)
//!   - Nomenclature flashcards
//!   - Data load status

pub mod config;
pub mod session;
pub mod state;
pub mod views;
pub mod handlers;
pub mod router;
