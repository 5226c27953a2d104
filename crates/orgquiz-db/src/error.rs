//! Store error types.

use orgquiz_common::QuizError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed dataset: {0}")]
    Malformed(String),

    #[error("Reaction {reaction} references unknown compound {smiles}")]
    UnresolvedCompound { reaction: String, smiles: String },

    #[error("Dataset not loaded")]
    NotLoaded,

    #[error("Dataset load failed: {0}")]
    LoadFailed(String),
}

impl From<DbError> for QuizError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotLoaded => QuizError::DatasetNotLoaded,
            other => QuizError::DataUnavailable(other.to_string()),
        }
    }
}
