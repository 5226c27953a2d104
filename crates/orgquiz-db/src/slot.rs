//! Load state of the dataset as seen by request handlers.

use crate::dataset::Dataset;
use crate::error::{DbError, Result};
use std::sync::Arc;

/// Either still loading, loaded, or failed for good.
#[derive(Debug, Clone, Default)]
pub enum DatasetSlot {
    #[default]
    Loading,
    Ready(Arc<Dataset>),
    Failed(String),
}

impl DatasetSlot {
    pub fn from_result(result: Result<Dataset>) -> Self {
        match result {
            Ok(dataset) => DatasetSlot::Ready(Arc::new(dataset)),
            Err(e) => DatasetSlot::Failed(e.to_string()),
        }
    }

    /// The dataset, or why no search may run against it yet.
    pub fn ready(&self) -> Result<Arc<Dataset>> {
        match self {
            DatasetSlot::Ready(dataset) => Ok(Arc::clone(dataset)),
            DatasetSlot::Loading => Err(DbError::NotLoaded),
            DatasetSlot::Failed(reason) => Err(DbError::LoadFailed(reason.clone())),
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            DatasetSlot::Loading => "loading",
            DatasetSlot::Ready(_) => "ready",
            DatasetSlot::Failed(_) => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgquiz_common::QuizError;

    #[test]
    fn test_loading_slot_reports_not_loaded() {
        let err: QuizError = DatasetSlot::Loading.ready().unwrap_err().into();
        assert!(matches!(err, QuizError::DatasetNotLoaded));
    }

    #[test]
    fn test_failed_slot_reports_data_unavailable() {
        let slot = DatasetSlot::from_result(Err(DbError::Malformed("empty".into())));
        assert_eq!(slot.status(), "failed");
        let err: QuizError = slot.ready().unwrap_err().into();
        assert!(matches!(err, QuizError::DataUnavailable(msg) if msg.contains("empty")));
    }

    #[test]
    fn test_ready_slot_shares_dataset() {
        let slot = DatasetSlot::from_result(Ok(Dataset::default()));
        let a = slot.ready().unwrap();
        let b = slot.ready().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
