//! Shared application state for the web server.

use crate::config::Config;
use crate::session::Session;
use orgquiz_common::QuizError;
use orgquiz_db::{load_nomenclature, Dataset, DatasetSlot, DatasetSource, FileDatasetSource};
use orgquiz_nomenclature::Deck;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

/// Shared state injected into every Axum handler.
///
/// The dataset is read-only once loaded. The session holds the problem on
/// screen and is replaced wholesale by each generation.
pub struct AppState {
    pub config: Config,
    pub dataset: RwLock<DatasetSlot>,
    pub deck: RwLock<Deck>,
    pub session: Mutex<Session>,
    pub rng: Mutex<StdRng>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let rng = match config.quiz.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            dataset: RwLock::new(DatasetSlot::Loading),
            deck: RwLock::new(Deck::default()),
            session: Mutex::new(Session::default()),
            rng: Mutex::new(rng),
        }
    }

    /// The loaded dataset, or why it cannot be used yet.
    pub async fn dataset(&self) -> Result<Arc<Dataset>, QuizError> {
        Ok(self.dataset.read().await.ready()?)
    }

    pub async fn set_dataset(&self, slot: DatasetSlot) {
        *self.dataset.write().await = slot;
    }

    /// Load the reaction data from `source`. A failure leaves the slot
    /// failed; every later request reports the data as unavailable.
    pub async fn load_dataset_from(&self, source: &dyn DatasetSource) {
        let result = source.load_dataset().await;
        match &result {
            Ok(dataset) => info!(
                "Reaction data loaded: {} compounds, {} reactions",
                dataset.compounds().len(),
                dataset.reactions().len()
            ),
            Err(e) => error!("Dataset failed to load: {}", e),
        }
        self.set_dataset(DatasetSlot::from_result(result)).await;
    }

    /// Load every configured data file.
    pub async fn load_data(&self) {
        let source = FileDatasetSource::new(self.config.data.dataset_paths());
        self.load_dataset_from(&source).await;

        if let Some(path) = &self.config.data.nomenclature_path {
            match load_nomenclature(path).await {
                Ok(entries) => *self.deck.write().await = Deck::new(entries),
                Err(e) => warn!("Nomenclature deck unavailable: {}", e),
            }
        }
    }
}

pub type SharedState = Arc<AppState>;
