//! orgquiz Store
//!
//! Loads the static compound and reaction files once, validates them into a
//! strongly typed, immutable [`Dataset`], and tracks whether loading has
//! finished.
//!
//! # Example
//!
//! ```rust,no_run
//! use orgquiz_db::{load_dataset, DataPaths};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let paths = DataPaths::new("data/reactions.json").with_compounds("data/compounds.json");
//!     let dataset = load_dataset(&paths).await?;
//!     println!("{} reactions", dataset.reactions().len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod schema;
pub mod dataset;
pub mod loader;
pub mod slot;

pub use dataset::Dataset;
pub use error::{DbError, Result};
pub use loader::{
    load_dataset, load_nomenclature, DataPaths, DatasetSource, FileDatasetSource,
    StaticDatasetSource,
};
pub use schema::NomenclatureEntry;
pub use slot::DatasetSlot;
