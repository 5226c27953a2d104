//! Asynchronous loading of the dataset files.
//!
//! Loading is all-or-nothing: callers get either a complete [`Dataset`] or an
//! error, never a partially filled store.

use crate::dataset::Dataset;
use crate::error::{DbError, Result};
use crate::schema::NomenclatureEntry;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Location of the dataset files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPaths {
    pub reactions: PathBuf,
    #[serde(default)]
    pub compounds: Option<PathBuf>,
}

impl DataPaths {
    pub fn new<P: AsRef<Path>>(reactions: P) -> Self {
        Self { reactions: reactions.as_ref().to_path_buf(), compounds: None }
    }

    pub fn with_compounds<P: AsRef<Path>>(mut self, compounds: P) -> Self {
        self.compounds = Some(compounds.as_ref().to_path_buf());
        self
    }
}

/// Anything that can produce a dataset.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn load_dataset(&self) -> Result<Dataset>;
}

/// Reads the dataset from JSON files on disk.
#[derive(Debug, Clone)]
pub struct FileDatasetSource {
    paths: DataPaths,
}

impl FileDatasetSource {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl DatasetSource for FileDatasetSource {
    async fn load_dataset(&self) -> Result<Dataset> {
        load_dataset(&self.paths).await
    }
}

/// Serves a dataset from JSON text held in memory.
#[derive(Debug, Clone)]
pub struct StaticDatasetSource {
    reactions_json: String,
    compounds_json: Option<String>,
}

impl StaticDatasetSource {
    pub fn new(reactions_json: impl Into<String>, compounds_json: Option<String>) -> Self {
        Self { reactions_json: reactions_json.into(), compounds_json }
    }
}

#[async_trait]
impl DatasetSource for StaticDatasetSource {
    async fn load_dataset(&self) -> Result<Dataset> {
        Dataset::from_json(&self.reactions_json, self.compounds_json.as_deref())
    }
}

/// Load and validate the reaction file and, if configured, the compound file.
pub async fn load_dataset(paths: &DataPaths) -> Result<Dataset> {
    let compounds = async {
        match &paths.compounds {
            Some(path) => read_file(path).await.map(Some),
            None => Ok(None),
        }
    };
    let (reactions_json, compounds_json) = tokio::try_join!(read_file(&paths.reactions), compounds)?;

    let dataset = Dataset::from_json(&reactions_json, compounds_json.as_deref()).map_err(|e| match e {
        DbError::Json { path, source } => {
            let file = match (&paths.compounds, path.as_str()) {
                (Some(compounds), "compounds") => compounds,
                _ => &paths.reactions,
            };
            DbError::Json { path: file.display().to_string(), source }
        }
        other => other,
    })?;

    info!(
        "Loaded {} reactions and {} compounds from {}",
        dataset.reactions().len(),
        dataset.compounds().len(),
        paths.reactions.display()
    );
    Ok(dataset)
}

/// Load the nomenclature flashcard entries.
pub async fn load_nomenclature(path: &Path) -> Result<Vec<NomenclatureEntry>> {
    let text = read_file(path).await?;
    let entries: Vec<NomenclatureEntry> = serde_json::from_str(&text)
        .map_err(|source| DbError::Json { path: path.display().to_string(), source })?;

    if let Some(bad) = entries.iter().find(|e| e.smiles.trim().is_empty()) {
        return Err(DbError::Malformed(format!(
            "nomenclature entry '{}' has an empty structure string",
            bad.iupac_name
        )));
    }

    info!("Loaded {} nomenclature entries from {}", entries.len(), path.display());
    Ok(entries)
}

async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DbError::Io { path: path.display().to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_reactions_and_compounds() {
        let compounds = write_temp(
            r#"[{"smiles": "CCO", "iupac_name": "ethanol", "functional_groups": ["alcohol"]},
                {"smiles": "CC=O", "iupac_name": "ethanal", "functional_groups": ["aldehyde"]}]"#,
        );
        let reactions = write_temp(
            r#"[{"reaction_name": "Oxidation", "reagents": "PCC", "reactants": ["CCO"],
                 "products": ["CC=O"], "functional_groups": ["oxidation"]}]"#,
        );

        let paths = DataPaths::new(reactions.path()).with_compounds(compounds.path());
        let dataset = load_dataset(&paths).await.unwrap();
        assert_eq!(dataset.compounds().len(), 2);
        assert_eq!(dataset.reactions()[0].reagents, "PCC");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let paths = DataPaths::new("/definitely/not/here/reactions.json");
        let err = FileDatasetSource::new(paths).load_dataset().await.unwrap_err();
        assert!(matches!(err, DbError::Io { .. }));
    }

    #[tokio::test]
    async fn test_bad_json_names_the_file() {
        let reactions = write_temp("[{");
        let paths = DataPaths::new(reactions.path());
        let err = load_dataset(&paths).await.unwrap_err();
        assert!(err.to_string().contains(&reactions.path().display().to_string()));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticDatasetSource::new(
            r#"[{"reaction_name": "Hydration", "reactants": [{"smiles": "C=C", "iupac_name": "ethene"}],
                 "products": [{"smiles": "CCO", "iupac_name": "ethanol"}], "functional_groups": ["alkene"]}]"#,
            None,
        );
        let dataset = source.load_dataset().await.unwrap();
        assert_eq!(dataset.functional_groups(), vec!["alkene"]);
    }

    #[tokio::test]
    async fn test_load_nomenclature() {
        let file = write_temp(
            r#"[{"smiles": "CC(C)O", "iupac_name": "propan-2-ol", "common_name": "isopropyl alcohol"},
                {"smiles": "CCCC", "iupac_name": "butane"}]"#,
        );
        let entries = load_nomenclature(file.path()).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].common_name, None);
    }
}
