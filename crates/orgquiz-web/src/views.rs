//! JSON view models: identifiers resolved into what the page displays.

use crate::config::ImageConfig;
use orgquiz_common::{QuizError, SearchStrategy};
use orgquiz_db::Dataset;
use orgquiz_nomenclature::{Flashcard, Prompt};
use orgquiz_synthesis::{Generated, Path, RangeCorrection, SynthesisProblem};
use serde::Serialize;
use uuid::Uuid;

/// `<base>/<percent-encoded structure>/image`. The structure string is not
/// normalised in any other way.
pub fn image_url(base: &str, smiles: &str) -> String {
    format!("{}/{}/image", base.trim_end_matches('/'), urlencoding::encode(smiles))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompoundView {
    pub smiles: String,
    pub name: String,
    pub common_name: Option<String>,
    pub image_url: String,
    pub fallback_url: String,
}

impl CompoundView {
    pub fn new(smiles: &str, name: &str, common_name: Option<&str>, images: &ImageConfig) -> Self {
        Self {
            smiles: smiles.to_string(),
            name: name.to_string(),
            common_name: common_name.map(str::to_string),
            image_url: image_url(&images.base_url, smiles),
            fallback_url: images.fallback_url.clone(),
        }
    }

    pub fn resolve(dataset: &Dataset, smiles: &str, images: &ImageConfig) -> Result<Self, QuizError> {
        let compound = dataset
            .compound(smiles)
            .ok_or_else(|| QuizError::UnknownCompound(smiles.to_string()))?;
        Ok(Self::new(&compound.smiles, &compound.iupac_name, compound.common_name.as_deref(), images))
    }
}

fn resolve_all(dataset: &Dataset, ids: &[String], images: &ImageConfig) -> Result<Vec<CompoundView>, QuizError> {
    ids.iter().map(|id| CompoundView::resolve(dataset, id, images)).collect()
}

#[derive(Debug, Serialize)]
pub struct ProblemView {
    pub id: Uuid,
    pub strategy: SearchStrategy,
    pub starting_materials: Vec<CompoundView>,
    pub target: CompoundView,
    pub key_intermediate: Option<CompoundView>,
    /// Unknown until reveal for deferred problems.
    pub steps: Option<usize>,
    pub min_steps: u32,
    pub max_steps: u32,
    pub correction: Option<RangeCorrection>,
    pub attempts: usize,
}

impl ProblemView {
    pub fn build(dataset: &Dataset, generated: &Generated, images: &ImageConfig) -> Result<Self, QuizError> {
        let problem = &generated.problem;
        Ok(Self {
            id: problem.id,
            strategy: problem.strategy,
            starting_materials: resolve_all(dataset, &problem.starting_materials, images)?,
            target: CompoundView::resolve(dataset, &problem.target, images)?,
            key_intermediate: problem
                .key_intermediate
                .as_deref()
                .map(|id| CompoundView::resolve(dataset, id, images))
                .transpose()?,
            steps: problem.steps(),
            min_steps: generated.range.min(),
            max_steps: generated.range.max(),
            correction: generated.correction.clone(),
            attempts: generated.attempts,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StepView {
    pub number: usize,
    pub reaction_name: String,
    pub reagents: String,
    pub reactants: Vec<CompoundView>,
    pub product: CompoundView,
}

#[derive(Debug, Serialize)]
pub struct SolutionView {
    pub problem_id: Uuid,
    pub steps: Vec<StepView>,
}

impl SolutionView {
    pub fn build(
        dataset: &Dataset,
        problem: &SynthesisProblem,
        path: &Path,
        images: &ImageConfig,
    ) -> Result<Self, QuizError> {
        let mut steps = Vec::with_capacity(path.len());
        for (i, step) in path.steps().iter().enumerate() {
            let reaction = dataset
                .reaction(step.reaction)
                .ok_or_else(|| QuizError::DataUnavailable(format!("reaction {} is missing", step.reaction)))?;
            steps.push(StepView {
                number: i + 1,
                reaction_name: reaction.reaction_name.clone(),
                reagents: reaction.reagents.clone(),
                reactants: resolve_all(dataset, &step.from, images)?,
                product: CompoundView::resolve(dataset, &step.to, images)?,
            });
        }
        Ok(Self { problem_id: problem.id, steps })
    }
}

#[derive(Debug, Serialize)]
pub struct CardView {
    pub index: usize,
    pub prompt: Prompt,
    /// Set for structure prompts.
    pub image_url: Option<String>,
    pub fallback_url: String,
}

impl CardView {
    pub fn new(card: &Flashcard, prompt: Prompt, images: &ImageConfig) -> Self {
        let image_url = match &prompt {
            Prompt::Structure { smiles } => Some(image_url(&images.base_url, smiles)),
            Prompt::Name { .. } => None,
        };
        Self { index: card.index, prompt, image_url, fallback_url: images.fallback_url.clone() }
    }
}

#[derive(Debug, Serialize)]
pub struct AnswerView {
    pub index: usize,
    pub smiles: String,
    pub iupac_name: String,
    pub common_name: String,
    pub answer: String,
}

impl From<&Flashcard> for AnswerView {
    fn from(card: &Flashcard) -> Self {
        Self {
            index: card.index,
            smiles: card.entry.smiles.clone(),
            iupac_name: card.entry.iupac_name.clone(),
            common_name: card.common_name().to_string(),
            answer: card.answer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgquiz_test_utils::sample_dataset;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_image_url_percent_encodes_structure() {
        assert_eq!(
            image_url("https://cactus.nci.nih.gov/chemical/structure/", "CC(=O)O"),
            "https://cactus.nci.nih.gov/chemical/structure/CC%28%3DO%29O/image"
        );
        assert_eq!(image_url("http://x", "C#N"), "http://x/C%23N/image");
    }

    #[test]
    fn test_resolve_keeps_identifier_unchanged() {
        let ds = sample_dataset();
        let view = CompoundView::resolve(&ds, "CCO", &ImageConfig::default()).unwrap();
        assert_eq!(view.smiles, "CCO");
        assert_eq!(view.name, "ethanol");
        assert_eq!(view.common_name.as_deref(), Some("ethyl alcohol"));
        assert_eq!(view.fallback_url, "/static/fallback-image.png");
    }

    #[test]
    fn test_unknown_compound() {
        let ds = sample_dataset();
        let err = CompoundView::resolve(&ds, "XYZ", &ImageConfig::default()).unwrap_err();
        assert!(matches!(err, QuizError::UnknownCompound(s) if s == "XYZ"));
    }
}
