//! Filter stage: narrow the dataset to the selected functional groups.

use orgquiz_common::{Compound, FilterMode, QuizError, Reaction, ReactionId};
use orgquiz_db::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// A path problem needs at least a start and a distinct end.
pub const MIN_POOL_COMPOUNDS: usize = 2;

/// The set of functional-group tags the user has ticked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection(BTreeSet<String>);

impl FilterSelection {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    /// Everything selected, the initial state of the checkboxes.
    pub fn all(dataset: &Dataset, mode: FilterMode) -> Self {
        match mode {
            FilterMode::ReactionTags => Self::new(dataset.functional_groups()),
            FilterMode::CompoundTags => Self::new(dataset.compound_groups()),
        }
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Reactions and compounds left after filtering.
///
/// Borrowed from the dataset; built per generate action and dropped with it.
#[derive(Debug, Clone)]
pub struct ReactionPool<'a> {
    dataset: &'a Dataset,
    reactions: Vec<&'a Reaction>,
    allowed: HashSet<ReactionId>,
    compounds: Vec<&'a Compound>,
    touched: Vec<&'a Compound>,
    successors: HashMap<&'a str, Vec<&'a Reaction>>,
}

/// Run the filter stage.
///
/// Reactions are kept when their tags intersect the selection. The compound
/// pool is either the products of those reactions or, in
/// [`FilterMode::CompoundTags`], the compounds whose own tags intersect it.
pub fn apply<'a>(
    dataset: &'a Dataset,
    selection: &FilterSelection,
    mode: FilterMode,
) -> Result<ReactionPool<'a>, QuizError> {
    if selection.is_empty() {
        return Err(QuizError::InsufficientSelection);
    }
    let tags = selection.tags();

    let reactions: Vec<&Reaction> =
        dataset.reactions().iter().filter(|r| r.has_any_group(tags)).collect();
    let allowed: HashSet<ReactionId> = reactions.iter().map(|r| r.id).collect();

    let mut involved: HashSet<&str> = HashSet::new();
    let mut produced: HashSet<&str> = HashSet::new();
    let mut successors: HashMap<&str, Vec<&Reaction>> = HashMap::new();
    for &reaction in &reactions {
        involved.extend(reaction.reactants.iter().map(String::as_str));
        involved.extend(reaction.products.iter().map(String::as_str));
        produced.extend(reaction.products.iter().map(String::as_str));
        if reaction.is_linear() {
            successors.entry(reaction.reactants[0].as_str()).or_default().push(reaction);
        }
    }

    let compounds: Vec<&Compound> = match mode {
        FilterMode::ReactionTags => dataset
            .compounds()
            .iter()
            .filter(|c| produced.contains(c.smiles.as_str()))
            .collect(),
        FilterMode::CompoundTags => dataset.compounds().iter().filter(|c| c.has_any_group(tags)).collect(),
    };
    let touched: Vec<&Compound> = dataset
        .compounds()
        .iter()
        .filter(|c| involved.contains(c.smiles.as_str()))
        .collect();

    debug!(
        "Filter {:?} over {} tags: {} reactions, {} pooled compounds, {} involved",
        mode,
        selection.len(),
        reactions.len(),
        compounds.len(),
        touched.len()
    );

    if reactions.is_empty() || compounds.is_empty() || touched.len() < MIN_POOL_COMPOUNDS {
        return Err(QuizError::InsufficientData {
            reactions: reactions.len(),
            compounds: compounds.len(),
        });
    }

    Ok(ReactionPool { dataset, reactions, allowed, compounds, touched, successors })
}

impl<'a> ReactionPool<'a> {
    /// Allowed reactions in dataset order.
    pub fn reactions(&self) -> &[&'a Reaction] {
        &self.reactions
    }

    /// The compound pool problems draw their endpoints from.
    pub fn compounds(&self) -> &[&'a Compound] {
        &self.compounds
    }

    /// Every compound that appears in an allowed reaction.
    pub fn touched(&self) -> &[&'a Compound] {
        &self.touched
    }

    pub fn allows(&self, id: ReactionId) -> bool {
        self.allowed.contains(&id)
    }

    /// Allowed reactions whose products include `smiles`.
    pub fn producers_of(&self, smiles: &str) -> Vec<&'a Reaction> {
        self.dataset
            .producers_of(smiles)
            .iter()
            .filter(|id| self.allows(**id))
            .filter_map(|id| self.dataset.reaction(*id))
            .collect()
    }

    /// Allowed one-reactant, one-product reactions starting from `smiles`.
    pub fn linear_successors(&self, smiles: &str) -> &[&'a Reaction] {
        self.successors.get(smiles).map(Vec::as_slice).unwrap_or(&[])
    }
}
