/// Core entity types of the reaction dataset.
/// Both are immutable once the dataset has been loaded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Compound
// ---------------------------------------------------------------------------

/// A compound keyed by its structure string.
///
/// The structure string is opaque: it is never parsed or normalised, so the
/// presenter can hand it to an image service exactly as the dataset wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compound {
    pub smiles: String,
    pub iupac_name: String,
    pub common_name: Option<String>,
    /// Functional-group tags, in dataset order without duplicates.
    pub functional_groups: Vec<String>,
}

impl Compound {
    pub fn new(smiles: &str, iupac_name: &str) -> Self {
        Self {
            smiles: smiles.to_string(),
            iupac_name: iupac_name.to_string(),
            common_name: None,
            functional_groups: Vec::new(),
        }
    }

    pub fn with_common_name(mut self, common_name: &str) -> Self {
        self.common_name = Some(common_name.to_string());
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.functional_groups = dedup_tags(groups);
        self
    }

    /// Does this compound carry any of the selected tags?
    pub fn has_any_group(&self, selected: &BTreeSet<String>) -> bool {
        self.functional_groups.iter().any(|g| selected.contains(g))
    }
}

// ---------------------------------------------------------------------------
// Reaction
// ---------------------------------------------------------------------------

/// Position of a reaction in its dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReactionId(pub usize);

impl fmt::Display for ReactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// A directed hyperedge: reactants → products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: ReactionId,
    pub reaction_name: String,
    pub reagents: String,
    /// Structure strings of the reactants (at least one).
    pub reactants: Vec<String>,
    /// Structure strings of the products (at least one).
    pub products: Vec<String>,
    /// Tags this reaction is filed under, in dataset order.
    pub functional_groups: Vec<String>,
}

impl Reaction {
    pub fn produces(&self, smiles: &str) -> bool {
        self.products.iter().any(|p| p == smiles)
    }

    pub fn consumes(&self, smiles: &str) -> bool {
        self.reactants.iter().any(|r| r == smiles)
    }

    /// More than one reactant: two supply lines merge here.
    pub fn is_convergent(&self) -> bool {
        self.reactants.len() > 1
    }

    /// Exactly one reactant and one product, i.e. usable by forward chaining.
    pub fn is_linear(&self) -> bool {
        self.reactants.len() == 1 && self.products.len() == 1
    }

    pub fn has_any_group(&self, selected: &BTreeSet<String>) -> bool {
        self.functional_groups.iter().any(|g| selected.contains(g))
    }
}

/// Drop repeated tags while keeping first-seen order.
pub fn dedup_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = BTreeSet::new();
    tags.into_iter()
        .map(Into::into)
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
