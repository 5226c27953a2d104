//! On-disk JSON shapes of the dataset files.
//!
//! These mirror the files as authored. They are only used while loading;
//! [`crate::Dataset::from_raw`] turns them into the validated entities.

use serde::{Deserialize, Serialize};

/// One entry of `compounds.json`, or a compound embedded in a reaction.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCompound {
    pub smiles: String,
    #[serde(alias = "name")]
    pub iupac_name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default, alias = "functionalGroups")]
    pub functional_groups: Vec<String>,
}

/// A reactant/product slot: either a bare structure string pointing into the
/// compound file, or a full compound object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCompoundRef {
    Smiles(String),
    Embedded(RawCompound),
}

impl RawCompoundRef {
    pub fn smiles(&self) -> &str {
        match self {
            RawCompoundRef::Smiles(s) => s,
            RawCompoundRef::Embedded(c) => &c.smiles,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawReagents {
    Text(String),
    List(Vec<String>),
}

impl RawReagents {
    pub fn joined(&self) -> String {
        match self {
            RawReagents::Text(t) => t.clone(),
            RawReagents::List(items) => items.join(", "),
        }
    }
}

/// One entry of `reactions.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReaction {
    #[serde(default)]
    pub reactants: Vec<RawCompoundRef>,
    #[serde(default)]
    pub products: Vec<RawCompoundRef>,
    #[serde(default)]
    pub reagents: Option<RawReagents>,
    #[serde(alias = "name")]
    pub reaction_name: String,
    #[serde(default, alias = "functionalGroups")]
    pub functional_groups: Vec<String>,
}

/// One entry of the nomenclature flashcard file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NomenclatureEntry {
    pub smiles: String,
    pub iupac_name: String,
    #[serde(default)]
    pub common_name: Option<String>,
}
