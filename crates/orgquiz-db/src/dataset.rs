//! The validated, immutable compound/reaction store.

use crate::error::{DbError, Result};
use crate::schema::{RawCompound, RawCompoundRef, RawReaction};
use orgquiz_common::entities::dedup_tags;
use orgquiz_common::{Compound, Reaction, ReactionId};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// All compounds and reactions of one quiz page.
///
/// Every structure string a reaction mentions resolves to a compound; this is
/// checked once at construction so lookups never have to fail afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    compounds: Vec<Compound>,
    index: HashMap<String, usize>,
    reactions: Vec<Reaction>,
    producers: HashMap<String, Vec<ReactionId>>,
}

impl Dataset {
    /// Build from parsed files. Compound-file entries come first so they win
    /// over compounds embedded in reactions.
    pub fn from_raw(compounds: Vec<RawCompound>, reactions: Vec<RawReaction>) -> Result<Self> {
        let mut all = Vec::with_capacity(compounds.len());
        all.extend(compounds.into_iter().map(into_compound));

        for raw in &reactions {
            for slot in raw.reactants.iter().chain(raw.products.iter()) {
                if let RawCompoundRef::Embedded(c) = slot {
                    all.push(into_compound(c.clone()));
                }
            }
        }

        let reactions = reactions
            .into_iter()
            .enumerate()
            .map(|(i, raw)| Reaction {
                id: ReactionId(i),
                reagents: raw.reagents.as_ref().map(|r| r.joined()).unwrap_or_default(),
                reactants: raw.reactants.iter().map(|r| r.smiles().to_string()).collect(),
                products: raw.products.iter().map(|p| p.smiles().to_string()).collect(),
                functional_groups: dedup_tags(raw.functional_groups),
                reaction_name: raw.reaction_name,
            })
            .collect();

        Self::from_parts(all, reactions)
    }

    /// Build from already-typed entities. Reaction ids are reassigned to
    /// their position.
    pub fn from_parts(compounds: Vec<Compound>, reactions: Vec<Reaction>) -> Result<Self> {
        let mut kept = Vec::with_capacity(compounds.len());
        let mut index = HashMap::new();

        for compound in compounds {
            if compound.smiles.trim().is_empty() {
                return Err(DbError::Malformed(format!(
                    "compound '{}' has an empty structure string",
                    compound.iupac_name
                )));
            }
            if compound.iupac_name.trim().is_empty() {
                return Err(DbError::Malformed(format!(
                    "compound {} has no name",
                    compound.smiles
                )));
            }
            if index.contains_key(&compound.smiles) {
                debug!("Duplicate compound {} ignored", compound.smiles);
                continue;
            }
            index.insert(compound.smiles.clone(), kept.len());
            kept.push(compound);
        }

        let mut producers: HashMap<String, Vec<ReactionId>> = HashMap::new();
        let mut typed = Vec::with_capacity(reactions.len());

        for (i, mut reaction) in reactions.into_iter().enumerate() {
            reaction.id = ReactionId(i);
            if reaction.reactants.is_empty() || reaction.products.is_empty() {
                return Err(DbError::Malformed(format!(
                    "reaction '{}' needs at least one reactant and one product",
                    reaction.reaction_name
                )));
            }
            for smiles in reaction.reactants.iter().chain(reaction.products.iter()) {
                if !index.contains_key(smiles) {
                    return Err(DbError::UnresolvedCompound {
                        reaction: reaction.reaction_name.clone(),
                        smiles: smiles.clone(),
                    });
                }
            }
            for product in dedup_tags(reaction.products.iter().cloned()) {
                producers.entry(product).or_default().push(reaction.id);
            }
            typed.push(reaction);
        }

        info!("Dataset ready: {} compounds, {} reactions", kept.len(), typed.len());

        Ok(Self { compounds: kept, index, reactions: typed, producers })
    }

    /// Parse the JSON documents directly.
    pub fn from_json(reactions_json: &str, compounds_json: Option<&str>) -> Result<Self> {
        let reactions: Vec<RawReaction> = serde_json::from_str(reactions_json)
            .map_err(|source| DbError::Json { path: "reactions".to_string(), source })?;
        let compounds: Vec<RawCompound> = match compounds_json {
            Some(text) => serde_json::from_str(text)
                .map_err(|source| DbError::Json { path: "compounds".to_string(), source })?,
            None => Vec::new(),
        };
        Self::from_raw(compounds, reactions)
    }

    pub fn compounds(&self) -> &[Compound] {
        &self.compounds
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn compound(&self, smiles: &str) -> Option<&Compound> {
        self.index.get(smiles).map(|&i| &self.compounds[i])
    }

    pub fn reaction(&self, id: ReactionId) -> Option<&Reaction> {
        self.reactions.get(id.0)
    }

    /// Reactions listing `smiles` among their products, in dataset order.
    pub fn producers_of(&self, smiles: &str) -> &[ReactionId] {
        self.producers.get(smiles).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sorted union of reaction tags; the source of the selection checkboxes.
    pub fn functional_groups(&self) -> Vec<String> {
        let groups: BTreeSet<&String> =
            self.reactions.iter().flat_map(|r| r.functional_groups.iter()).collect();
        groups.into_iter().cloned().collect()
    }

    /// Sorted union of compound tags.
    pub fn compound_groups(&self) -> Vec<String> {
        let groups: BTreeSet<&String> =
            self.compounds.iter().flat_map(|c| c.functional_groups.iter()).collect();
        groups.into_iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }
}

fn into_compound(raw: RawCompound) -> Compound {
    Compound {
        smiles: raw.smiles,
        iupac_name: raw.iupac_name,
        common_name: raw.common_name.filter(|n| !n.trim().is_empty()),
        functional_groups: dedup_tags(raw.functional_groups),
    }
}
