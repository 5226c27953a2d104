//! Whole-dataset reaction network, shaped for a front-end graph library.

use orgquiz_common::Reaction;
use orgquiz_db::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

const DEFAULT_COLOR: &str = "#7f7f7f";

const PALETTE: &[(&str, &str)] = &[
    ("alcohol", "#1f77b4"),
    ("aldehyde", "#ff7f0e"),
    ("carboxylic-acid", "#2ca02c"),
    ("ketone", "#d62728"),
    ("alkene", "#9467bd"),
    ("halide", "#8c564b"),
    ("ester", "#e377c2"),
    ("alkyne", "#bcbd22"),
    ("alkane", "#aec7e8"),
    ("diol", "#ffbb78"),
    ("halohydrin", "#98df8a"),
    ("tosylate", "#ff9896"),
    ("acetylide", "#c5b0d5"),
    ("ylide", "#c49c94"),
    ("grignard-reagent", "#f7b6d2"),
    ("phosphine-oxide", "#dbdb8d"),
    ("beta-keto-ester", "#9edae5"),
];

/// Colour for a functional-group tag, grey when unknown.
pub fn color_for(tag: Option<&str>) -> &'static str {
    tag.and_then(|t| PALETTE.iter().find(|(name, _)| *name == t))
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_COLOR)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkMode {
    /// Every reactant linked to every product.
    #[default]
    Full,
    /// Only reactions with exactly one reactant.
    SingleReactant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkNode {
    /// Display name; also the node key.
    pub id: String,
    pub color: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub from: String,
    pub to: String,
    /// Reagents.
    pub label: String,
    /// Reaction name.
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionNetwork {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
    /// Reactions left out in [`NetworkMode::SingleReactant`].
    pub skipped: usize,
}

impl ReactionNetwork {
    pub fn build(dataset: &Dataset, mode: NetworkMode) -> Self {
        let mut network = Self::default();
        let mut seen: HashSet<String> = HashSet::new();

        for reaction in dataset.reactions() {
            if mode == NetworkMode::SingleReactant && reaction.reactants.len() != 1 {
                warn!(
                    "Skipping {} ({}): {} reactants",
                    reaction.id,
                    reaction.reaction_name,
                    reaction.reactants.len()
                );
                network.skipped += 1;
                continue;
            }
            network.add_reaction(dataset, reaction, &mut seen);
        }
        network
    }

    pub fn node(&self, id: &str) -> Option<&NetworkNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn add_reaction(&mut self, dataset: &Dataset, reaction: &Reaction, seen: &mut HashSet<String>) {
        let tag = |i: usize| reaction.functional_groups.get(i).map(String::as_str);

        let mut sources = Vec::with_capacity(reaction.reactants.len());
        for reactant in &reaction.reactants {
            sources.push(self.upsert(dataset, reactant, color_for(tag(0)), seen));
        }
        for (j, product) in reaction.products.iter().enumerate() {
            let to = self.upsert(dataset, product, color_for(tag(j + 1)), seen);
            for from in &sources {
                self.edges.push(NetworkEdge {
                    from: from.clone(),
                    to: to.clone(),
                    label: reaction.reagents.clone(),
                    title: reaction.reaction_name.clone(),
                });
            }
        }
    }

    /// Insert the node for `smiles` unless it exists; the first colour sticks.
    fn upsert(&mut self, dataset: &Dataset, smiles: &str, color: &str, seen: &mut HashSet<String>) -> String {
        let id = dataset
            .compound(smiles)
            .map(|c| c.iupac_name.clone())
            .unwrap_or_else(|| smiles.to_string());

        if seen.insert(id.clone()) {
            self.nodes.push(NetworkNode {
                id: id.clone(),
                color: color.to_string(),
                title: format!("SMILES: {smiles}"),
            });
        }
        id
    }
}
