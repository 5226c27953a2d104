//! Fixtures for orgquiz tests: small hand-built datasets and seeded RNGs.

use orgquiz_common::{Compound, Reaction, ReactionId};
use orgquiz_db::Dataset;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic RNG for a test.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Builds a [`Dataset`] from terse compound/reaction declarations.
///
/// Compounds are named `compound <smiles>` unless given a name; reactions are
/// named `<reactants> to <products>` with reagent text `reagent <n>`.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    compounds: Vec<Compound>,
    reactions: Vec<Reaction>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compound(self, smiles: &str, groups: &[&str]) -> Self {
        let name = format!("compound {smiles}");
        self.named_compound(smiles, &name, groups)
    }

    pub fn named_compound(mut self, smiles: &str, name: &str, groups: &[&str]) -> Self {
        self.compounds
            .push(Compound::new(smiles, name).with_groups(groups.iter().copied()));
        self
    }

    /// A single-reactant, single-product reaction.
    pub fn reaction(self, from: &str, to: &str, groups: &[&str]) -> Self {
        self.multi_reaction(&[from], &[to], groups)
    }

    pub fn multi_reaction(mut self, reactants: &[&str], products: &[&str], groups: &[&str]) -> Self {
        let n = self.reactions.len();
        self.reactions.push(Reaction {
            id: ReactionId(n),
            reaction_name: format!("{} to {}", reactants.join(" + "), products.join(" + ")),
            reagents: format!("reagent {n}"),
            reactants: reactants.iter().map(|s| s.to_string()).collect(),
            products: products.iter().map(|s| s.to_string()).collect(),
            functional_groups: groups.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    pub fn build(self) -> Dataset {
        Dataset::from_parts(self.compounds, self.reactions).expect("fixture dataset must be valid")
    }
}

/// A → B → C, everything tagged `ox`.
pub fn oxidation_chain() -> Dataset {
    DatasetBuilder::new()
        .compound("A", &["ox"])
        .compound("B", &["ox"])
        .compound("C", &["ox"])
        .reaction("A", "B", &["ox"])
        .reaction("B", "C", &["ox"])
        .build()
}

/// Two supply lines merging: A → B, B + X → C, C → D.
pub fn convergent_chain() -> Dataset {
    DatasetBuilder::new()
        .compound("A", &["alcohol"])
        .compound("B", &["aldehyde"])
        .compound("X", &["grignard-reagent"])
        .compound("C", &["alcohol"])
        .compound("D", &["ketone"])
        .reaction("A", "B", &["oxidation"])
        .multi_reaction(&["B", "X"], &["C"], &["grignard"])
        .reaction("C", "D", &["oxidation"])
        .build()
}

/// A small organic-chemistry reaction file in the on-disk format.
pub const SAMPLE_REACTIONS_JSON: &str = r#"[
  {
    "reaction_name": "Hydration of an alkene",
    "reagents": "H2O, H2SO4",
    "reactants": [{"smiles": "C=C", "iupac_name": "ethene", "functional_groups": ["alkene"]}],
    "products": [{"smiles": "CCO", "iupac_name": "ethanol", "common_name": "ethyl alcohol", "functional_groups": ["alcohol"]}],
    "functional_groups": ["alkene", "alcohol"]
  },
  {
    "reaction_name": "PCC oxidation",
    "reagents": "PCC, CH2Cl2",
    "reactants": ["CCO"],
    "products": [{"smiles": "CC=O", "iupac_name": "ethanal", "common_name": "acetaldehyde", "functional_groups": ["aldehyde"]}],
    "functional_groups": ["alcohol", "aldehyde"]
  },
  {
    "reaction_name": "Jones oxidation",
    "reagents": ["CrO3", "H2SO4", "acetone"],
    "reactants": ["CC=O"],
    "products": [{"smiles": "CC(=O)O", "iupac_name": "ethanoic acid", "common_name": "acetic acid", "functional_groups": ["carboxylic-acid"]}],
    "functional_groups": ["aldehyde", "carboxylic-acid"]
  },
  {
    "reaction_name": "Fischer esterification",
    "reagents": "H2SO4, heat",
    "reactants": ["CC(=O)O", "CCO"],
    "products": [{"smiles": "CC(=O)OCC", "iupac_name": "ethyl ethanoate", "common_name": "ethyl acetate", "functional_groups": ["ester"]}],
    "functional_groups": ["carboxylic-acid", "ester"]
  }
]"#;

/// [`SAMPLE_REACTIONS_JSON`] parsed.
pub fn sample_dataset() -> Dataset {
    Dataset::from_json(SAMPLE_REACTIONS_JSON, None).expect("sample reactions must parse")
}
