//! Backward construction: start at the target and walk back through
//! producing reactions until the requested number of steps is reached.

use crate::filter::ReactionPool;
use crate::path::{Path, Step};
use orgquiz_common::Reaction;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Why one backward attempt stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadEnd {
    /// Nothing in the pool produces the current compound.
    NoPrecursor { compound: String, depth: u32 },
}

/// A successful backward construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retrosynthesis {
    /// Main starting material first, then the side reactants of convergent steps.
    pub starting_materials: Vec<String>,
    pub key_intermediate: Option<String>,
    pub path: Path,
}

/// Options for [`construct`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BackwardOptions {
    /// Never step back onto a compound already on the main chain.
    pub simple: bool,
}

/// Walk back exactly `steps` reactions from `target`.
///
/// At each step one producing reaction is drawn uniformly. For a convergent
/// reaction one reactant is drawn to continue the walk and the others become
/// given starting materials. Fails as soon as a compound has no producer.
pub fn construct<R: Rng + ?Sized>(
    pool: &ReactionPool<'_>,
    target: &str,
    steps: u32,
    options: BackwardOptions,
    rng: &mut R,
) -> Result<Retrosynthesis, DeadEnd> {
    let mut current = target.to_string();
    let mut given: Vec<String> = Vec::new();
    let mut reversed: Vec<Step> = Vec::with_capacity(steps as usize);
    let mut on_chain: HashSet<String> = HashSet::from([target.to_string()]);

    for depth in 0..steps {
        let mut precursors = pool.producers_of(&current);
        if options.simple {
            precursors.retain(|r| r.reactants.iter().any(|x| !on_chain.contains(x)));
        }
        let dead_end = || DeadEnd::NoPrecursor { compound: current.clone(), depth };
        let reaction: &Reaction = precursors.choose(rng).copied().ok_or_else(dead_end)?;

        reversed.push(Step {
            reaction: reaction.id,
            from: reaction.reactants.clone(),
            to: current.clone(),
        });

        let next = if reaction.is_convergent() {
            let candidates: Vec<&String> = reaction
                .reactants
                .iter()
                .filter(|x| !options.simple || !on_chain.contains(*x))
                .collect();
            let chosen = candidates.choose(rng).copied().ok_or_else(dead_end)?.clone();
            for other in reaction.reactants.iter().filter(|x| **x != chosen) {
                if !given.contains(other) {
                    given.push(other.clone());
                }
            }
            chosen
        } else {
            reaction.reactants[0].clone()
        };

        on_chain.insert(next.clone());
        current = next;
    }

    reversed.reverse();
    let path = Path::new(reversed);
    let key_intermediate = path.key_intermediate(target).map(str::to_string);

    given.retain(|g| *g != current);
    let mut starting_materials = vec![current];
    starting_materials.extend(given);

    Ok(Retrosynthesis { starting_materials, key_intermediate, path })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{self, FilterSelection};
    use orgquiz_common::{FilterMode, ReactionId};
    use orgquiz_test_utils::{convergent_chain, oxidation_chain, seeded_rng, DatasetBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_steps_back_from_c() {
        let ds = oxidation_chain();
        let pool = filter::apply(&ds, &FilterSelection::new(["ox"]), FilterMode::ReactionTags).unwrap();
        let result = construct(&pool, "C", 2, BackwardOptions::default(), &mut seeded_rng(1)).unwrap();

        assert_eq!(result.starting_materials, vec!["A"]);
        assert_eq!(result.key_intermediate, None);
        let reactions: Vec<ReactionId> = result.path.steps().iter().map(|s| s.reaction).collect();
        assert_eq!(reactions, vec![ReactionId(0), ReactionId(1)]);
        assert_eq!(result.path.steps()[0].to, "B");
        assert_eq!(result.path.end(), Some("C"));
    }

    #[test]
    fn test_too_deep_is_a_dead_end() {
        let ds = oxidation_chain();
        let pool = filter::apply(&ds, &FilterSelection::new(["ox"]), FilterMode::ReactionTags).unwrap();
        let err = construct(&pool, "C", 3, BackwardOptions::default(), &mut seeded_rng(1)).unwrap_err();
        assert_eq!(err, DeadEnd::NoPrecursor { compound: "A".to_string(), depth: 2 });
    }

    #[test]
    fn test_convergent_step_feeds_side_reactant() {
        let ds = convergent_chain();
        let pool = filter::apply(&ds, &FilterSelection::all(&ds, FilterMode::ReactionTags), FilterMode::ReactionTags)
            .unwrap();

        // Whichever reactant of B + X → C is followed, the other one is given.
        for seed in 0..20 {
            let mut rng = seeded_rng(seed);
            match construct(&pool, "D", 3, BackwardOptions::default(), &mut rng) {
                Ok(result) => {
                    assert_eq!(result.path.len(), 3);
                    assert_eq!(result.starting_materials, vec!["A", "X"]);
                    assert_eq!(result.key_intermediate.as_deref(), Some("C"));
                }
                Err(DeadEnd::NoPrecursor { compound, .. }) => assert_eq!(compound, "X"),
            }
        }
        let two = construct(&pool, "D", 2, BackwardOptions::default(), &mut seeded_rng(3)).unwrap();
        assert_eq!(two.path.len(), 2);
        assert_eq!(two.starting_materials.len(), 2);
    }

    #[test]
    fn test_simple_option_refuses_to_walk_back_onto_chain() {
        // A → B and B → A: without the guard the walk may bounce.
        let ds = DatasetBuilder::new()
            .compound("A", &[])
            .compound("B", &[])
            .reaction("A", "B", &["x"])
            .reaction("B", "A", &["x"])
            .build();
        let pool = filter::apply(&ds, &FilterSelection::new(["x"]), FilterMode::ReactionTags).unwrap();

        let loose = construct(&pool, "B", 2, BackwardOptions::default(), &mut seeded_rng(0)).unwrap();
        assert_eq!(loose.starting_materials, vec!["B"]);

        let strict = construct(&pool, "B", 2, BackwardOptions { simple: true }, &mut seeded_rng(0));
        assert!(strict.is_err());
        let one = construct(&pool, "B", 1, BackwardOptions { simple: true }, &mut seeded_rng(0)).unwrap();
        assert!(one.path.is_simple_from("A"));
    }
}
