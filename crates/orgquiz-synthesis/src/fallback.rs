//! Minimum-viable problems: two random compounds, with the connecting path
//! looked up only when the solution is revealed, and only one or two steps deep.

use crate::filter::ReactionPool;
use crate::path::{Path, Step};
use orgquiz_common::Compound;
use rand::seq::SliceRandom;
use rand::Rng;

/// Two distinct compounds from the pool: (start, target).
pub fn pick_pair<'a, R: Rng + ?Sized>(
    pool: &ReactionPool<'a>,
    rng: &mut R,
) -> Option<(&'a Compound, &'a Compound)> {
    let picked: Vec<&&'a Compound> = pool.compounds().choose_multiple(rng, 2).collect();
    match picked.as_slice() {
        [start, target] => Some((**start, **target)),
        _ => None,
    }
}

/// A direct reaction from `start` to `target`, else a two-reaction chain
/// through one intermediate.
pub fn short_path(pool: &ReactionPool<'_>, start: &str, target: &str) -> Option<Path> {
    if start == target {
        return None;
    }

    if let Some(direct) = pool.reactions().iter().find(|r| r.consumes(start) && r.produces(target)) {
        return Some(Path::new(vec![Step {
            reaction: direct.id,
            from: direct.reactants.clone(),
            to: target.to_string(),
        }]));
    }

    for first in pool.reactions().iter().filter(|r| r.consumes(start)) {
        for middle in first.products.iter().filter(|p| *p != start && *p != target) {
            let second = pool.reactions().iter().find(|r| r.consumes(middle) && r.produces(target));
            if let Some(second) = second {
                return Some(Path::new(vec![
                    Step { reaction: first.id, from: first.reactants.clone(), to: middle.clone() },
                    Step { reaction: second.id, from: second.reactants.clone(), to: target.to_string() },
                ]));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{self, FilterSelection};
    use orgquiz_common::{FilterMode, ReactionId};
    use orgquiz_test_utils::{convergent_chain, oxidation_chain, seeded_rng};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pair_is_distinct() {
        let ds = oxidation_chain();
        let pool = filter::apply(&ds, &FilterSelection::new(["ox"]), FilterMode::ReactionTags).unwrap();
        for seed in 0..20 {
            let (a, b) = pick_pair(&pool, &mut seeded_rng(seed)).unwrap();
            assert_ne!(a.smiles, b.smiles);
        }
    }

    #[test]
    fn test_direct_then_two_step_lookup() {
        let ds = oxidation_chain();
        let pool = filter::apply(&ds, &FilterSelection::new(["ox"]), FilterMode::ReactionTags).unwrap();

        let direct = short_path(&pool, "A", "B").unwrap();
        assert_eq!(direct.len(), 1);

        let two = short_path(&pool, "A", "C").unwrap();
        let ids: Vec<ReactionId> = two.steps().iter().map(|s| s.reaction).collect();
        assert_eq!(ids, vec![ReactionId(0), ReactionId(1)]);
        assert!(two.is_connected());
    }

    #[test]
    fn test_no_short_path() {
        let ds = convergent_chain();
        let pool = filter::apply(&ds, &FilterSelection::all(&ds, FilterMode::ReactionTags), FilterMode::ReactionTags)
            .unwrap();
        // Three steps apart.
        assert!(short_path(&pool, "A", "D").is_none());
        // Backwards.
        assert!(short_path(&pool, "C", "B").is_none());
        // A side reactant counts as a start.
        assert_eq!(short_path(&pool, "X", "D").unwrap().len(), 2);
    }
}
