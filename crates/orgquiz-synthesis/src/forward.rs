//! Forward search from a fixed start along one-reactant, one-product
//! reactions. Paths never revisit a compound.

use crate::filter::ReactionPool;
use crate::path::{Path, Step};
use orgquiz_common::Reaction;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::debug;

/// Upper bound on reactions tried by one [`exact_path`] call.
pub const MAX_EXPANSIONS: usize = 50_000;

/// Depth-first search for a path from `start` that reaches `target` after
/// exactly `steps` reactions and not before.
///
/// Branches are tried in random order. Each branch gets its own copy of the
/// visited set, so siblings never see each other's markers.
pub fn exact_path<R: Rng + ?Sized>(
    pool: &ReactionPool<'_>,
    start: &str,
    target: &str,
    steps: u32,
    rng: &mut R,
) -> Option<Path> {
    if steps == 0 || start == target {
        return None;
    }
    let visited = BTreeSet::from([start.to_string()]);
    let mut budget = MAX_EXPANSIONS;
    let found = descend(pool, start, target, steps, &visited, &mut budget, rng);
    if budget == 0 {
        debug!("Exact search {} -> {} ({} steps) hit the expansion cap", start, target, steps);
    }
    found.map(Path::new)
}

fn descend<R: Rng + ?Sized>(
    pool: &ReactionPool<'_>,
    current: &str,
    target: &str,
    remaining: u32,
    visited: &BTreeSet<String>,
    budget: &mut usize,
    rng: &mut R,
) -> Option<Vec<Step>> {
    if remaining == 0 {
        return (current == target).then(Vec::new);
    }

    let mut candidates: Vec<&Reaction> = pool.linear_successors(current).to_vec();
    candidates.shuffle(rng);

    for reaction in candidates {
        if *budget == 0 {
            return None;
        }
        *budget -= 1;

        let next = &reaction.products[0];
        if visited.contains(next) {
            continue;
        }
        // Arriving early would make a shorter answer than was asked for.
        if next == target && remaining > 1 {
            continue;
        }

        let mut branch = visited.clone();
        branch.insert(next.clone());

        if let Some(mut rest) = descend(pool, next, target, remaining - 1, &branch, budget, rng) {
            rest.insert(0, Step { reaction: reaction.id, from: reaction.reactants.clone(), to: next.clone() });
            return Some(rest);
        }
    }
    None
}

/// Random greedy walk of exactly `length` steps from `start`.
///
/// Gives up on the first dead end; the caller retries with fresh draws.
pub fn random_walk<R: Rng + ?Sized>(
    pool: &ReactionPool<'_>,
    start: &str,
    length: u32,
    rng: &mut R,
) -> Option<Path> {
    let mut visited = BTreeSet::from([start.to_string()]);
    let mut current = start.to_string();
    let mut steps = Vec::with_capacity(length as usize);

    for _ in 0..length {
        let options: Vec<&Reaction> = pool
            .linear_successors(&current)
            .iter()
            .copied()
            .filter(|r| !visited.contains(&r.products[0]))
            .collect();
        let reaction = options.choose(rng)?;
        let next = reaction.products[0].clone();

        steps.push(Step { reaction: reaction.id, from: reaction.reactants.clone(), to: next.clone() });
        visited.insert(next.clone());
        current = next;
    }

    (!steps.is_empty() && current != start).then(|| Path::new(steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{self, FilterSelection};
    use orgquiz_common::{FilterMode, ReactionId};
    use orgquiz_db::Dataset;
    use orgquiz_test_utils::{oxidation_chain, seeded_rng, DatasetBuilder};
    use pretty_assertions::assert_eq;

    /// A → B → C → D plus a shortcut A → D and a loop C → A.
    fn shortcut_graph() -> Dataset {
        DatasetBuilder::new()
            .compound("A", &[])
            .compound("B", &[])
            .compound("C", &[])
            .compound("D", &[])
            .reaction("A", "B", &["x"])
            .reaction("B", "C", &["x"])
            .reaction("C", "D", &["x"])
            .reaction("A", "D", &["x"])
            .reaction("C", "A", &["x"])
            .build()
    }

    fn pool(ds: &Dataset) -> ReactionPool<'_> {
        filter::apply(ds, &FilterSelection::new(["x", "ox"]), FilterMode::ReactionTags).unwrap()
    }

    #[test]
    fn test_exact_length_avoids_shortcut() {
        let ds = shortcut_graph();
        let pool = pool(&ds);
        for seed in 0..10 {
            let path = exact_path(&pool, "A", "D", 3, &mut seeded_rng(seed)).unwrap();
            let ids: Vec<ReactionId> = path.steps().iter().map(|s| s.reaction).collect();
            assert_eq!(ids, vec![ReactionId(0), ReactionId(1), ReactionId(2)]);
            assert!(path.is_simple_from("A"));
            assert!(!path.reaches_early("D"));
        }
    }

    #[test]
    fn test_dead_sibling_does_not_block_later_branch() {
        // S → X dead-ends, but X must still be open to S → P → X → T.
        let ds = DatasetBuilder::new()
            .compound("S", &[])
            .compound("X", &[])
            .compound("Y", &[])
            .compound("P", &[])
            .compound("T", &[])
            .reaction("S", "X", &["x"])
            .reaction("X", "Y", &["x"])
            .reaction("S", "P", &["x"])
            .reaction("P", "X", &["x"])
            .reaction("X", "T", &["x"])
            .build();
        let pool = pool(&ds);
        for seed in 0..50 {
            let path = exact_path(&pool, "S", "T", 3, &mut seeded_rng(seed)).unwrap();
            let ids: Vec<ReactionId> = path.steps().iter().map(|s| s.reaction).collect();
            assert_eq!(ids, vec![ReactionId(2), ReactionId(3), ReactionId(4)]);
        }
    }

    #[test]
    fn test_exact_length_one_takes_shortcut() {
        let ds = shortcut_graph();
        let pool = pool(&ds);
        let path = exact_path(&pool, "A", "D", 1, &mut seeded_rng(0)).unwrap();
        assert_eq!(path.steps()[0].reaction, ReactionId(3));
    }

    #[test]
    fn test_exact_length_impossible() {
        let ds = shortcut_graph();
        let pool = pool(&ds);
        // Would need to revisit A or arrive at D early.
        assert!(exact_path(&pool, "A", "D", 5, &mut seeded_rng(0)).is_none());
        assert!(exact_path(&pool, "A", "A", 2, &mut seeded_rng(0)).is_none());
    }

    #[test]
    fn test_random_walk_is_simple() {
        let ds = shortcut_graph();
        let pool = pool(&ds);
        for seed in 0..30 {
            if let Some(path) = random_walk(&pool, "A", 3, &mut seeded_rng(seed)) {
                assert_eq!(path.len(), 3);
                assert!(path.is_simple_from("A"));
                assert!(path.is_connected());
                assert_ne!(path.end(), Some("A"));
            }
        }
    }

    #[test]
    fn test_random_walk_dead_end() {
        let ds = oxidation_chain();
        let pool = pool(&ds);
        assert!(random_walk(&pool, "A", 3, &mut seeded_rng(0)).is_none());
        let path = random_walk(&pool, "A", 2, &mut seeded_rng(0)).unwrap();
        assert_eq!(path.end(), Some("C"));
    }
}
