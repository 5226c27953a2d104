//! End-to-end problem generation against small fixture datasets.
//!
//! ```bash
//! cargo test --package orgquiz-synthesis --test test_generation
//! ```

use orgquiz_common::{FilterMode, QuizError, QuizSettings, ReactionId, SearchStrategy, StepBounds};
use orgquiz_synthesis::filter;
use orgquiz_synthesis::{generate, reveal, FilterSelection, ProblemRequest, Solution, StepRange};
use orgquiz_test_utils::{convergent_chain, oxidation_chain, sample_dataset, seeded_rng, DatasetBuilder};
use pretty_assertions::assert_eq;
use rand::RngCore;
use std::collections::BTreeSet;

/// Fails the test if anything asks it for randomness.
struct NoDraws;

impl RngCore for NoDraws {
    fn next_u32(&mut self) -> u32 {
        panic!("no random draw expected")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("no random draw expected")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("no random draw expected")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        panic!("no random draw expected")
    }
}

fn request<S: AsRef<str>>(groups: &[S], min: i64, max: i64, strategy: SearchStrategy) -> ProblemRequest {
    ProblemRequest {
        groups: FilterSelection::new(groups.iter().map(|g| g.as_ref().to_string())),
        min_steps: min,
        max_steps: max,
        strategy: Some(strategy),
    }
}

#[test]
fn test_two_step_chain() {
    let ds = oxidation_chain();
    let generated = generate(
        &ds,
        &request(&["ox"], 2, 2, SearchStrategy::Backward),
        &QuizSettings::default(),
        &mut seeded_rng(1),
    )
    .unwrap();

    assert_eq!(generated.problem.starting_materials, vec!["A".to_string()]);
    assert_eq!(generated.problem.target, "C");
    let path = reveal(&ds, &generated.problem).unwrap();
    let steps: Vec<(ReactionId, &str)> = path.steps().iter().map(|s| (s.reaction, s.to.as_str())).collect();
    assert_eq!(steps, vec![(ReactionId(0), "B"), (ReactionId(1), "C")]);
}

#[test]
fn test_too_deep_request_exhausts_default_budget() {
    let ds = oxidation_chain();
    let err = generate(
        &ds,
        &request(&["ox"], 3, 3, SearchStrategy::Backward),
        &QuizSettings::default(),
        &mut seeded_rng(1),
    )
    .unwrap_err();
    assert!(matches!(err, QuizError::SearchExhausted { attempts: 100 }));
    assert!(err.is_user_actionable());
}

#[test]
fn test_empty_selection_fails_before_any_draw() {
    let ds = oxidation_chain();
    let req = ProblemRequest {
        groups: FilterSelection::default(),
        min_steps: 1,
        max_steps: 3,
        strategy: Some(SearchStrategy::Backward),
    };
    let err = generate(&ds, &req, &QuizSettings::default(), &mut NoDraws).unwrap_err();
    assert!(matches!(err, QuizError::InsufficientSelection));
}

#[test]
fn test_unmatched_selection_is_insufficient_data() {
    let ds = oxidation_chain();
    let err = generate(
        &ds,
        &request(&["nothing-tagged-this"], 1, 3, SearchStrategy::Backward),
        &QuizSettings::default(),
        &mut seeded_rng(3),
    )
    .unwrap_err();
    assert!(matches!(err, QuizError::InsufficientData { .. }));
}

#[test]
fn test_fallback_on_single_compound_pool_is_insufficient_data() {
    // A → B leaves only B in the pool; fallback needs two endpoints.
    let ds = DatasetBuilder::new()
        .compound("A", &[])
        .compound("B", &[])
        .reaction("A", "B", &["ox"])
        .build();
    let err = generate(
        &ds,
        &request(&["ox"], 1, 1, SearchStrategy::Fallback),
        &QuizSettings::default(),
        &mut NoDraws,
    )
    .unwrap_err();
    assert!(matches!(err, QuizError::InsufficientData { reactions: 1, compounds: 1 }));

    let generated = generate(
        &ds,
        &request(&["ox"], 1, 1, SearchStrategy::Backward),
        &QuizSettings::default(),
        &mut seeded_rng(3),
    )
    .unwrap();
    assert_eq!(generated.problem.target, "B");
}

#[test]
fn test_inverted_step_bounds_fail_before_any_draw() {
    let ds = oxidation_chain();
    let settings = QuizSettings {
        step_bounds: StepBounds { floor: 5, ceiling: 2 },
        ..QuizSettings::default()
    };
    let err = generate(&ds, &request(&["ox"], 1, 3, SearchStrategy::Backward), &settings, &mut NoDraws)
        .unwrap_err();
    assert!(matches!(err, QuizError::InvalidRange(ref msg) if msg.contains("exceeds")));
}

#[test]
fn test_known_paths_have_requested_length_and_stay_in_selection() {
    let ds = sample_dataset();
    let groups: Vec<String> = ds.functional_groups();
    let settings = QuizSettings::default();

    for strategy in [SearchStrategy::Backward, SearchStrategy::ForwardPair, SearchStrategy::ForwardWalk] {
        for seed in 0..20 {
            let req = request(&groups, 1, 3, strategy);
            let Ok(generated) = generate(&ds, &req, &settings, &mut seeded_rng(seed)) else {
                continue;
            };
            let problem = &generated.problem;
            let Solution::Known(path) = &problem.solution else {
                panic!("{strategy:?} should produce a known path");
            };

            assert!(generated.range.contains(path.len() as u32));
            assert!(path.is_connected());
            assert_eq!(path.end(), Some(problem.target.as_str()));
            assert!(!problem.starting_materials.contains(&problem.target));

            let selected: BTreeSet<String> = groups.iter().cloned().collect();
            for step in path.steps() {
                let reaction = ds.reaction(step.reaction).unwrap();
                assert!(reaction.has_any_group(&selected));
            }
        }
    }
}

#[test]
fn test_forward_paths_never_revisit_a_compound() {
    let ds = DatasetBuilder::new()
        .compound("A", &["t"])
        .compound("B", &["t"])
        .compound("C", &["t"])
        .compound("D", &["t"])
        .reaction("A", "B", &["t"])
        .reaction("B", "A", &["t"])
        .reaction("B", "C", &["t"])
        .reaction("C", "D", &["t"])
        .reaction("A", "D", &["t"])
        .build();

    for strategy in [SearchStrategy::ForwardPair, SearchStrategy::ForwardWalk] {
        for seed in 0..30 {
            let req = request(&["t"], 1, 3, strategy);
            let Ok(generated) = generate(&ds, &req, &QuizSettings::default(), &mut seeded_rng(seed)) else {
                continue;
            };
            let Solution::Known(path) = &generated.problem.solution else { unreachable!() };
            assert!(path.is_simple_from(&generated.problem.starting_materials[0]));
            assert!(!path.reaches_early(&generated.problem.target));
        }
    }
}

#[test]
fn test_convergent_problem_lists_side_reactant() {
    let ds = convergent_chain();
    let settings = QuizSettings { filter_mode: FilterMode::ReactionTags, ..QuizSettings::default() };
    let req = request(&["oxidation", "grignard"], 3, 3, SearchStrategy::Backward);

    let generated = generate(&ds, &req, &settings, &mut seeded_rng(8)).unwrap();
    let problem = generated.problem;
    assert_eq!(problem.target, "D");
    assert_eq!(problem.starting_materials, vec!["A".to_string(), "X".to_string()]);
    assert_eq!(problem.key_intermediate.as_deref(), Some("C"));
}

#[test]
fn test_range_validation_is_idempotent() {
    let bounds = StepBounds::default();
    for (min, max) in [(-4, 2), (3, 1), (0, 99), (2, 7), (15, 15)] {
        let first = StepRange::validate(min, max, bounds);
        let again = StepRange::validate(first.range.min() as i64, first.range.max() as i64, bounds);
        assert_eq!(again.range, first.range);
        assert!(again.correction.is_none());
    }
}

#[test]
fn test_pool_is_exactly_the_tag_intersection() {
    let ds = sample_dataset();
    let selection = FilterSelection::new(["aldehyde"]);
    let pool = filter::apply(&ds, &selection, FilterMode::ReactionTags).unwrap();
    let names: Vec<&str> = pool.reactions().iter().map(|r| r.reaction_name.as_str()).collect();
    assert_eq!(names, vec!["PCC oxidation", "Jones oxidation"]);
}
