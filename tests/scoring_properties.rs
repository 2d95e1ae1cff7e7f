use lifesim::{Condition, HabitCatalog, HabitProfile, RiskScorer, SimulationSession};
use proptest::prelude::*;

/// A profile built by picking one option index per built-in habit.
fn profile_from_picks(catalog: &HabitCatalog, picks: &[usize]) -> HabitProfile {
    let levels = catalog
        .habits()
        .iter()
        .zip(picks)
        .map(|(habit, &pick)| (habit.id.clone(), habit.options[pick % habit.options.len()].value));
    HabitProfile::from_levels(catalog, levels).unwrap()
}

fn condition() -> impl Strategy<Value = Condition> {
    prop::sample::select(Condition::ALL.to_vec())
}

proptest! {
    #[test]
    fn score_stays_in_band(picks in prop::collection::vec(0usize..5, 6), c in condition()) {
        let catalog = HabitCatalog::builtin();
        let scorer = RiskScorer::new(&catalog);
        let profile = profile_from_picks(&catalog, &picks);
        let score = scorer.score(&profile, c);
        prop_assert!((15..=75).contains(&score), "score {} out of band", score);
    }

    #[test]
    fn score_is_deterministic(picks in prop::collection::vec(0usize..5, 6), c in condition()) {
        let catalog = HabitCatalog::builtin();
        let scorer = RiskScorer::new(&catalog);
        let profile = profile_from_picks(&catalog, &picks);
        prop_assert_eq!(scorer.score(&profile, c), scorer.score(&profile.clone(), c));
    }

    #[test]
    fn improving_one_habit_never_raises_risk(
        picks in prop::collection::vec(0usize..5, 6),
        habit_index in 0usize..6,
        c in condition(),
    ) {
        let catalog = HabitCatalog::builtin();
        let scorer = RiskScorer::new(&catalog);
        let profile = profile_from_picks(&catalog, &picks);
        let habit = &catalog.habits()[habit_index];
        let improved = profile.with_level(&habit.id, habit.best_option().unwrap());
        prop_assert!(scorer.score(&improved, c) <= scorer.score(&profile, c));
    }

    #[test]
    fn ranking_covers_every_habit_sorted(picks in prop::collection::vec(0usize..5, 6)) {
        let catalog = HabitCatalog::builtin();
        let scorer = RiskScorer::new(&catalog);
        let profile = profile_from_picks(&catalog, &picks);
        let ranking = scorer.rank_habit_impact(&profile);

        prop_assert_eq!(ranking.len(), catalog.len());
        prop_assert!(ranking.windows(2).all(|w| w[0].impact <= w[1].impact));
        for habit in catalog.habits() {
            prop_assert!(ranking.iter().any(|r| r.habit_id == habit.id));
        }
    }

    #[test]
    fn reset_restores_baseline(
        edits in prop::collection::vec((0usize..6, 0usize..5), 0..10),
    ) {
        let catalog = HabitCatalog::builtin();
        let mut session = SimulationSession::new(&catalog);
        for (habit_index, pick) in edits {
            let habit = &catalog.habits()[habit_index];
            session.simulate(&habit.id, habit.options[pick].value).unwrap();
        }
        session.reset();

        let scorer = RiskScorer::new(&catalog);
        for c in Condition::ALL {
            prop_assert_eq!(
                scorer.score(session.simulated(), c),
                scorer.score(session.baseline(), c)
            );
        }
    }
}

#[test]
fn best_profile_never_scores_above_worst() {
    let catalog = HabitCatalog::builtin();
    let scorer = RiskScorer::new(&catalog);
    let best = HabitProfile::from_levels(
        &catalog,
        catalog
            .habits()
            .iter()
            .map(|h| (h.id.as_str(), h.best_option().unwrap())),
    )
    .unwrap();
    let worst = HabitProfile::from_levels(
        &catalog,
        catalog
            .habits()
            .iter()
            .map(|h| (h.id.as_str(), h.worst_option().unwrap())),
    )
    .unwrap();

    for c in Condition::ALL {
        assert!(scorer.score(&best, c) <= scorer.score(&worst, c));
    }
}

#[test]
fn fully_optimal_profile_beats_baseline() {
    let catalog = HabitCatalog::builtin();
    let scorer = RiskScorer::new(&catalog);
    let baseline = HabitProfile::baseline(&catalog);
    let optimal = HabitProfile::optimal(&catalog);

    for c in Condition::ALL {
        assert!(scorer.score(&optimal, c) <= scorer.score(&baseline, c));
    }
}
