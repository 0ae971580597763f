//! Property-based tests for trial generation, advice, and scoring.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use skyguard::advisor::advise_with_error_rate;
use skyguard::constants::*;
use skyguard::session::Session;
use skyguard::trial_generator::{generate_trial, is_threat_item};
use skyguard::types::{Mode, Outcome};

fn mode_strategy() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Manual), Just(Mode::AiAssist)]
}

proptest! {
    // 1. Item count is [4,8] safe items plus at most one threat
    #[test]
    fn item_count_bounded(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let trial = generate_trial(&mut rng);
        let safe = trial.items.iter().filter(|s| is_safe_item(s)).count();
        prop_assert!((MIN_SAFE_ITEMS..=MAX_SAFE_ITEMS).contains(&safe), "safe={safe}");
        prop_assert!(trial.len() >= MIN_SAFE_ITEMS && trial.len() <= MAX_SAFE_ITEMS + 1);
    }

    // 2. Threat flag iff a threat symbol is present
    #[test]
    fn threat_flag_iff_threat_symbol(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let trial = generate_trial(&mut rng);
        let present = trial.items.iter().any(|s| is_threat_item(s));
        prop_assert_eq!(trial.has_threat, present);
    }

    // 3. Every item belongs to one of the two sets, and none repeats
    #[test]
    fn items_known_and_distinct(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let trial = generate_trial(&mut rng);
        let unique: HashSet<&str> = trial.items.iter().copied().collect();
        prop_assert_eq!(unique.len(), trial.len());
        for s in &trial.items {
            prop_assert!(is_safe_item(s) || is_threat_item(s), "unknown item {s}");
        }
    }

    // 4. A perfect advisor never disagrees; a certain liar always does
    #[test]
    fn advisor_extremes(seed in any::<u64>(), truth in any::<bool>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        prop_assert_eq!(advise_with_error_rate(truth, 0.0, &mut rng).prediction.is_threat(), truth);
        prop_assert_eq!(advise_with_error_rate(truth, 1.0, &mut rng).prediction.is_threat(), !truth);
    }

    // 5. Correctness iff judgment equals ground truth; +10 only when correct
    #[test]
    fn scoring_matches_judgment(
        seed in any::<u64>(),
        mode in mode_strategy(),
        judgments in prop::collection::vec(any::<bool>(), ROUNDS_PER_SESSION),
    ) {
        let mut session = Session::new(seed);
        let t0 = Instant::now();
        session.start_at(mode, t0).unwrap();
        let mut expected_score = 0;
        for (i, &reject) in judgments.iter().enumerate() {
            let truth = session.current_trial().unwrap().has_threat;
            let before = session.score();
            let rec = session
                .process_decision_at(reject, t0 + Duration::from_millis(500 * (i as u64 + 1)))
                .unwrap();
            let correct = reject == truth;
            prop_assert_eq!(rec.result, Outcome::from_correct(correct));
            prop_assert_eq!(rec.threat, truth);
            prop_assert_eq!(rec.mode, mode);
            prop_assert_eq!(rec.round, i + 1);
            if correct {
                expected_score += POINTS_PER_CORRECT;
                prop_assert_eq!(session.score(), before + POINTS_PER_CORRECT);
            } else {
                prop_assert_eq!(session.score(), before);
            }
            prop_assert_eq!(session.history().len(), session.rounds());
        }
        prop_assert_eq!(session.score(), expected_score);
        prop_assert!(!session.is_active());
        prop_assert_eq!(session.history().len(), ROUNDS_PER_SESSION);
    }
}

// 6. Advisor disagreement converges to the configured error rate
#[test]
fn advisor_disagreement_converges() {
    let mut rng = SmallRng::seed_from_u64(77);
    let n = 200_000;
    let mut wrong = 0usize;
    for i in 0..n {
        let truth = i % 10 < 3;
        let advice = advise_with_error_rate(truth, ADVISOR_ERROR_PROBABILITY, &mut rng);
        if advice.prediction.is_threat() != truth {
            wrong += 1;
        }
    }
    let rate = wrong as f64 / n as f64;
    assert!(
        (rate - ADVISOR_ERROR_PROBABILITY).abs() < 0.005,
        "disagreement rate {rate:.4}"
    );
}

// 7. Empirical threat rate converges to 0.30
#[test]
fn threat_rate_converges() {
    let mut rng = SmallRng::seed_from_u64(123);
    let n = 200_000;
    let threats = (0..n).filter(|_| generate_trial(&mut rng).has_threat).count();
    let rate = threats as f64 / n as f64;
    assert!(
        (rate - THREAT_PROBABILITY).abs() < 0.005,
        "threat rate {rate:.4}"
    );
}
