mod common;

use fastrand::Rng;
use rstest::rstest;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use subforge::alphabet::Alphabet;
use subforge::cipher::{self, Permutation};
use subforge::error::SubForgeError;
use subforge::optimizer::runner::Silent;
use subforge::optimizer::{
    acceptance_probability, metropolis_hastings, metropolis_hastings_seeded, mutation, Chain,
    SearchOptions, Searcher,
};
use subforge::scorer::Scorer;

fn english_scorer() -> Arc<Scorer> {
    let (alphabet, model) = common::english_model();
    let key = Permutation::random(&alphabet, &mut Rng::with_seed(1234));
    let ciphertext = cipher::encipher(common::MESSAGE, &alphabet, &key).unwrap();
    Arc::new(Scorer::new(alphabet, model, ciphertext))
}

// --- ACCEPTANCE ---

#[rstest]
#[case(-10.0, -5.0)]
#[case(-5.0, -5.0)]
#[case(0.0, 1e-12)]
#[case(-1e300, 0.0)]
fn test_improvement_is_always_accepted(#[case] current: f64, #[case] proposed: f64) {
    assert_eq!(acceptance_probability(current, proposed), 1.0);
}

#[rstest]
#[case(-5.0, -6.0, (-1.0f64).exp())]
#[case(-100.0, -100.5, (-0.5f64).exp())]
#[case(0.0, -20.0, (-20.0f64).exp())]
fn test_worse_is_accepted_with_likelihood_ratio(
    #[case] current: f64,
    #[case] proposed: f64,
    #[case] expected: f64,
) {
    let p = acceptance_probability(current, proposed);
    assert!((p - expected).abs() < 1e-15);
}

#[rstest]
#[case(0.0, -1e6)]
#[case(1e300, -1e300)]
fn test_acceptance_never_reaches_zero(#[case] current: f64, #[case] proposed: f64) {
    let p = acceptance_probability(current, proposed);
    assert!(p > 0.0 && p <= 1.0, "p = {}", p);
}

// --- PROPOSALS ---

#[test]
fn test_proposal_on_tiny_alphabet_fails() {
    let alphabet = Alphabet::new("a".chars()).unwrap();
    let key = Permutation::identity(&alphabet);
    let err = mutation::propose(&key, &mut Rng::with_seed(1)).unwrap_err();
    assert!(matches!(err, SubForgeError::InvalidAlphabetSize(1)));
}

#[test]
fn test_search_on_tiny_alphabet_fails() {
    let alphabet = Alphabet::new("a".chars()).unwrap();
    let model = subforge::model::TransitionModel::from_dense(alphabet.clone(), vec![1.0]).unwrap();
    let err = metropolis_hastings(&alphabet, "aaa", &model, 10).unwrap_err();
    assert!(matches!(err, SubForgeError::InvalidAlphabetSize(1)));

    let empty = Alphabet::new("".chars()).unwrap();
    let empty_model = subforge::model::TransitionModel::from_dense(empty.clone(), vec![]).unwrap();
    assert!(matches!(
        metropolis_hastings(&empty, "", &empty_model, 10),
        Err(SubForgeError::InvalidAlphabetSize(0))
    ));
}

// --- CHAIN ---

#[test]
fn test_best_is_monotone_and_dominates_current() {
    let mut chain = Chain::new(english_scorer(), Some(42)).unwrap();
    let mut last_best = chain.best_score;
    assert_eq!(chain.best_score, chain.current_score);

    for _ in 0..3_000 {
        chain.step().unwrap();
        assert!(chain.best_score >= last_best);
        assert!(chain.best_score >= chain.current_score);
        assert_eq!(chain.scorer.score(&chain.best).to_bits(), chain.best_score.to_bits());
        last_best = chain.best_score;
    }
    assert_eq!(chain.iterations, 3_000);
}

#[test]
fn test_same_seed_same_trajectory() {
    let scorer = english_scorer();
    let mut a = Chain::new(scorer.clone(), Some(7)).unwrap();
    let mut b = Chain::new(scorer, Some(7)).unwrap();
    assert_eq!(a.current, b.current);

    for _ in 0..2_000 {
        assert_eq!(a.step().unwrap(), b.step().unwrap());
        assert_eq!(a.current, b.current);
        assert_eq!(a.current_score.to_bits(), b.current_score.to_bits());
    }
    assert_eq!(a.best, b.best);
    assert_eq!(a.accepted, b.accepted);
}

#[test]
fn test_search_improves_on_random_start() {
    let scorer = english_scorer();
    let mut chain = Chain::new(scorer, Some(3)).unwrap();
    let start = chain.best_score;
    chain.evolve(5_000).unwrap();
    assert!(chain.best_score > start);
    assert!(chain.accepted > 0);
}

#[test]
fn test_seeded_entry_point_is_reproducible() {
    let (alphabet, model) = common::english_model();
    let a = metropolis_hastings_seeded(&alphabet, common::MESSAGE, &model, 2_000, Some(9)).unwrap();
    let b = metropolis_hastings_seeded(&alphabet, common::MESSAGE, &model, 2_000, Some(9)).unwrap();
    assert_eq!(a, b);
}

// --- SCENARIO: {a, b, c} ---

#[test]
fn test_abc_scenario_recovers_plaintext() {
    let (alphabet, model) = common::abc_model();
    let cipher_key = Permutation::parse(&alphabet, "bca").unwrap();
    let message = cipher::encipher("abc", &alphabet, &cipher_key).unwrap();
    let scorer = Arc::new(Scorer::new(alphabet.clone(), model, message.as_str()));
    let true_score = scorer.score(&cipher_key.inverse(&alphabet).unwrap());

    // Some starts sit in a local optimum two transpositions from the answer,
    // so the scenario runs several chains from one fixed seed.
    let options = SearchOptions {
        max_iterations: 5_000,
        chains: 32,
        seed: Some(2024),
        ..Default::default()
    };
    let result = Searcher::new(scorer.clone(), options).run(Silent).unwrap();

    assert!(result.score >= true_score);
    assert_eq!(scorer.decode(&result.best).unwrap(), "abc");
}

#[test]
fn test_abc_single_chains_never_end_worse_than_start() {
    let (alphabet, model) = common::abc_model();
    let scorer = Arc::new(Scorer::new(alphabet, model, "bca"));
    let mut recovered = 0;

    for seed in 0..64 {
        let mut chain = Chain::new(scorer.clone(), Some(seed)).unwrap();
        let start = chain.best_score;
        chain.evolve(5_000).unwrap();
        assert!(chain.best_score >= start);
        if scorer.decode(&chain.best).unwrap() == "abc" {
            recovered += 1;
        }
    }
    assert!(recovered > 0);
}

// --- MULTI-CHAIN RUNNER ---

#[test]
fn test_single_chain_runner_matches_entry_point() {
    let (alphabet, model) = common::english_model();
    let scorer = Arc::new(Scorer::new(alphabet.clone(), model.clone(), common::MESSAGE));
    let options = SearchOptions {
        max_iterations: 2_500,
        chains: 1,
        seed: Some(77),
        report_interval: 300,
        max_time: None,
    };
    let result = Searcher::new(scorer, options).run(Silent).unwrap();
    let direct =
        metropolis_hastings_seeded(&alphabet, common::MESSAGE, &model, 2_500, Some(77)).unwrap();

    assert_eq!(result.best, direct);
    assert_eq!(result.iterations, 2_500);
    assert_eq!(result.chain, 0);
}

#[test]
fn test_multi_chain_takes_global_best() {
    let scorer = english_scorer();
    let options = SearchOptions {
        max_iterations: 1_000,
        chains: 4,
        seed: Some(500),
        ..Default::default()
    };
    let result = Searcher::new(scorer.clone(), options).run(Silent).unwrap();
    assert_eq!(result.iterations, 4_000);

    for i in 0..4u64 {
        let mut chain = Chain::new(scorer.clone(), Some(500 + i)).unwrap();
        chain.evolve(1_000).unwrap();
        assert!(result.score >= chain.best_score);
    }
}

#[test]
fn test_callback_sees_monotone_best_and_can_abort() {
    let scorer = english_scorer();
    let options = SearchOptions {
        max_iterations: 10_000,
        chains: 2,
        seed: Some(1),
        report_interval: 500,
        max_time: None,
    };

    let calls = AtomicUsize::new(0);
    let seen = Mutex::new(Vec::new());
    let callback = |iteration: usize, best: f64, _key: &Permutation| {
        seen.lock().unwrap().push((iteration, best));
        calls.fetch_add(1, Ordering::SeqCst) < 3
    };
    let result = Searcher::new(scorer, options).run(&callback).unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0].0, 500);
    assert!(seen.windows(2).all(|w| w[1].1 >= w[0].1));
    assert_eq!(result.iterations, 2 * 2_000);
}

#[test]
fn test_zero_time_limit_stops_immediately() {
    let scorer = english_scorer();
    let options = SearchOptions {
        max_iterations: 10_000,
        chains: 1,
        seed: Some(1),
        report_interval: 100,
        max_time: Some(std::time::Duration::ZERO),
    };
    let result = Searcher::new(scorer, options).run(Silent).unwrap();
    assert_eq!(result.iterations, 0);
}
