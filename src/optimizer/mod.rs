pub mod acceptance;
pub mod mutation;
pub mod runner;

pub use self::acceptance::{acceptance_probability, accepts};
pub use self::runner::{ProgressCallback, SearchOptions, SearchResult, Searcher};

use crate::alphabet::Alphabet;
use crate::cipher::Permutation;
use crate::error::{SfResult, SubForgeError};
use crate::model::TransitionModel;
use crate::scorer::Scorer;
use fastrand::Rng;
use std::sync::Arc;

/// One Metropolis-Hastings random walk over keys.
///
/// `current` and `best` are only replaced, never mutated, and after every
/// step `best_score >= current_score`.
pub struct Chain {
    pub scorer: Arc<Scorer>,

    pub current: Permutation,
    pub current_score: f64,
    pub best: Permutation,
    pub best_score: f64,

    pub iterations: usize,
    pub accepted: usize,

    pub rng: Rng,
}

impl Chain {
    pub fn new(scorer: Arc<Scorer>, seed: Option<u64>) -> SfResult<Self> {
        let rng = if let Some(s) = seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };
        Self::with_rng(scorer, rng)
    }

    pub fn with_rng(scorer: Arc<Scorer>, mut rng: Rng) -> SfResult<Self> {
        let key_count = scorer.key_count();
        if key_count < 2 {
            return Err(SubForgeError::InvalidAlphabetSize(key_count));
        }

        let current = mutation::random_permutation(&scorer.alphabet, &mut rng);
        let current_score = scorer.score(&current);

        Ok(Self {
            scorer,
            best: current.clone(),
            best_score: current_score,
            current,
            current_score,
            iterations: 0,
            accepted: 0,
            rng,
        })
    }

    /// Propose, test, move, track best. Returns whether the proposal was accepted.
    #[inline(always)]
    pub fn step(&mut self) -> SfResult<bool> {
        let proposal = mutation::propose(&self.current, &mut self.rng)?;
        let proposal_score = self.scorer.score(&proposal);
        let probability = acceptance_probability(self.current_score, proposal_score);

        self.iterations += 1;
        let moved = accepts(probability, &mut self.rng);
        if moved {
            self.current = proposal;
            self.current_score = proposal_score;
            self.accepted += 1;
        }

        if self.current_score > self.best_score {
            self.best = self.current.clone();
            self.best_score = self.current_score;
        }
        Ok(moved)
    }

    /// Runs `steps` iterations and returns how many proposals were accepted.
    pub fn evolve(&mut self, steps: usize) -> SfResult<usize> {
        let mut accepted = 0;
        for _ in 0..steps {
            if self.step()? {
                accepted += 1;
            }
        }
        Ok(accepted)
    }
}

/// Best key found by a single chain of `max_iterations` steps from a
/// uniformly random start. The key decodes: `decode(message, alphabet, key)`.
pub fn metropolis_hastings(
    alphabet: &Alphabet,
    message: &str,
    model: &TransitionModel,
    max_iterations: usize,
) -> SfResult<Permutation> {
    metropolis_hastings_seeded(alphabet, message, model, max_iterations, None)
}

/// [`metropolis_hastings`] with a fixed seed for reproducible runs.
pub fn metropolis_hastings_seeded(
    alphabet: &Alphabet,
    message: &str,
    model: &TransitionModel,
    max_iterations: usize,
    seed: Option<u64>,
) -> SfResult<Permutation> {
    let scorer = Arc::new(Scorer::new(alphabet.clone(), model.clone(), message));
    let mut chain = Chain::new(scorer, seed)?;
    chain.evolve(max_iterations)?;
    Ok(chain.best)
}
