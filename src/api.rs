use crate::alphabet::Alphabet;
use crate::cipher::{self, Permutation};
use crate::error::SfResult;
use crate::model::TransitionModel;
use crate::optimizer::mutation;
use crate::optimizer::{ProgressCallback, SearchOptions, Searcher};
use crate::scorer::Scorer;
use fastrand::Rng;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SolveReport {
    /// Reverse key: decodes the message as alphabet -> key.
    pub key: Permutation,
    /// Forward key: the encipherment the search believes was used.
    pub cipher: Permutation,
    pub plaintext: String,
    pub score: f64,
    pub chain: usize,
    pub iterations: usize,
    pub accepted: usize,
    pub acceptance_rate: f64,
    pub elapsed_ms: u128,
}

/// Service: recover the key of `message` and decode it.
pub fn solve<CB: ProgressCallback>(
    alphabet: Alphabet,
    model: TransitionModel,
    message: &str,
    options: SearchOptions,
    callback: CB,
) -> SfResult<SolveReport> {
    let missing: Vec<char> = alphabet
        .symbols()
        .iter()
        .copied()
        .filter(|&c| !model.alphabet().contains(c))
        .collect();
    if !missing.is_empty() {
        warn!(
            "⚠️  {} alphabet symbol(s) are unknown to the model and will not be scored: {:?}",
            missing.len(),
            missing.iter().collect::<String>()
        );
    }

    let scorer = Arc::new(Scorer::new(alphabet, model, message));
    let result = Searcher::new(scorer.clone(), options).run(callback)?;

    let plaintext = scorer.decode(&result.best)?;
    let cipher = result.best.inverse(&scorer.alphabet)?;

    Ok(SolveReport {
        acceptance_rate: result.acceptance_rate(),
        key: result.best,
        cipher,
        plaintext,
        score: result.score,
        chain: result.chain,
        iterations: result.iterations,
        accepted: result.accepted,
        elapsed_ms: result.elapsed_ms,
    })
}

/// Service: log-likelihood of `message` decoded with a reverse `key`.
pub fn score_key(
    alphabet: &Alphabet,
    model: &TransitionModel,
    message: &str,
    key: &Permutation,
) -> SfResult<f64> {
    crate::scorer::score(alphabet, key, message, model)
}

/// Service: encipher `text` with a fresh random key. Returns the key and ciphertext.
pub fn encipher_random(
    alphabet: &Alphabet,
    text: &str,
    seed: Option<u64>,
) -> SfResult<(Permutation, String)> {
    let mut rng = if let Some(s) = seed {
        Rng::with_seed(s)
    } else {
        Rng::new()
    };
    let key = mutation::random_permutation(alphabet, &mut rng);
    let ciphertext = cipher::encipher(text, alphabet, &key)?;
    Ok((key, ciphertext))
}
