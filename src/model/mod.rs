pub mod builder;
pub mod loader;

pub use self::builder::TransitionModelBuilder;
pub use self::loader::ModelFormat;

use crate::alphabet::Alphabet;
use crate::consts::MODEL_MASS_TOLERANCE;
use crate::error::{SfResult, SubForgeError};
use tracing::warn;

/// Bigram probability table over an alphabet.
///
/// Entries are stored row-major (`probs[from * n + to]`). A `None` entry is a
/// pair the table does not know about; lookups for it, like lookups for symbols
/// outside the alphabet, return `None` and callers skip the pair.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionModel {
    alphabet: Alphabet,
    probs: Vec<Option<f64>>,
}

impl TransitionModel {
    /// Builds a complete table from a dense row-major vector.
    pub fn from_dense(alphabet: Alphabet, probs: Vec<f64>) -> SfResult<Self> {
        let n = alphabet.len();
        if probs.len() != n * n {
            return Err(SubForgeError::Validation(format!(
                "dense table for {} symbols needs {} entries, got {}",
                n,
                n * n,
                probs.len()
            )));
        }
        let model = Self {
            alphabet,
            probs: probs.into_iter().map(Some).collect(),
        };
        model.validate()?;
        Ok(model)
    }

    /// Builds a possibly incomplete table from `(from, to, probability)` triples.
    pub fn from_entries<I>(alphabet: Alphabet, entries: I) -> SfResult<Self>
    where
        I: IntoIterator<Item = (char, char, f64)>,
    {
        let n = alphabet.len();
        let mut probs = vec![None; n * n];
        for (a, b, p) in entries {
            let (i, j) = match (alphabet.position(a), alphabet.position(b)) {
                (Some(i), Some(j)) => (i, j),
                _ => {
                    return Err(SubForgeError::Validation(format!(
                        "transition {:?} -> {:?} uses a symbol outside the model alphabet",
                        a, b
                    )))
                }
            };
            probs[i * n + j] = Some(p);
        }
        let model = Self { alphabet, probs };
        model.validate()?;
        Ok(model)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[inline(always)]
    pub fn probability_at(&self, from: usize, to: usize) -> Option<f64> {
        let n = self.alphabet.len();
        if from >= n || to >= n {
            return None;
        }
        self.probs[from * n + to]
    }

    pub fn probability(&self, from: char, to: char) -> Option<f64> {
        let i = self.alphabet.position(from)?;
        let j = self.alphabet.position(to)?;
        self.probability_at(i, j)
    }

    pub fn log_probability(&self, from: char, to: char) -> Option<f64> {
        self.probability(from, to).map(f64::ln)
    }

    /// Row-major natural-log table; `None` where the pair is absent.
    pub fn log_table(&self) -> Vec<Option<f64>> {
        self.probs.iter().map(|p| p.map(f64::ln)).collect()
    }

    /// Sum of `ln p(s[i], s[i+1])` over every adjacent pair of `text` the
    /// table knows. Unknown pairs contribute nothing.
    pub fn log_likelihood(&self, text: &str) -> f64 {
        text.chars()
            .zip(text.chars().skip(1))
            .filter_map(|(a, b)| self.log_probability(a, b))
            .sum()
    }

    pub fn entries(&self) -> impl Iterator<Item = (char, char, f64)> + '_ {
        let n = self.alphabet.len();
        let symbols = self.alphabet.symbols();
        self.probs
            .iter()
            .enumerate()
            .filter_map(move |(k, p)| p.map(|p| (symbols[k / n], symbols[k % n], p)))
    }

    pub fn total_mass(&self) -> f64 {
        self.probs.iter().flatten().sum()
    }

    pub fn is_complete(&self) -> bool {
        self.probs.iter().all(Option::is_some)
    }

    /// Every present entry must be a finite probability in (0, 1]. A total mass
    /// away from 1 is only reported: floored tables legitimately exceed it.
    pub fn validate(&self) -> SfResult<()> {
        for (a, b, p) in self.entries() {
            if !p.is_finite() || p <= 0.0 || p > 1.0 {
                return Err(SubForgeError::Validation(format!(
                    "transition {:?} -> {:?} has probability {} outside (0, 1]",
                    a, b, p
                )));
            }
        }

        let mass = self.total_mass();
        if self.is_complete() && (mass - 1.0).abs() > MODEL_MASS_TOLERANCE {
            warn!(
                "Transition model mass is {:.9}, expected 1.0 (tolerance {})",
                mass, MODEL_MASS_TOLERANCE
            );
        }
        Ok(())
    }
}
