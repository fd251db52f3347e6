use crate::alphabet::Alphabet;
use crate::cipher::{self, Permutation};
use crate::error::SfResult;
use crate::model::TransitionModel;
use std::collections::HashMap;

/// One side of an adjacent pair in the enciphered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    /// A cipher symbol at this alphabet position; decodes to `key[pos]`.
    Cipher(usize),
    /// A symbol outside the alphabet; passes through the codec unchanged.
    /// Holds its model index.
    Plain(usize),
}

#[derive(Debug, Clone)]
struct PairTerm {
    first: Slot,
    second: Slot,
    count: f64,
}

/// Log-likelihood scorer for one (alphabet, message, model) triple.
///
/// The message is reduced once to its distinct adjacent pairs with counts, so
/// scoring a key costs one pass over at most `N^2` terms instead of decoding
/// the whole text. Pairs that can never reach the model (a pass-through symbol
/// the model does not know) are dropped at construction.
pub struct Scorer {
    pub alphabet: Alphabet,
    pub model: TransitionModel,
    pub message: String,

    log_table: Vec<Option<f64>>,
    model_size: usize,
    terms: Vec<PairTerm>,
}

impl Scorer {
    pub fn new(alphabet: Alphabet, model: TransitionModel, message: impl Into<String>) -> Self {
        let message = message.into();
        let model_index = model.alphabet().index();

        let slot_of = |c: char| -> Option<Slot> {
            match alphabet.position(c) {
                Some(pos) => Some(Slot::Cipher(pos)),
                None => model_index.lookup(c).map(Slot::Plain),
            }
        };

        let mut counts: HashMap<(Slot, Slot), u64> = HashMap::new();
        let mut order = Vec::new();
        for (a, b) in message.chars().zip(message.chars().skip(1)) {
            if let (Some(s1), Some(s2)) = (slot_of(a), slot_of(b)) {
                let entry = counts.entry((s1, s2)).or_insert_with(|| {
                    order.push((s1, s2));
                    0
                });
                *entry += 1;
            }
        }

        // First-seen order keeps the summation order, and so the exact float
        // result, independent of HashMap iteration.
        let terms = order
            .into_iter()
            .map(|(first, second)| PairTerm {
                first,
                second,
                count: counts[&(first, second)] as f64,
            })
            .collect();

        let log_table = model.log_table();
        let model_size = model.alphabet().len();

        Self {
            alphabet,
            model,
            message,
            log_table,
            model_size,
            terms,
        }
    }

    pub fn key_count(&self) -> usize {
        self.alphabet.len()
    }

    /// Model index of each decoded symbol: `key[i]` looked up in the model.
    fn resolve_key(&self, key: &Permutation) -> Vec<Option<usize>> {
        let model_index = self.model.alphabet().index();
        key.symbols().iter().map(|&c| model_index.lookup(c)).collect()
    }

    /// Log-likelihood of the message decoded with `key` (alphabet -> key).
    pub fn score(&self, key: &Permutation) -> f64 {
        let resolved = self.resolve_key(key);
        let resolve = |slot: Slot| match slot {
            Slot::Cipher(pos) => resolved.get(pos).copied().flatten(),
            Slot::Plain(m) => Some(m),
        };

        let mut total = 0.0;
        for term in &self.terms {
            if let (Some(i), Some(j)) = (resolve(term.first), resolve(term.second)) {
                if let Some(lp) = self.log_table[i * self.model_size + j] {
                    total += lp * term.count;
                }
            }
        }
        total
    }

    pub fn decode(&self, key: &Permutation) -> SfResult<String> {
        cipher::decode(&self.message, &self.alphabet, key)
    }
}

/// Reference scorer: decode, then sum log-probabilities of adjacent pairs.
pub fn score(
    alphabet: &Alphabet,
    key: &Permutation,
    message: &str,
    model: &TransitionModel,
) -> SfResult<f64> {
    let decoded = cipher::decode(message, alphabet, key)?;
    Ok(model.log_likelihood(&decoded))
}
