pub mod codec;

pub use self::codec::Substitution;

use crate::alphabet::Alphabet;
use crate::error::{SfResult, SubForgeError};
use fastrand::Rng;
use serde::Serialize;
use std::fmt;

/// A candidate substitution key: the alphabet's symbols in some order.
///
/// Permutations are values. Every move produces a new one, so `current`,
/// `best` and in-flight proposals never alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Permutation {
    symbols: Vec<char>,
}

impl Permutation {
    pub fn identity(alphabet: &Alphabet) -> Self {
        Self {
            symbols: alphabet.symbols().to_vec(),
        }
    }

    /// Validates that `symbols` is a reordering of `alphabet`.
    pub fn from_symbols(alphabet: &Alphabet, symbols: Vec<char>) -> SfResult<Self> {
        if symbols.len() != alphabet.len() {
            return Err(SubForgeError::InvalidPermutation(format!(
                "expected {} symbols, got {}",
                alphabet.len(),
                symbols.len()
            )));
        }
        let mut seen = vec![false; alphabet.len()];
        for &c in &symbols {
            let pos = alphabet.position(c).ok_or_else(|| {
                SubForgeError::InvalidPermutation(format!("symbol {:?} is not in the alphabet", c))
            })?;
            if seen[pos] {
                return Err(SubForgeError::InvalidPermutation(format!(
                    "symbol {:?} appears twice",
                    c
                )));
            }
            seen[pos] = true;
        }
        Ok(Self { symbols })
    }

    pub fn parse(alphabet: &Alphabet, key: &str) -> SfResult<Self> {
        Self::from_symbols(alphabet, key.chars().collect())
    }

    /// Uniform sample over all `N!` orderings (Fisher-Yates).
    pub fn random(alphabet: &Alphabet, rng: &mut Rng) -> Self {
        let mut symbols = alphabet.symbols().to_vec();
        rng.shuffle(&mut symbols);
        Self { symbols }
    }

    /// A copy of this permutation with positions `i` and `j` exchanged.
    pub fn swapped(&self, i: usize, j: usize) -> Self {
        let mut symbols = self.symbols.clone();
        symbols.swap(i, j);
        Self { symbols }
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The key that undoes this one: if `self` maps `alphabet[i] -> self[i]`,
    /// the inverse maps `self[i] -> alphabet[i]`.
    pub fn inverse(&self, alphabet: &Alphabet) -> SfResult<Self> {
        let mut symbols = vec!['\0'; alphabet.len()];
        for (i, &c) in self.symbols.iter().enumerate() {
            let pos = alphabet.position(c).ok_or_else(|| {
                SubForgeError::InvalidPermutation(format!("symbol {:?} is not in the alphabet", c))
            })?;
            symbols[pos] = alphabet.symbols()[i];
        }
        Ok(Self { symbols })
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl From<Permutation> for String {
    fn from(p: Permutation) -> Self {
        p.to_string()
    }
}

/// Enciphers `text` with `key` (alphabet -> key).
pub fn encipher(text: &str, alphabet: &Alphabet, key: &Permutation) -> SfResult<String> {
    codec::apply(text, alphabet.symbols(), key.symbols())
}

/// Deciphers `text` with `key` (key -> alphabet), undoing [`encipher`].
pub fn decipher(text: &str, alphabet: &Alphabet, key: &Permutation) -> SfResult<String> {
    codec::apply(text, key.symbols(), alphabet.symbols())
}

/// Decodes with a reverse key as the search produces it (alphabet -> key).
pub fn decode(text: &str, alphabet: &Alphabet, reverse_key: &Permutation) -> SfResult<String> {
    codec::apply(text, alphabet.symbols(), reverse_key.symbols())
}
