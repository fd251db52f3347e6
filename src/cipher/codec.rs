use crate::alphabet::SymbolIndex;
use crate::error::{SfResult, SubForgeError};

/// A positional substitution: `source[i]` is replaced by `target[i]`.
///
/// Encoding and decoding are the same operation with the orderings swapped;
/// there is no direction flag.
#[derive(Debug, Clone)]
pub struct Substitution {
    source: SymbolIndex,
    target: Vec<char>,
}

impl Substitution {
    pub fn new(source: &[char], target: &[char]) -> SfResult<Self> {
        if source.len() != target.len() {
            return Err(SubForgeError::InvalidPermutation(format!(
                "source has {} symbols but target has {}",
                source.len(),
                target.len()
            )));
        }
        Ok(Self {
            source: SymbolIndex::new(source)?,
            target: target.to_vec(),
        })
    }

    #[inline(always)]
    pub fn map_symbol(&self, symbol: char) -> char {
        match self.source.lookup(symbol) {
            Some(i) => self.target[i],
            None => symbol,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        text.chars().map(|c| self.map_symbol(c)).collect()
    }
}

/// Substitutes every symbol of `text` found in `source` with the symbol at the
/// same position in `target`. Symbols outside `source` are copied verbatim.
pub fn apply(text: &str, source: &[char], target: &[char]) -> SfResult<String> {
    Ok(Substitution::new(source, target)?.apply(text))
}
