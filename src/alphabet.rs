use crate::consts::DEFAULT_ALPHABET;
use crate::error::{SfResult, SubForgeError};
use std::collections::HashMap;
use std::fmt;

/// Position lookup over an ordered symbol set.
///
/// Every "unknown symbol" decision in the crate goes through [`SymbolIndex::lookup`]:
/// the codec passes unknown symbols through, the scorer and the transition model
/// skip pairs touching them.
#[derive(Debug, Clone)]
pub struct SymbolIndex {
    positions: HashMap<char, usize>,
}

impl SymbolIndex {
    pub fn new(symbols: &[char]) -> SfResult<Self> {
        let mut positions = HashMap::with_capacity(symbols.len());
        for (i, &c) in symbols.iter().enumerate() {
            if positions.insert(c, i).is_some() {
                return Err(SubForgeError::DuplicateSymbol(c));
            }
        }
        Ok(Self { positions })
    }

    #[inline(always)]
    pub fn lookup(&self, symbol: char) -> Option<usize> {
        self.positions.get(&symbol).copied()
    }
}

/// The ordered, duplicate-free symbol set a cipher operates on.
#[derive(Debug, Clone)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: SymbolIndex,
}

impl Alphabet {
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> SfResult<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        let index = SymbolIndex::new(&symbols)?;
        Ok(Self { symbols, index })
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

    #[inline(always)]
    pub fn position(&self, symbol: char) -> Option<usize> {
        self.index.lookup(symbol)
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.position(symbol).is_some()
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let symbols: Vec<char> = DEFAULT_ALPHABET.chars().collect();
        let positions = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self {
            index: SymbolIndex { positions },
            symbols,
        }
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}

impl std::str::FromStr for Alphabet {
    type Err = SubForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.chars())
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicates() {
        let err = Alphabet::new("abca".chars()).unwrap_err();
        assert!(matches!(err, SubForgeError::DuplicateSymbol('a')));
    }

    #[test]
    fn default_has_sixty_symbols() {
        let alphabet = Alphabet::default();
        assert_eq!(alphabet.len(), 60);
        assert_eq!(alphabet.position('a'), Some(0));
        assert_eq!(alphabet.position(' '), Some(52));
        assert_eq!(alphabet.position('#'), None);
    }

    #[test]
    fn default_matches_checked_construction() {
        let checked = Alphabet::new(DEFAULT_ALPHABET.chars()).unwrap();
        let default = Alphabet::default();
        assert_eq!(checked, default);
        for &c in checked.symbols() {
            assert_eq!(default.position(c), checked.position(c));
        }
    }
}
