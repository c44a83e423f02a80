//! Alphabet: ordered set of encodable symbols.
//!
//! Provides the bidirectional mapping between symbols and dense indices
//! (`0..size`) that every permutation and rotor is expressed in.

use std::collections::HashMap;
use std::fmt;

use crate::error::EnigmaError;

/// Symbols that structure the configuration and setting grammars and
/// therefore can never be encoded.
const RESERVED: [char; 5] = ['*', ',', '/', '(', ')'];

/// Default alphabet used when none is given.
const DEFAULT_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An immutable ordered set of distinct symbols.
///
/// The symbol at position `k` has index `k`. Alphabets are shared read-only
/// (behind an `Arc`) by every permutation built on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    indices: HashMap<char, usize>,
}

impl Default for Alphabet {
    fn default() -> Self {
        let symbols: Vec<char> = DEFAULT_SYMBOLS.chars().collect();
        let indices = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Alphabet { symbols, indices }
    }
}

impl Alphabet {
    /// Creates an alphabet from the symbols of `chars`, in order.
    ///
    /// # Parameters
    /// - `chars`: The symbols, one `char` each.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidAlphabet`] if `chars` is empty, contains
    /// whitespace or one of `* , / ( )`, or repeats a symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Alphabet;
    ///
    /// let alpha = Alphabet::new("ABCD").unwrap();
    /// assert_eq!(alpha.size(), 4);
    /// assert!(Alphabet::new("AB(C").is_err());
    /// assert!(Alphabet::new("ABA").is_err());
    /// ```
    pub fn new(chars: &str) -> Result<Self, EnigmaError> {
        if chars.is_empty() {
            return Err(EnigmaError::InvalidAlphabet(
                "alphabet has no symbols".to_string(),
            ));
        }
        let mut symbols = Vec::with_capacity(chars.len());
        let mut indices = HashMap::with_capacity(chars.len());
        for c in chars.chars() {
            if c.is_whitespace() || RESERVED.contains(&c) {
                return Err(EnigmaError::InvalidAlphabet(format!(
                    "reserved symbol {:?}",
                    c
                )));
            }
            if indices.insert(c, symbols.len()).is_some() {
                return Err(EnigmaError::InvalidAlphabet(format!(
                    "duplicated symbol '{}'",
                    c
                )));
            }
            symbols.push(c);
        }
        Ok(Alphabet { symbols, indices })
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if `ch` is one of my symbols.
    pub fn contains(&self, ch: char) -> bool {
        self.indices.contains_key(&ch)
    }

    /// Returns the symbol at `index`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::OutOfRange`] if `index >= size()`.
    pub fn to_char(&self, index: usize) -> Result<char, EnigmaError> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(EnigmaError::OutOfRange {
                index,
                size: self.size(),
            })
    }

    /// Returns the index of `ch`. Inverse of [`to_char`](Self::to_char).
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownSymbol`] if `ch` is not in the alphabet.
    pub fn to_index(&self, ch: char) -> Result<usize, EnigmaError> {
        self.indices
            .get(&ch)
            .copied()
            .ok_or(EnigmaError::UnknownSymbol(ch))
    }

    /// Iterates over the symbols in index order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.symbols.iter().copied()
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
