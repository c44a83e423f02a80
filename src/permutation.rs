//! Permutation: bijection over alphabet indices in cycle notation.
//!
//! A permutation is parsed from a string such as `"(AELTPHQXRU) (BKNW) (S)"`
//! and stored as two dense lookup tables (forward and inverse), so both
//! directions cost O(1) per index.

use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;

/// A total bijection over `0..alphabet.size()`.
///
/// Symbols that appear in no cycle map to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    alphabet: Arc<Alphabet>,
    forward: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// Parses `cycles` against `alphabet`.
    ///
    /// `cycles` is a sequence of round-bracket groups; whitespace is ignored
    /// and empty groups `()` are skipped. Within a group each symbol maps to
    /// the next and the last maps back to the first.
    ///
    /// # Parameters
    /// - `cycles`: Cycle notation, e.g. `"(AB) (CDE)"`. May be empty.
    /// - `alphabet`: The shared alphabet the symbols are drawn from.
    ///
    /// # Errors
    /// - [`EnigmaError::SymbolNotInAlphabet`] if a cycle names a symbol the
    ///   alphabet lacks.
    /// - [`EnigmaError::InvalidConfiguration`] on unbalanced or nested
    ///   brackets, symbols outside a group, or a symbol used twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let alpha = Arc::new(Alphabet::default());
    /// let perm = Permutation::new("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)", alpha).unwrap();
    /// assert_eq!(perm.permute_char('A'), Ok('E'));
    /// assert_eq!(perm.permute_char('E'), Ok('L'));
    /// assert_eq!(perm.invert_char('E'), Ok('A'));
    /// ```
    pub fn new(cycles: &str, alphabet: Arc<Alphabet>) -> Result<Self, EnigmaError> {
        let size = alphabet.size();
        let mut forward: Vec<usize> = (0..size).collect();
        let mut used = vec![false; size];
        let mut group: Option<Vec<usize>> = None;

        for c in cycles.chars() {
            if c.is_whitespace() {
                continue;
            }
            match c {
                '(' => {
                    if group.is_some() {
                        return Err(EnigmaError::InvalidConfiguration(format!(
                            "nested '(' in cycles \"{}\"",
                            cycles
                        )));
                    }
                    group = Some(Vec::new());
                }
                ')' => {
                    let members = group.take().ok_or_else(|| {
                        EnigmaError::InvalidConfiguration(format!(
                            "unmatched ')' in cycles \"{}\"",
                            cycles
                        ))
                    })?;
                    Self::add_cycle(&mut forward, &members);
                }
                _ => {
                    let members = group.as_mut().ok_or_else(|| {
                        EnigmaError::InvalidConfiguration(format!(
                            "symbol '{}' outside of a cycle in \"{}\"",
                            c, cycles
                        ))
                    })?;
                    let index = alphabet
                        .to_index(c)
                        .map_err(|_| EnigmaError::SymbolNotInAlphabet(c))?;
                    if used[index] {
                        return Err(EnigmaError::InvalidConfiguration(format!(
                            "symbol '{}' appears more than once in cycles \"{}\"",
                            c, cycles
                        )));
                    }
                    used[index] = true;
                    members.push(index);
                }
            }
        }
        if group.is_some() {
            return Err(EnigmaError::InvalidConfiguration(format!(
                "unclosed '(' in cycles \"{}\"",
                cycles
            )));
        }

        let mut inverse = vec![0; size];
        for (from, &to) in forward.iter().enumerate() {
            inverse[to] = from;
        }
        Ok(Permutation {
            alphabet,
            forward,
            inverse,
        })
    }

    /// The identity permutation over `alphabet`.
    pub fn identity(alphabet: Arc<Alphabet>) -> Self {
        let forward: Vec<usize> = (0..alphabet.size()).collect();
        Permutation {
            inverse: forward.clone(),
            forward,
            alphabet,
        }
    }

    /// Chains c0 -> c1 -> ... -> cm -> c0.
    fn add_cycle(forward: &mut [usize], members: &[usize]) {
        for (i, &from) in members.iter().enumerate() {
            forward[from] = members[(i + 1) % members.len()];
        }
    }

    /// Returns the size of the alphabet I permute.
    pub fn size(&self) -> usize {
        self.forward.len()
    }

    /// Returns the alphabet this permutation was built on.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns `p` modulo `size()` as a non-negative index.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use enigma::{Alphabet, Permutation};
    ///
    /// let perm = Permutation::identity(Arc::new(Alphabet::default()));
    /// assert_eq!(perm.wrap(-1), 25);
    /// assert_eq!(perm.wrap(27), 1);
    /// ```
    pub fn wrap(&self, p: isize) -> usize {
        p.rem_euclid(self.size() as isize) as usize
    }

    /// Applies the permutation to `p` modulo the alphabet size.
    pub fn permute(&self, p: isize) -> usize {
        self.forward[self.wrap(p)]
    }

    /// Applies the inverse permutation to `c` modulo the alphabet size.
    pub fn invert(&self, c: isize) -> usize {
        self.inverse[self.wrap(c)]
    }

    /// Applies the permutation to a symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `p` is not in my alphabet.
    pub fn permute_char(&self, p: char) -> Result<char, EnigmaError> {
        let index = self
            .alphabet
            .to_index(p)
            .map_err(|_| EnigmaError::SymbolNotInAlphabet(p))?;
        self.alphabet.to_char(self.forward[index])
    }

    /// Applies the inverse permutation to a symbol.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if `c` is not in my alphabet.
    pub fn invert_char(&self, c: char) -> Result<char, EnigmaError> {
        let index = self
            .alphabet
            .to_index(c)
            .map_err(|_| EnigmaError::SymbolNotInAlphabet(c))?;
        self.alphabet.to_char(self.inverse[index])
    }

    /// Returns true iff at least one symbol maps to itself.
    ///
    /// Note the polarity: a textbook derangement has no fixed points, so this
    /// reports the opposite of that property. Callers rely on the
    /// flag-any-fixed-point behavior.
    pub fn derangement(&self) -> bool {
        self.forward.iter().enumerate().any(|(i, &to)| i == to)
    }

    /// Renders the non-trivial cycles in canonical form, each cycle starting
    /// at its lowest index and cycles ordered by that index.
    pub fn cycles(&self) -> String {
        let mut out = String::new();
        let mut seen = vec![false; self.size()];
        for start in 0..self.size() {
            if seen[start] || self.forward[start] == start {
                continue;
            }
            out.push('(');
            let mut i = start;
            while !seen[i] {
                seen[i] = true;
                // Indices always come from my own alphabet.
                if let Ok(c) = self.alphabet.to_char(i) {
                    out.push(c);
                }
                i = self.forward[i];
            }
            out.push(')');
        }
        out
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cycles())
    }
}
