//! Machine configuration files.
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ          alphabet
//! 5 3                                 slots, pawls
//! I MQ   (AELTPHQXRU) (BKNW) ...      name kind cycles
//! Beta N (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B R    (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
//!        (RX) (SZ) (TV)               cycles may continue on later lines
//! ```
//!
//! The kind is `M` followed by the notch symbols for a moving rotor, `N` for
//! a fixed rotor and `R` for a reflector.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;
use crate::rotor::{Rotor, RotorCatalog};

/// A whitespace-separated word and the 1-based line it came from.
#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    line: usize,
}

/// Cursor over the tokens of a configuration text.
struct Tokens<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let mut tokens = Vec::new();
        let mut last_line = 1;
        for (i, line) in text.lines().enumerate() {
            last_line = i + 1;
            tokens.extend(line.split_whitespace().map(|text| Token { text, line: i + 1 }));
        }
        Tokens {
            tokens,
            pos: 0,
            last_line,
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn next_token(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Next token, or a "truncated" error naming what was expected.
    fn expect(&mut self, what: &str) -> Result<Token<'a>, EnigmaError> {
        self.next_token().ok_or_else(|| EnigmaError::Parse {
            line: self.last_line,
            message: format!("configuration truncated, expected {}", what),
        })
    }

    fn expect_count(&mut self, what: &str) -> Result<usize, EnigmaError> {
        let token = self.expect(what)?;
        token.text.parse().map_err(|_| EnigmaError::Parse {
            line: token.line,
            message: format!("expected {}, found '{}'", what, token.text),
        })
    }
}

/// Everything a configuration file describes: the alphabet, the slot and
/// pawl counts and the catalog of available rotors.
///
/// Alphabet and catalog are shared read-only by every machine built from
/// this configuration.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    num_pawls: usize,
    catalog: Arc<RotorCatalog>,
}

impl MachineConfig {
    /// Parses a configuration text.
    ///
    /// # Errors
    /// - [`EnigmaError::Parse`] for truncated input, non-numeric counts,
    ///   unknown rotor kinds and repeated rotor names.
    /// - [`EnigmaError::InvalidAlphabet`], [`EnigmaError::SymbolNotInAlphabet`]
    ///   and [`EnigmaError::InvalidConfiguration`] from the alphabet, notch and
    ///   cycle definitions.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::MachineConfig;
    ///
    /// let config = MachineConfig::parse("ABCD 2 1\n R1 MA (AB)\n REF R (AC)(BD)").unwrap();
    /// assert_eq!(config.num_rotors(), 2);
    /// assert_eq!(config.catalog().len(), 2);
    /// ```
    pub fn parse(text: &str) -> Result<Self, EnigmaError> {
        let mut tokens = Tokens::new(text);

        let alphabet = Arc::new(Alphabet::new(tokens.expect("alphabet")?.text)?);
        let num_rotors = tokens.expect_count("number of rotor slots")?;
        let num_pawls = tokens.expect_count("number of pawls")?;

        let mut catalog = RotorCatalog::new();
        let mut names = HashSet::new();
        while let Some(name) = tokens.next_token() {
            if name.text.starts_with('(') {
                return Err(EnigmaError::Parse {
                    line: name.line,
                    message: format!("cycles '{}' do not follow a rotor kind", name.text),
                });
            }
            if !names.insert(name.text) {
                return Err(EnigmaError::Parse {
                    line: name.line,
                    message: format!("rotor '{}' is defined twice", name.text),
                });
            }
            let kind = tokens.expect("rotor kind")?;
            let mut cycles = Vec::new();
            let mut open = 0isize;
            while let Some(cycle) = tokens
                .peek()
                .filter(|t| open > 0 || t.text.starts_with('('))
            {
                open += cycle.text.matches('(').count() as isize;
                open -= cycle.text.matches(')').count() as isize;
                cycles.push(cycle.text);
                tokens.next_token();
            }
            let permutation = Permutation::new(&cycles.join(" "), Arc::clone(&alphabet))?;
            catalog.push(Self::read_rotor(name, kind, permutation)?);
        }

        debug!(
            alphabet = %alphabet,
            num_rotors,
            num_pawls,
            rotors = catalog.len(),
            "Configuration parsed"
        );
        Ok(MachineConfig {
            alphabet,
            num_rotors,
            num_pawls,
            catalog: Arc::new(catalog),
        })
    }

    /// Builds one rotor from its name and kind tokens.
    fn read_rotor(
        name: Token<'_>,
        kind: Token<'_>,
        permutation: Permutation,
    ) -> Result<Rotor, EnigmaError> {
        let mut chars = kind.text.chars();
        let letter = chars.next();
        let rest = chars.as_str();
        match letter {
            Some('M') => Rotor::moving(name.text, permutation, rest),
            Some('N') if rest.is_empty() => Ok(Rotor::fixed(name.text, permutation)),
            Some('R') if rest.is_empty() => Ok(Rotor::reflector(name.text, permutation)),
            _ => Err(EnigmaError::Parse {
                line: kind.line,
                message: format!(
                    "bad kind '{}' for rotor '{}', expected M<notches>, N or R",
                    kind.text, name.text
                ),
            }),
        }
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    pub fn catalog(&self) -> &Arc<RotorCatalog> {
        &self.catalog
    }

    /// Creates a fresh, unconfigured machine sharing my alphabet and catalog.
    ///
    /// # Errors
    /// Same as [`Machine::new`].
    pub fn build_machine(&self) -> Result<Machine, EnigmaError> {
        Machine::new(
            Arc::clone(&self.alphabet),
            self.num_rotors,
            self.num_pawls,
            Arc::clone(&self.catalog),
        )
    }
}
