//! Error types for the enigma library.

use thiserror::Error;

/// Errors produced by the enigma library.
///
/// Every variant is a fatal configuration or logic error: the machine models
/// a deterministic device, so nothing here is transient or worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// Alphabet contains a reserved delimiter, a duplicate or no symbols at all.
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),
    /// A symbol referenced by a cycle, notch or message is not in the alphabet.
    #[error("Symbol '{0}' is not in the alphabet")]
    SymbolNotInAlphabet(char),
    /// Lookup of a symbol that the alphabet does not define.
    #[error("Unknown symbol '{0}'")]
    UnknownSymbol(char),
    /// Index outside `[0, size)`.
    #[error("Index {index} is outside the range [0, {size})")]
    OutOfRange { index: usize, size: usize },
    /// Malformed cycle notation.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Machine needs at least two rotor slots.
    #[error("Number of rotor slots must be greater than 1, got {0}")]
    InvalidRotorCount(usize),
    /// Pawl count must satisfy `0 <= pawls < num_rotors`.
    #[error("Number of pawls must be between 0 and {num_rotors} (exclusive), got {pawls}")]
    InvalidPawlCount { pawls: usize, num_rotors: usize },
    /// More rotors requested than the catalog can supply.
    #[error("Too many rotors: requested {requested}, catalog holds {available}")]
    TooManyRotors { requested: usize, available: usize },
    /// Rotor list length does not match the number of slots.
    #[error("Expected {expected} rotors, got {actual}")]
    WrongRotorCount { expected: usize, actual: usize },
    /// No catalog rotor carries the requested name.
    #[error("No rotor named '{0}' in the catalog")]
    MissingRotor(String),
    /// The same rotor name was selected twice.
    #[error("Rotor '{0}' is selected more than once")]
    DuplicateRotor(String),
    /// Setting or ring string does not have one symbol per non-reflector slot.
    #[error("Setting must have {expected} symbols, got {actual}")]
    BadSettingLength { expected: usize, actual: usize },
    /// A rotor of the wrong kind occupies a slot.
    #[error("Rotor '{name}' cannot occupy slot {slot}: {reason}")]
    MisplacedRotor {
        name: String,
        slot: usize,
        reason: &'static str,
    },
    /// Operation requires installed rotors.
    #[error("No rotors have been installed")]
    NoRotorsInstalled,
    /// Attempt to turn a reflector away from position 0.
    #[error("Reflector has only one position, cannot set it to {0}")]
    InvalidPosition(isize),
    /// Operation not defined for this rotor kind.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
    /// Text grammar error with the 1-based line it was found on.
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl EnigmaError {
    /// Returns true for the errors that describe an invalid machine
    /// configuration (bad counts, bad rotor selection, bad setting strings).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EnigmaError::InvalidConfiguration(_)
                | EnigmaError::InvalidRotorCount(_)
                | EnigmaError::InvalidPawlCount { .. }
                | EnigmaError::TooManyRotors { .. }
                | EnigmaError::WrongRotorCount { .. }
                | EnigmaError::MissingRotor(_)
                | EnigmaError::DuplicateRotor(_)
                | EnigmaError::BadSettingLength { .. }
                | EnigmaError::MisplacedRotor { .. }
                | EnigmaError::NoRotorsInstalled
                | EnigmaError::Parse { .. }
        )
    }
}
