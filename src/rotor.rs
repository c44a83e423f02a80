//! Rotors: catalog entries and their mounted, stateful form.
//!
//! A [`Rotor`] is the immutable description found in a catalog: a name, a
//! wiring [`Permutation`] and a [`RotorKind`]. Installing a rotor into a
//! machine slot yields a [`MountedRotor`], which holds a shared handle to the
//! catalog entry plus the per-installation state (setting and ring setting).
//! Two machines built from the same catalog therefore never share rotor
//! positions.
//!
//! Kind-specific behavior (rotation, notches, reflection) is dispatched by
//! matching on [`RotorKind`].

use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;

/// What a rotor can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotorKind {
    /// Rotates under a pawl; `notches` are alphabet indices at which the
    /// rotor lets its left neighbor advance.
    Moving { notches: Vec<usize> },
    /// Never rotates, never reflects.
    Fixed,
    /// Single fixed orientation, traversed once per character.
    Reflector,
}

/// Immutable rotor description held in a [`RotorCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotor {
    name: String,
    kind: RotorKind,
    permutation: Permutation,
}

impl Rotor {
    /// Creates a moving rotor with notches at the symbols of `notches`.
    ///
    /// # Parameters
    /// - `name`: Catalog name.
    /// - `permutation`: Wiring at setting 0.
    /// - `notches`: Notch symbols, e.g. `"Q"` or `"ZM"`. May be empty.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SymbolNotInAlphabet`] if a notch symbol is not
    /// in the permutation's alphabet.
    pub fn moving(
        name: impl Into<String>,
        permutation: Permutation,
        notches: &str,
    ) -> Result<Self, EnigmaError> {
        let notches = notches
            .chars()
            .map(|c| {
                permutation
                    .alphabet()
                    .to_index(c)
                    .map_err(|_| EnigmaError::SymbolNotInAlphabet(c))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Rotor {
            name: name.into(),
            kind: RotorKind::Moving { notches },
            permutation,
        })
    }

    /// Creates a fixed (non-rotating) rotor.
    pub fn fixed(name: impl Into<String>, permutation: Permutation) -> Self {
        Rotor {
            name: name.into(),
            kind: RotorKind::Fixed,
            permutation,
        }
    }

    /// Creates a reflector.
    pub fn reflector(name: impl Into<String>, permutation: Permutation) -> Self {
        Rotor {
            name: name.into(),
            kind: RotorKind::Reflector,
            permutation,
        }
    }

    /// Returns my catalog name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns my kind, with notches for a moving rotor.
    pub fn kind(&self) -> &RotorKind {
        &self.kind
    }

    /// Returns my wiring, read at setting 0.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Returns the alphabet my wiring permutes.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        self.permutation.alphabet()
    }

    /// Returns true iff I have a ratchet and can move.
    pub fn rotates(&self) -> bool {
        matches!(self.kind, RotorKind::Moving { .. })
    }

    /// Returns true iff I am a reflector.
    pub fn reflects(&self) -> bool {
        matches!(self.kind, RotorKind::Reflector)
    }

    /// Notch positions as alphabet indices (empty unless moving).
    pub fn notches(&self) -> &[usize] {
        match &self.kind {
            RotorKind::Moving { notches } => notches.as_slice(),
            RotorKind::Fixed | RotorKind::Reflector => &[],
        }
    }
}

impl fmt::Display for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rotor {}", self.name)
    }
}

/// A rotor installed in a machine slot.
///
/// Holds a shared handle to its catalog entry; only `setting` and
/// `ring_setting` belong to the installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedRotor {
    rotor: Arc<Rotor>,
    setting: usize,
    ring_setting: usize,
}

impl MountedRotor {
    /// Mounts `rotor` at setting 0 with ring setting 0.
    pub fn new(rotor: Arc<Rotor>) -> Self {
        MountedRotor {
            rotor,
            setting: 0,
            ring_setting: 0,
        }
    }

    /// Returns the catalog name of the mounted rotor.
    pub fn name(&self) -> &str {
        self.rotor.name()
    }

    /// See [`Rotor::rotates`].
    pub fn rotates(&self) -> bool {
        self.rotor.rotates()
    }

    /// See [`Rotor::reflects`].
    pub fn reflects(&self) -> bool {
        self.rotor.reflects()
    }

    /// Current rotational offset, as an alphabet index.
    pub fn setting(&self) -> usize {
        self.setting
    }

    /// Ring offset, as an alphabet index.
    pub fn ring_setting(&self) -> usize {
        self.ring_setting
    }

    /// Sets `setting()` to `posn` modulo the alphabet size.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidPosition`] if I am a reflector and
    /// `posn != 0`.
    pub fn set(&mut self, posn: isize) -> Result<(), EnigmaError> {
        match self.rotor.kind() {
            RotorKind::Reflector if posn != 0 => Err(EnigmaError::InvalidPosition(posn)),
            _ => {
                self.setting = self.rotor.permutation().wrap(posn);
                Ok(())
            }
        }
    }

    /// Sets `setting()` to the index of symbol `cposn`.
    ///
    /// # Errors
    /// - [`EnigmaError::UnknownSymbol`] if `cposn` is not in my alphabet.
    /// - [`EnigmaError::InvalidPosition`] as for [`set`](Self::set).
    pub fn set_char(&mut self, cposn: char) -> Result<(), EnigmaError> {
        let posn = self.rotor.alphabet().to_index(cposn)?;
        self.set(posn as isize)
    }

    /// Sets `ring_setting()` to `posn` modulo the alphabet size.
    pub fn set_ring(&mut self, posn: isize) {
        self.ring_setting = self.rotor.permutation().wrap(posn);
    }

    /// Sets `ring_setting()` to the index of symbol `cposn`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownSymbol`] if `cposn` is not in my alphabet.
    pub fn set_ring_char(&mut self, cposn: char) -> Result<(), EnigmaError> {
        let posn = self.rotor.alphabet().to_index(cposn)?;
        self.set_ring(posn as isize);
        Ok(())
    }

    /// Returns true iff I am positioned to let the rotor to my left advance.
    pub fn at_notch(&self) -> bool {
        self.rotor.notches().contains(&self.setting)
    }

    /// Advances one position if I rotate; no-op otherwise.
    pub fn advance(&mut self) {
        if self.rotor.rotates() {
            self.setting = self.rotor.permutation().wrap(self.setting as isize + 1);
        }
    }

    /// Net displacement of the wiring relative to the ring marking.
    fn offset(&self) -> isize {
        self.setting as isize - self.ring_setting as isize
    }

    /// Converts contact `p` on my right side to the contact it exits on my
    /// left side.
    ///
    /// Reflectors apply their wiring directly; other rotors shift by the
    /// current offset, permute and shift back.
    pub fn convert_forward(&self, p: usize) -> usize {
        let perm = self.rotor.permutation();
        match self.rotor.kind() {
            RotorKind::Reflector => perm.permute(p as isize),
            RotorKind::Moving { .. } | RotorKind::Fixed => {
                let offset = self.offset();
                let out = perm.permute(p as isize + offset);
                perm.wrap(out as isize - offset)
            }
        }
    }

    /// Converts contact `e` on my left side back through the inverse wiring.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnsupportedOperation`] for a reflector, which
    /// has no return path.
    pub fn convert_backward(&self, e: usize) -> Result<usize, EnigmaError> {
        let perm = self.rotor.permutation();
        match self.rotor.kind() {
            RotorKind::Reflector => Err(EnigmaError::UnsupportedOperation(
                "backward conversion through a reflector",
            )),
            RotorKind::Moving { .. } | RotorKind::Fixed => {
                let offset = self.offset();
                let out = perm.invert(e as isize + offset);
                Ok(perm.wrap(out as isize - offset))
            }
        }
    }
}

impl fmt::Display for MountedRotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.rotor, f)
    }
}

/// Read-only collection of every rotor available to a machine.
///
/// Shared between machines behind an `Arc`; lookup is by name, first match
/// wins.
#[derive(Debug, Clone, Default)]
pub struct RotorCatalog {
    rotors: Vec<Arc<Rotor>>,
}

impl RotorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `rotor` at the end of the catalog.
    pub fn push(&mut self, rotor: Rotor) {
        self.rotors.push(Arc::new(rotor));
    }

    /// Returns the first rotor named `name`.
    pub fn find(&self, name: &str) -> Option<&Arc<Rotor>> {
        self.rotors.iter().find(|r| r.name() == name)
    }

    pub fn len(&self) -> usize {
        self.rotors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Rotor>> {
        self.rotors.iter()
    }
}

impl FromIterator<Rotor> for RotorCatalog {
    fn from_iter<I: IntoIterator<Item = Rotor>>(iter: I) -> Self {
        RotorCatalog {
            rotors: iter.into_iter().map(Arc::new).collect(),
        }
    }
}
