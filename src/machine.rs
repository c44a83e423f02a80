//! Machine: slot list, stepping and the signal path.
//!
//! Slot 0 is the leftmost position and holds the reflector. The rightmost
//! `num_pawls` slots are driven by pawls and may rotate. Each character:
//!
//! ```text
//! step rotors -> plugboard -> slots right-to-left (forward)
//!             -> slots 1..n left-to-right (backward) -> plugboard
//! ```

use std::sync::Arc;

use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::error::EnigmaError;
use crate::permutation::Permutation;
use crate::rotor::{MountedRotor, RotorCatalog};

/// A complete rotor cipher machine.
///
/// Every conversion advances the rotors, so a machine is a sequential state
/// machine: one instance per message stream. The alphabet and catalog are
/// shared read-only and may back any number of machines.
#[derive(Debug, Clone)]
pub struct Machine {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    num_pawls: usize,
    catalog: Arc<RotorCatalog>,
    slots: Vec<MountedRotor>,
    plugboard: Permutation,
}

impl Machine {
    /// Creates a machine with `num_rotors` slots and `num_pawls` pawls.
    ///
    /// No rotors are installed and the plugboard is the identity.
    ///
    /// # Parameters
    /// - `alphabet`: Alphabet shared with every catalog rotor.
    /// - `num_rotors`: Number of slots, reflector included (> 1).
    /// - `num_pawls`: Number of rotating slots (`0 <= num_pawls < num_rotors`).
    /// - `catalog`: All rotors available for insertion.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidRotorCount`] if `num_rotors < 2`.
    /// - [`EnigmaError::InvalidPawlCount`] if `num_pawls >= num_rotors`.
    pub fn new(
        alphabet: Arc<Alphabet>,
        num_rotors: usize,
        num_pawls: usize,
        catalog: Arc<RotorCatalog>,
    ) -> Result<Self, EnigmaError> {
        if num_rotors < 2 {
            return Err(EnigmaError::InvalidRotorCount(num_rotors));
        }
        if num_pawls >= num_rotors {
            return Err(EnigmaError::InvalidPawlCount {
                pawls: num_pawls,
                num_rotors,
            });
        }
        let plugboard = Permutation::identity(Arc::clone(&alphabet));
        Ok(Machine {
            alphabet,
            num_rotors,
            num_pawls,
            catalog,
            slots: Vec::new(),
            plugboard,
        })
    }

    /// Returns the number of rotor slots I have.
    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    /// Returns the number of pawls (and thus rotating slots) I have.
    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Returns the alphabet shared by my rotors and plugboard.
    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    /// Returns the rotors available for insertion.
    pub fn catalog(&self) -> &Arc<RotorCatalog> {
        &self.catalog
    }

    /// Installed rotors, slot 0 first. Empty before [`insert_rotors`](Self::insert_rotors).
    pub fn installed(&self) -> &[MountedRotor] {
        &self.slots
    }

    /// Returns the plugboard, applied on entry and on exit.
    pub fn plugboard(&self) -> &Permutation {
        &self.plugboard
    }

    /// Fills my slots with the catalog rotors named in `names`, in order.
    ///
    /// `names[0]` names the rotor for slot 0. Every installed rotor starts at
    /// setting 0 and ring setting 0. On error the previous installation is
    /// left untouched.
    ///
    /// # Errors
    /// - [`EnigmaError::TooManyRotors`] if more names are given than the
    ///   catalog could supply.
    /// - [`EnigmaError::WrongRotorCount`] if `names.len() != num_rotors()`.
    /// - [`EnigmaError::MissingRotor`] if a name is not in the catalog.
    pub fn insert_rotors<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), EnigmaError> {
        if names.len() > self.catalog.len() + 1 {
            return Err(EnigmaError::TooManyRotors {
                requested: names.len(),
                available: self.catalog.len(),
            });
        }
        if names.len() != self.num_rotors {
            return Err(EnigmaError::WrongRotorCount {
                expected: self.num_rotors,
                actual: names.len(),
            });
        }
        let slots = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.catalog
                    .find(name)
                    .map(|rotor| MountedRotor::new(Arc::clone(rotor)))
                    .ok_or_else(|| EnigmaError::MissingRotor(name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            rotors = ?slots.iter().map(MountedRotor::name).collect::<Vec<_>>(),
            "Rotors inserted"
        );
        self.slots = slots;
        Ok(())
    }

    /// Sets the non-reflector slots from `setting`, one symbol per slot,
    /// leftmost first.
    ///
    /// # Errors
    /// - [`EnigmaError::NoRotorsInstalled`] before any insertion.
    /// - [`EnigmaError::BadSettingLength`] unless `setting` has
    ///   `num_rotors() - 1` symbols.
    /// - [`EnigmaError::UnknownSymbol`] for a symbol outside the alphabet.
    /// - [`EnigmaError::InvalidPosition`] if a reflector sits in slots 1.. and
    ///   its symbol is not index 0.
    pub fn set_rotors(&mut self, setting: &str) -> Result<(), EnigmaError> {
        let positions = self.parse_setting(setting)?;
        let mut slots = self.slots.clone();
        for (slot, posn) in slots.iter_mut().skip(1).zip(positions) {
            slot.set(posn as isize)?;
        }
        debug!(setting, "Rotor settings applied");
        self.slots = slots;
        Ok(())
    }

    /// Sets the ring settings of the non-reflector slots from `ring_setting`.
    ///
    /// # Errors
    /// Same shape checks as [`set_rotors`](Self::set_rotors).
    pub fn set_rings(&mut self, ring_setting: &str) -> Result<(), EnigmaError> {
        let positions = self.parse_setting(ring_setting)?;
        for (slot, posn) in self.slots.iter_mut().skip(1).zip(positions) {
            slot.set_ring(posn as isize);
        }
        debug!(ring_setting, "Ring settings applied");
        Ok(())
    }

    /// Validates a setting string and returns one index per slot 1..n.
    fn parse_setting(&self, setting: &str) -> Result<Vec<usize>, EnigmaError> {
        if self.slots.is_empty() {
            return Err(EnigmaError::NoRotorsInstalled);
        }
        let expected = self.num_rotors - 1;
        let actual = setting.chars().count();
        if actual != expected {
            return Err(EnigmaError::BadSettingLength { expected, actual });
        }
        setting
            .chars()
            .map(|c| self.alphabet.to_index(c))
            .collect()
    }

    /// Installs `plugboard` as the pre/post permutation.
    pub fn set_plugboard(&mut self, plugboard: Permutation) {
        debug!(plugboard = %plugboard, "Plugboard set");
        self.plugboard = plugboard;
    }

    /// Current settings of slots 1..n as symbols, leftmost first.
    pub fn positions(&self) -> String {
        self.slots
            .iter()
            .skip(1)
            .filter_map(|slot| self.alphabet.to_char(slot.setting()).ok())
            .collect()
    }

    /// Decides which slots advance on the next character.
    ///
    /// Only the rightmost `num_pawls` slots are eligible. The rightmost
    /// always advances. Any other eligible slot advances iff it rotates and
    /// its right neighbor is at a notch; that neighbor's pawl then engages
    /// its notch too and pushes it along, which is what makes a middle rotor
    /// step on two consecutive characters.
    ///
    /// Computed entirely from the current state; nothing is mutated.
    fn step_schedule(slots: &[MountedRotor], num_pawls: usize) -> Vec<bool> {
        let n = slots.len();
        let mut advance = vec![false; n];
        if num_pawls == 0 || n == 0 {
            return advance;
        }
        let first = n.saturating_sub(num_pawls);
        advance[n - 1] = true;
        for i in first..n - 1 {
            if slots[i].rotates() && slots[i + 1].at_notch() {
                advance[i] = true;
                advance[i + 1] = true;
            }
        }
        advance
    }

    /// Runs the stepping algorithm once without converting a character.
    pub fn step(&mut self) {
        let schedule = Self::step_schedule(&self.slots, self.num_pawls);
        trace!(?schedule, "Stepping");
        for (slot, advance) in self.slots.iter_mut().zip(schedule) {
            if advance {
                slot.advance();
            }
        }
    }

    /// Converts the character at index `c` after first advancing the rotors.
    ///
    /// # Errors
    /// - [`EnigmaError::OutOfRange`] if `c >= alphabet().size()`; the rotors
    ///   are not advanced.
    /// - [`EnigmaError::NoRotorsInstalled`] before any insertion.
    /// - [`EnigmaError::UnsupportedOperation`] if a reflector occupies a slot
    ///   other than 0.
    pub fn convert(&mut self, c: usize) -> Result<usize, EnigmaError> {
        let size = self.alphabet.size();
        if c >= size {
            return Err(EnigmaError::OutOfRange { index: c, size });
        }
        if self.slots.is_empty() {
            return Err(EnigmaError::NoRotorsInstalled);
        }
        self.step();

        let mut out = self.plugboard.permute(c as isize);
        for slot in self.slots.iter().rev() {
            out = slot.convert_forward(out);
        }
        for slot in self.slots.iter().skip(1) {
            out = slot.convert_backward(out)?;
        }
        Ok(self.plugboard.permute(out as isize))
    }

    /// Converts every symbol of `msg`, advancing the rotors once per symbol.
    ///
    /// The whole message is checked first, so a rejected message leaves the
    /// rotors where they were.
    ///
    /// # Errors
    /// - [`EnigmaError::SymbolNotInAlphabet`] for the first symbol outside
    ///   the alphabet (whitespace included).
    /// - Any error of [`convert`](Self::convert).
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::MachineConfig;
    ///
    /// let config = MachineConfig::parse(
    ///     "ABCDEFGHIJKLMNOPQRSTUVWXYZ
    ///      5 3
    ///      I MQ   (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
    ///      II ME  (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
    ///      III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
    ///      Beta N (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
    ///      B R    (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
    ///             (RX) (SZ) (TV)",
    /// )
    /// .unwrap();
    ///
    /// let mut machine = config.build_machine().unwrap();
    /// machine.insert_rotors(&["B", "Beta", "I", "II", "III"]).unwrap();
    /// machine.set_rotors("AAAA").unwrap();
    /// assert_eq!(machine.convert_message("AAAAA").unwrap(), "BDZGO");
    /// ```
    pub fn convert_message(&mut self, msg: &str) -> Result<String, EnigmaError> {
        let indices = msg
            .chars()
            .map(|c| {
                self.alphabet
                    .to_index(c)
                    .map_err(|_| EnigmaError::SymbolNotInAlphabet(c))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut out = String::with_capacity(msg.len());
        for index in indices {
            let converted = self.convert(index)?;
            out.push(self.alphabet.to_char(converted)?);
        }
        Ok(out)
    }
}
