//! Setting lines: rotor selection, positions, rings and plugboard.
//!
//! ```text
//! * B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)
//! * B Beta III IV I AXLE BBBB (YF) (ZH)
//! ```
//!
//! After the `*` come exactly `num_rotors` rotor names (reflector first),
//! the setting string, an optional ring-setting string and the plugboard
//! cycles.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::permutation::Permutation;

/// A parsed setting line, not yet checked against a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    rotors: Vec<String>,
    positions: String,
    rings: Option<String>,
    plugboard: String,
}

impl Settings {
    /// Parses `line` for a machine with `num_rotors` slots.
    ///
    /// # Errors
    /// Returns [`EnigmaError::Parse`] (line 1) if `line` does not start with
    /// `*` or is missing rotor names or the setting string.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::Settings;
    ///
    /// let s = Settings::parse("* B Beta III IV I AXLE BBBB (YF) (ZH)", 5).unwrap();
    /// assert_eq!(s.rotors(), ["B", "Beta", "III", "IV", "I"]);
    /// assert_eq!(s.positions(), "AXLE");
    /// assert_eq!(s.rings(), Some("BBBB"));
    /// assert_eq!(s.plugboard(), "(YF) (ZH)");
    /// ```
    pub fn parse(line: &str, num_rotors: usize) -> Result<Self, EnigmaError> {
        let bad = |message: String| EnigmaError::Parse { line: 1, message };

        let body = line
            .trim_start()
            .strip_prefix('*')
            .ok_or_else(|| bad(format!("setting line must start with '*': \"{}\"", line)))?;
        let mut words = body.split_whitespace().peekable();

        let rotors: Vec<String> = words.by_ref().take(num_rotors).map(String::from).collect();
        if rotors.len() < num_rotors {
            return Err(bad(format!(
                "expected {} rotor names, found {}",
                num_rotors,
                rotors.len()
            )));
        }
        let positions = words
            .next()
            .ok_or_else(|| bad("missing rotor setting".to_string()))?
            .to_string();
        let rings = words
            .next_if(|w| !w.starts_with('('))
            .map(String::from);
        let plugboard = words.collect::<Vec<_>>().join(" ");

        Ok(Settings {
            rotors,
            positions,
            rings,
            plugboard,
        })
    }

    pub fn rotors(&self) -> &[String] {
        &self.rotors
    }

    pub fn positions(&self) -> &str {
        &self.positions
    }

    pub fn rings(&self) -> Option<&str> {
        self.rings.as_deref()
    }

    /// Plugboard cycles; empty for a straight-through plugboard.
    pub fn plugboard(&self) -> &str {
        &self.plugboard
    }

    /// Configures `machine`: checks the rotor selection, then inserts the
    /// rotors, sets positions, rings (when given) and the plugboard, in that
    /// order. On error `machine` is left as it was.
    ///
    /// # Errors
    /// - [`EnigmaError::DuplicateRotor`] if a name is selected twice.
    /// - [`EnigmaError::MisplacedRotor`] unless slot 0 holds a reflector, no
    ///   other slot holds one, and no rotating rotor sits left of the pawls.
    /// - Any error from [`Machine::insert_rotors`], [`Machine::set_rotors`],
    ///   [`Machine::set_rings`] or the plugboard cycles.
    pub fn apply(&self, machine: &mut Machine) -> Result<(), EnigmaError> {
        let mut seen = HashSet::new();
        for name in &self.rotors {
            if !seen.insert(name.as_str()) {
                return Err(EnigmaError::DuplicateRotor(name.clone()));
            }
        }

        let mut staged = machine.clone();
        staged.insert_rotors(&self.rotors)?;
        Self::check_layout(&staged)?;
        staged.set_rotors(&self.positions)?;
        if let Some(rings) = &self.rings {
            staged.set_rings(rings)?;
        }
        let plugboard = Permutation::new(&self.plugboard, Arc::clone(staged.alphabet()))?;
        staged.set_plugboard(plugboard);
        debug!(positions = %staged.positions(), "Machine configured");
        *machine = staged;
        Ok(())
    }

    /// Slot 0 reflects, nothing else does, and only pawl slots rotate.
    fn check_layout(machine: &Machine) -> Result<(), EnigmaError> {
        let first_pawl = machine.num_rotors() - machine.num_pawls();
        for (slot, rotor) in machine.installed().iter().enumerate() {
            let reason = if slot == 0 && !rotor.reflects() {
                Some("slot 0 must hold a reflector")
            } else if slot > 0 && rotor.reflects() {
                Some("only slot 0 may hold a reflector")
            } else if slot < first_pawl && rotor.rotates() {
                Some("a rotating rotor needs a pawl")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(EnigmaError::MisplacedRotor {
                    name: rotor.name().to_string(),
                    slot,
                    reason,
                });
            }
        }
        Ok(())
    }
}
