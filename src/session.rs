//! Line-oriented driver: setting lines configure, message lines convert.

use tracing::debug;

use crate::config::MachineConfig;
use crate::error::EnigmaError;
use crate::machine::Machine;
use crate::settings::Settings;
use crate::utils::grouping::{group, GROUP_SIZE};

/// One machine processing a stream of setting and message lines.
///
/// A line containing `*` reconfigures the machine; every other line is a
/// message whose whitespace is dropped before conversion.
#[derive(Debug, Clone)]
pub struct Session {
    machine: Machine,
}

impl Session {
    /// Starts a session on a fresh machine built from `config`.
    ///
    /// # Errors
    /// Same as [`MachineConfig::build_machine`].
    pub fn new(config: &MachineConfig) -> Result<Self, EnigmaError> {
        Ok(Session {
            machine: config.build_machine()?,
        })
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Processes one input line.
    ///
    /// # Returns
    /// `None` for a setting line, otherwise the converted message in groups
    /// of five.
    ///
    /// # Errors
    /// - [`EnigmaError::NoRotorsInstalled`] for a message before any setting
    ///   line.
    /// - Any error from [`Settings::parse`], [`Settings::apply`] or
    ///   [`Machine::convert_message`].
    pub fn process_line(&mut self, line: &str) -> Result<Option<String>, EnigmaError> {
        if line.contains('*') {
            let settings = Settings::parse(line, self.machine.num_rotors())?;
            settings.apply(&mut self.machine)?;
            return Ok(None);
        }
        if self.machine.installed().is_empty() {
            return Err(EnigmaError::NoRotorsInstalled);
        }
        let msg: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        let converted = self.machine.convert_message(&msg)?;
        debug!(len = converted.chars().count(), "Message converted");
        Ok(Some(group(&converted, GROUP_SIZE)))
    }

    /// Processes every line of `input` and returns the output lines.
    ///
    /// Errors carry the 1-based input line in [`EnigmaError::Parse`] form
    /// only when the setting grammar itself is wrong; all other errors are
    /// returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma::{MachineConfig, Session};
    ///
    /// let config = MachineConfig::parse(
    ///     "ABCDEFGHIJKLMNOPQRSTUVWXYZ 5 3
    ///      I MQ   (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
    ///      II ME  (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
    ///      III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
    ///      Beta N (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
    ///      B R    (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)",
    /// )
    /// .unwrap();
    ///
    /// let mut session = Session::new(&config).unwrap();
    /// let out = session.process("* B Beta I II III AAAA\nHELLO WORLD").unwrap();
    /// assert_eq!(out, ["ILBDA AMTAZ"]);
    /// ```
    pub fn process(&mut self, input: &str) -> Result<Vec<String>, EnigmaError> {
        let mut out = Vec::new();
        for (i, line) in input.lines().enumerate() {
            let result = self.process_line(line).map_err(|err| match err {
                EnigmaError::Parse { message, .. } => EnigmaError::Parse {
                    line: i + 1,
                    message,
                },
                other => other,
            })?;
            out.extend(result);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONF: &str = "\
ABCDEFGHIJKLMNOPQRSTUVWXYZ
5 3
I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
III MV    (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
IV MJ     (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
          (RX) (SZ) (TV)
";

    fn session() -> Session {
        Session::new(&MachineConfig::parse(CONF).unwrap()).unwrap()
    }

    #[test]
    fn test_message_before_settings() {
        let mut s = session();
        assert_eq!(
            s.process_line("HELLO"),
            Err(EnigmaError::NoRotorsInstalled)
        );
    }

    #[test]
    fn test_setting_line_produces_no_output() {
        let mut s = session();
        assert_eq!(s.process_line("* B Beta III IV I AXLE (YF) (ZH)"), Ok(None));
        assert_eq!(s.machine().positions(), "AXLE");
    }

    #[test]
    fn test_message_is_grouped() {
        let mut s = session();
        s.process_line("* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)")
            .unwrap();
        assert_eq!(
            s.process_line("FROM HIS SHOULDER HIAWATHA"),
            Ok(Some("QVPQS OKOIL PUBKJ ZPISF XDW".to_string()))
        );
    }

    #[test]
    fn test_empty_message_line() {
        let mut s = session();
        s.process_line("* B Beta III IV I AXLE").unwrap();
        assert_eq!(s.process_line(""), Ok(Some(String::new())));
        assert_eq!(s.machine().positions(), "AXLE");
    }

    #[test]
    fn test_resetting_restarts_stream() {
        let mut s = session();
        let out = s
            .process(
                "* B Beta III IV I AXLE (YF) (ZH)\n\
                 HELLO WORLD\n\
                 * B Beta III IV I AXLE (YF) (ZH)\n\
                 HELLO WORLD",
            )
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], out[1]);
    }

    #[test]
    fn test_parse_error_reports_input_line() {
        let mut s = session();
        let err = s
            .process("* B Beta III IV I AXLE\nHELLO\n* B Beta")
            .unwrap_err();
        assert!(matches!(err, EnigmaError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_lowercase_rejected() {
        let mut s = session();
        s.process_line("* B Beta III IV I AXLE").unwrap();
        assert_eq!(
            s.process_line("hello"),
            Err(EnigmaError::SymbolNotInAlphabet('h'))
        );
    }
}
