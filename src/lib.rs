//! Rotor cipher machine simulator.
//!
//! Simulates an Enigma-style machine: a stack of substitution rotors, a
//! reflector and a plugboard, converting text symbol by symbol under a
//! reproducible stepping rule, including the middle-rotor double step.
//!
//! # Architecture
//!
//! ```text
//! Alphabet     (symbols <-> dense indices)
//!     ↓ shared via Arc
//! Permutation  (bijection from cycle notation, forward + inverse tables)
//!     ↓ owned by
//! Rotor        (catalog entry: name + kind + wiring)
//!     ↓ Arc handle, per-slot setting and ring
//! MountedRotor
//!     ↓ slot list + plugboard
//! Machine      (stepping + signal path)
//! ```
//!
//! [`MachineConfig`], [`Settings`] and [`Session`] parse the text formats
//! that describe a machine and drive it line by line.
//!
//! # Examples
//!
//! Encryption and decryption are the same operation from the same starting
//! state:
//!
//! ```
//! use enigma::{MachineConfig, Settings};
//!
//! let config = MachineConfig::parse(
//!     "ABCDEFGHIJKLMNOPQRSTUVWXYZ 5 3
//!      I MQ   (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//!      III MV (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
//!      IV MJ  (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
//!      Beta N (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//!      B R    (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP) (RX) (SZ) (TV)",
//! )
//! .unwrap();
//! let settings = Settings::parse("* B Beta III IV I AXLE (HQ) (EX) (IP) (TR) (BY)", 5).unwrap();
//!
//! let mut encoder = config.build_machine().unwrap();
//! settings.apply(&mut encoder).unwrap();
//! let cipher = encoder.convert_message("FROMHISSHOULDERHIAWATHA").unwrap();
//! assert_eq!(cipher, "QVPQSOKOILPUBKJZPISFXDW");
//!
//! let mut decoder = config.build_machine().unwrap();
//! settings.apply(&mut decoder).unwrap();
//! assert_eq!(decoder.convert_message(&cipher).unwrap(), "FROMHISSHOULDERHIAWATHA");
//! ```

#![deny(clippy::all)]

pub mod alphabet;
pub mod config;
pub mod error;
pub mod machine;
pub mod permutation;
pub mod rotor;
pub mod session;
pub mod settings;
pub mod utils;

pub use alphabet::Alphabet;
pub use config::MachineConfig;
pub use error::EnigmaError;
pub use machine::Machine;
pub use permutation::Permutation;
pub use rotor::{MountedRotor, Rotor, RotorCatalog, RotorKind};
pub use session::Session;
pub use settings::Settings;
