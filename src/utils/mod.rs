//! Helpers shared by the session driver and the binary.

pub mod grouping;
