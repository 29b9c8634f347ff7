//! Institution-specific statement parsers.

pub mod fidelity;
