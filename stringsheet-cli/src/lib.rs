//! Shared command implementations for the stringsheet CLI.

pub mod export;
pub mod import;
pub mod validation;
