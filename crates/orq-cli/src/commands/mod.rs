//! CLI command implementations.

pub mod common;
pub mod compile;
pub mod reduce;
pub mod verify;
pub mod version;
