//! Shelf application library
//!
//! Application modules and the command-line surface of the `shelf` binary.

pub mod cli;
pub mod modules;

/// Re-export commonly used types
pub use modules::*;
