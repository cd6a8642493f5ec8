//! Type system utilities and aliases.
//!
//! - [`aliases`]: Type aliases for shared, lock-protected state.

pub mod aliases;

pub use aliases::*;
