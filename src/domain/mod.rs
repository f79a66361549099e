//! Domain layer: entities and naming rules
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod naming;

pub use entities::*;
pub use error::DomainError;
pub use naming::{NamingStyle, PrefixStrategy, SuffixStrategy, TestNameStrategy};

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Falls back to the input if a variable cannot be resolved.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
