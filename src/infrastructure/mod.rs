//! Infrastructure layer: I/O implementations and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod di;
pub mod error;
pub mod modules;
pub mod source_tree;
pub mod template;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use modules::ModuleRegistry;
pub use source_tree::ProjectTree;
pub use template::SourceTemplate;
