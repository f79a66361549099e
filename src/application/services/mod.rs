//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (SourceTree, ClassTemplate, etc.)
//! but are themselves concrete structs, not traits.

mod bdd_core;
mod locator;
mod test_class;

pub use bdd_core::BddCore;
pub use locator::ClassLocator;
pub use test_class::TestClass;
