//! gentest: find and create the test class of a production class
//!
//! Architecture:
//! - `domain`: names, roots, class references and naming strategies
//! - `application`: test class resolution and creation (`BddCore`, `TestClass`)
//! - `infrastructure`: filesystem, source tree index, templates, DI
//! - `cli`: command-line interface

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
