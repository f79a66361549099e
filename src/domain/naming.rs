//! Test-naming strategies
//!
//! A strategy maps a production class's simple name to the simple name its
//! test class should have, and back.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Invertible naming transform between production and test class names.
pub trait TestNameStrategy: Debug + Send + Sync {
    /// Expected test class name for a production class.
    fn test_name_for(&self, simple_name: &str) -> String;

    /// Whether `name` looks like a test class name under this strategy.
    fn is_test_name(&self, name: &str) -> bool;

    /// Production class name a test class name was derived from.
    fn production_name_for(&self, test_name: &str) -> Option<String>;
}

/// Where the affix goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingStyle {
    /// `Foo` -> `FooTest`
    #[default]
    Suffix,
    /// `Foo` -> `TestFoo`
    Prefix,
}

/// `Foo` -> `Foo<suffix>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixStrategy {
    suffix: String,
}

impl SuffixStrategy {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl Default for SuffixStrategy {
    fn default() -> Self {
        Self::new("Test")
    }
}

impl TestNameStrategy for SuffixStrategy {
    fn test_name_for(&self, simple_name: &str) -> String {
        format!("{}{}", simple_name, self.suffix)
    }

    fn is_test_name(&self, name: &str) -> bool {
        self.production_name_for(name).is_some()
    }

    fn production_name_for(&self, test_name: &str) -> Option<String> {
        test_name
            .strip_suffix(self.suffix.as_str())
            .filter(|base| !base.is_empty())
            .map(str::to_string)
    }
}

/// `Foo` -> `<prefix>Foo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixStrategy {
    prefix: String,
}

impl PrefixStrategy {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl TestNameStrategy for PrefixStrategy {
    fn test_name_for(&self, simple_name: &str) -> String {
        format!("{}{}", self.prefix, simple_name)
    }

    fn is_test_name(&self, name: &str) -> bool {
        self.production_name_for(name).is_some()
    }

    fn production_name_for(&self, test_name: &str) -> Option<String> {
        test_name
            .strip_prefix(self.prefix.as_str())
            .filter(|base| !base.is_empty())
            .map(str::to_string)
    }
}
