//! Test class lookup

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ApplicationResult;
use crate::domain::{ClassRef, QualifiedName, TestNameStrategy};
use crate::infrastructure::traits::{SearchScope, SourceTree};

/// Finds the test class of a production class anywhere in the project.
#[derive(Clone)]
pub struct ClassLocator {
    tree: Arc<dyn SourceTree>,
}

impl ClassLocator {
    pub fn new(tree: Arc<dyn SourceTree>) -> Self {
        Self { tree }
    }

    /// Qualified name the test class of `production` must have: same package,
    /// simple name from `strategy`.
    ///
    /// # Errors
    /// `Domain` if the strategy produces an invalid class name.
    pub fn expected_name(
        production: &ClassRef,
        strategy: &dyn TestNameStrategy,
    ) -> ApplicationResult<QualifiedName> {
        let test_name = strategy.test_name_for(production.simple_name());
        Ok(production.qualified_name().sibling(test_name)?)
    }

    /// Existing test class of `production`, searched across all roots.
    pub fn locate(
        &self,
        production: &ClassRef,
        strategy: &dyn TestNameStrategy,
    ) -> Option<ClassRef> {
        let expected = match Self::expected_name(production, strategy) {
            Ok(name) => name,
            Err(e) => {
                warn!("locate: {}", e);
                return None;
            }
        };
        let found = self.tree.find_class(&expected, SearchScope::Project);
        debug!(
            "locate: {} -> {} ({})",
            production.qualified_name(),
            expected,
            if found.is_some() { "found" } else { "absent" }
        );
        found
    }
}
