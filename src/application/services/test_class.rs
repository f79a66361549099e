//! Test class of a production class
//!
//! Every query re-resolves against the source tree: the tree may change
//! between calls (classes created or deleted), and callers rely on seeing that.

use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::application::services::ClassLocator;
use crate::application::ApplicationResult;
use crate::domain::{ClassRef, QualifiedName, SourceRoot, TestNameStrategy};
use crate::infrastructure::traits::{ClassTemplate, SourceTree};

/// The (possibly not yet existing) test class of a production class.
///
/// Obtained from [`BddCore::create_test_class`](crate::application::services::BddCore::create_test_class).
pub struct TestClass {
    production: ClassRef,
    strategy: Arc<dyn TestNameStrategy>,
    locator: ClassLocator,
    tree: Arc<dyn SourceTree>,
    template: Arc<dyn ClassTemplate>,
    last_created: Option<ClassRef>,
}

impl TestClass {
    pub(crate) fn new(
        production: ClassRef,
        strategy: Arc<dyn TestNameStrategy>,
        tree: Arc<dyn SourceTree>,
        template: Arc<dyn ClassTemplate>,
    ) -> Self {
        Self {
            production,
            strategy,
            locator: ClassLocator::new(tree.clone()),
            tree,
            template,
            last_created: None,
        }
    }

    pub fn production(&self) -> &ClassRef {
        &self.production
    }

    /// Simple name the test class has under the module's strategy.
    pub fn test_name(&self) -> String {
        self.strategy.test_name_for(self.production.simple_name())
    }

    /// Qualified name the test class has: same package as the production class.
    pub fn expected_name(&self) -> ApplicationResult<QualifiedName> {
        ClassLocator::expected_name(&self.production, self.strategy.as_ref())
    }

    /// Whether a class with the expected name exists anywhere in the project.
    pub fn really_exists(&self) -> bool {
        self.backing_element().is_some()
    }

    /// The existing test class, if any.
    pub fn backing_element(&self) -> Option<ClassRef> {
        self.locator.locate(&self.production, self.strategy.as_ref())
    }

    /// Class created by the last successful [`create`](Self::create) call.
    pub fn last_created(&self) -> Option<&ClassRef> {
        self.last_created.as_ref()
    }

    /// Create the test class.
    ///
    /// Lands in `test_root` if given, else beside the production class in its
    /// own root. The package is always the production class's package;
    /// missing package directories are created, existing ones reused.
    ///
    /// # Errors
    /// * `CreationConflict` if the destination already holds the class
    /// * source tree failures, unchanged
    ///
    /// Callers should check [`really_exists`](Self::really_exists) first;
    /// nothing is ever overwritten.
    pub fn create(&mut self, test_root: Option<&SourceRoot>) -> ApplicationResult<ClassRef> {
        let root = test_root.unwrap_or_else(|| self.production.root());
        let package = self.production.package();
        debug!(
            "create: production={}, root={}, explicit_root={}",
            self.production.qualified_name(),
            root.path.display(),
            test_root.is_some()
        );

        let directory = self.tree.resolve_or_create_directory(root, package)?;
        trace!("create: destination {}", directory.display());
        let test_name = self.test_name();
        let content = self.template.render(package, &test_name, &self.production);
        let created = self
            .tree
            .create_class(root, package, &test_name, &content)?;

        info!(
            "Test class {} created for {}",
            created.qualified_name(),
            self.production.qualified_name()
        );
        self.last_created = Some(created.clone());
        Ok(created)
    }
}

impl std::fmt::Debug for TestClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestClass")
            .field("production", &self.production)
            .field("strategy", &self.strategy)
            .field("last_created", &self.last_created)
            .finish_non_exhaustive()
    }
}
