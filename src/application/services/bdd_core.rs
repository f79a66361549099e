//! Entry point for test class resolution
//!
//! Validates that the module owning a class has a test framework before
//! handing out a [`TestClass`].

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::{ClassLocator, TestClass};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{ClassRef, QualifiedName, RootKind};
use crate::infrastructure::traits::{ClassTemplate, ModuleConfigProvider, SearchScope, SourceTree};

/// Factory for [`TestClass`] plus project-wide queries built on it.
pub struct BddCore {
    tree: Arc<dyn SourceTree>,
    template: Arc<dyn ClassTemplate>,
    modules: Arc<dyn ModuleConfigProvider>,
}

impl BddCore {
    pub fn new(
        tree: Arc<dyn SourceTree>,
        template: Arc<dyn ClassTemplate>,
        modules: Arc<dyn ModuleConfigProvider>,
    ) -> Self {
        Self {
            tree,
            template,
            modules,
        }
    }

    pub fn tree(&self) -> &Arc<dyn SourceTree> {
        &self.tree
    }

    /// Test class handle for `production`.
    ///
    /// # Errors
    /// `TestFrameworkNotConfigured` if the owning module has no test framework.
    pub fn create_test_class(&self, production: &ClassRef) -> ApplicationResult<TestClass> {
        debug!("create_test_class: {}", production.qualified_name());
        let strategy = self.modules.strategy_for(production).ok_or_else(|| {
            ApplicationError::TestFrameworkNotConfigured {
                class: production.qualified_name().to_string(),
                module: production.root().module.clone(),
            }
        })?;
        Ok(TestClass::new(
            production.clone(),
            strategy,
            self.tree.clone(),
            self.template.clone(),
        ))
    }

    /// Resolve a class from an indexed file path or a qualified name.
    pub fn resolve_class(&self, name_or_path: &str) -> ApplicationResult<ClassRef> {
        if let Some(class) = self.tree.class_at(Path::new(name_or_path)) {
            return Ok(class);
        }
        let name = QualifiedName::parse(name_or_path)
            .map_err(|_| ApplicationError::ClassNotFound(name_or_path.to_string()))?;
        self.tree
            .find_class(&name, SearchScope::Project)
            .ok_or_else(|| ApplicationError::ClassNotFound(name_or_path.to_string()))
    }

    /// Whether `class` is named like a test under its module's strategy.
    pub fn is_test_class(&self, class: &ClassRef) -> bool {
        self.modules
            .strategy_for(class)
            .map(|s| s.is_test_name(class.simple_name()))
            .unwrap_or(false)
    }

    /// Production class a test class was derived from, if it still exists.
    pub fn production_of(&self, test: &ClassRef) -> Option<ClassRef> {
        let strategy = self.modules.strategy_for(test)?;
        let production_name = strategy.production_name_for(test.simple_name())?;
        let name = test.qualified_name().sibling(production_name).ok()?;
        self.tree.find_class(&name, SearchScope::Project)
    }

    /// Production classes without a test class.
    ///
    /// Only classes in production roots of configured modules are considered;
    /// test-named classes are skipped.
    pub fn untested_classes(&self, module: Option<&str>) -> Vec<ClassRef> {
        let classes = self.tree.classes(SearchScope::Project);
        debug!("untested_classes: checking {} classes", classes.len());
        let locator = ClassLocator::new(self.tree.clone());
        classes
            .into_iter()
            .filter(|c| c.root().kind == RootKind::Production)
            .filter(|c| module.map(|m| c.root().module == m).unwrap_or(true))
            .filter_map(|c| {
                let strategy = self.modules.strategy_for(&c)?;
                if strategy.is_test_name(c.simple_name()) {
                    return None;
                }
                match locator.locate(&c, strategy.as_ref()) {
                    Some(_) => None,
                    None => Some(c),
                }
            })
            .collect()
    }

    /// Test-named classes whose production class no longer exists.
    pub fn orphaned_tests(&self) -> Vec<ClassRef> {
        self.tree
            .classes(SearchScope::Project)
            .into_iter()
            .filter(|c| self.is_test_class(c))
            .filter(|c| self.production_of(c).is_none())
            .collect()
    }
}
