//! Module registry: which modules have a test framework and how they name tests

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::{ModuleSettings, NamingConfig, Settings};
use crate::domain::{ClassRef, TestNameStrategy};
use crate::infrastructure::traits::ModuleConfigProvider;

/// Configuration-backed module provider.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    default_naming: NamingConfig,
    modules: BTreeMap<String, ModuleSettings>,
}

impl ModuleRegistry {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            default_naming: settings.naming.clone(),
            modules: settings.modules.clone(),
        }
    }

    pub fn with_module(mut self, name: impl Into<String>, module: ModuleSettings) -> Self {
        self.modules.insert(name.into(), module);
        self
    }
}

impl ModuleConfigProvider for ModuleRegistry {
    fn strategy_for(&self, class: &ClassRef) -> Option<Arc<dyn TestNameStrategy>> {
        let module_name = &class.root().module;
        let Some(module) = self.modules.get(module_name) else {
            debug!("strategy_for: unknown module '{}'", module_name);
            return None;
        };
        let framework = module.test_framework.as_deref()?;
        debug!(
            "strategy_for: module '{}' uses {}",
            module_name, framework
        );
        let naming = module.naming.as_ref().unwrap_or(&self.default_naming);
        Some(naming.strategy())
    }
}
