//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/gentest/gentest.toml`
//! 3. Project config: `<project_dir>/.gentest.toml`
//! 4. Environment variables: `GENTEST_*` prefix

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{
    expand_env_vars, NamingStyle, PrefixStrategy, RootKind, SourceRoot, SuffixStrategy,
    TestNameStrategy,
};

/// How test classes are named.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NamingConfig {
    /// Suffix (`FooTest`) or prefix (`TestFoo`)
    pub style: NamingStyle,
    /// Text added to the production class name
    pub affix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            style: NamingStyle::Suffix,
            affix: "Test".into(),
        }
    }
}

impl NamingConfig {
    pub fn strategy(&self) -> Arc<dyn TestNameStrategy> {
        match self.style {
            NamingStyle::Suffix => Arc::new(SuffixStrategy::new(self.affix.clone())),
            NamingStyle::Prefix => Arc::new(PrefixStrategy::new(self.affix.clone())),
        }
    }
}

/// A configured source root, relative to the project directory unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootConfig {
    pub path: PathBuf,
    pub kind: RootKind,
    #[serde(default = "default_module")]
    pub module: String,
}

fn default_module() -> String {
    "main".into()
}

/// Per-module test settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ModuleSettings {
    /// Test framework in use; unset means tests cannot be generated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_framework: Option<String>,
    /// Overrides the global naming
    #[serde(skip_serializing_if = "Option::is_none")]
    pub naming: Option<NamingConfig>,
}

impl ModuleSettings {
    /// Module using JUnit 4 with the global naming.
    pub fn junit() -> Self {
        Self {
            test_framework: Some("junit4".into()),
            naming: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub extension: Option<String>,
    pub naming: Option<NamingConfig>,
    pub template: Option<String>,
    pub roots: Option<Vec<RootConfig>>,
    pub modules: Option<BTreeMap<String, ModuleSettings>>,
}

/// Unified configuration for gentest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Class file extension without the dot (default: java)
    pub extension: String,
    /// Naming used by modules without their own
    pub naming: NamingConfig,
    /// Source template for new test classes (default: built-in)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Source roots, in lookup priority order
    pub roots: Vec<RootConfig>,
    /// Module name → module settings
    pub modules: BTreeMap<String, ModuleSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut modules = BTreeMap::new();
        modules.insert(default_module(), ModuleSettings::junit());

        Self {
            extension: "java".into(),
            naming: NamingConfig::default(),
            template: None,
            roots: vec![
                RootConfig {
                    path: PathBuf::from("src/main/java"),
                    kind: RootKind::Production,
                    module: default_module(),
                },
                RootConfig {
                    path: PathBuf::from("src/test/java"),
                    kind: RootKind::Test,
                    module: default_module(),
                },
            ],
            modules,
        }
    }
}

/// Get the XDG config directory for gentest.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gentest").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("gentest.toml"))
}

/// Get the path to the project config file.
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".gentest.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in root paths.
    fn expand_paths(&mut self) {
        for root in &mut self.roots {
            let expanded = expand_env_vars(root.path.to_string_lossy().as_ref());
            root.path = PathBuf::from(expanded);
        }
    }

    /// Apply global config onto defaults: everything specified REPLACES.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            extension: global
                .extension
                .clone()
                .unwrap_or_else(|| self.extension.clone()),
            naming: global.naming.clone().unwrap_or_else(|| self.naming.clone()),
            template: global.template.clone().or_else(|| self.template.clone()),
            roots: global.roots.clone().unwrap_or_else(|| self.roots.clone()),
            modules: global
                .modules
                .clone()
                .unwrap_or_else(|| self.modules.clone()),
        }
    }

    /// Merge project config onto self.
    ///
    /// - Scalars: overlay wins if specified
    /// - Roots: overlay REPLACES (roots are project layout, not additive)
    /// - Modules: merged per module name, overlay entry wins
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut modules = self.modules.clone();
        if let Some(overlay_modules) = &overlay.modules {
            for (name, module) in overlay_modules {
                modules.insert(name.clone(), module.clone());
            }
        }

        Self {
            extension: overlay
                .extension
                .clone()
                .unwrap_or_else(|| self.extension.clone()),
            naming: overlay
                .naming
                .clone()
                .unwrap_or_else(|| self.naming.clone()),
            template: overlay.template.clone().or_else(|| self.template.clone()),
            roots: overlay.roots.clone().unwrap_or_else(|| self.roots.clone()),
            modules,
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for `.gentest.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/gentest/gentest.toml` (REPLACES defaults)
    /// 3. Project config: `<project_dir>/.gentest.toml` (modules merge, rest replaces)
    /// 4. Environment variables: `GENTEST_*` prefix (explicit override)
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        // 3. Project config
        if let Some(project) = project_dir {
            let local_path = project_config_path(project);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply GENTEST_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("GENTEST")
                .separator("__")
                .list_separator(","),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("extension") {
            settings.extension = val;
        }
        if let Ok(val) = config.get_string("template") {
            settings.template = Some(val);
        }
        if let Ok(val) = config.get_string("naming.affix") {
            settings.naming.affix = val;
        }
        if let Ok(val) = config.get_string("naming.style") {
            settings.naming.style = parse_style(&val)?;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(ApplicationError::Config {
                message: format!("invalid extension '{}' (expected e.g. 'java')", self.extension),
            });
        }
        let namings = std::iter::once(&self.naming)
            .chain(self.modules.values().filter_map(|m| m.naming.as_ref()));
        for naming in namings {
            if naming.affix.is_empty() {
                return Err(ApplicationError::Config {
                    message: "naming affix must not be empty".into(),
                });
            }
        }
        Ok(())
    }

    /// Source roots resolved against the project directory.
    pub fn source_roots(&self, project_dir: &Path) -> Vec<SourceRoot> {
        self.roots
            .iter()
            .map(|r| SourceRoot::new(project_dir.join(&r.path), r.kind, r.module.clone()))
            .collect()
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# gentest configuration
#
# Locations (by precedence, lowest to highest):
#   Global:  ~/.config/gentest/gentest.toml  (replaces compiled defaults)
#   Project: <project>/.gentest.toml        (modules merge by name, the rest replaces)
#   Env:     GENTEST_* environment variables (e.g. GENTEST_NAMING__AFFIX=Spec)

# Class file extension
# extension = "java"

# Source of new test classes. Placeholders:
#   ${PACKAGE} ${PACKAGE_DECL} ${NAME} ${PRODUCTION} ${PRODUCTION_QUALIFIED}
# template = "${PACKAGE_DECL}public class ${NAME} {\n}\n"

[naming]
# "suffix" (FooTest) or "prefix" (TestFoo)
# style = "suffix"
# affix = "Test"

# Source roots, first registered wins when a class name is defined twice
# [[roots]]
# path = "src/main/java"
# kind = "production"
# module = "main"
#
# [[roots]]
# path = "src/test/java"
# kind = "test"
# module = "main"

# Modules without test_framework cannot get test classes
# [modules.main]
# test_framework = "junit4"
"#
        .to_string()
    }
}

fn parse_style(val: &str) -> Result<NamingStyle, ApplicationError> {
    match val.to_ascii_lowercase().as_str() {
        "suffix" => Ok(NamingStyle::Suffix),
        "prefix" => Ok(NamingStyle::Prefix),
        other => Err(ApplicationError::Config {
            message: format!("unknown naming style '{other}' (expected suffix or prefix)"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
