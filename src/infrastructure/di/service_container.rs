//! Service container for dependency injection
//!
//! Wires up the source tree, template and module registry behind a `BddCore`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::application::services::BddCore;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem, SourceTree};
use crate::infrastructure::{InfraError, InfraResult, ModuleRegistry, ProjectTree, SourceTemplate};

/// Container holding all application services for one project.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Canonical project directory
    pub project_dir: PathBuf,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Source roots and class index of the project
    pub tree: Arc<dyn SourceTree>,

    /// Test class factory
    pub core: BddCore,
}

impl ServiceContainer {
    /// Create a service container with real implementations.
    pub fn new(settings: Settings, project_dir: &Path) -> InfraResult<Self> {
        Self::with_deps(settings, project_dir, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        project_dir: &Path,
        fs: Arc<dyn FileSystem>,
    ) -> InfraResult<Self> {
        let project_dir = fs
            .canonicalize(project_dir)
            .map_err(|source| InfraError::InvalidProjectDir {
                path: project_dir.to_path_buf(),
                source,
            })?;
        if !fs.is_dir(&project_dir) {
            return Err(InfraError::InvalidProjectDir {
                path: project_dir,
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            });
        }
        debug!("ServiceContainer: project_dir={}", project_dir.display());

        let tree: Arc<dyn SourceTree> = Arc::new(ProjectTree::with_roots(
            fs.clone(),
            settings.extension.clone(),
            settings.source_roots(&project_dir),
        ));
        let template = Arc::new(
            settings
                .template
                .clone()
                .map(SourceTemplate::new)
                .unwrap_or_default(),
        );
        let modules = Arc::new(ModuleRegistry::from_settings(&settings));
        let core = BddCore::new(tree.clone(), template, modules);

        Ok(Self {
            settings: Arc::new(settings),
            project_dir,
            fs,
            tree,
            core,
        })
    }
}
