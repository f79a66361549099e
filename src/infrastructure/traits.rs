//! I/O boundary traits for testability
//!
//! These traits abstract the filesystem, the source tree and the other
//! collaborators the test-class services depend on.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ApplicationResult;
use crate::domain::{ClassRef, PackagePath, QualifiedName, RootKind, SourceRoot, TestNameStrategy};

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create a single directory; the parent must exist.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Canonicalize path (resolve symlinks, make absolute).
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

/// Where a class lookup searches.
#[derive(Debug, Clone, Copy)]
pub enum SearchScope<'a> {
    /// A single source root
    Root(&'a SourceRoot),
    /// Every source root of the project
    Project,
}

impl SearchScope<'_> {
    pub fn includes(&self, root: &SourceRoot) -> bool {
        match self {
            SearchScope::Root(r) => r.path == root.path,
            SearchScope::Project => true,
        }
    }
}

/// The project's source roots and the package hierarchy under each.
///
/// Implementations keep a qualified-name index that reflects every
/// mutation made through the trait. Mutations must be serialized by the caller.
pub trait SourceTree: Send + Sync {
    /// Registered roots, in registration order.
    fn roots(&self) -> Vec<SourceRoot>;

    /// Registered root with exactly this path.
    fn root_at(&self, path: &Path) -> Option<SourceRoot>;

    /// Register a root, creating its directory if needed.
    /// Returns the existing root if the path is already registered.
    fn add_root(&self, path: &Path, kind: RootKind, module: &str)
        -> ApplicationResult<SourceRoot>;

    /// Walk from `root` through the package segments, reusing existing
    /// directories and creating missing ones. Returns the leaf directory.
    fn resolve_or_create_directory(
        &self,
        root: &SourceRoot,
        package: &PackagePath,
    ) -> ApplicationResult<PathBuf>;

    /// First class with this qualified name within `scope`.
    fn find_class(&self, name: &QualifiedName, scope: SearchScope<'_>) -> Option<ClassRef>;

    /// All classes within `scope`, ordered by qualified name.
    fn classes(&self, scope: SearchScope<'_>) -> Vec<ClassRef>;

    /// Class stored in `file`, if indexed.
    fn class_at(&self, file: &Path) -> Option<ClassRef>;

    /// Create the file for class `simple_name` of `package` under `root`.
    ///
    /// The package directory must exist (see `resolve_or_create_directory`).
    /// The class keeps exactly this root and package, even when the
    /// directory also lies under a nested root.
    /// Fails with `CreationConflict` if that class already exists there.
    fn create_class(
        &self,
        root: &SourceRoot,
        package: &PackagePath,
        simple_name: &str,
        content: &str,
    ) -> ApplicationResult<ClassRef>;

    /// Delete a class file and drop it from the index.
    fn delete_class(&self, class: &ClassRef) -> ApplicationResult<()>;

    /// Rebuild the index from disk.
    fn refresh(&self) -> ApplicationResult<()>;

    fn class_exists(&self, name: &QualifiedName, scope: SearchScope<'_>) -> bool {
        self.find_class(name, scope).is_some()
    }
}

/// Renders the source text of a new test class.
pub trait ClassTemplate: Send + Sync {
    fn render(&self, package: &PackagePath, class_name: &str, production: &ClassRef) -> String;
}

/// Project/module configuration.
pub trait ModuleConfigProvider: Send + Sync {
    /// Naming strategy of the module owning `class`.
    /// `None` means the module has no test framework configured.
    fn strategy_for(&self, class: &ClassRef) -> Option<Arc<dyn TestNameStrategy>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }
}
