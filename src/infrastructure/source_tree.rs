//! Disk-backed source tree with a qualified-name index
//!
//! Packages are derived from where a file sits under its root:
//! `<root>/com/example/Doo.java` is `com.example.Doo`. The index is built by
//! scanning the roots and kept current by every create/delete made through
//! the tree. Changes made behind its back need `refresh()`.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{ClassRef, PackagePath, QualifiedName, RootKind, SourceRoot};
use crate::infrastructure::traits::{FileSystem, SearchScope, SourceTree};

#[derive(Debug, Default)]
struct TreeState {
    roots: Vec<SourceRoot>,
    index: BTreeMap<QualifiedName, Vec<ClassRef>>,
}

impl TreeState {
    fn position(&self, root: &SourceRoot) -> usize {
        self.roots
            .iter()
            .position(|r| r.path == root.path)
            .unwrap_or(usize::MAX)
    }

    fn insert(&mut self, class: ClassRef) {
        self.index
            .entry(class.qualified_name().clone())
            .or_default()
            .push(class);
    }
}

/// Source tree over real directories.
pub struct ProjectTree {
    fs: Arc<dyn FileSystem>,
    extension: String,
    state: RwLock<TreeState>,
}

impl ProjectTree {
    /// Create an empty tree for class files with the given extension (`java`).
    pub fn new(fs: Arc<dyn FileSystem>, extension: impl Into<String>) -> Self {
        Self {
            fs,
            extension: extension.into(),
            state: RwLock::new(TreeState::default()),
        }
    }

    /// Create a tree over `roots` and index them.
    ///
    /// Roots that do not exist yet are registered anyway; their directory
    /// is created the first time something is placed in them.
    pub fn with_roots(
        fs: Arc<dyn FileSystem>,
        extension: impl Into<String>,
        roots: Vec<SourceRoot>,
    ) -> Self {
        let tree = Self::new(fs, extension);
        {
            let mut state = tree.write();
            for root in roots {
                if state.roots.iter().any(|r| r.path == root.path) {
                    debug!("with_roots: duplicate root {}", root.path.display());
                    continue;
                }
                state.roots.push(root);
            }
            tree.reindex(&mut state);
        }
        tree
    }

    fn read(&self) -> RwLockReadGuard<'_, TreeState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TreeState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn file_name(&self, simple_name: &str) -> String {
        format!("{}.{}", simple_name, self.extension)
    }

    fn reindex(&self, state: &mut TreeState) {
        state.index.clear();
        let roots = state.roots.clone();
        for root in &roots {
            let nested: Vec<&Path> = roots
                .iter()
                .filter(|r| r.path != root.path && r.path.starts_with(&root.path))
                .map(|r| r.path.as_path())
                .collect();
            for class in self.scan_root(root, &nested) {
                state.insert(class);
            }
        }
        debug!(
            "reindex: {} roots, {} class names",
            state.roots.len(),
            state.index.len()
        );
    }

    /// Collect class files under `root`, skipping roots nested inside it.
    fn scan_root(&self, root: &SourceRoot, nested: &[&Path]) -> Vec<ClassRef> {
        if !self.fs.is_dir(&root.path) {
            debug!("scan_root: {} does not exist yet", root.path.display());
            return Vec::new();
        }

        let mut classes = Vec::new();
        let walker = WalkDir::new(&root.path)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !nested.contains(&e.path()));

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().map(|ext| ext != self.extension.as_str()).unwrap_or(true) {
                continue;
            }
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            let rel_dir = path
                .parent()
                .and_then(|p| p.strip_prefix(&root.path).ok())
                .unwrap_or(Path::new(""));

            let name = PackagePath::from_relative_dir(rel_dir)
                .and_then(|package| QualifiedName::new(package, stem));
            match name {
                Ok(name) => classes.push(ClassRef::new(name, root.clone(), path)),
                Err(e) => trace!("scan_root: skipping {}: {}", path.display(), e),
            }
        }
        debug!(
            "scan_root: {} classes in {}",
            classes.len(),
            root.path.display()
        );
        classes
    }
}

impl SourceTree for ProjectTree {
    fn roots(&self) -> Vec<SourceRoot> {
        self.read().roots.clone()
    }

    fn root_at(&self, path: &Path) -> Option<SourceRoot> {
        self.read().roots.iter().find(|r| r.path == path).cloned()
    }

    fn add_root(
        &self,
        path: &Path,
        kind: RootKind,
        module: &str,
    ) -> ApplicationResult<SourceRoot> {
        debug!("add_root: path={}, kind={}", path.display(), kind);
        self.fs
            .create_dir_all(path)
            .with_path_context("create source root", path)?;
        let path = self
            .fs
            .canonicalize(path)
            .with_path_context("canonicalize source root", path)?;

        let mut state = self.write();
        if let Some(existing) = state.roots.iter().find(|r| r.path == path) {
            debug!("add_root: already registered {}", path.display());
            return Ok(existing.clone());
        }

        let root = SourceRoot::new(path, kind, module);
        state.roots.push(root.clone());
        self.reindex(&mut state);
        info!("Registered {} root {}", root.kind, root.path.display());
        Ok(root)
    }

    fn resolve_or_create_directory(
        &self,
        root: &SourceRoot,
        package: &PackagePath,
    ) -> ApplicationResult<PathBuf> {
        debug!(
            "resolve_or_create_directory: root={}, package='{}'",
            root.path.display(),
            package
        );
        if self.root_at(&root.path).is_none() {
            return Err(ApplicationError::DirectoryOutsideRoots(root.path.clone()));
        }

        let mut dir = root.path.clone();
        if !self.fs.is_dir(&dir) {
            self.fs
                .create_dir_all(&dir)
                .with_path_context("create source root", &dir)?;
        }

        let mut created = 0;
        for segment in package.segments() {
            dir.push(segment);
            if self.fs.is_dir(&dir) {
                trace!("reusing {}", dir.display());
                continue;
            }
            if self.fs.exists(&dir) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    "path exists and is not a directory",
                ))
                .with_path_context("create package directory", &dir);
            }
            self.fs
                .create_dir(&dir)
                .with_path_context("create package directory", &dir)?;
            created += 1;
        }
        debug!(
            "resolve_or_create_directory: {} ({} created)",
            dir.display(),
            created
        );
        Ok(dir)
    }

    fn find_class(&self, name: &QualifiedName, scope: SearchScope<'_>) -> Option<ClassRef> {
        let state = self.read();
        let candidates: Vec<&ClassRef> = state
            .index
            .get(name)
            .map(|classes| classes.iter().filter(|c| scope.includes(c.root())).collect())
            .unwrap_or_default();

        if candidates.len() > 1 {
            let files: Vec<String> = candidates
                .iter()
                .map(|c| c.file().display().to_string())
                .collect();
            warn!(
                "{} is defined {} times, using the first registered root: {}",
                name,
                candidates.len(),
                files.join(", ")
            );
        }

        candidates
            .into_iter()
            .min_by_key(|c| state.position(c.root()))
            .cloned()
    }

    fn classes(&self, scope: SearchScope<'_>) -> Vec<ClassRef> {
        let state = self.read();
        state
            .index
            .values()
            .flat_map(|classes| {
                let mut in_scope: Vec<&ClassRef> =
                    classes.iter().filter(|c| scope.includes(c.root())).collect();
                in_scope.sort_by_key(|c| state.position(c.root()));
                in_scope
            })
            .cloned()
            .collect()
    }

    fn class_at(&self, file: &Path) -> Option<ClassRef> {
        self.read()
            .index
            .values()
            .flatten()
            .find(|c| c.file() == file)
            .cloned()
    }

    fn create_class(
        &self,
        root: &SourceRoot,
        package: &PackagePath,
        simple_name: &str,
        content: &str,
    ) -> ApplicationResult<ClassRef> {
        debug!(
            "create_class: root={}, package='{}', name={}",
            root.path.display(),
            package,
            simple_name
        );
        let mut state = self.write();
        let root = state
            .roots
            .iter()
            .find(|r| r.path == root.path)
            .cloned()
            .ok_or_else(|| ApplicationError::DirectoryOutsideRoots(root.path.clone()))?;
        let name = QualifiedName::new(package.clone(), simple_name)?;
        let directory = root.package_dir(package);
        let file = directory.join(self.file_name(simple_name));

        let indexed_here = state
            .index
            .get(&name)
            .map(|classes| classes.iter().any(|c| c.file() == file))
            .unwrap_or(false);
        if indexed_here || self.fs.exists(&file) {
            return Err(ApplicationError::CreationConflict {
                name: name.to_string(),
                directory,
            });
        }

        self.fs
            .write(&file, content)
            .with_path_context("write class file", &file)?;

        let class = ClassRef::new(name, root, file);
        state.insert(class.clone());
        info!("Created {}", class);
        Ok(class)
    }

    fn delete_class(&self, class: &ClassRef) -> ApplicationResult<()> {
        debug!("delete_class: {}", class);
        let mut state = self.write();
        let removed = self.fs.remove_file(class.file());

        // a file already gone from disk is dropped from the index, then reported
        let gone = match &removed {
            Ok(()) => true,
            Err(e) => e.kind() == io::ErrorKind::NotFound,
        };
        if !gone {
            return removed.with_path_context("delete class file", class.file());
        }

        let now_empty = match state.index.get_mut(class.qualified_name()) {
            Some(classes) => {
                classes.retain(|c| c.file() != class.file());
                classes.is_empty()
            }
            None => false,
        };
        if now_empty {
            state.index.remove(class.qualified_name());
        }
        removed.with_path_context("delete class file", class.file())
    }

    fn refresh(&self) -> ApplicationResult<()> {
        debug!("refresh");
        let mut state = self.write();
        self.reindex(&mut state);
        Ok(())
    }
}
