//! Domain entities: names, roots and class references

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Check whether `s` is a valid package segment or class name.
///
/// First char: letter, `_` or `$`; the rest may also contain digits.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

/// Ordered package segments. Empty means the default (unnamed) package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackagePath(Vec<String>);

impl PackagePath {
    /// The default package.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse dotted notation: `com.example` or `""` for the default package.
    pub fn parse(dotted: &str) -> Result<Self, DomainError> {
        let dotted = dotted.trim();
        if dotted.is_empty() {
            return Ok(Self::root());
        }
        Self::from_segments(dotted.split('.').map(str::to_string), dotted)
    }

    fn from_segments(
        segments: impl IntoIterator<Item = String>,
        input: &str,
    ) -> Result<Self, DomainError> {
        let segments: Vec<String> = segments.into_iter().collect();
        if let Some(bad) = segments.iter().find(|s| !is_identifier(s)) {
            return Err(DomainError::InvalidIdentifier {
                input: input.to_string(),
                segment: bad.clone(),
            });
        }
        Ok(Self(segments))
    }

    /// Build from a directory path relative to a source root.
    ///
    /// `com/example` -> `com.example`, empty path -> default package.
    pub fn from_relative_dir(dir: &Path) -> Result<Self, DomainError> {
        let segments = dir
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned());
        Self::from_segments(segments, &dir.to_string_lossy())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0.is_empty()
    }

    /// Relative directory for this package (`com/example`).
    pub fn to_relative_dir(&self) -> PathBuf {
        self.0.iter().collect()
    }
}

impl fmt::Display for PackagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Fully qualified class name: package plus simple name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    package: PackagePath,
    simple: String,
}

impl QualifiedName {
    pub fn new(package: PackagePath, simple: impl Into<String>) -> Result<Self, DomainError> {
        let simple = simple.into();
        if !is_identifier(&simple) {
            let shown = if package.is_default() {
                simple
            } else {
                format!("{package}.{simple}")
            };
            return Err(DomainError::InvalidQualifiedName(shown));
        }
        Ok(Self { package, simple })
    }

    /// Parse `com.example.Doo` or `Doo`.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        let (package, simple) = match s.rsplit_once('.') {
            Some((package, simple)) => (PackagePath::parse(package)?, simple),
            None => (PackagePath::root(), s),
        };
        if !is_identifier(simple) {
            return Err(DomainError::InvalidQualifiedName(s.to_string()));
        }
        Ok(Self {
            package,
            simple: simple.to_string(),
        })
    }

    pub fn package(&self) -> &PackagePath {
        &self.package
    }

    pub fn simple_name(&self) -> &str {
        &self.simple
    }

    /// Same package, different simple name.
    pub fn sibling(&self, simple: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(self.package.clone(), simple)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.package.is_default() {
            write!(f, "{}", self.simple)
        } else {
            write!(f, "{}.{}", self.package, self.simple)
        }
    }
}

/// Role of a source root. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootKind {
    Production,
    Test,
}

impl fmt::Display for RootKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootKind::Production => write!(f, "production"),
            RootKind::Test => write!(f, "test"),
        }
    }
}

/// Top-level directory of a package hierarchy, owned by one module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRoot {
    /// Absolute path; the identity of the root
    pub path: PathBuf,
    pub kind: RootKind,
    /// Name of the owning module
    pub module: String,
}

impl SourceRoot {
    pub fn new(path: impl Into<PathBuf>, kind: RootKind, module: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            module: module.into(),
        }
    }

    /// Directory a package maps to under this root (may not exist yet).
    pub fn package_dir(&self, package: &PackagePath) -> PathBuf {
        self.path.join(package.to_relative_dir())
    }
}

/// Reference to a class file known to the source tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassRef {
    name: QualifiedName,
    root: SourceRoot,
    file: PathBuf,
}

impl ClassRef {
    pub fn new(name: QualifiedName, root: SourceRoot, file: impl Into<PathBuf>) -> Self {
        Self {
            name,
            root,
            file: file.into(),
        }
    }

    pub fn qualified_name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn simple_name(&self) -> &str {
        self.name.simple_name()
    }

    pub fn package(&self) -> &PackagePath {
        self.name.package()
    }

    pub fn root(&self) -> &SourceRoot {
        &self.root
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Directory containing the class file.
    pub fn directory(&self) -> &Path {
        self.file.parent().unwrap_or(&self.root.path)
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.file.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_dotted_name_when_parsing_then_splits_package_and_simple_name() {
        let name = QualifiedName::parse("com.example.Doo").unwrap();
        assert_eq!(name.simple_name(), "Doo");
        assert_eq!(name.package().segments(), &["com", "example"]);
        assert_eq!(name.to_string(), "com.example.Doo");
    }

    #[test]
    fn given_name_without_dots_when_parsing_then_uses_default_package() {
        let name = QualifiedName::parse("B").unwrap();
        assert!(name.package().is_default());
        assert_eq!(name.to_string(), "B");
    }

    #[test]
    fn given_invalid_segments_when_parsing_then_fails() {
        assert!(QualifiedName::parse("com..Doo").is_err());
        assert!(QualifiedName::parse("com.example.").is_err());
        assert!(QualifiedName::parse("1com.Doo").is_err());
        assert!(PackagePath::parse("com.my-pkg").is_err());
    }

    #[test]
    fn given_relative_dir_when_converting_then_round_trips_package() {
        let package = PackagePath::from_relative_dir(Path::new("pe/gob/hndac")).unwrap();
        assert_eq!(package.to_string(), "pe.gob.hndac");
        assert_eq!(package.to_relative_dir(), PathBuf::from("pe/gob/hndac"));
        assert!(PackagePath::from_relative_dir(Path::new("")).unwrap().is_default());
    }

    #[test]
    fn given_default_package_when_computing_package_dir_then_returns_root() {
        let root = SourceRoot::new("/p/src", RootKind::Production, "main");
        assert_eq!(root.package_dir(&PackagePath::root()), PathBuf::from("/p/src"));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Doo"));
        assert!(is_identifier("_x$1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("9a"));
        assert!(!is_identifier("a-b"));
    }
}
