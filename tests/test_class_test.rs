//! Tests for TestClass: existence checks, backing element lookup and creation
//!
//! Mirrors how the test class of a production class is found and placed:
//! same package always, same root unless an explicit test root is given.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use walkdir::WalkDir;

use gentest::application::services::BddCore;
use gentest::application::ApplicationError;
use gentest::config::{ModuleSettings, NamingConfig};
use gentest::domain::{ClassRef, NamingStyle, QualifiedName, RootKind, SourceRoot};
use gentest::infrastructure::traits::{FileSystem, RealFileSystem, SourceTree};
use gentest::infrastructure::{ModuleRegistry, ProjectTree, SourceTemplate};
use gentest::util::testing::init_test_setup;

struct Project {
    _temp: TempDir,
    dir: PathBuf,
    tree: Arc<ProjectTree>,
    core: BddCore,
    src: SourceRoot,
}

impl Project {
    fn add_root(&self, name: &str, kind: RootKind) -> SourceRoot {
        self.tree
            .add_root(&self.dir.join(name), kind, "main")
            .expect("add root")
    }

    /// Create a production class file through the tree.
    fn create_class(&self, root: &SourceRoot, qualified: &str) -> ClassRef {
        let name = QualifiedName::parse(qualified).unwrap();
        self.tree
            .resolve_or_create_directory(root, name.package())
            .unwrap();
        let body = format!("public interface {} {{}}\n", name.simple_name());
        self.tree
            .create_class(root, name.package(), name.simple_name(), &body)
            .unwrap()
    }
}

/// Helper to set up a project with a single production root `src`
fn setup_project() -> Project {
    init_test_setup();
    let temp = TempDir::new().unwrap();
    let dir = temp.path().canonicalize().unwrap();

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let tree = Arc::new(ProjectTree::new(fs, "java"));
    let src = tree
        .add_root(&dir.join("src"), RootKind::Production, "main")
        .unwrap();

    let modules = ModuleRegistry::default().with_module("main", ModuleSettings::junit());
    let core = BddCore::new(
        tree.clone(),
        Arc::new(SourceTemplate::default()),
        Arc::new(modules),
    );

    Project {
        _temp: temp,
        dir,
        tree,
        core,
        src,
    }
}

fn count_dirs_named(root: &Path, name: &str) -> usize {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir() && e.file_name() == name)
        .count()
}

// ============================================================
// really_exists() / backing_element()
// ============================================================

#[test]
fn given_no_test_class_when_querying_then_really_exists_is_false() {
    // Arrange
    let project = setup_project();
    let sut = project.create_class(&project.src, "com.example.Foo");

    // Act
    let test_class = project.core.create_test_class(&sut).unwrap();

    // Assert
    assert!(!test_class.really_exists());
    assert!(test_class.backing_element().is_none());
}

#[test]
fn given_test_class_created_later_when_querying_then_same_handle_sees_it() {
    // Arrange
    let project = setup_project();
    let sut = project.create_class(&project.src, "com.example.Foo");
    let test_class = project.core.create_test_class(&sut).unwrap();
    assert!(!test_class.really_exists());

    // Act - create FooTest next to Foo, outside of the TestClass
    let created = project.create_class(&project.src, "com.example.FooTest");

    // Assert - re-resolved on every call
    assert!(test_class.really_exists());
    assert_eq!(test_class.backing_element(), Some(created.clone()));

    let fresh = project.core.create_test_class(&sut).unwrap();
    assert!(fresh.really_exists());
    assert_eq!(fresh.backing_element(), Some(created));
}

#[test]
fn given_test_class_in_other_root_when_querying_then_found() {
    // Arrange
    let project = setup_project();
    let test_root = project.add_root("test", RootKind::Test);
    let sut = project.create_class(&project.src, "com.example.Foo");

    // Act
    let created = project.create_class(&test_root, "com.example.FooTest");
    let test_class = project.core.create_test_class(&sut).unwrap();

    // Assert
    let backing = test_class.backing_element().expect("backing element");
    assert_eq!(backing, created);
    assert_eq!(backing.root(), &test_root);
}

#[test]
fn given_test_class_deleted_when_querying_then_no_longer_exists() {
    // Arrange
    let project = setup_project();
    let sut = project.create_class(&project.src, "com.example.Foo");
    let created = project.create_class(&project.src, "com.example.FooTest");
    let test_class = project.core.create_test_class(&sut).unwrap();
    assert!(test_class.really_exists());

    // Act
    project.tree.delete_class(&created).unwrap();

    // Assert
    assert!(!test_class.really_exists());
    assert!(test_class.backing_element().is_none());
    assert!(!created.file().exists());
}

#[test]
fn given_same_name_in_other_package_when_querying_then_not_found() {
    // Arrange
    let project = setup_project();
    let sut = project.create_class(&project.src, "com.example.Foo");
    project.create_class(&project.src, "com.other.FooTest");

    // Act
    let test_class = project.core.create_test_class(&sut).unwrap();

    // Assert
    assert!(!test_class.really_exists());
}

#[test]
fn given_default_package_class_when_querying_then_backing_element_follows_tree() {
    // Arrange
    let project = setup_project();
    let sut = project.create_class(&project.src, "Foo");
    let test_class = project.core.create_test_class(&sut).unwrap();
    assert!(test_class.backing_element().is_none());

    // Act
    let created = project.create_class(&project.src, "FooTest");

    // Assert
    assert_eq!(test_class.backing_element(), Some(created));
}

// ============================================================
// create()
// ============================================================

#[test]
fn given_no_test_root_when_creating_then_colocates_with_production_class() {
    // Arrange
    let project = setup_project();
    let sut = project.create_class(&project.src, "com.example.Doo");
    let mut test_class = project.core.create_test_class(&sut).unwrap();

    // Act
    let created = test_class.create(None).unwrap();

    // Assert
    assert_eq!(created.qualified_name().to_string(), "com.example.DooTest");
    assert_eq!(created.root(), sut.root());
    assert_eq!(created.directory(), sut.directory());
    let backing = test_class.backing_element().expect("backing after create");
    assert_eq!(backing, created);
    assert_eq!(test_class.last_created(), Some(&created));

    let content = std::fs::read_to_string(created.file()).unwrap();
    assert!(content.starts_with("package com.example;"));
    assert!(content.contains("public class DooTest"));
}

#[test]
fn given_test_root_when_creating_then_places_class_under_it() {
    // Arrange
    let project = setup_project();
    let sut = project.create_class(&project.src, "com.example.Yola");
    let test_root = project.add_root("test", RootKind::Test);
    let mut test_class = project.core.create_test_class(&sut).unwrap();

    // Act
    test_class.create(Some(&test_root)).unwrap();

    // Assert
    let backing = test_class.backing_element().expect("backing after create");
    assert_eq!(backing.root(), &test_root);
    assert_eq!(backing.package(), sut.package());
    assert_eq!(
        backing.file(),
        test_root.path.join("com/example/YolaTest.java").as_path()
    );
}

#[test]
fn given_existing_package_in_test_root_when_creating_then_reuses_directory() {
    // Arrange - mysrc/pe/gob/hndac/A.java and a pre-existing mytest/pe/gob/hndac
    let project = setup_project();
    let mysrc = project.add_root("mysrc", RootKind::Production);
    let sut = project.create_class(&mysrc, "pe.gob.hndac.A");

    let mytest = project.add_root("mytest", RootKind::Test);
    let existing_dir = mytest.path.join("pe/gob/hndac");
    std::fs::create_dir_all(&existing_dir).unwrap();
    std::fs::write(existing_dir.join("notes.txt"), "keep me").unwrap();

    let mut test_class = project.core.create_test_class(&sut).unwrap();

    // Act
    let created = test_class.create(Some(&mytest)).unwrap();

    // Assert
    assert_eq!(created.qualified_name().to_string(), "pe.gob.hndac.ATest");
    assert_eq!(created.root(), &mytest);
    assert_eq!(created.directory(), existing_dir.as_path());
    assert_eq!(
        std::fs::read_to_string(existing_dir.join("notes.txt")).unwrap(),
        "keep me"
    );
    assert_eq!(count_dirs_named(&mytest.path, "hndac"), 1);
}

#[test]
fn given_several_explicit_roots_when_creating_then_package_trees_are_not_duplicated() {
    // Arrange
    let project = setup_project();
    let root_a = project.add_root("test-a", RootKind::Test);
    let root_b = project.add_root("test-b", RootKind::Test);
    let one = project.create_class(&project.src, "com.example.One");
    let two = project.create_class(&project.src, "com.example.Two");
    let three = project.create_class(&project.src, "com.example.Three");

    // Act
    project.core.create_test_class(&one).unwrap().create(Some(&root_a)).unwrap();
    project.core.create_test_class(&two).unwrap().create(Some(&root_b)).unwrap();
    project.core.create_test_class(&three).unwrap().create(Some(&root_a)).unwrap();

    // Assert
    assert_eq!(count_dirs_named(&root_a.path, "example"), 1);
    assert_eq!(count_dirs_named(&root_b.path, "example"), 1);
    assert_eq!(count_dirs_named(&project.src.path, "example"), 1);
    assert!(root_a.path.join("com/example/OneTest.java").is_file());
    assert!(root_a.path.join("com/example/ThreeTest.java").is_file());
    assert!(root_b.path.join("com/example/TwoTest.java").is_file());
}

#[test]
fn given_nested_root_inside_test_root_when_creating_then_keeps_explicit_root_and_package() {
    // Arrange - test/gen is a root of its own, nested inside test
    let project = setup_project();
    let mysrc = project.add_root("mysrc", RootKind::Production);
    let test_root = project.add_root("test", RootKind::Test);
    let nested = project.add_root("test/gen", RootKind::Test);
    let sut = project.create_class(&mysrc, "gen.Foo");
    let mut test_class = project.core.create_test_class(&sut).unwrap();

    // Act
    let created = test_class.create(Some(&test_root)).unwrap();

    // Assert
    assert_eq!(created.qualified_name().to_string(), "gen.FooTest");
    assert_eq!(created.root(), &test_root);
    assert_ne!(created.root(), &nested);
    assert_eq!(created.file(), test_root.path.join("gen/FooTest.java").as_path());
    assert!(test_class.really_exists());
    assert_eq!(test_class.backing_element(), Some(created));
}

#[test]
fn given_default_package_class_when_creating_then_test_stays_in_default_package() {
    // Arrange
    let project = setup_project();
    let sut = project.create_class(&project.src, "B");
    let mut test_class = project.core.create_test_class(&sut).unwrap();

    // Act - beside B
    let created = test_class.create(None).unwrap();

    // Assert
    assert_eq!(created.qualified_name().to_string(), "BTest");
    assert!(created.package().is_default());
    assert_eq!(created.directory(), project.src.path.as_path());
    let content = std::fs::read_to_string(created.file()).unwrap();
    assert!(!content.contains("package"));

    // Act - delete and recreate under an explicit test root
    project.tree.delete_class(&created).unwrap();
    let test_root = project.add_root("test", RootKind::Test);
    let mut test_class = project.core.create_test_class(&sut).unwrap();
    assert!(!test_class.really_exists());
    let moved = test_class.create(Some(&test_root)).unwrap();

    // Assert
    assert_eq!(moved.qualified_name().to_string(), "BTest");
    assert!(moved.package().is_default());
    assert_eq!(moved.root(), &test_root);
    assert_eq!(moved.file(), test_root.path.join("BTest.java").as_path());
    assert_eq!(test_class.backing_element(), Some(moved));
}

#[test]
fn given_file_already_on_disk_when_creating_then_conflict_and_file_untouched() {
    // Arrange - DooTest.java written behind the tree's back
    let project = setup_project();
    let sut = project.create_class(&project.src, "com.example.Doo");
    let existing = sut.directory().join("DooTest.java");
    std::fs::write(&existing, "// hand written").unwrap();
    let mut test_class = project.core.create_test_class(&sut).unwrap();

    // Act
    let result = test_class.create(None);

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::CreationConflict { .. })
    ));
    assert_eq!(
        std::fs::read_to_string(&existing).unwrap(),
        "// hand written"
    );
    assert!(test_class.last_created().is_none());
}

#[test]
fn given_created_test_class_when_creating_again_then_conflict() {
    // Arrange
    let project = setup_project();
    let sut = project.create_class(&project.src, "com.example.Doo");
    let mut test_class = project.core.create_test_class(&sut).unwrap();
    test_class.create(None).unwrap();

    // Act
    let err = test_class.create(None).unwrap_err();

    // Assert
    match err {
        ApplicationError::CreationConflict { name, directory } => {
            assert_eq!(name, "com.example.DooTest");
            assert_eq!(directory, sut.directory());
        }
        other => panic!("expected CreationConflict, got {other:?}"),
    }
}

#[test]
fn given_module_without_framework_when_creating_test_class_then_not_configured() {
    // Arrange
    let project = setup_project();
    let legacy = project
        .tree
        .add_root(&project.dir.join("legacy"), RootKind::Production, "legacy")
        .unwrap();
    let sut = project.create_class(&legacy, "old.Thing");

    // Act
    let result = project.core.create_test_class(&sut);

    // Assert
    match result {
        Err(ApplicationError::TestFrameworkNotConfigured { class, module }) => {
            assert_eq!(class, "old.Thing");
            assert_eq!(module, "legacy");
        }
        other => panic!("expected TestFrameworkNotConfigured, got {other:?}"),
    }
}

#[test]
fn given_prefix_naming_when_creating_then_uses_prefix() {
    // Arrange
    let project = setup_project();
    let modules = ModuleRegistry::default().with_module(
        "main",
        ModuleSettings {
            test_framework: Some("testng".into()),
            naming: Some(NamingConfig {
                style: NamingStyle::Prefix,
                affix: "Test".into(),
            }),
        },
    );
    let core = BddCore::new(
        project.tree.clone(),
        Arc::new(SourceTemplate::default()),
        Arc::new(modules),
    );
    let sut = project.create_class(&project.src, "com.example.Doo");
    let mut test_class = core.create_test_class(&sut).unwrap();

    // Act
    let created = test_class.create(None).unwrap();

    // Assert
    assert_eq!(created.qualified_name().to_string(), "com.example.TestDoo");
    assert_eq!(
        test_class.expected_name().unwrap().to_string(),
        "com.example.TestDoo"
    );
}
