//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, project_config_path, Settings};
use crate::domain::{ClassRef, RootKind};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::SearchScope;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(|e| InfraError::io("get current directory", e))?,
    };

    match &cli.command {
        Some(Commands::Completion { shell }) => {
            completion(*shell);
            Ok(())
        }
        Some(Commands::Config { command }) => config(command, &project_dir),
        Some(command) => {
            let container = build_container(&project_dir)?;
            match command {
                Commands::Locate { class } => locate(&container, class),
                Commands::Create { class, test_root } => {
                    create(&container, class, test_root.as_deref())
                }
                Commands::Roots => roots(&container),
                Commands::Missing { module } => missing(&container, module.as_deref()),
                Commands::Orphans => orphans(&container),
                Commands::Completion { .. } | Commands::Config { .. } => Ok(()),
            }
        }
        None => Cli::command()
            .print_help()
            .map_err(|e| InfraError::io("print help", e).into()),
    }
}

fn build_container(project_dir: &Path) -> CliResult<ServiceContainer> {
    let settings = Settings::load(Some(project_dir))?;
    Ok(ServiceContainer::new(settings, project_dir)?)
}

fn completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Path relative to the project for display.
fn display_path(container: &ServiceContainer, path: &Path) -> String {
    pathdiff::diff_paths(path, &container.project_dir)
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

/// Resolve a class argument: an existing file or a qualified name.
///
/// Relative file paths are taken relative to the project directory.
fn resolve_class(container: &ServiceContainer, class: &str) -> CliResult<ClassRef> {
    let as_path = container.project_dir.join(class);
    if container.fs.is_file(&as_path) {
        let canonical = container
            .fs
            .canonicalize(&as_path)
            .map_err(|e| InfraError::io(format!("canonicalize {}", class), e))?;
        debug!("resolve_class: file {}", canonical.display());
        return Ok(container
            .core
            .resolve_class(&canonical.to_string_lossy())?);
    }
    Ok(container.core.resolve_class(class)?)
}

#[instrument(skip(container))]
fn locate(container: &ServiceContainer, class: &str) -> CliResult<()> {
    let production = resolve_class(container, class)?;
    let test_class = container.core.create_test_class(&production)?;

    match test_class.backing_element() {
        Some(found) => {
            output::class(
                "Test class",
                found.qualified_name(),
                &display_path(container, found.file()),
            );
            Ok(())
        }
        None => Err(CliError::Absent(format!(
            "no test class {} for {}",
            test_class.expected_name()?,
            production.qualified_name()
        ))),
    }
}

#[instrument(skip(container))]
fn create(container: &ServiceContainer, class: &str, test_root: Option<&Path>) -> CliResult<()> {
    let production = resolve_class(container, class)?;
    let mut test_class = container.core.create_test_class(&production)?;

    if let Some(existing) = test_class.backing_element() {
        output::warning(&format!(
            "test class already exists: {} ({})",
            existing.qualified_name(),
            display_path(container, existing.file())
        ));
        return Ok(());
    }

    let root = match test_root {
        Some(dir) => {
            let dir: PathBuf = if dir.is_absolute() {
                dir.to_path_buf()
            } else {
                container.project_dir.join(dir)
            };
            if container.fs.exists(&dir) && !container.fs.is_dir(&dir) {
                return Err(CliError::InvalidArgs(format!(
                    "test root is not a directory: {}",
                    dir.display()
                )));
            }
            Some(
                container
                    .tree
                    .add_root(&dir, RootKind::Test, &production.root().module)?,
            )
        }
        None => None,
    };

    let created = test_class.create(root.as_ref())?;
    output::success(&format!("Created {}", created.qualified_name()));
    output::info(&format!("  {}", display_path(container, created.file())));
    Ok(())
}

fn roots(container: &ServiceContainer) -> CliResult<()> {
    output::header("Source roots");
    for root in container.tree.roots() {
        let count = container.tree.classes(SearchScope::Root(&root)).len();
        output::root(
            &display_path(container, &root.path),
            &root.kind,
            &root.module,
            count,
            !container.fs.is_dir(&root.path),
        );
    }
    Ok(())
}

fn missing(container: &ServiceContainer, module: Option<&str>) -> CliResult<()> {
    let untested = container.core.untested_classes(module);
    if untested.is_empty() {
        output::success("Every production class has a test class");
        return Ok(());
    }
    output::header(&format!("{} classes without a test class", untested.len()));
    for class in &untested {
        output::class_problem(class.qualified_name(), &display_path(container, class.file()));
    }
    Ok(())
}

fn orphans(container: &ServiceContainer) -> CliResult<()> {
    let orphaned = container.core.orphaned_tests();
    if orphaned.is_empty() {
        output::success("No orphaned test classes");
        return Ok(());
    }
    output::header(&format!("{} orphaned test classes", orphaned.len()));
    for class in &orphaned {
        output::class_problem(class.qualified_name(), &display_path(container, class.file()));
    }
    Ok(())
}

fn config(command: &ConfigCommands, project_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(Some(project_dir))?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(global) => {
                    output::location("Global", &global.display().to_string(), global.exists())
                }
                None => output::warning("no global config directory on this platform"),
            }
            let local = project_config_path(project_dir);
            output::location("Project", &local.display().to_string(), local.exists());
        }
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
