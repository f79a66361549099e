//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("no test framework configured for module '{module}' (class {class})")]
    TestFrameworkNotConfigured { class: String, module: String },

    #[error("class {name} already exists in {}", directory.display())]
    CreationConflict { name: String, directory: PathBuf },

    #[error("class not found: {0}")]
    ClassNotFound(String),

    #[error("directory is not under any source root: {0}")]
    DirectoryOutsideRoots(PathBuf),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
