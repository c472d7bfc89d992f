use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::parser::Location;

/// Main error type for advent operations
#[derive(Error, Diagnostic, Debug)]
pub enum AdventError {
    #[error("IO error with {path}: {source}")]
    #[diagnostic(code(advent::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Grammar error in {path} at {location}: {message}")]
    #[diagnostic(code(advent::grammar))]
    Grammar {
        path: PathBuf,
        location: Location,
        message: String,
    },

    #[error("Schema error in {path}: {message}")]
    #[diagnostic(code(advent::schema))]
    Schema {
        path: PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to load {key}={target} referenced from {path}")]
    #[diagnostic(code(advent::reference))]
    Reference {
        path: PathBuf,
        key: String,
        target: PathBuf,
        #[source]
        source: Box<AdventError>,
    },

    #[error("Range error in {path}: {message}")]
    #[diagnostic(code(advent::range))]
    Range { path: PathBuf, message: String },

    #[error("Render error: {message}")]
    #[diagnostic(code(advent::render))]
    Render { message: String },

    #[error("Invalid config {path}: {message}")]
    #[diagnostic(code(advent::config), help("Check advent.yaml syntax"))]
    Config { path: PathBuf, message: String },
}

impl AdventError {
    pub(crate) fn schema(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
            help: None,
        }
    }

    pub(crate) fn range(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Range {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The innermost error behind any chain of failed references.
    pub fn root_cause(&self) -> &AdventError {
        let mut err = self;
        while let AdventError::Reference { source, .. } = err {
            err = source;
        }
        err
    }
}

pub type Result<T> = std::result::Result<T, AdventError>;
