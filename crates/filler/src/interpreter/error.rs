//! Error types for rendering and loading templates.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::expr::ExprError;
use crate::parser::ParseError;

/// An error that occurred while executing a parsed template.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// A `for` tag whose arguments are not `<name> in <expression>`.
    #[error("malformed for tag '{arguments}': expected '<name> in <expression>'")]
    MalformedFor { arguments: String, offset: usize },

    /// The expression evaluator failed.
    #[error(transparent)]
    Expression(#[from] ExprError),
}

impl RenderError {
    /// Byte offset of the offending tag, when the error points at one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            RenderError::MalformedFor { offset, .. } => Some(*offset),
            RenderError::Expression(_) => None,
        }
    }
}

/// Any error from a one-shot parse and render.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<ExprError> for Error {
    fn from(error: ExprError) -> Self {
        Error::Render(RenderError::Expression(error))
    }
}

/// Errors that occur while loading a template file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the template.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but its tag structure is invalid.
    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}
