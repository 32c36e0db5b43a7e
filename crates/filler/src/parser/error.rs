//! Parse error types for templates.

use thiserror::Error;

use super::ast::Tag;
use crate::suggestions::hint;

/// A structural error in a template's tags.
///
/// Every variant that points at a tag carries the byte `offset` of that
/// tag's open marker, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A tag keyword that is not a known block.
    #[error("unknown template tag '{tag}'{}", hint(.suggestions))]
    UnknownTag {
        tag: String,
        suggestions: Vec<String>,
        offset: usize,
    },

    /// An `end` tag that does not match the innermost open block.
    #[error("template tag '{open}' closed with '{close}'")]
    MismatchedClose {
        open: Tag,
        close: String,
        offset: usize,
    },

    /// The template ended while a block was still open.
    #[error("template tag '{tag}' is not closed")]
    UnclosedTag { tag: Tag, offset: usize },

    /// An `elif` or `else` that does not follow an `if`.
    #[error("template tag '{tag}' without a preceding 'if'")]
    DanglingBranch { tag: Tag, offset: usize },

    /// An `end` tag with no open block to close.
    #[error("template tag '{tag}' closes nothing")]
    UnexpectedClose { tag: String, offset: usize },

    /// A tag with no keyword, such as `{% %}`.
    #[error("empty template tag")]
    EmptyTag { offset: usize },

    /// An open marker with no matching close marker.
    #[error("template tag is missing its close marker")]
    UnterminatedTag { offset: usize },

    /// Open or close marker is the empty string.
    #[error("template tag markers must not be empty")]
    InvalidMarkers,
}

impl ParseError {
    /// Byte offset of the offending tag in the template source.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnknownTag { offset, .. }
            | ParseError::MismatchedClose { offset, .. }
            | ParseError::UnclosedTag { offset, .. }
            | ParseError::DanglingBranch { offset, .. }
            | ParseError::UnexpectedClose { offset, .. }
            | ParseError::EmptyTag { offset }
            | ParseError::UnterminatedTag { offset } => *offset,
            ParseError::InvalidMarkers => 0,
        }
    }
}
