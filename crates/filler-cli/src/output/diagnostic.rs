//! Miette diagnostic wrapper for template errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use filler::{Markers, ParseError, RenderError, Tag};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic pointing at the offending template tag.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(filler::template))]
pub struct FillerDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl FillerDiagnostic {
    /// Create a diagnostic from a structure error with source context.
    pub fn from_parse_error(
        path: &Path,
        content: &str,
        markers: &Markers,
        err: &ParseError,
    ) -> Self {
        let help = match err {
            ParseError::UnknownTag { suggestions, .. } if suggestions.is_empty() => Some(format!(
                "known tags are: {}",
                Tag::KEYWORDS.join(", ")
            )),
            ParseError::UnclosedTag { tag, .. } => Some(format!(
                "close it with '{} end{} {}'",
                markers.open, tag, markers.close
            )),
            ParseError::MismatchedClose { open, .. } => Some(format!(
                "the innermost open tag is '{open}', close it with 'end{open}' first"
            )),
            ParseError::DanglingBranch { .. } => {
                Some("'elif' and 'else' must directly follow an 'if' block".into())
            }
            ParseError::UnterminatedTag { .. } => {
                Some(format!("add the close marker '{}'", markers.close))
            }
            _ => None,
        };
        Self::at(path, content, markers, err.offset(), err.to_string(), help)
    }

    /// Create a diagnostic from a render error that points at a tag.
    ///
    /// Returns `None` when the error carries no location.
    pub fn from_render_error(
        path: &Path,
        content: &str,
        markers: &Markers,
        err: &RenderError,
    ) -> Option<Self> {
        let offset = err.offset()?;
        let help = Some("write it as 'for <name> in <expression>'".to_string());
        Some(Self::at(path, content, markers, offset, err.to_string(), help))
    }

    fn at(
        path: &Path,
        content: &str,
        markers: &Markers,
        offset: usize,
        message: String,
        help: Option<String>,
    ) -> Self {
        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());
        let length = content[offset..]
            .find(markers.close.as_str())
            .map_or(markers.open.len(), |end| end + markers.close.len());
        let length = length.min(content.len() - offset);

        FillerDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, length).into(),
            message,
            help,
        }
    }
}
