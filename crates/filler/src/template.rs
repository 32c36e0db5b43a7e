//! Parsed templates that can be rendered many times.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::expr::{Evaluator, StandardEvaluator};
use crate::interpreter::{LoadError, RenderError, execute_with};
use crate::parser::{Markers, Node, ParseError, parse_with};
use crate::types::Context;

/// A template parsed once and rendered against any number of contexts.
///
/// The tree is immutable, so one `Template` can be shared across threads,
/// each render using its own context.
///
/// # Example
///
/// ```
/// use filler::{Template, context};
///
/// let template = Template::parse("{% if n > 1 %}{{n}} items{% else %}one item{% endif %}").unwrap();
/// assert_eq!(template.render(&mut context! { "n" => 3 }).unwrap(), "3 items");
/// assert_eq!(template.render(&mut context! { "n" => 1 }).unwrap(), "one item");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    root: Node,
}

impl Template {
    /// Parse with the default `{%` / `%}` markers.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Self::parse_with(source, &Markers::default())
    }

    /// Parse with custom block tag markers.
    pub fn parse_with(source: &str, markers: &Markers) -> Result<Self, ParseError> {
        parse_with(source, markers).map(|root| Self { root })
    }

    /// Read and parse a template file with the default markers.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::from_file_with(path, &Markers::default())
    }

    /// Read and parse a template file with custom markers.
    pub fn from_file_with(path: impl AsRef<Path>, markers: &Markers) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = source.len(), "loaded template");
        Self::parse_with(&source, markers).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render with the built-in expression evaluator.
    pub fn render(&self, context: &mut Context) -> Result<String, RenderError> {
        self.render_with(context, &StandardEvaluator)
    }

    /// Render with a custom expression evaluator.
    pub fn render_with(
        &self,
        context: &mut Context,
        evaluator: &dyn Evaluator,
    ) -> Result<String, RenderError> {
        execute_with(&self.root, context, evaluator)
    }

    /// The root node of the parsed tree.
    pub fn root(&self) -> &Node {
        &self.root
    }
}

impl From<Node> for Template {
    fn from(root: Node) -> Self {
        Self { root }
    }
}
