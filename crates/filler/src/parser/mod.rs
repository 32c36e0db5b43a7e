//! Template parser.
//!
//! Turns template source into a tree of [`Node`]s. Only block tag structure
//! is checked here; `{{expr}}` substitutions and tag arguments stay as raw
//! text until rendering.

pub mod ast;
pub mod error;
mod markers;
mod template;

pub use ast::*;
pub use error::ParseError;
pub use markers::{DEFAULT_CLOSE, DEFAULT_OPEN, Markers};
pub use template::parse_template;

/// Parse a template using the default `{%` / `%}` markers.
///
/// # Example
///
/// ```
/// use filler::parser::{Tag, parse};
///
/// let tree = parse("Hi {% if name %}{{name}}{% endif %}!").unwrap();
/// assert_eq!(tree.leading_text, "Hi ");
/// assert_eq!(tree.children[0].tag, Tag::If);
/// assert_eq!(tree.children[0].trailing_text, "!");
/// ```
pub fn parse(template: &str) -> Result<Node, ParseError> {
    parse_template(template, &Markers::default())
}

/// Parse a template using custom block tag markers.
pub fn parse_with(template: &str, markers: &Markers) -> Result<Node, ParseError> {
    parse_template(template, markers)
}
