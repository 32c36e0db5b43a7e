//! Public tree types for parsed templates.
//!
//! These types are public so tools can inspect a template's structure
//! without rendering it.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::iter::successors;

use serde::Serialize;

/// The kind of block a [`Node`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// A plain block: the implicit root, or an explicit `{% pass %}`.
    Pass,
    /// `{% if expr %}`
    If,
    /// `{% elif expr %}`, chained from an `if`.
    Elif,
    /// `{% else %}`, the final link of an `if` chain.
    Else,
    /// `{% for var in expr %}`
    For,
}

/// How a tag is executed. `elif` runs like `if`, `else` like `pass`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pass,
    If,
    For,
}

impl Tag {
    /// Every keyword that opens a block.
    pub const KEYWORDS: [&'static str; 5] = ["pass", "if", "elif", "else", "for"];

    /// Look up the tag opened by `keyword`. Matching is case-sensitive.
    pub fn from_keyword(keyword: &str) -> Option<Tag> {
        match keyword {
            "pass" => Some(Tag::Pass),
            "if" => Some(Tag::If),
            "elif" => Some(Tag::Elif),
            "else" => Some(Tag::Else),
            "for" => Some(Tag::For),
            _ => None,
        }
    }

    /// The keyword that opens this tag.
    pub fn keyword(self) -> &'static str {
        match self {
            Tag::Pass => "pass",
            Tag::If => "if",
            Tag::Elif => "elif",
            Tag::Else => "else",
            Tag::For => "for",
        }
    }

    /// The command that executes this tag.
    pub fn command(self) -> Command {
        match self {
            Tag::Pass | Tag::Else => Command::Pass,
            Tag::If | Tag::Elif => Command::If,
            Tag::For => Command::For,
        }
    }

    /// True for `elif` and `else`, which hang off an `if` instead of being
    /// closed on their own.
    pub fn is_branch(self) -> bool {
        matches!(self, Tag::Elif | Tag::Else)
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.keyword())
    }
}

/// One region of a parsed template.
///
/// A node owns the text right after its open tag, the nested blocks up to
/// its close tag, and the text following the close tag. Nodes are never
/// modified after parsing, so one tree can be rendered any number of times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub tag: Tag,
    /// Raw whitespace-separated tokens after the tag keyword.
    pub arguments: Vec<String>,
    /// Text after the open tag, up to the next tag. May contain `{{expr}}`.
    pub leading_text: String,
    /// Text between the close tag and the next tag.
    pub trailing_text: String,
    pub children: Vec<Node>,
    /// The `elif`/`else` alternative of an `if` or `elif`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub else_branch: Option<Box<Node>>,
    /// Byte offset of the open marker in the source, 0 for the root.
    pub offset: usize,
}

impl Node {
    /// The implicit top-level block.
    pub fn root(text: impl Into<String>) -> Node {
        Node::new(Tag::Pass, Vec::new(), text, 0)
    }

    /// A node with no children, branch or trailing text yet.
    pub fn new(
        tag: Tag,
        arguments: Vec<String>,
        leading_text: impl Into<String>,
        offset: usize,
    ) -> Node {
        Node {
            tag,
            arguments,
            leading_text: leading_text.into(),
            trailing_text: String::new(),
            children: Vec::new(),
            else_branch: None,
            offset,
        }
    }

    /// The arguments joined back into a single expression source.
    pub fn expression(&self) -> String {
        self.arguments.join(" ")
    }

    /// Append `branch` at the end of this node's `elif`/`else` chain.
    pub(crate) fn attach_branch(&mut self, branch: Node) {
        match &mut self.else_branch {
            Some(next) => next.attach_branch(branch),
            None => self.else_branch = Some(Box::new(branch)),
        }
    }

    /// Iterate over the `elif`/`else` chain hanging off this node.
    pub fn branches(&self) -> impl Iterator<Item = &Node> {
        successors(self.else_branch.as_deref(), |&node| node.else_branch.as_deref())
    }

    /// Number of tags in this subtree, counting branches but not the node itself.
    pub fn tag_count(&self) -> usize {
        self.children
            .iter()
            .chain(self.else_branch.as_deref())
            .map(|child| 1 + child.tag_count())
            .sum()
    }
}
