//! Block tag parser.
//!
//! Splits a template on its tag markers and assembles the tag tree with a
//! stack of still-open blocks. Handles:
//! - `if` / `elif` / `else` chains closed by a single `endif`
//! - `for` and `pass` blocks closed by `endfor` / `endpass`
//! - nesting to any depth

use tracing::{debug, trace};

use super::ast::{Node, Tag};
use super::error::ParseError;
use super::markers::Markers;
use crate::suggestions::compute_suggestions;

/// Parse a template into its tag tree using the given markers.
///
/// Text before the first tag becomes the root node's leading text. Text
/// after each tag belongs to that tag: leading text for an open tag,
/// trailing text of the closed block for an `end` tag.
pub fn parse_template(input: &str, markers: &Markers) -> Result<Node, ParseError> {
    markers.validate()?;

    let mut chunks = input.split(markers.open.as_str());
    let first = chunks.next().unwrap_or_default();
    let mut offset = first.len();
    let mut blocks = OpenBlocks::new(Node::root(first));

    for chunk in chunks {
        let tag_offset = offset;
        offset += markers.open.len() + chunk.len();

        let (line, text) = chunk
            .split_once(markers.close.as_str())
            .ok_or(ParseError::UnterminatedTag { offset: tag_offset })?;
        let mut words = line.split_whitespace();
        let command = words
            .next()
            .ok_or(ParseError::EmptyTag { offset: tag_offset })?;

        if let Some(closed) = command.strip_prefix("end") {
            trace!(command, offset = tag_offset, "close tag");
            blocks.close(command, closed, text, tag_offset)?;
        } else if let Some(tag) = Tag::from_keyword(command) {
            trace!(%tag, offset = tag_offset, "open tag");
            let arguments = words.map(ToString::to_string).collect();
            blocks.open(Node::new(tag, arguments, text, tag_offset))?;
        } else {
            return Err(ParseError::UnknownTag {
                tag: command.to_string(),
                suggestions: compute_suggestions(command, &Tag::KEYWORDS),
                offset: tag_offset,
            });
        }
    }

    let root = blocks.finish()?;
    debug!(tags = root.tag_count(), bytes = input.len(), "parsed template");
    Ok(root)
}

/// The root block plus the stack of blocks whose close tag is still pending.
struct OpenBlocks {
    root: Node,
    open: Vec<Node>,
}

impl OpenBlocks {
    fn new(root: Node) -> Self {
        Self {
            root,
            open: Vec::new(),
        }
    }

    /// The innermost open block, or the root.
    fn top_mut(&mut self) -> &mut Node {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    fn top_tag(&self) -> Tag {
        self.open.last().map_or(self.root.tag, |node| node.tag)
    }

    /// Pop the innermost open block. The root can never be popped.
    fn pop(&mut self, command: &str, offset: usize) -> Result<Node, ParseError> {
        self.open.pop().ok_or_else(|| ParseError::UnexpectedClose {
            tag: command.to_string(),
            offset,
        })
    }

    /// Handle `end<tag>`: close the innermost block and attach it to its parent.
    ///
    /// An open `elif`/`else` is closed together with the `if` that owns it.
    fn close(
        &mut self,
        command: &str,
        closed: &str,
        text: &str,
        offset: usize,
    ) -> Result<(), ParseError> {
        let mut last = self.pop(command, offset)?;
        if last.tag.is_branch() {
            let branch = last;
            last = self.pop(command, offset)?;
            last.attach_branch(branch);
        }
        last.trailing_text = text.to_string();

        if last.tag.keyword() != closed {
            return Err(ParseError::MismatchedClose {
                open: last.tag,
                close: command.to_string(),
                offset,
            });
        }

        self.top_mut().children.push(last);
        Ok(())
    }

    /// Handle an open tag. Branches link into the chain of the enclosing `if`.
    fn open(&mut self, node: Node) -> Result<(), ParseError> {
        if node.tag.is_branch() {
            // A finished `elif` is folded into its owner's chain before the next link.
            if self.top_tag() == Tag::Elif {
                let previous = self.pop(node.tag.keyword(), node.offset)?;
                self.top_mut().attach_branch(previous);
            }
            if self.top_tag() != Tag::If {
                return Err(ParseError::DanglingBranch {
                    tag: node.tag,
                    offset: node.offset,
                });
            }
        }
        self.open.push(node);
        Ok(())
    }

    /// Return the finished tree, failing if any block is still open.
    fn finish(mut self) -> Result<Node, ParseError> {
        match self.open.pop() {
            Some(unclosed) => Err(ParseError::UnclosedTag {
                tag: unclosed.tag,
                offset: unclosed.offset,
            }),
            None => Ok(self.root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Node, ParseError> {
        parse_template(input, &Markers::default())
    }

    #[test]
    fn test_offsets_point_at_open_marker() {
        let root = parse("ab{% if x %}c{% endif %}").unwrap();
        assert_eq!(root.children[0].offset, 2);
    }

    #[test]
    fn test_unclosed_offset() {
        let err = parse("abc{% for x in y %}").unwrap_err();
        assert_eq!(err.offset(), 3);
    }

    #[test]
    fn test_branch_chain_order() {
        let root = parse("{% if a %}1{% elif b %}2{% elif c %}3{% else %}4{% endif %}").unwrap();
        let chain: Vec<&str> = root.children[0]
            .branches()
            .map(|n| n.leading_text.as_str())
            .collect();
        assert_eq!(chain, vec!["2", "3", "4"]);
    }
}
