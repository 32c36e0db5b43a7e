//! Template execution.
//!
//! Walks a parsed tree against a mutable context. Each node is dispatched
//! on its command, then its trailing text is filled and appended, so text
//! after a closing tag sees whatever state the block left behind.

use tracing::{debug, trace};

use super::context::LoopFrame;
use super::error::{Error, RenderError};
use crate::expr::{Evaluator, ExprError, StandardEvaluator};
use crate::parser::{Command, Node, parse};
use crate::types::{Context, Value};

/// Marker opening an inline substitution.
pub const FILL_OPEN: &str = "{{";

/// Marker closing an inline substitution.
pub const FILL_CLOSE: &str = "}}";

/// Substitute every `{{expr}}` in `text` using the built-in evaluator.
///
/// # Example
///
/// ```
/// use filler::{context, fill};
///
/// let context = context! { "a" => "alpha", "d" => vec![5, 4, 3] };
/// assert_eq!(fill("{{a}} {{d[1]*2+1.5}}", &context).unwrap(), "alpha 9.5");
/// ```
pub fn fill(text: &str, context: &Context) -> Result<String, ExprError> {
    fill_with(text, context, &StandardEvaluator)
}

/// Substitute every `{{expr}}` in `text` using `evaluator`.
///
/// An unterminated `{{` takes the rest of the text as its expression.
pub fn fill_with(
    text: &str,
    context: &Context,
    evaluator: &dyn Evaluator,
) -> Result<String, ExprError> {
    let mut segments = text.split(FILL_OPEN);
    let mut result = segments.next().unwrap_or_default().to_string();
    for segment in segments {
        let (source, literal) = segment.split_once(FILL_CLOSE).unwrap_or((segment, ""));
        let value = evaluator.evaluate(source, context)?;
        result.push_str(&value.to_string());
        result.push_str(literal);
    }
    Ok(result)
}

/// Execute a parsed tree with the built-in evaluator.
pub fn execute(tree: &Node, context: &mut Context) -> Result<String, RenderError> {
    execute_with(tree, context, &StandardEvaluator)
}

/// Execute a parsed tree, evaluating expressions with `evaluator`.
///
/// The context is mutated while loops run. `index` and `outer` are put back
/// when each loop finishes; the loop variable keeps its last value.
pub fn execute_with(
    tree: &Node,
    context: &mut Context,
    evaluator: &dyn Evaluator,
) -> Result<String, RenderError> {
    let mut renderer = Renderer {
        evaluator,
        output: String::new(),
    };
    renderer.node(tree, context)?;
    debug!(
        tags = tree.tag_count(),
        bytes = renderer.output.len(),
        "rendered template"
    );
    Ok(renderer.output)
}

/// Parse and execute `template` in one step.
///
/// # Example
///
/// ```
/// use filler::{context, render};
///
/// let mut context = context! { "items" => vec!["a", "b"] };
/// let out = render("{% for x in items %}{{index}}={{x}} {% endfor %}", &mut context).unwrap();
/// assert_eq!(out, "0=a 1=b ");
/// ```
pub fn render(template: &str, context: &mut Context) -> Result<String, Error> {
    render_with(template, context, &StandardEvaluator)
}

/// Parse and execute `template` with a custom evaluator.
pub fn render_with(
    template: &str,
    context: &mut Context,
    evaluator: &dyn Evaluator,
) -> Result<String, Error> {
    let tree = parse(template)?;
    Ok(execute_with(&tree, context, evaluator)?)
}

struct Renderer<'a> {
    evaluator: &'a dyn Evaluator,
    output: String,
}

impl Renderer<'_> {
    /// Dispatch a node, then append its trailing text.
    fn node(&mut self, node: &Node, context: &mut Context) -> Result<(), RenderError> {
        trace!(tag = %node.tag, offset = node.offset, "executing");
        match node.tag.command() {
            Command::Pass => self.pass(node, context)?,
            Command::If => self.branch(node, context)?,
            Command::For => self.for_each(node, context)?,
        }
        self.fill(&node.trailing_text, context)
    }

    fn fill(&mut self, text: &str, context: &Context) -> Result<(), RenderError> {
        let filled = fill_with(text, context, self.evaluator)?;
        self.output.push_str(&filled);
        Ok(())
    }

    fn pass(&mut self, node: &Node, context: &mut Context) -> Result<(), RenderError> {
        self.fill(&node.leading_text, context)?;
        for child in &node.children {
            self.node(child, context)?;
        }
        Ok(())
    }

    fn branch(&mut self, node: &Node, context: &mut Context) -> Result<(), RenderError> {
        let condition = self.evaluator.evaluate(&node.expression(), context)?;
        if condition.is_truthy() {
            self.pass(node, context)
        } else if let Some(branch) = &node.else_branch {
            self.node(branch, context)
        } else {
            Ok(())
        }
    }

    fn for_each(&mut self, node: &Node, context: &mut Context) -> Result<(), RenderError> {
        let malformed = || RenderError::MalformedFor {
            arguments: node.expression(),
            offset: node.offset,
        };
        let [variable, keyword, source @ ..] = node.arguments.as_slice() else {
            return Err(malformed());
        };
        if keyword != "in" {
            return Err(malformed());
        }

        let iterable = self.evaluator.evaluate(&source.join(" "), context)?;
        let type_name = iterable.type_name();
        let items = iterable
            .into_items()
            .ok_or(ExprError::NotIterable { type_name })?;
        trace!(variable = %variable, items = items.len(), "entering loop");

        let frame = LoopFrame::enter(context);
        let result = items
            .into_iter()
            .enumerate()
            .try_for_each(|(position, item): (usize, Value)| {
                LoopFrame::step(context, variable, position, item);
                self.pass(node, context)
            });
        frame.exit(context);
        result
    }
}
