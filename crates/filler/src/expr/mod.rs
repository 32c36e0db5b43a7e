//! Expression evaluation for `{{expr}}` substitutions and tag arguments.
//!
//! Rendering only depends on the [`Evaluator`] trait. [`StandardEvaluator`]
//! implements a small expression language: literals,
//! arithmetic, comparisons, boolean logic, member access, indexing and a
//! handful of builtin functions.

pub mod ast;
mod error;
mod eval;
mod functions;
mod ops;
mod parse;

use tracing::trace;

use crate::types::{Context, Value};

pub use error::ExprError;
pub use eval::eval_expr;
pub use functions::FUNCTIONS;
pub use parse::parse_expression;

/// Turns expression source into a value, given the current variables.
///
/// Any closure with the same signature is an evaluator too, which makes it
/// easy to plug in a different expression language.
///
/// # Example
///
/// ```
/// use filler::{Context, ExprError, Value, fill_with};
///
/// let shout = |source: &str, context: &Context| -> Result<Value, ExprError> {
///     let value = context
///         .get(source.trim())
///         .ok_or_else(|| ExprError::Custom(format!("no {source}")))?;
///     Ok(Value::from(value.to_string().to_uppercase()))
/// };
///
/// let context = filler::context! { "name" => "ada" };
/// assert_eq!(fill_with("hi {{ name }}", &context, &shout).unwrap(), "hi ADA");
/// ```
pub trait Evaluator {
    /// Evaluate `source` with the variables in `context`.
    fn evaluate(&self, source: &str, context: &Context) -> Result<Value, ExprError>;
}

impl<F> Evaluator for F
where
    F: Fn(&str, &Context) -> Result<Value, ExprError>,
{
    fn evaluate(&self, source: &str, context: &Context) -> Result<Value, ExprError> {
        self(source, context)
    }
}

/// The built-in expression language.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEvaluator;

impl Evaluator for StandardEvaluator {
    fn evaluate(&self, source: &str, context: &Context) -> Result<Value, ExprError> {
        trace!(expression = source, "evaluating");
        let expr = parse_expression(source)?;
        eval_expr(&expr, context)
    }
}

/// Evaluate `source` with the built-in expression language.
pub fn evaluate(source: &str, context: &Context) -> Result<Value, ExprError> {
    StandardEvaluator.evaluate(source, context)
}
