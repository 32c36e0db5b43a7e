//! Expression error types.

use thiserror::Error;

use crate::suggestions::hint;

/// An error raised while evaluating an expression.
///
/// Rendering passes these through untouched, so callers see exactly what
/// the evaluator reported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// The expression source could not be parsed.
    #[error("invalid expression '{expression}' at column {column}: {message}")]
    Syntax {
        expression: String,
        column: usize,
        message: String,
    },

    /// A name not present in the context.
    #[error("name '{name}' is not defined")]
    UndefinedVariable { name: String },

    /// A call to a function that does not exist.
    #[error("unknown function '{name}'{}", hint(.suggestions))]
    UnknownFunction {
        name: String,
        suggestions: Vec<String>,
    },

    /// Member access on a value without that member.
    #[error("'{type_name}' object has no attribute '{name}'")]
    UnknownAttribute {
        type_name: &'static str,
        name: String,
    },

    /// An operation applied to values of the wrong type.
    #[error("type error: {message}")]
    Type { message: String },

    /// Sequence index past either end.
    #[error("{type_name} index {index} out of range")]
    IndexOutOfRange { type_name: &'static str, index: i64 },

    /// Map lookup with a missing key.
    #[error("key '{key}' not found")]
    KeyNotFound { key: String },

    /// Division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Integer arithmetic overflowed.
    #[error("integer overflow in '{operation}'")]
    Overflow { operation: &'static str },

    /// A function called with the wrong number of arguments.
    #[error("{function}() takes {expected} arguments, got {got}")]
    Arity {
        function: String,
        expected: &'static str,
        got: usize,
    },

    /// A function called with an unusable argument value.
    #[error("{function}(): {message}")]
    InvalidArgument { function: String, message: String },

    /// A `for` block over a value that cannot be iterated.
    #[error("'{type_name}' object is not iterable")]
    NotIterable { type_name: &'static str },

    /// An error reported by a caller-supplied evaluator.
    #[error("{0}")]
    Custom(String),
}

impl ExprError {
    pub(crate) fn type_error(message: impl Into<String>) -> Self {
        ExprError::Type {
            message: message.into(),
        }
    }
}
