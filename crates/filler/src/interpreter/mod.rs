//! Template interpreter.
//!
//! Executes parsed trees against a variable context: `{{expr}}`
//! substitution, `if`/`elif`/`else` branches and `for` loops with the
//! `index`/`outer` chain for nested loops.

mod context;
mod error;
mod evaluator;

pub use context::{INDEX, OUTER};
pub use error::{Error, LoadError, RenderError};
pub use evaluator::{
    FILL_CLOSE, FILL_OPEN, execute, execute_with, fill, fill_with, render, render_with,
};
