//! A small text templating engine.
//!
//! Templates mix literal text with `{{expr}}` substitutions and block tags:
//!
//! ```text
//! {% if user.admin %}admin{% elif user %}{{user.name}}{% else %}guest{% endif %}
//! {% for item in items %}{{index}}: {{item}}{% endfor %}
//! ```
//!
//! Rendering happens in two stages: [`parse`] builds an immutable tree of
//! [`Node`]s and [`execute`] walks it against a mutable [`Context`]. [`render`]
//! does both at once, and [`Template`] keeps a parsed tree around for reuse.
//!
//! Inside nested `for` blocks, `index` is the current position and
//! `outer.index`, `outer.outer.index` and so on are the positions of the
//! enclosing loops.

pub mod expr;
pub mod interpreter;
pub mod parser;
pub mod types;

mod suggestions;
mod template;

pub use expr::{Evaluator, ExprError, StandardEvaluator, evaluate};
pub use interpreter::{
    Error, LoadError, RenderError, execute, execute_with, fill, fill_with, render, render_with,
};
pub use parser::{DEFAULT_CLOSE, DEFAULT_OPEN, Markers, Node, ParseError, Tag, parse, parse_with};
pub use suggestions::compute_suggestions;
pub use template::Template;
pub use types::{Context, LoopSnapshot, Value};

/// Creates a [`Context`] from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats, strings,
/// vectors and maps can be passed directly.
///
/// # Example
///
/// ```
/// use filler::context;
///
/// let c = context! { "count" => 3, "name" => "Alice" };
/// assert_eq!(c.len(), 2);
/// assert_eq!(c["count"].as_int(), Some(3));
/// assert_eq!(c["name"].as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! context {
    {} => {
        $crate::Context::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Context::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
