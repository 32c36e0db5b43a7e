mod value;

use std::collections::HashMap;

pub use value::{LoopSnapshot, Value};

/// Variables visible to a template, keyed by name.
///
/// Rendering mutates the context in place: a `for` block binds its loop
/// variable, `index` and `outer` while it runs.
pub type Context = HashMap<String, Value>;
