//! Loop bookkeeping on the shared context.

use std::sync::Arc;

use crate::types::{Context, LoopSnapshot, Value};

/// Context key holding the current loop position.
pub const INDEX: &str = "index";

/// Context key holding the enclosing loop's snapshot.
pub const OUTER: &str = "outer";

/// The `index` and `outer` entries a `for` block displaced.
///
/// Entering a frame chains the displaced values into a new `outer`
/// snapshot, so `outer.index`, `outer.outer.index` and so on resolve to the
/// positions of the enclosing loops. Leaving the frame puts the displaced
/// values back, removing keys that were absent.
pub(crate) struct LoopFrame {
    index: Option<Value>,
    outer: Option<Value>,
}

impl LoopFrame {
    pub(crate) fn enter(context: &mut Context) -> Self {
        let index = context.get(INDEX).cloned();
        let outer = context.get(OUTER).cloned();
        let snapshot = LoopSnapshot {
            index: index.clone().unwrap_or_default(),
            outer: outer.clone().unwrap_or_default(),
        };
        context.insert(OUTER.to_string(), Value::Loop(Arc::new(snapshot)));
        Self { index, outer }
    }

    /// Bind the loop variable and position for one iteration.
    pub(crate) fn step(context: &mut Context, variable: &str, position: usize, item: Value) {
        context.insert(variable.to_string(), item);
        context.insert(INDEX.to_string(), Value::from(position));
    }

    pub(crate) fn exit(self, context: &mut Context) {
        restore(context, INDEX, self.index);
        restore(context, OUTER, self.outer);
    }
}

fn restore(context: &mut Context, key: &str, saved: Option<Value>) {
    match saved {
        Some(value) => {
            context.insert(key.to_string(), value);
        }
        None => {
            context.remove(key);
        }
    }
}
