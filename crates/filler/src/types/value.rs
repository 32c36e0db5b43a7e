use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

/// A runtime value stored in a [`Context`](super::Context) or produced by an
/// expression.
///
/// The variants cover what templates typically need: scalars, strings,
/// sequences, string-keyed maps, and the loop snapshot exposed as `outer`.
/// Display writes booleans as `True`/`False`, the empty value as `None`,
/// integral floats as `2.0`, and quotes strings nested in containers.
///
/// # Example
///
/// ```
/// use filler::Value;
///
/// let count: Value = 42.into();
/// let name: Value = "Alice".into();
/// let items: Value = vec![5, 4, 3].into();
///
/// assert_eq!(count.to_string(), "42");
/// assert_eq!(name.to_string(), "Alice");
/// assert_eq!(items.to_string(), "[5, 4, 3]");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    None,

    /// A boolean.
    Bool(bool),

    /// A signed integer.
    Int(i64),

    /// A floating-point number.
    Float(f64),

    /// A string.
    Str(String),

    /// An ordered sequence.
    List(Vec<Value>),

    /// A string-keyed mapping, iterated in key order.
    Map(BTreeMap<String, Value>),

    /// The enclosing-loop snapshot bound to `outer` inside a `for` block.
    Loop(Arc<LoopSnapshot>),
}

/// The state of an enclosing `for` loop, captured when a nested loop starts.
///
/// Each loop level stores its parent's `index` and `outer`, so
/// `outer.outer.index` stays resolvable at any nesting depth. Outside of any
/// loop both fields are [`Value::None`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoopSnapshot {
    /// Position of the enclosing loop when the snapshot was taken.
    pub index: Value,
    /// Snapshot of the loop enclosing that one, or `None`.
    pub outer: Value,
}

impl LoopSnapshot {
    /// Look up a snapshot field by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        match name {
            "index" => Some(&self.index),
            "outer" => Some(&self.outer),
            _ => None,
        }
    }
}

impl Value {
    /// Truthiness: empty containers, zero and `None` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::Loop(_) => true,
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "dict",
            Value::Loop(_) => "loop",
        }
    }

    /// Get this value as an integer, if it is one. Booleans count as 0 and 1.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Get this value as a float, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            Value::Bool(b) => Some(f64::from(u8::from(*b))),
            _ => None,
        }
    }

    /// Get this value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get this value as a loop snapshot, if it is one.
    pub fn as_loop(&self) -> Option<&LoopSnapshot> {
        match self {
            Value::Loop(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// The elements a `for` block iterates over.
    ///
    /// Lists yield their elements, strings their characters, and maps their
    /// keys. Other values are not iterable.
    pub fn into_items(self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            Value::Str(s) => Some(s.chars().map(|c| Value::Str(c.to_string())).collect()),
            Value::Map(map) => Some(map.into_keys().map(Value::Str).collect()),
            _ => None,
        }
    }

    /// The `repr()`-style form used for elements nested inside containers.
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => {
                let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
                format!("'{escaped}'")
            }
            other => other.to_string(),
        }
    }
}

fn format_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "" } else { "-" };
        format!("{sign}inf")
    } else {
        let scientific = format!("{f:e}");
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        if !(-4..16).contains(&exponent) {
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
        } else if f.fract() == 0.0 {
            format!("{f:.1}")
        } else {
            format!("{f}")
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{}", format_float(*n)),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(Value::repr).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Value::Map(map) => {
                let parts: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("'{k}': {}", v.repr()))
                    .collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
            Value::Loop(snapshot) => write!(f, "<loop index={}>", snapshot.index.repr()),
        }
    }
}

// From implementations for common types

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}

impl<V: Into<Value>> From<BTreeMap<String, V>> for Value {
    fn from(map: BTreeMap<String, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<LoopSnapshot> for Value {
    fn from(snapshot: LoopSnapshot) -> Self {
        Value::Loop(Arc::new(snapshot))
    }
}
