//! Operator semantics for expression values.
//!
//! Numeric operators widen integers to floats when either side is a float.
//! Booleans take part in arithmetic as 0 and 1.

use std::cmp::Ordering;

use super::ast::{BinaryOp, CompareOp, UnaryOp};
use super::error::ExprError;
use crate::types::Value;

/// Longest string or list an expression may build.
pub const MAX_SEQUENCE_LEN: usize = 1 << 20;

/// A numeric operand after widening.
enum Number {
    Int(i64),
    Float(f64),
}

fn number(value: &Value) -> Option<Number> {
    match value {
        Value::Int(n) => Some(Number::Int(*n)),
        Value::Bool(b) => Some(Number::Int(i64::from(*b))),
        Value::Float(f) => Some(Number::Float(*f)),
        _ => None,
    }
}

fn unsupported(op: &str, left: &Value, right: &Value) -> ExprError {
    ExprError::type_error(format!(
        "unsupported operand type(s) for {op}: '{}' and '{}'",
        left.type_name(),
        right.type_name()
    ))
}

/// Apply a unary operator.
pub fn unary(op: UnaryOp, operand: Value) -> Result<Value, ExprError> {
    match (op, number(&operand)) {
        (UnaryOp::Neg, Some(Number::Int(n))) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or(ExprError::Overflow { operation: "-" }),
        (UnaryOp::Neg, Some(Number::Float(f))) => Ok(Value::Float(-f)),
        (UnaryOp::Pos, Some(Number::Int(n))) => Ok(Value::Int(n)),
        (UnaryOp::Pos, Some(Number::Float(f))) => Ok(Value::Float(f)),
        (_, None) => Err(ExprError::type_error(format!(
            "bad operand type for unary {}: '{}'",
            if op == UnaryOp::Neg { "-" } else { "+" },
            operand.type_name()
        ))),
    }
}

/// Apply a binary arithmetic operator.
pub fn binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, ExprError> {
    match (op, &left, &right) {
        (BinaryOp::Add, Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
        (BinaryOp::Add, Value::List(a), Value::List(b)) => {
            Ok(Value::List(a.iter().chain(b).cloned().collect()))
        }
        (BinaryOp::Mul, Value::Str(s), Value::Int(n))
        | (BinaryOp::Mul, Value::Int(n), Value::Str(s)) => {
            Ok(Value::Str(s.repeat(repetitions(s.len(), *n)?)))
        }
        (BinaryOp::Mul, Value::List(items), Value::Int(n))
        | (BinaryOp::Mul, Value::Int(n), Value::List(items)) => {
            let times = repetitions(items.len(), *n)?;
            Ok(Value::List(
                (0..times).flat_map(|_| items.iter().cloned()).collect(),
            ))
        }
        _ => match (number(&left), number(&right)) {
            (Some(Number::Int(a)), Some(Number::Int(b))) => int_arithmetic(op, a, b),
            (Some(a), Some(b)) => float_arithmetic(op, widen(a), widen(b)),
            _ => Err(unsupported(op.symbol(), &left, &right)),
        },
    }
}

/// Number of copies for `sequence * n`, refusing results longer than
/// [`MAX_SEQUENCE_LEN`].
fn repetitions(len: usize, n: i64) -> Result<usize, ExprError> {
    let times = usize::try_from(n).unwrap_or(0);
    if len == 0 {
        return Ok(0);
    }
    match len.checked_mul(times) {
        Some(total) if total <= MAX_SEQUENCE_LEN => Ok(times),
        _ => Err(ExprError::Overflow { operation: "*" }),
    }
}

fn widen(n: Number) -> f64 {
    match n {
        Number::Int(i) => i as f64,
        Number::Float(f) => f,
    }
}

fn int_arithmetic(op: BinaryOp, a: i64, b: i64) -> Result<Value, ExprError> {
    let overflow = ExprError::Overflow {
        operation: op.symbol(),
    };
    match op {
        BinaryOp::Add => a.checked_add(b).map(Value::Int).ok_or(overflow),
        BinaryOp::Sub => a.checked_sub(b).map(Value::Int).ok_or(overflow),
        BinaryOp::Mul => a.checked_mul(b).map(Value::Int).ok_or(overflow),
        BinaryOp::Div => {
            if b == 0 {
                return Err(ExprError::DivisionByZero);
            }
            Ok(Value::Float(a as f64 / b as f64))
        }
        BinaryOp::FloorDiv => {
            if b == 0 {
                return Err(ExprError::DivisionByZero);
            }
            let quotient = a.checked_div(b).ok_or(overflow)?;
            if a % b != 0 && ((a < 0) != (b < 0)) {
                Ok(Value::Int(quotient - 1))
            } else {
                Ok(Value::Int(quotient))
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(ExprError::DivisionByZero);
            }
            let remainder = a.checked_rem(b).ok_or(overflow)?;
            if remainder != 0 && ((remainder < 0) != (b < 0)) {
                Ok(Value::Int(remainder + b))
            } else {
                Ok(Value::Int(remainder))
            }
        }
    }
}

fn float_arithmetic(op: BinaryOp, a: f64, b: f64) -> Result<Value, ExprError> {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div | BinaryOp::FloorDiv | BinaryOp::Mod if b == 0.0 => {
            return Err(ExprError::DivisionByZero);
        }
        BinaryOp::Div => a / b,
        BinaryOp::FloorDiv => (a / b).floor(),
        BinaryOp::Mod => a - b * (a / b).floor(),
    };
    Ok(Value::Float(result))
}

/// Equality across types: numbers compare by value, containers element-wise.
pub fn equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| equals(x, y))
        }
        (Value::Map(a), Value::Map(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|((ka, va), (kb, vb))| ka == kb && equals(va, vb))
        }
        _ => match (number(left), number(right)) {
            (Some(Number::Int(a)), Some(Number::Int(b))) => a == b,
            (Some(a), Some(b)) => widen(a) == widen(b),
            _ => left == right,
        },
    }
}

/// Ordering for `<`-style comparisons. Numbers, strings and lists are ordered.
pub fn order(left: &Value, right: &Value, op: CompareOp) -> Result<Ordering, ExprError> {
    let incomparable = || {
        ExprError::type_error(format!(
            "'{}' not supported between instances of '{}' and '{}'",
            op.symbol(),
            left.type_name(),
            right.type_name()
        ))
    };
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        (Value::List(a), Value::List(b)) => {
            for (x, y) in a.iter().zip(b) {
                if !equals(x, y) {
                    return order(x, y, op);
                }
            }
            Ok(a.len().cmp(&b.len()))
        }
        _ => match (number(left), number(right)) {
            (Some(Number::Int(a)), Some(Number::Int(b))) => Ok(a.cmp(&b)),
            (Some(a), Some(b)) => widen(a).partial_cmp(&widen(b)).ok_or_else(incomparable),
            _ => Err(incomparable()),
        },
    }
}

/// Membership test for `in` / `not in`.
pub fn contains(container: &Value, item: &Value) -> Result<bool, ExprError> {
    match container {
        Value::List(items) => Ok(items.iter().any(|x| equals(x, item))),
        Value::Map(map) => Ok(item.as_str().is_some_and(|key| map.contains_key(key))),
        Value::Str(text) => match item {
            Value::Str(needle) => Ok(text.contains(needle.as_str())),
            other => Err(ExprError::type_error(format!(
                "'in <string>' requires string as left operand, not {}",
                other.type_name()
            ))),
        },
        other => Err(ExprError::type_error(format!(
            "argument of type '{}' is not iterable",
            other.type_name()
        ))),
    }
}

/// Evaluate one link of a comparison chain.
pub fn compare(op: CompareOp, left: &Value, right: &Value) -> Result<bool, ExprError> {
    Ok(match op {
        CompareOp::Eq => equals(left, right),
        CompareOp::Ne => !equals(left, right),
        CompareOp::Lt => order(left, right, op)? == Ordering::Less,
        CompareOp::Le => order(left, right, op)? != Ordering::Greater,
        CompareOp::Gt => order(left, right, op)? == Ordering::Greater,
        CompareOp::Ge => order(left, right, op)? != Ordering::Less,
        CompareOp::In => contains(right, left)?,
        CompareOp::NotIn => !contains(right, left)?,
    })
}

/// Member access: loop snapshot fields and map keys.
pub fn attribute(target: &Value, name: &str) -> Result<Value, ExprError> {
    let found = match target {
        Value::Loop(snapshot) => snapshot.attribute(name),
        Value::Map(map) => map.get(name),
        _ => None,
    };
    found.cloned().ok_or_else(|| ExprError::UnknownAttribute {
        type_name: target.type_name(),
        name: name.to_string(),
    })
}

/// Resolve a possibly negative index against a sequence length.
fn position(index: i64, len: usize, type_name: &'static str) -> Result<usize, ExprError> {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if index < 0 { index + len } else { index };
    if (0..len).contains(&resolved) {
        usize::try_from(resolved).map_err(|_| ExprError::IndexOutOfRange { type_name, index })
    } else {
        Err(ExprError::IndexOutOfRange { type_name, index })
    }
}

/// Subscript: `list[i]`, `str[i]`, `map[key]`.
pub fn index(target: &Value, index: &Value) -> Result<Value, ExprError> {
    match target {
        Value::Map(map) => index
            .as_str()
            .and_then(|key| map.get(key))
            .cloned()
            .ok_or_else(|| ExprError::KeyNotFound {
                key: index.to_string(),
            }),
        Value::List(items) => {
            let i = position(integer_index(target, index)?, items.len(), "list")?;
            Ok(items[i].clone())
        }
        Value::Str(text) => {
            let chars: Vec<char> = text.chars().collect();
            let i = position(integer_index(target, index)?, chars.len(), "string")?;
            Ok(Value::Str(chars[i].to_string()))
        }
        _ => Err(ExprError::type_error(format!(
            "'{}' object is not subscriptable",
            target.type_name()
        ))),
    }
}

fn integer_index(target: &Value, index: &Value) -> Result<i64, ExprError> {
    index.as_int().ok_or_else(|| {
        ExprError::type_error(format!(
            "{} indices must be integers, not {}",
            target.type_name(),
            index.type_name()
        ))
    })
}
