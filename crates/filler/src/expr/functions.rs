//! Builtin functions callable from expressions.

use std::cmp::Ordering;

use super::ast::CompareOp;
use super::error::ExprError;
use super::ops::{MAX_SEQUENCE_LEN, order};
use crate::suggestions::compute_suggestions;
use crate::types::Value;

/// Names of every builtin function, for suggestions.
pub const FUNCTIONS: [&str; 11] = [
    "abs", "float", "int", "join", "len", "lower", "max", "min", "range", "str", "upper",
];

/// Call the builtin `name` with already-evaluated arguments.
pub fn call(name: &str, args: Vec<Value>) -> Result<Value, ExprError> {
    match name {
        "abs" => abs(name, one(name, args)?),
        "float" => float(name, one(name, args)?),
        "int" => int(name, one(name, args)?),
        "join" => join(name, args),
        "len" => len(name, &one(name, args)?),
        "lower" => text(name, one(name, args)?).map(|s| Value::Str(s.to_lowercase())),
        "max" => extreme(name, args, Ordering::Greater),
        "min" => extreme(name, args, Ordering::Less),
        "range" => range(name, &args),
        "str" => Ok(Value::Str(one(name, args)?.to_string())),
        "upper" => text(name, one(name, args)?).map(|s| Value::Str(s.to_uppercase())),
        _ => Err(ExprError::UnknownFunction {
            name: name.to_string(),
            suggestions: compute_suggestions(name, &FUNCTIONS),
        }),
    }
}

/// Unpack exactly one argument.
fn one(function: &str, args: Vec<Value>) -> Result<Value, ExprError> {
    let got = args.len();
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(arg), None) => Ok(arg),
        _ => Err(ExprError::Arity {
            function: function.to_string(),
            expected: "exactly 1",
            got,
        }),
    }
}

fn invalid(function: &str, message: impl Into<String>) -> ExprError {
    ExprError::InvalidArgument {
        function: function.to_string(),
        message: message.into(),
    }
}

fn text(function: &str, arg: Value) -> Result<String, ExprError> {
    match arg {
        Value::Str(s) => Ok(s),
        other => Err(invalid(
            function,
            format!("expected a string, got '{}'", other.type_name()),
        )),
    }
}

fn integer(function: &str, arg: &Value) -> Result<i64, ExprError> {
    arg.as_int().ok_or_else(|| {
        invalid(
            function,
            format!("expected an integer, got '{}'", arg.type_name()),
        )
    })
}

fn abs(function: &str, arg: Value) -> Result<Value, ExprError> {
    match arg {
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .ok_or(ExprError::Overflow { operation: "abs" }),
        Value::Float(f) => Ok(Value::Float(f.abs())),
        Value::Bool(b) => Ok(Value::Int(i64::from(b))),
        other => Err(invalid(
            function,
            format!("bad operand type '{}'", other.type_name()),
        )),
    }
}

fn int(function: &str, arg: Value) -> Result<Value, ExprError> {
    match arg {
        Value::Int(n) => Ok(Value::Int(n)),
        Value::Bool(b) => Ok(Value::Int(i64::from(b))),
        Value::Float(f) if f.is_finite() && f.abs() < 9.2e18 => Ok(Value::Int(f.trunc() as i64)),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid(function, format!("invalid literal for int(): '{s}'"))),
        other => Err(invalid(
            function,
            format!("cannot convert '{}' to int", other.type_name()),
        )),
    }
}

fn float(function: &str, arg: Value) -> Result<Value, ExprError> {
    match arg {
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid(function, format!("could not convert string to float: '{s}'"))),
        other => other.as_float().map(Value::Float).ok_or_else(|| {
            invalid(
                function,
                format!("cannot convert '{}' to float", other.type_name()),
            )
        }),
    }
}

fn len(function: &str, arg: &Value) -> Result<Value, ExprError> {
    let n = match arg {
        Value::Str(s) => s.chars().count(),
        Value::List(items) => items.len(),
        Value::Map(map) => map.len(),
        other => {
            return Err(invalid(
                function,
                format!("object of type '{}' has no len()", other.type_name()),
            ));
        }
    };
    Ok(Value::from(n))
}

/// `join(items)` or `join(items, separator)`.
fn join(function: &str, args: Vec<Value>) -> Result<Value, ExprError> {
    let got = args.len();
    let mut args = args.into_iter();
    let (items, separator) = match (args.next(), args.next(), args.next()) {
        (Some(items), None, None) => (items, String::new()),
        (Some(items), Some(separator), None) => (items, text(function, separator)?),
        _ => {
            return Err(ExprError::Arity {
                function: function.to_string(),
                expected: "1 or 2",
                got,
            });
        }
    };
    let type_name = items.type_name();
    let items = items
        .into_items()
        .ok_or_else(|| invalid(function, format!("'{type_name}' object is not iterable")))?;
    let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
    Ok(Value::Str(parts.join(&separator)))
}

/// `min`/`max` over either one iterable argument or several arguments.
fn extreme(function: &str, args: Vec<Value>, wanted: Ordering) -> Result<Value, ExprError> {
    let candidates = if args.len() == 1 {
        let mut args = args;
        let only = args.pop().unwrap_or_default();
        let type_name = only.type_name();
        only.into_items()
            .ok_or_else(|| invalid(function, format!("'{type_name}' object is not iterable")))?
    } else {
        args
    };

    let mut best: Option<Value> = None;
    for candidate in candidates {
        best = match best {
            Some(current) if order(&candidate, &current, CompareOp::Lt)? != wanted => Some(current),
            _ => Some(candidate),
        };
    }
    best.ok_or_else(|| invalid(function, "arg is an empty sequence"))
}

/// `range(stop)`, `range(start, stop)` or `range(start, stop, step)`.
fn range(function: &str, args: &[Value]) -> Result<Value, ExprError> {
    let (start, stop, step) = match args {
        [stop] => (0, integer(function, stop)?, 1),
        [start, stop] => (integer(function, start)?, integer(function, stop)?, 1),
        [start, stop, step] => (
            integer(function, start)?,
            integer(function, stop)?,
            integer(function, step)?,
        ),
        _ => {
            return Err(ExprError::Arity {
                function: function.to_string(),
                expected: "1 to 3",
                got: args.len(),
            });
        }
    };
    if step == 0 {
        return Err(invalid(function, "arg 3 must not be zero"));
    }
    let last = i128::from(start) + i128::from(step) * MAX_SEQUENCE_LEN as i128;
    if (step > 0 && last < i128::from(stop)) || (step < 0 && last > i128::from(stop)) {
        return Err(invalid(
            function,
            format!("result would exceed {MAX_SEQUENCE_LEN} items"),
        ));
    }

    let mut items = Vec::new();
    let mut current = start;
    while (step > 0 && current < stop) || (step < 0 && current > stop) {
        items.push(Value::Int(current));
        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(Value::List(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Value {
        Value::List(values.iter().copied().map(Value::Int).collect())
    }

    #[test]
    fn test_range_forms() {
        assert_eq!(call("range", vec![Value::Int(3)]).unwrap(), ints(&[0, 1, 2]));
        assert_eq!(
            call("range", vec![Value::Int(2), Value::Int(5)]).unwrap(),
            ints(&[2, 3, 4])
        );
        assert_eq!(
            call("range", vec![Value::Int(5), Value::Int(0), Value::Int(-2)]).unwrap(),
            ints(&[5, 3, 1])
        );
    }

    #[test]
    fn test_range_too_long() {
        let err = call("range", vec![Value::Int(i64::MAX)]).unwrap_err();
        assert!(matches!(err, ExprError::InvalidArgument { .. }));
        let err = call("range", vec![Value::Int(0), Value::Int(i64::MIN), Value::Int(-1)])
            .unwrap_err();
        assert!(matches!(err, ExprError::InvalidArgument { .. }));
        let limit = i64::try_from(MAX_SEQUENCE_LEN).unwrap();
        let longest = call("range", vec![Value::Int(limit)]).unwrap();
        assert_eq!(call("len", vec![longest]).unwrap(), Value::Int(limit));
    }

    #[test]
    fn test_range_zero_step() {
        let err = call("range", vec![Value::Int(0), Value::Int(5), Value::Int(0)]).unwrap_err();
        assert!(matches!(err, ExprError::InvalidArgument { .. }));
    }

    #[test]
    fn test_min_max() {
        assert_eq!(call("max", vec![ints(&[5, 9, 3])]).unwrap(), Value::Int(9));
        assert_eq!(
            call("min", vec![Value::Int(4), Value::Float(1.5)]).unwrap(),
            Value::Float(1.5)
        );
        assert!(call("max", vec![ints(&[])]).is_err());
    }

    #[test]
    fn test_unknown_function_suggests() {
        let err = call("lenn", vec![]).unwrap_err();
        assert_eq!(
            err,
            ExprError::UnknownFunction {
                name: "lenn".to_string(),
                suggestions: vec!["len".to_string()],
            }
        );
    }
}
