//! Tree-walking evaluation of parsed expressions.

use super::ast::Expr;
use super::error::ExprError;
use super::functions;
use super::ops;
use crate::types::{Context, Value};

/// Evaluate an expression against a context.
///
/// Names resolve to context entries; calls resolve to builtin functions.
/// `and`/`or` short-circuit and return one of their operands.
pub fn eval_expr(expr: &Expr, context: &Context) -> Result<Value, ExprError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Name(name) => context
            .get(name)
            .cloned()
            .ok_or_else(|| ExprError::UndefinedVariable { name: name.clone() }),
        Expr::List(items) => items
            .iter()
            .map(|item| eval_expr(item, context))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        Expr::Unary { op, operand } => ops::unary(*op, eval_expr(operand, context)?),
        Expr::Binary { op, left, right } => {
            let left = eval_expr(left, context)?;
            let right = eval_expr(right, context)?;
            ops::binary(*op, left, right)
        }
        Expr::Compare { first, rest } => {
            let mut left = eval_expr(first, context)?;
            for (op, operand) in rest {
                let right = eval_expr(operand, context)?;
                if !ops::compare(*op, &left, &right)? {
                    return Ok(Value::Bool(false));
                }
                left = right;
            }
            Ok(Value::Bool(true))
        }
        Expr::Not(operand) => Ok(Value::Bool(!eval_expr(operand, context)?.is_truthy())),
        Expr::And(left, right) => {
            let left = eval_expr(left, context)?;
            if left.is_truthy() {
                eval_expr(right, context)
            } else {
                Ok(left)
            }
        }
        Expr::Or(left, right) => {
            let left = eval_expr(left, context)?;
            if left.is_truthy() {
                Ok(left)
            } else {
                eval_expr(right, context)
            }
        }
        Expr::Attribute { target, name } => ops::attribute(&eval_expr(target, context)?, name),
        Expr::Index { target, index } => {
            let target = eval_expr(target, context)?;
            let index = eval_expr(index, context)?;
            ops::index(&target, &index)
        }
        Expr::Call { function, args } => {
            let Expr::Name(name) = function.as_ref() else {
                let target = eval_expr(function, context)?;
                return Err(ExprError::type_error(format!(
                    "'{}' object is not callable",
                    target.type_name()
                )));
            };
            let args = args
                .iter()
                .map(|arg| eval_expr(arg, context))
                .collect::<Result<Vec<_>, _>>()?;
            functions::call(name, args)
        }
    }
}
