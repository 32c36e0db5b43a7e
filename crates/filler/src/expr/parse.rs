//! Expression parser using winnow.
//!
//! Precedence, lowest first: `or`, `and`, `not`, comparisons, `+ -`,
//! `* / // %`, unary `- +`, then postfix member access, indexing and calls.

use winnow::ascii::{digit0, digit1};
use winnow::combinator::{alt, delimited, not, opt, preceded, repeat, separated, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{any, one_of, take_while};

use super::ast::{BinaryOp, CompareOp, Expr, UnaryOp};
use super::error::ExprError;
use crate::types::Value;

/// Parse an expression source string.
pub fn parse_expression(source: &str) -> Result<Expr, ExprError> {
    let mut remaining = source;
    match delimited(ws, expression, ws).parse_next(&mut remaining) {
        Ok(expr) if remaining.is_empty() => Ok(expr),
        Ok(_) => Err(ExprError::Syntax {
            expression: source.to_string(),
            column: column(source, remaining),
            message: format!(
                "unexpected character: '{}'",
                remaining.chars().next().unwrap_or('?')
            ),
        }),
        Err(e) => Err(ExprError::Syntax {
            expression: source.to_string(),
            column: column(source, remaining),
            message: if remaining.trim().is_empty() {
                "unexpected end of expression".to_string()
            } else {
                format!("parse error: {e}")
            },
        }),
    }
}

/// 1-based column of `remaining` within `original`.
fn column(original: &str, remaining: &str) -> usize {
    let consumed = original.len() - remaining.len();
    original[..consumed].chars().count() + 1
}

fn expression(input: &mut &str) -> ModalResult<Expr> {
    or_expr(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace).void().parse_next(input)
}

/// A keyword that is not the prefix of a longer identifier.
fn keyword<'i>(word: &'static str) -> impl FnMut(&mut &'i str) -> ModalResult<&'i str> {
    move |input: &mut &'i str| terminated(word, not(one_of(is_ident_cont))).parse_next(input)
}

fn or_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = and_expr(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded((ws, keyword("or"), ws), and_expr)).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |left, right| Expr::Or(Box::new(left), Box::new(right))))
}

fn and_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = not_expr(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded((ws, keyword("and"), ws), not_expr)).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |left, right| Expr::And(Box::new(left), Box::new(right))))
}

fn not_expr(input: &mut &str) -> ModalResult<Expr> {
    alt((
        preceded((keyword("not"), ws), not_expr).map(|e| Expr::Not(Box::new(e))),
        comparison,
    ))
    .parse_next(input)
}

fn comparison(input: &mut &str) -> ModalResult<Expr> {
    let first = additive(input)?;
    let rest: Vec<(CompareOp, Expr)> =
        repeat(0.., (delimited(ws, compare_op, ws), additive)).parse_next(input)?;
    if rest.is_empty() {
        Ok(first)
    } else {
        Ok(Expr::Compare {
            first: Box::new(first),
            rest,
        })
    }
}

fn compare_op(input: &mut &str) -> ModalResult<CompareOp> {
    alt((
        "==".value(CompareOp::Eq),
        "!=".value(CompareOp::Ne),
        "<=".value(CompareOp::Le),
        ">=".value(CompareOp::Ge),
        "<".value(CompareOp::Lt),
        ">".value(CompareOp::Gt),
        (keyword("not"), ws, keyword("in")).value(CompareOp::NotIn),
        keyword("in").value(CompareOp::In),
    ))
    .parse_next(input)
}

fn additive(input: &mut &str) -> ModalResult<Expr> {
    let first = term(input)?;
    let rest: Vec<(BinaryOp, Expr)> = repeat(
        0..,
        (
            delimited(
                ws,
                alt(('+'.value(BinaryOp::Add), '-'.value(BinaryOp::Sub))),
                ws,
            ),
            term,
        ),
    )
    .parse_next(input)?;
    Ok(fold_binary(first, rest))
}

fn term(input: &mut &str) -> ModalResult<Expr> {
    let first = unary(input)?;
    let rest: Vec<(BinaryOp, Expr)> = repeat(
        0..,
        (
            delimited(
                ws,
                alt((
                    "//".value(BinaryOp::FloorDiv),
                    '*'.value(BinaryOp::Mul),
                    '/'.value(BinaryOp::Div),
                    '%'.value(BinaryOp::Mod),
                )),
                ws,
            ),
            unary,
        ),
    )
    .parse_next(input)?;
    Ok(fold_binary(first, rest))
}

/// Fold a left-associative operator chain.
fn fold_binary(first: Expr, rest: Vec<(BinaryOp, Expr)>) -> Expr {
    rest.into_iter()
        .fold(first, |left, (op, right)| Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
}

fn unary(input: &mut &str) -> ModalResult<Expr> {
    alt((
        preceded(('-', ws), unary).map(|e| Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(e),
        }),
        preceded(('+', ws), unary).map(|e| Expr::Unary {
            op: UnaryOp::Pos,
            operand: Box::new(e),
        }),
        postfix,
    ))
    .parse_next(input)
}

/// Parse an atom followed by any number of `.name`, `[index]` and `(args)`.
fn postfix(input: &mut &str) -> ModalResult<Expr> {
    let mut expr = atom(input)?;
    loop {
        let checkpoint = *input;
        ws(input)?;

        if let Some(name) = opt(preceded(('.', ws), identifier)).parse_next(input)? {
            expr = Expr::Attribute {
                target: Box::new(expr),
                name: name.to_string(),
            };
        } else if let Some(index) =
            opt(delimited(('[', ws), expression, (ws, ']'))).parse_next(input)?
        {
            expr = Expr::Index {
                target: Box::new(expr),
                index: Box::new(index),
            };
        } else if let Some(args) = opt(call_args).parse_next(input)? {
            expr = Expr::Call {
                function: Box::new(expr),
                args,
            };
        } else {
            *input = checkpoint;
            return Ok(expr);
        }
    }
}

/// Parse call arguments: (arg1, arg2, ...)
fn call_args(input: &mut &str) -> ModalResult<Vec<Expr>> {
    ('(', ws).parse_next(input)?;
    let args: Vec<Expr> = separated(0.., expression, (ws, ',', ws)).parse_next(input)?;
    (ws, opt(','), ws, ')').parse_next(input)?;
    Ok(args)
}

fn atom(input: &mut &str) -> ModalResult<Expr> {
    alt((
        number,
        string_literal.map(|s| Expr::Literal(Value::Str(s))),
        list_literal,
        parenthesized,
        name_or_constant,
    ))
    .parse_next(input)
}

/// Parse an integer or float literal.
fn number(input: &mut &str) -> ModalResult<Expr> {
    let text: &str = (
        digit1,
        opt(('.', digit0)),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)?;

    if text.contains(['.', 'e', 'E']) {
        text.parse::<f64>()
            .map(|f| Expr::Literal(Value::Float(f)))
            .map_err(|_| ErrMode::Cut(ContextError::new()))
    } else {
        text.parse::<i64>()
            .map(|n| Expr::Literal(Value::Int(n)))
            .map_err(|_| ErrMode::Cut(ContextError::new()))
    }
}

fn string_literal(input: &mut &str) -> ModalResult<String> {
    alt((quoted('\''), quoted('"'))).parse_next(input)
}

/// A string delimited by `quote`, with backslash escapes.
fn quoted<'i>(quote: char) -> impl FnMut(&mut &'i str) -> ModalResult<String> {
    move |input: &mut &'i str| {
        one_of(quote).parse_next(input)?;
        let mut text = String::new();
        loop {
            match any.parse_next(input)? {
                c if c == quote => return Ok(text),
                '\\' => {
                    let escaped = any.parse_next(input)?;
                    text.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '0' => '\0',
                        other => other,
                    });
                }
                c => text.push(c),
            }
        }
    }
}

/// Parse a list literal: [a, b, ...]
fn list_literal(input: &mut &str) -> ModalResult<Expr> {
    ('[', ws).parse_next(input)?;
    let items: Vec<Expr> = separated(0.., expression, (ws, ',', ws)).parse_next(input)?;
    (ws, opt(','), ws, ']').parse_next(input)?;
    Ok(Expr::List(items))
}

/// Parse `(expr)` or a tuple `()`, `(a,)`, `(a, b)`. Tuples become lists.
fn parenthesized(input: &mut &str) -> ModalResult<Expr> {
    ('(', ws).parse_next(input)?;
    let mut items: Vec<Expr> = separated(0.., expression, (ws, ',', ws)).parse_next(input)?;
    let trailing_comma = opt((ws, ',')).parse_next(input)?.is_some();
    (ws, ')').parse_next(input)?;

    if items.len() == 1
        && !trailing_comma
        && let Some(inner) = items.pop()
    {
        return Ok(inner);
    }
    Ok(Expr::List(items))
}

fn name_or_constant(input: &mut &str) -> ModalResult<Expr> {
    identifier
        .map(|name: &str| match name {
            "True" => Expr::Literal(Value::Bool(true)),
            "False" => Expr::Literal(Value::Bool(false)),
            "None" => Expr::Literal(Value::None),
            _ => Expr::Name(name.to_string()),
        })
        .parse_next(input)
}

/// Parse an identifier.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (one_of(is_ident_start), take_while(0.., is_ident_cont))
        .take()
        .parse_next(input)
}

/// Check if a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier.
fn is_ident_cont(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
