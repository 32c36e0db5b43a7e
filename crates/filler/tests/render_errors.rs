//! Integration tests for errors surfaced by rendering.

use filler::{
    Context, Error, ExprError, ParseError, RenderError, Tag, context, execute, parse, render,
};

#[test]
fn test_parse_errors_pass_through_render() {
    let err = render("{% if x %}", &mut Context::new()).unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError::UnclosedTag { tag: Tag::If, .. })
    ));
    assert_eq!(err.to_string(), "template tag 'if' is not closed");
}

#[test]
fn test_malformed_for_fails_at_execution() {
    let tree = parse("ab{% for x %}{% endfor %}").unwrap();
    let err = execute(&tree, &mut Context::new()).unwrap_err();
    assert_eq!(
        err,
        RenderError::MalformedFor {
            arguments: "x".to_string(),
            offset: 2,
        }
    );
    assert_eq!(err.offset(), Some(2));
}

#[test]
fn test_for_without_in_keyword() {
    let err = render("{% for x of xs %}{% endfor %}", &mut context! { "xs" => vec![1] })
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Render(RenderError::MalformedFor { .. })
    ));
    assert_eq!(
        err.to_string(),
        "malformed for tag 'x of xs': expected '<name> in <expression>'"
    );
}

#[test]
fn test_malformed_for_in_untaken_branch_is_ignored() {
    let out = render("{% if False %}{% for x %}{% endfor %}{% endif %}ok", &mut Context::new())
        .unwrap();
    assert_eq!(out, "ok");
}

#[test]
fn test_for_over_non_iterable() {
    let err = render("{% for x in n %}{% endfor %}", &mut context! { "n" => 5 }).unwrap_err();
    assert_eq!(
        err,
        Error::Render(RenderError::Expression(ExprError::NotIterable {
            type_name: "int"
        }))
    );
}

#[test]
fn test_expression_errors_surface_unchanged() {
    let err = render("{% if 1 / 0 %}{% endif %}", &mut Context::new()).unwrap_err();
    assert_eq!(
        err,
        Error::Render(RenderError::Expression(ExprError::DivisionByZero))
    );
    assert_eq!(err.to_string(), "division by zero");
}

#[test]
fn test_error_in_trailing_text() {
    let err = render("{% if True %}{% endif %}{{ghost}}", &mut Context::new()).unwrap_err();
    assert_eq!(err.to_string(), "name 'ghost' is not defined");
}

#[test]
fn test_failed_loop_restores_context() {
    let mut context = context! { "index" => 99, "d" => vec![1, 0] };
    let err = render("{% for x in d %}{{10 // x}}{% endfor %}", &mut context).unwrap_err();
    assert_eq!(
        err,
        Error::Render(RenderError::Expression(ExprError::DivisionByZero))
    );
    assert_eq!(context["index"].as_int(), Some(99));
    assert!(!context.contains_key("outer"));
}

#[test]
fn test_unknown_function_suggests() {
    let err = render("{{ lenn(x) }}", &mut context! { "x" => "abc" }).unwrap_err();
    assert_eq!(err.to_string(), "unknown function 'lenn', did you mean: len?");
}
