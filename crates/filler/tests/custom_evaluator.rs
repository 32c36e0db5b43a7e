//! Integration tests for plugging in a different expression evaluator.

use std::cell::RefCell;

use filler::{
    Context, Evaluator, ExprError, Template, Value, context, execute_with, fill_with, parse,
    render_with,
};

/// Looks names up verbatim; no operators.
struct Lookup;

impl Evaluator for Lookup {
    fn evaluate(&self, source: &str, context: &Context) -> Result<Value, ExprError> {
        let name = source.trim();
        context
            .get(name)
            .cloned()
            .ok_or_else(|| ExprError::Custom(format!("no variable {name}")))
    }
}

#[test]
fn test_struct_evaluator() {
    let mut context = context! { "who" => "world", "items" => vec![1, 2] };
    let out = render_with(
        "hi {{ who }}{% for i in items %} {{i}}{% endfor %}",
        &mut context,
        &Lookup,
    )
    .unwrap();
    assert_eq!(out, "hi world 1 2");
}

#[test]
fn test_custom_errors_pass_through() {
    let err = fill_with("{{ 1 + 1 }}", &Context::new(), &Lookup).unwrap_err();
    assert_eq!(err, ExprError::Custom("no variable 1 + 1".to_string()));
}

#[test]
fn test_closure_evaluator_sees_every_expression() {
    let seen = RefCell::new(Vec::new());
    let recorder = |source: &str, _: &Context| -> Result<Value, ExprError> {
        seen.borrow_mut().push(source.to_string());
        Ok(Value::List(vec![Value::Int(1)]))
    };

    let tree = parse("{% if cond %}{% for x in xs %}{{ x }}{% endfor %}{% endif %}").unwrap();
    execute_with(&tree, &mut Context::new(), &recorder).unwrap();
    assert_eq!(*seen.borrow(), vec!["cond", "xs", " x "]);
}

#[test]
fn test_template_render_with() {
    let upper = |source: &str, _: &Context| -> Result<Value, ExprError> {
        Ok(Value::from(source.trim().to_uppercase()))
    };
    let template = Template::parse("<{{ a }}|{{b}}>").unwrap();
    let out = template.render_with(&mut Context::new(), &upper).unwrap();
    assert_eq!(out, "<A|B>");
}
