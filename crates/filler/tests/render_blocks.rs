//! Integration tests for executing block tags.

use std::collections::BTreeMap;

use filler::{Context, Template, Value, context, execute, parse, render};

fn sample() -> Context {
    context! { "a" => "alpha", "b" => "book", "d" => vec![5, 4, 3] }
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn test_text_without_tags_is_unchanged() {
    let src = "Some text.\n  Line two.";
    assert_eq!(render(src, &mut sample()).unwrap(), src);
}

#[test]
fn test_explicit_pass_block() {
    let out = render("[{% pass %}{{a}}{% endpass %}]", &mut sample()).unwrap();
    assert_eq!(out, "[alpha]");
}

// =============================================================================
// if / elif / else
// =============================================================================

#[test]
fn test_single_if() {
    let mut context = sample();
    let out = render(r#"a {% if a == "alpha" %}ok{% endif %} b"#, &mut context).unwrap();
    assert_eq!(out, "a ok b");
    let out = render(r#"a {% if b == "bad" %}bad{% endif %} b"#, &mut context).unwrap();
    assert_eq!(out, "a  b");
}

#[test]
fn test_if_else() {
    let mut context = sample();
    let out = render(
        r#"a {% if a == "alpha" %}ok{% else %}bad{% endif %} b"#,
        &mut context,
    )
    .unwrap();
    assert_eq!(out, "a ok b");
    let out = render(
        r#"a {% if a == "wrong" %}ok{% else %}bad{% endif %} b"#,
        &mut context,
    )
    .unwrap();
    assert_eq!(out, "a bad b");
}

#[test]
fn test_single_elif() {
    let src = "a {% if a == 1 %}1{% elif a == 2 %}2{% endif %} b";
    assert_eq!(render(src, &mut context! { "a" => 1 }).unwrap(), "a 1 b");
    assert_eq!(render(src, &mut context! { "a" => 2 }).unwrap(), "a 2 b");
    assert_eq!(render(src, &mut context! { "a" => 3 }).unwrap(), "a  b");
}

#[test]
fn test_elif_chain() {
    let tree = parse("a {% if a == 1 %}1{% elif a == 2 %}2{% elif a == 3 %}3{% else %}4{% endif %} b")
        .unwrap();
    for n in 1..=4 {
        let out = execute(&tree, &mut context! { "a" => n }).unwrap();
        assert_eq!(out, format!("a {n} b"));
    }
}

#[test]
fn test_only_first_true_branch_fires() {
    let src = "{% if x > 0 %}pos{% elif x > -5 %}small{% elif x > -10 %}mid{% else %}neg{% endif %}";
    assert_eq!(render(src, &mut context! { "x" => -3 }).unwrap(), "small");
    assert_eq!(render(src, &mut context! { "x" => -7 }).unwrap(), "mid");
    assert_eq!(render(src, &mut context! { "x" => -70 }).unwrap(), "neg");
}

#[test]
fn test_truthiness() {
    let src = "{% if v %}T{% else %}F{% endif %}";
    let cases: Vec<(Value, &str)> = vec![
        (Value::None, "F"),
        (Value::Int(0), "F"),
        (Value::Int(2), "T"),
        (Value::from(""), "F"),
        (Value::from("x"), "T"),
        (Value::List(vec![]), "F"),
        (Value::from(vec![0]), "T"),
        (Value::Float(0.0), "F"),
    ];
    for (value, expected) in cases {
        let mut context = Context::new();
        context.insert("v".to_string(), value);
        assert_eq!(render(src, &mut context).unwrap(), expected);
    }
}

#[test]
fn test_spaces_near_tags() {
    let out = render("a  {% if a == \"alpha\" %}\n ok  \n{% endif %} b", &mut sample()).unwrap();
    assert_eq!(out, "a  \n ok  \n b");
}

#[test]
fn test_false_branch_skips_its_expressions() {
    let out = render("{% if False %}{{missing}}{% endif %}ok", &mut Context::new()).unwrap();
    assert_eq!(out, "ok");
}

// =============================================================================
// for
// =============================================================================

#[test]
fn test_single_for() {
    let mut context = sample();
    let out = render("{% for i in range(3) %}{{i}}+{% endfor %}", &mut context).unwrap();
    assert_eq!(out, "0+1+2+");
    let out = render("{% for i in d %}{{i}}-{% endfor %}", &mut context).unwrap();
    assert_eq!(out, "5-4-3-");
}

#[test]
fn test_for_over_string_and_map() {
    let mut context = sample();
    let out = render("{% for c in b %}{{c}}.{% endfor %}", &mut context).unwrap();
    assert_eq!(out, "b.o.o.k.");

    let mut ages = BTreeMap::new();
    ages.insert("bob".to_string(), 30);
    ages.insert("amy".to_string(), 25);
    context.insert("ages".to_string(), Value::from(ages));
    let out = render("{% for k in ages %}{{k}}={{ages[k]}} {% endfor %}", &mut context).unwrap();
    assert_eq!(out, "amy=25 bob=30 ");
}

#[test]
fn test_for_over_empty_sequence() {
    let out = render("[{% for i in [] %}{{i}}{% endfor %}]", &mut Context::new()).unwrap();
    assert_eq!(out, "[]");
}

#[test]
fn test_index_counts_from_zero() {
    let out = render(
        "{% for x in ('p', 'q', 'r') %}{{index}}{{x}} {% endfor %}",
        &mut Context::new(),
    )
    .unwrap();
    assert_eq!(out, "0p 1q 2r ");
}

#[test]
fn test_nested_fors() {
    let out = render(
        "{% for i in range(2) %}{% for n in d %}{{i}}. {{n}}; {% endfor %}{% endfor %}",
        &mut sample(),
    )
    .unwrap();
    assert_eq!(out, "0. 5; 0. 4; 0. 3; 1. 5; 1. 4; 1. 3; ");
}

#[test]
fn test_outer_for_index() {
    let src = concat!(
        "{% for m in ('ab','cd') %}",
        "{% for i in d %}{% for n in range(2) %}",
        "{{outer.outer.index}}{{outer.index}}{{index}}={{m}}{{i}}{{n}} ",
        "{% endfor %}{% endfor %}{% endfor %}",
    );
    let out = render(src, &mut sample()).unwrap();
    assert_eq!(
        out,
        "000=ab50 001=ab51 010=ab40 011=ab41 020=ab30 021=ab31 \
         100=cd50 101=cd51 110=cd40 111=cd41 120=cd30 121=cd31 "
    );
}

#[test]
fn test_outer_of_top_level_loop_is_none() {
    let out = render(
        "{% for x in [1] %}{{outer.index}} {{outer.outer}}{% endfor %}",
        &mut Context::new(),
    )
    .unwrap();
    assert_eq!(out, "None None");
}

#[test]
fn test_trailing_text_sees_restored_index() {
    let mut context = context! { "index" => 99 };
    let out = render(
        "{% for x in range(2) %}{{index}}{% endfor %}after={{index}}",
        &mut context,
    )
    .unwrap();
    assert_eq!(out, "01after=99");
}

#[test]
fn test_loop_inside_if_branch() {
    let src = "{% if d %}{% for x in d %}{{x}}{% endfor %}!{% else %}none{% endif %}.";
    assert_eq!(render(src, &mut sample()).unwrap(), "543!.");
    let mut empty = context! { "d" => Vec::<i64>::new() };
    assert_eq!(render(src, &mut empty).unwrap(), "none.");
}

// =============================================================================
// Context after rendering
// =============================================================================

#[test]
fn test_index_and_outer_restored() {
    let mut context = sample();
    context.insert("index".to_string(), Value::Int(99));
    context.insert("outer".to_string(), Value::from("kept"));
    render(
        "{% for i in d %}{% for j in d %}{{index}}{% endfor %}{% endfor %}",
        &mut context,
    )
    .unwrap();
    assert_eq!(context["index"], Value::Int(99));
    assert_eq!(context["outer"], Value::from("kept"));
}

#[test]
fn test_absent_keys_stay_absent() {
    let mut context = sample();
    render("{% for i in d %}{{index}}{% endfor %}", &mut context).unwrap();
    assert!(!context.contains_key("index"));
    assert!(!context.contains_key("outer"));
}

#[test]
fn test_loop_variable_keeps_last_value() {
    let mut context = sample();
    let out = render("{% for i in d %}{% endfor %}{{i}}", &mut context).unwrap();
    assert_eq!(out, "3");
    assert_eq!(context["i"], Value::Int(3));
}

#[test]
fn test_loop_variable_overwrites_existing() {
    let mut context = context! { "x" => "before" };
    render("{% for x in [1, 2] %}{% endfor %}", &mut context).unwrap();
    assert_eq!(context["x"], Value::Int(2));
}

// =============================================================================
// Reuse
// =============================================================================

#[test]
fn test_tree_renders_many_contexts() {
    let template = Template::parse("{% for n in names %}<{{n}}>{% endfor %}").unwrap();
    let first = template
        .render(&mut context! { "names" => vec!["a", "b"] })
        .unwrap();
    let second = template.render(&mut context! { "names" => vec!["c"] }).unwrap();
    assert_eq!(first, "<a><b>");
    assert_eq!(second, "<c>");
}

#[test]
fn test_html_listing() {
    let mut planets = BTreeMap::new();
    planets.insert("earth".to_string(), Value::from(vec!["moon"]));
    planets.insert("mars".to_string(), Value::from(vec!["phobos", "deimos"]));
    planets.insert("venus".to_string(), Value::List(vec![]));
    let mut context = context! { "title" => "Planets", "planets" => planets };

    let src = "<h1>{{title}}</h1>
{% for planet in planets %}<p>{{index+1}}. {{planet}}</p>
{% if not planets[planet] %}<p>no satellites</p>
{% endif %}{% for satellite in planets[planet]%}<p>{{outer.index+1}}.{{index+1}}. {{satellite}}</p>
{% endfor %}{% endfor %}</body>";

    let out = render(src, &mut context).unwrap();
    insta::assert_snapshot!(out, @r"
    <h1>Planets</h1>
    <p>1. earth</p>
    <p>1.1. moon</p>
    <p>2. mars</p>
    <p>2.1. phobos</p>
    <p>2.2. deimos</p>
    <p>3. venus</p>
    <p>no satellites</p>
    </body>
    ");
}
