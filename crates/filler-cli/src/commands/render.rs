//! Implementation of the `filler render` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use filler::{Context, Template, Value};
use miette::{miette, IntoDiagnostic, Report, Result};
use serde::Serialize;
use serde_json::Value as Json;
use tracing::debug;

use super::MarkerArgs;
use crate::output::FillerDiagnostic;

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template file to render
    pub file: PathBuf,

    /// JSON file whose top-level object becomes the context
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// Variables in name=value format (repeatable, overrides --context)
    #[arg(short = 'D', long = "define", value_parser = parse_key_val)]
    pub defines: Vec<(String, String)>,

    #[command(flatten)]
    pub markers: MarkerArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for render results.
#[derive(Serialize)]
pub struct RenderResult {
    pub output: String,
}

/// Parse a key=value variable string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid variable format '{}': expected name=value", s))?;
    Ok((key.to_string(), value.to_string()))
}

/// Integers first, then floats, otherwise the raw string.
fn parse_define(raw: String) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        Value::Int(n)
    } else if let Ok(f) = raw.parse::<f64>() {
        Value::Float(f)
    } else {
        Value::Str(raw)
    }
}

/// Convert parsed JSON into a template value.
fn from_json(json: Json) -> Value {
    match json {
        Json::Null => Value::None,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::Str(s),
        Json::Array(items) => Value::List(items.into_iter().map(from_json).collect()),
        Json::Object(map) => Value::Map(map.into_iter().map(|(k, v)| (k, from_json(v))).collect()),
    }
}

/// Build the render context from `--context` and `-D` flags.
fn load_context(args: &RenderArgs) -> Result<Context> {
    let mut context = Context::new();

    if let Some(path) = &args.context {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Cannot read context file {}: {}", path.display(), e))?;
        let json: Json = serde_json::from_str(&content)
            .map_err(|e| miette!("Invalid JSON in {}: {}", path.display(), e))?;
        let Json::Object(map) = json else {
            return Err(miette!(
                "Context file {} must contain a JSON object",
                path.display()
            ));
        };
        context.extend(map.into_iter().map(|(k, v)| (k, from_json(v))));
    }

    for (key, raw) in &args.defines {
        context.insert(key.clone(), parse_define(raw.clone()));
    }

    debug!(variables = context.len(), "loaded context");
    Ok(context)
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> Result<i32> {
    let content = read_to_string(&args.file)
        .into_diagnostic()
        .map_err(|e| miette!("Cannot read template {}: {}", args.file.display(), e))?;
    let markers = args.markers.markers();

    let template = match Template::parse_with(&content, &markers) {
        Ok(template) => template,
        Err(e) => {
            let diagnostic =
                FillerDiagnostic::from_parse_error(&args.file, &content, &markers, &e);
            eprintln!("{:?}", Report::new(diagnostic));
            return Ok(exitcode::DATAERR);
        }
    };

    let mut context = load_context(&args)?;

    match template.render(&mut context) {
        Ok(output) => {
            if args.json {
                let result = RenderResult { output };
                println!("{}", serde_json::to_string_pretty(&result).into_diagnostic()?);
            } else {
                print!("{}", output);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                match FillerDiagnostic::from_render_error(&args.file, &content, &markers, &e) {
                    Some(diagnostic) => eprintln!("{:?}", Report::new(diagnostic)),
                    None => eprintln!("Render error: {}", e),
                }
            }
            Ok(exitcode::DATAERR)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use filler::{DEFAULT_CLOSE, DEFAULT_OPEN};
    use tempfile::TempDir;

    use super::*;

    fn args_for(dir: &TempDir, template: &str) -> RenderArgs {
        let file = dir.path().join("page.txt");
        fs::write(&file, template).unwrap();
        RenderArgs {
            file,
            context: None,
            defines: vec![("x".to_string(), "1".to_string())],
            markers: MarkerArgs {
                open: DEFAULT_OPEN.to_string(),
                close: DEFAULT_CLOSE.to_string(),
            },
            json: false,
        }
    }

    #[test]
    fn test_render_exit_codes() {
        let dir = TempDir::new().unwrap();
        assert_eq!(run_render(args_for(&dir, "{% if x %}y{% endif %}")).unwrap(), exitcode::OK);
        assert_eq!(run_render(args_for(&dir, "{% if x %}y")).unwrap(), exitcode::DATAERR);
        assert_eq!(run_render(args_for(&dir, "{{missing}}")).unwrap(), exitcode::DATAERR);
    }

    #[test]
    fn test_parse_define() {
        assert_eq!(parse_define("42".into()), Value::Int(42));
        assert_eq!(parse_define("1.5".into()), Value::Float(1.5));
        assert_eq!(parse_define("hi".into()), Value::from("hi"));
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert!(parse_key_val("novalue").is_err());
    }

    #[test]
    fn test_from_json() {
        let json: Json = serde_json::from_str(r#"{"n": 1, "x": 2.5, "l": [true, null]}"#).unwrap();
        let value = from_json(json);
        assert_eq!(value.to_string(), "{'l': [True, None], 'n': 1, 'x': 2.5}");
    }
}
