//! Implementation of the `filler tree` command.

use std::fmt::{Result as FmtResult, Write};
use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use filler::{Node, Template};
use miette::{miette, IntoDiagnostic, Result};
use owo_colors::{OwoColorize, Stream};

use super::MarkerArgs;
use crate::output::FillerDiagnostic;

/// Arguments for the tree command.
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Template file to inspect
    pub file: PathBuf,

    #[command(flatten)]
    pub markers: MarkerArgs,

    /// Output the tree as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the tree command.
pub fn run_tree(args: TreeArgs) -> Result<i32> {
    let content = read_to_string(&args.file)
        .into_diagnostic()
        .map_err(|e| miette!("Cannot read template {}: {}", args.file.display(), e))?;
    let markers = args.markers.markers();

    let template = Template::parse_with(&content, &markers).map_err(|e| {
        FillerDiagnostic::from_parse_error(&args.file, &content, &markers, &e)
    })?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(template.root()).into_diagnostic()?
        );
    } else {
        let mut out = String::new();
        outline(template.root(), 0, &mut out).into_diagnostic()?;
        print!("{}", out);
    }
    Ok(exitcode::OK)
}

/// One line per tag, children indented under their block.
fn outline(node: &Node, depth: usize, out: &mut String) -> FmtResult {
    let indent = "  ".repeat(depth);
    let keyword = node.tag.keyword();
    let keyword = keyword.if_supports_color(Stream::Stdout, |t| t.cyan());
    if node.arguments.is_empty() {
        writeln!(out, "{}{} @{}", indent, keyword, node.offset)?;
    } else {
        writeln!(
            out,
            "{}{} {} @{}",
            indent,
            keyword,
            node.expression(),
            node.offset
        )?;
    }
    for child in &node.children {
        outline(child, depth + 1, out)?;
    }
    if let Some(branch) = &node.else_branch {
        outline(branch, depth, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline() {
        owo_colors::set_override(false);
        let template =
            Template::parse("{% for x in xs %}{% if x %}a{% elif y %}b{% else %}c{% endif %}{% endfor %}")
                .unwrap();
        let mut out = String::new();
        outline(template.root(), 0, &mut out).unwrap();
        assert_eq!(
            out,
            "pass @0\n  for x in xs @0\n    if x @17\n    elif y @28\n    else @41\n"
        );
    }
}
