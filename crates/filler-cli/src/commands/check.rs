//! Implementation of the `filler check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use filler::parse_with;
use miette::{IntoDiagnostic, Report, Result};
use owo_colors::{OwoColorize, Stream};

use super::MarkerArgs;
use crate::output::table::{format_check_table, FileStatus};
use crate::output::FillerDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Template files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub markers: MarkerArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let markers = args.markers.markers();
    let mut statuses = Vec::new();

    for path in &args.files {
        let file = path.display().to_string();
        let content = match read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                statuses.push(FileStatus {
                    file,
                    tags: None,
                    error: Some(e.to_string()),
                });
                continue;
            }
        };

        match parse_with(&content, &markers) {
            Ok(tree) => statuses.push(FileStatus {
                file,
                tags: Some(tree.tag_count()),
                error: None,
            }),
            Err(e) => {
                if !args.json {
                    let diagnostic =
                        FillerDiagnostic::from_parse_error(path, &content, &markers, &e);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                statuses.push(FileStatus {
                    file,
                    tags: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let failed = statuses.iter().filter(|s| !s.is_ok()).count();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&statuses).into_diagnostic()?);
    } else {
        println!("{}", format_check_table(&statuses));
        if failed == 0 {
            let summary = format!("{} file(s) ok", statuses.len());
            println!("{}", summary.if_supports_color(Stream::Stdout, |t| t.green()));
        } else {
            let summary = format!("{} of {} file(s) failed", failed, statuses.len());
            println!("{}", summary.if_supports_color(Stream::Stdout, |t| t.red()));
        }
    }

    if failed == 0 {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}
