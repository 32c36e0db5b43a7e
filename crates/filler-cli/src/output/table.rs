//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use serde::Serialize;

/// Check result for a single template file.
#[derive(Debug, Serialize)]
pub struct FileStatus {
    /// Path as given on the command line.
    pub file: String,
    /// Number of block tags, when the file parsed.
    pub tags: Option<usize>,
    /// The structure error, when it did not.
    pub error: Option<String>,
}

impl FileStatus {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Format check results as an ASCII table.
pub fn format_check_table(statuses: &[FileStatus]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Status", "Tags"]);

    for status in statuses {
        let state = if status.is_ok() { "ok" } else { "error" };
        table.add_row(vec![
            status.file.clone(),
            state.to_string(),
            status
                .tags
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
        ]);
    }

    table
}
