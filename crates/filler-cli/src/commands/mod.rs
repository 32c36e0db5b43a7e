//! CLI command implementations.

mod check;
mod render;
mod tree;

use clap::Args;
use filler::{Markers, DEFAULT_CLOSE, DEFAULT_OPEN};

pub use check::{run_check, CheckArgs};
pub use render::{run_render, RenderArgs};
pub use tree::{run_tree, TreeArgs};

/// Block tag marker options shared by every command.
#[derive(Debug, Args)]
pub struct MarkerArgs {
    /// Marker opening a block tag
    #[arg(long, default_value = DEFAULT_OPEN)]
    pub open: String,

    /// Marker closing a block tag
    #[arg(long, default_value = DEFAULT_CLOSE)]
    pub close: String,
}

impl MarkerArgs {
    pub fn markers(&self) -> Markers {
        Markers::new(self.open.as_str(), self.close.as_str())
    }
}
