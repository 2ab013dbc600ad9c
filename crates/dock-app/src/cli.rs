// ABOUTME: Command-line arguments for the dockgrid tool.
// ABOUTME: Global layout file selection plus one subcommand per layout operation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dock_core::Side;

/// Inspect and edit a persisted dock layout
#[derive(Parser, Debug)]
#[command(name = "dockgrid")]
#[command(author, version, about = "Inspect and edit dock layouts")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Layout file to work on instead of the cached layout
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Cache version used to locate the cached layout
    #[arg(long, global = true, default_value = "default")]
    pub cache_version: String,

    /// Config file with window metrics and hover settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the grid templates and the window list
    Show {
        /// Print the stored JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Replace the layout with one docked window per group
    Reset {
        /// Comma separated panels of one window, repeat for more windows
        #[arg(short, long = "group")]
        groups: Vec<String>,
    },

    /// Open a panel, floating unless a target is given
    Open {
        panel: String,

        /// Add the panel as a tab of the window showing this panel
        #[arg(long)]
        into: Option<String>,
    },

    /// Close a panel, removing its window when it was the last tab
    Close { panel: String },

    /// Float the window showing a panel
    Float {
        panel: String,
        #[arg(long, default_value_t = 100.0)]
        x: f64,
        #[arg(long, default_value_t = 100.0)]
        y: f64,
        #[arg(long, default_value_t = 300.0)]
        width: f64,
        #[arg(long, default_value_t = 150.0)]
        height: f64,
    },

    /// Dock a panel beside the window showing another panel
    Split {
        panel: String,

        #[arg(long)]
        beside: String,

        /// top, right, bottom or left
        #[arg(long)]
        side: Side,
    },

    /// Fold the window showing a panel into another window
    Merge {
        panel: String,

        #[arg(long)]
        into: String,
    },

    /// Drag one border of a docked window
    Resize {
        panel: String,

        #[arg(long)]
        side: Side,

        /// Border movement in pixels, positive is down or right
        #[arg(long, allow_hyphen_values = true)]
        delta: f64,

        /// Rendered size of the window along the moved axis
        #[arg(long, default_value_t = 600.0)]
        extent: f64,

        /// Gap between rendered grid tracks
        #[arg(long, default_value_t = 0.0)]
        gap: f64,
    },

    /// Remove floating windows outside a container of the given size
    Prune {
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
    },
}
