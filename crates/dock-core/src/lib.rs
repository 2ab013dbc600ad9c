// ABOUTME: Shared types and configuration for dockgrid.
// ABOUTME: Defines pixel geometry, grid sides, and config file handling.

pub mod config;
pub mod geometry;

pub use config::{ConfigError, DockConfig, HoverSettings, WindowMetrics};
pub use geometry::{Axis, Point, Rect, Side, Size};
