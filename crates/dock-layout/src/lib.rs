// ABOUTME: Dockable panel layout engine built on a named-area grid.
// ABOUTME: Splits, merges, floats and resizes tabbed windows and persists the result as JSON.

mod cache;
mod defaults;
mod drag;
pub mod grid;
mod hit;
mod layout;
mod resize;
mod snapshot;
mod split;
mod window;

pub use cache::{CacheError, LayoutCache};
pub use defaults::{default_template, Template, DEFAULT_TEMPLATES};
pub use drag::{DebounceTimer, DragSession, DropOutcome, HoverProbe, HoverTarget};
pub use grid::{Grid, GridError};
pub use hit::{classify, detect_position, DropZone};
pub use layout::{next_focus_index, Layout, LayoutError};
pub use resize::MoveSideArgs;
pub use snapshot::{LayoutSnapshot, WindowSnapshot};
pub use window::{Placement, Window, WindowId, BASE_Z_INDEX};
