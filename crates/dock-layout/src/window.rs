// ABOUTME: Window entity: a tab group that is either docked in the grid or floating.
// ABOUTME: Tracks tab order, the active tab, placement, and stacking order.

use dock_core::{Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stacking order given to windows that were never focused
pub const BASE_Z_INDEX: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// Occupies a named grid area. The name is empty until a layout assigns one.
    Docked { area: String },
    Floating { position: Point, dimension: Size },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub(crate) id: WindowId,
    pub(crate) kind: Option<String>,
    pub(crate) panels: Vec<String>,
    pub(crate) current: usize,
    pub(crate) placement: Placement,
    pub(crate) z_index: u32,
}

impl Window {
    /// A docked window waiting for an area. Repeated panels are dropped.
    pub fn new<I, S>(panels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for panel in panels {
            let panel = panel.into();
            if !unique.contains(&panel) {
                unique.push(panel);
            }
        }
        Self {
            id: WindowId(0),
            kind: None,
            panels: unique,
            current: 0,
            placement: Placement::Docked {
                area: String::new(),
            },
            z_index: BASE_Z_INDEX,
        }
    }

    pub fn floating<I, S>(panels: I, rect: Rect) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut window = Self::new(panels);
        window.set_floating(rect);
        window
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.set_grid_area(area);
        self
    }

    /// Out-of-range indices select the last panel
    pub fn with_current(mut self, current: usize) -> Self {
        self.current = current.min(self.panels.len().saturating_sub(1));
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Optional tag carried for the host
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn panels(&self) -> &[String] {
        &self.panels
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_panel(&self) -> Option<&str> {
        self.panels.get(self.current).map(String::as_str)
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn z_index(&self) -> u32 {
        self.z_index
    }

    pub fn is_docked(&self) -> bool {
        matches!(self.placement, Placement::Docked { .. })
    }

    pub fn is_floating(&self) -> bool {
        matches!(self.placement, Placement::Floating { .. })
    }

    pub fn area(&self) -> Option<&str> {
        match &self.placement {
            Placement::Docked { area } if !area.is_empty() => Some(area),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<Point> {
        match self.placement {
            Placement::Floating { position, .. } => Some(position),
            Placement::Docked { .. } => None,
        }
    }

    pub fn dimension(&self) -> Option<Size> {
        match self.placement {
            Placement::Floating { dimension, .. } => Some(dimension),
            Placement::Docked { .. } => None,
        }
    }

    pub fn rect(&self) -> Option<Rect> {
        match self.placement {
            Placement::Floating {
                position,
                dimension,
            } => Some(Rect::from_parts(position, dimension)),
            Placement::Docked { .. } => None,
        }
    }

    pub fn contains_panel(&self, panel: &str) -> bool {
        self.panels.iter().any(|p| p == panel)
    }

    pub fn panel_index(&self, panel: &str) -> Option<usize> {
        self.panels.iter().position(|p| p == panel)
    }

    pub fn change_current(&mut self, index: usize) -> bool {
        if index < self.panels.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    /// Swap two tabs. The active tab stays active wherever it moves.
    pub fn reorder_panels(&mut self, first: &str, second: &str) -> bool {
        let (Some(a), Some(b)) = (self.panel_index(first), self.panel_index(second)) else {
            return false;
        };
        self.panels.swap(a, b);
        if self.current == a {
            self.current = b;
        } else if self.current == b {
            self.current = a;
        }
        true
    }

    /// Dock into `area`, dropping any floating geometry
    pub fn set_grid_area(&mut self, area: impl Into<String>) {
        self.placement = Placement::Docked { area: area.into() };
    }

    pub(crate) fn set_floating(&mut self, rect: Rect) {
        self.placement = Placement::Floating {
            position: rect.position(),
            dimension: rect.dimension(),
        };
    }

    /// Exchange identities so each window keeps the other's slot in the list
    pub(crate) fn swap_identity(a: &mut Window, b: &mut Window) {
        std::mem::swap(&mut a.id, &mut b.id);
    }
}
