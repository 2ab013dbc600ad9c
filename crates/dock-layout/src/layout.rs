// ABOUTME: Layout engine that owns the docked grid and the window list.
// ABOUTME: Opens, closes, splits, merges, floats, moves, resizes and focuses windows.

use dock_core::{Point, Rect, Side, Size, WindowMetrics};

use crate::defaults::default_template;
use crate::grid::{Grid, GridError};
use crate::resize::MoveSideArgs;
use crate::window::{Placement, Window, WindowId};

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Window not found: {0}")]
    WindowNotFound(WindowId),

    #[error("Panel {panel:?} not found in window {window}")]
    PanelNotFound { window: WindowId, panel: String },

    #[error("Panel {0:?} is already open")]
    PanelAlreadyOpen(String),

    #[error("Window {0} is not floating")]
    NotFloating(WindowId),

    #[error("Window {0} is not docked")]
    NotDocked(WindowId),

    #[error("Window {0} cannot be combined with itself")]
    SameWindow(WindowId),

    #[error("Panel {panel:?} is the only panel in window {window}")]
    LastPanel { window: WindowId, panel: String },

    #[error("Window area {0:?} does not exist in the grid")]
    UnknownArea(String),

    #[error("Grid area {0:?} is claimed by more than one window")]
    DuplicateArea(String),

    #[error("Invalid grid template: {0}")]
    Grid(#[from] GridError),

    #[error("Invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Active tab after removing tab `removed` from `len` tabs where `current`
/// was active. `None` when the window has no tabs left.
pub fn next_focus_index(len: usize, current: usize, removed: usize) -> Option<usize> {
    if len <= 1 {
        return None;
    }
    if removed >= current {
        Some(current.min(len - 2))
    } else {
        Some(current - 1)
    }
}

fn pair_mut(windows: &mut [Window], a: usize, b: usize) -> (&mut Window, &mut Window) {
    if a < b {
        let (head, tail) = windows.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = windows.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    grid: Grid,
    windows: Vec<Window>,
    metrics: WindowMetrics,
    grid_template_areas: String,
    grid_template_rows: String,
    grid_template_columns: String,
    next_window_id: u64,
    next_area_id: u64,
}

impl Layout {
    /// Lay out `windows` in the built-in template for the number of docked
    /// windows. Windows whose area is missing or taken get a free area, and
    /// float when none is left.
    pub fn new(windows: Vec<Window>) -> Self {
        Self::with_metrics(windows, WindowMetrics::default())
    }

    pub fn with_metrics(windows: Vec<Window>, metrics: WindowMetrics) -> Self {
        let docked = windows.iter().filter(|w| w.is_docked()).count();
        let grid = default_template(docked).grid();
        Self::assemble(windows, grid, metrics.clone(), false)
            .unwrap_or_else(|_| Self::empty(metrics))
    }

    /// Lay out `windows` in an explicit grid. Every docked window that names
    /// an area must name a distinct one that exists in the grid.
    pub fn with_templates(
        windows: Vec<Window>,
        areas: &str,
        rows: &str,
        columns: &str,
        metrics: WindowMetrics,
    ) -> Result<Self, LayoutError> {
        let grid = Grid::parse(areas, rows, columns)?;
        Self::assemble(windows, grid, metrics, true)
    }

    fn empty(metrics: WindowMetrics) -> Self {
        let mut layout = Self {
            grid: default_template(1).grid(),
            windows: Vec::new(),
            metrics,
            grid_template_areas: String::new(),
            grid_template_rows: String::new(),
            grid_template_columns: String::new(),
            next_window_id: 1,
            next_area_id: 1,
        };
        layout.refresh_templates();
        layout
    }

    pub(crate) fn assemble(
        windows: Vec<Window>,
        grid: Grid,
        metrics: WindowMetrics,
        strict: bool,
    ) -> Result<Self, LayoutError> {
        let mut layout = Self::empty(metrics);
        layout.grid = grid;

        let mut claimed: Vec<String> = Vec::new();
        for mut window in windows {
            if window.panels.is_empty() {
                tracing::warn!("Dropping window without panels");
                continue;
            }
            window.id = layout.allocate_window_id();
            window.current = window.current.min(window.panels.len() - 1);

            if let Some(area) = window.area().map(str::to_string) {
                if !layout.grid.contains_area(&area) {
                    if strict {
                        return Err(LayoutError::UnknownArea(area));
                    }
                    tracing::warn!("Window area {:?} is not in the grid, reassigning", area);
                    window.set_grid_area("");
                } else if claimed.contains(&area) {
                    if strict {
                        return Err(LayoutError::DuplicateArea(area));
                    }
                    tracing::warn!("Window area {:?} is already taken, reassigning", area);
                    window.set_grid_area("");
                } else {
                    claimed.push(area);
                }
            }
            layout.windows.push(window);
        }

        let mut free = layout
            .grid
            .area_names()
            .into_iter()
            .filter(|name| !claimed.contains(name));
        for index in 0..layout.windows.len() {
            let unplaced = matches!(
                &layout.windows[index].placement,
                Placement::Docked { area } if area.is_empty()
            );
            if !unplaced {
                continue;
            }
            match free.next() {
                Some(area) => layout.windows[index].set_grid_area(area),
                None => {
                    let rect = Rect::from_parts(
                        layout.cascade_position(),
                        layout.metrics.default_dimension(),
                    );
                    tracing::warn!(
                        "No grid area left for window {}, floating it",
                        layout.windows[index].id
                    );
                    layout.windows[index].set_floating(rect);
                    layout.focus_index(index);
                }
            }
        }

        layout.refresh_templates();
        Ok(layout)
    }

    pub fn grid_template_areas(&self) -> &str {
        &self.grid_template_areas
    }

    pub fn grid_template_rows(&self) -> &str {
        &self.grid_template_rows
    }

    pub fn grid_template_columns(&self) -> &str {
        &self.grid_template_columns
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn metrics(&self) -> &WindowMetrics {
        &self.metrics
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn window_by_panel(&self, panel: &str) -> Option<&Window> {
        self.windows.iter().find(|w| w.contains_panel(panel))
    }

    pub fn docked_windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter().filter(|w| w.is_docked())
    }

    pub fn floating_windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter().filter(|w| w.is_floating())
    }

    /// Every panel in some window, in window then tab order
    pub fn shown_panels(&self) -> Vec<&str> {
        self.windows
            .iter()
            .flat_map(|w| w.panels.iter().map(String::as_str))
            .collect()
    }

    /// The visible tab of each window
    pub fn active_panels(&self) -> Vec<&str> {
        self.windows.iter().filter_map(Window::current_panel).collect()
    }

    /// Panels from `registry` that no window shows
    pub fn hidden_panels<'a, I>(&self, registry: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        registry
            .into_iter()
            .filter(|panel| self.window_by_panel(panel).is_none())
            .collect()
    }

    /// Raise a floating window above every other floating window. Returns
    /// false if the window is docked or already on top.
    pub fn focus_window(&mut self, id: WindowId) -> Result<bool, LayoutError> {
        let index = self.index_of(id)?;
        Ok(self.focus_index(index))
    }

    /// Make tab `index` the active one. Out of range indices are ignored.
    pub fn select_panel(&mut self, id: WindowId, index: usize) -> Result<bool, LayoutError> {
        Ok(self.window_mut(id)?.change_current(index))
    }

    pub fn reorder_panels(
        &mut self,
        id: WindowId,
        first: &str,
        second: &str,
    ) -> Result<(), LayoutError> {
        let window = self.window_mut(id)?;
        if window.reorder_panels(first, second) {
            return Ok(());
        }
        let panel = if window.contains_panel(first) {
            second
        } else {
            first
        };
        Err(LayoutError::PanelNotFound {
            window: id,
            panel: panel.to_string(),
        })
    }

    /// Open a panel that no window shows in a new floating window at the
    /// first cascade position not covered by another window.
    pub fn open_hidden_panel(&mut self, panel: &str) -> Result<WindowId, LayoutError> {
        if self.window_by_panel(panel).is_some() {
            return Err(LayoutError::PanelAlreadyOpen(panel.to_string()));
        }
        let rect = Rect::from_parts(self.cascade_position(), self.metrics.default_dimension());
        self.create_independent_window(None, panel, rect)
    }

    /// Add `panel` as the active tab of a window. A panel already in that
    /// window is just selected.
    pub fn open_panel_in_window(&mut self, id: WindowId, panel: &str) -> Result<(), LayoutError> {
        let index = self.index_of(id)?;
        if self
            .window_by_panel(panel)
            .is_some_and(|owner| owner.id != id)
        {
            return Err(LayoutError::PanelAlreadyOpen(panel.to_string()));
        }

        let window = &mut self.windows[index];
        match window.panel_index(panel) {
            Some(existing) => window.current = existing,
            None => {
                window.panels.push(panel.to_string());
                window.current = window.panels.len() - 1;
            }
        }
        self.focus_index(index);
        tracing::debug!("Opened panel {:?} in window {}", panel, id);
        Ok(())
    }

    /// Remove a tab. Closing the last tab removes the window.
    pub fn close_panel(&mut self, id: WindowId, panel: &str) -> Result<(), LayoutError> {
        let index = self.index_of(id)?;
        let window = &mut self.windows[index];
        let removed = window
            .panel_index(panel)
            .ok_or_else(|| LayoutError::PanelNotFound {
                window: id,
                panel: panel.to_string(),
            })?;

        let next = next_focus_index(window.panels.len(), window.current, removed);
        window.panels.remove(removed);
        match next {
            Some(current) => {
                window.current = current;
                Ok(())
            }
            None => {
                tracing::debug!("Last panel closed, removing window {}", id);
                self.remove_window(id, None)
            }
        }
    }

    /// Take a window out of the grid. With `floating_rect` the window floats
    /// at that rectangle, otherwise it is deleted. A vacated grid area is
    /// handed to its neighbours.
    pub fn remove_window(
        &mut self,
        id: WindowId,
        floating_rect: Option<Rect>,
    ) -> Result<(), LayoutError> {
        let index = self.index_of(id)?;
        let vacated = self.windows[index].area().map(str::to_string);
        match floating_rect {
            Some(rect) => {
                self.windows[index].set_floating(rect);
                self.focus_index(index);
            }
            None => {
                self.windows.remove(index);
            }
        }
        if let Some(area) = vacated {
            self.release_area(&area);
        }
        self.refresh_templates();
        Ok(())
    }

    pub fn float_window(&mut self, id: WindowId, rect: Rect) -> Result<(), LayoutError> {
        self.remove_window(id, Some(rect))
    }

    pub fn close_window(&mut self, id: WindowId) -> Result<(), LayoutError> {
        self.remove_window(id, None)
    }

    /// Fold the tabs of `source` into `target`. The surviving window keeps the
    /// source's place in the list and the target's grid placement, and shows
    /// the tab that was active in the source. Returns the survivor's id.
    pub fn merge_window(
        &mut self,
        source: WindowId,
        target: WindowId,
    ) -> Result<WindowId, LayoutError> {
        if source == target {
            return Err(LayoutError::SameWindow(source));
        }
        let source_index = self.index_of(source)?;
        let target_index = self.index_of(target)?;

        self.windows.swap(source_index, target_index);
        let (survivor, absorbed) = pair_mut(&mut self.windows, source_index, target_index);
        Window::swap_identity(survivor, absorbed);

        let absorbed = self.windows.remove(target_index);
        let survivor_index = if source_index > target_index {
            source_index - 1
        } else {
            source_index
        };

        let vacated = absorbed.area().map(str::to_string);
        let active = absorbed.current_panel().map(str::to_string);
        let survivor = &mut self.windows[survivor_index];
        for panel in absorbed.panels {
            if !survivor.panels.contains(&panel) {
                survivor.panels.push(panel);
            }
        }
        if let Some(current) = active.and_then(|panel| survivor.panel_index(&panel)) {
            survivor.current = current;
        }
        let merged = survivor.id;

        self.focus_index(survivor_index);
        if let Some(area) = vacated {
            self.release_area(&area);
        }
        self.refresh_templates();
        tracing::debug!("Merged window {} into window {}", source, target);
        Ok(merged)
    }

    /// Dock window `id` beside the docked window `hover` by splitting the
    /// hovered area in half on `side`. The window's previous area, if any, is
    /// handed to its neighbours.
    pub fn create_grid_window(
        &mut self,
        id: WindowId,
        hover: WindowId,
        side: Side,
    ) -> Result<(), LayoutError> {
        if id == hover {
            return Err(LayoutError::SameWindow(id));
        }
        let index = self.index_of(id)?;
        let hover_area = self.hover_area(hover)?;
        let previous = self.windows[index].area().map(str::to_string);

        let new_area = self.allocate_area_name();
        if !self.grid.split_area(&hover_area, side, &new_area) {
            return Err(LayoutError::UnknownArea(hover_area));
        }
        self.windows[index].set_grid_area(new_area.clone());
        if let Some(area) = previous {
            self.release_area(&area);
        }
        self.refresh_templates();
        tracing::debug!("Docked window {} {} of window {} as {}", id, side, hover, new_area);
        Ok(())
    }

    /// Tear a tab out into its own floating window at `rect`. With no source
    /// window the panel is opened fresh. When the torn tab was the visible one
    /// the new window takes over the source's id and place in the list, and
    /// the source continues under a fresh id. Returns the new window's id.
    pub fn create_independent_window(
        &mut self,
        source: Option<WindowId>,
        panel: &str,
        rect: Rect,
    ) -> Result<WindowId, LayoutError> {
        let source_index = match source {
            Some(id) => {
                let index = self.index_of(id)?;
                if !self.windows[index].contains_panel(panel) {
                    return Err(LayoutError::PanelNotFound {
                        window: id,
                        panel: panel.to_string(),
                    });
                }
                Some(index)
            }
            None => None,
        };

        let mut window = Window::floating([panel], rect);
        window.id = self.allocate_window_id();
        self.windows.push(window);
        let new_index = self.windows.len() - 1;
        self.focus_index(new_index);

        let Some(source_index) = source_index else {
            self.refresh_templates();
            tracing::debug!("Opened panel {:?} in a floating window", panel);
            return Ok(self.windows[new_index].id);
        };

        let (new_id, source_id) =
            if self.windows[source_index].current_panel() == Some(panel) {
                self.windows.swap(source_index, new_index);
                let (torn, rest) = pair_mut(&mut self.windows, source_index, new_index);
                Window::swap_identity(torn, rest);
                (self.windows[source_index].id, self.windows[new_index].id)
            } else {
                (self.windows[new_index].id, self.windows[source_index].id)
            };
        self.close_panel(source_id, panel)?;
        tracing::debug!("Tore panel {:?} out into window {}", panel, new_id);
        Ok(new_id)
    }

    /// Move one tab of `source` into a new docked window beside `target`.
    /// Returns the new window's id.
    pub fn dock_panel(
        &mut self,
        source: WindowId,
        panel: &str,
        target: WindowId,
        side: Side,
    ) -> Result<WindowId, LayoutError> {
        let source_index = self.index_of(source)?;
        let source_window = &self.windows[source_index];
        if !source_window.contains_panel(panel) {
            return Err(LayoutError::PanelNotFound {
                window: source,
                panel: panel.to_string(),
            });
        }
        if source == target && source_window.panels.len() == 1 {
            return Err(LayoutError::LastPanel {
                window: source,
                panel: panel.to_string(),
            });
        }
        let hover_area = self.hover_area(target)?;

        let new_area = self.allocate_area_name();
        if !self.grid.split_area(&hover_area, side, &new_area) {
            return Err(LayoutError::UnknownArea(hover_area));
        }
        let mut window = Window::new([panel]).with_area(new_area);
        window.id = self.allocate_window_id();
        let id = window.id;
        self.windows.push(window);

        self.close_panel(source, panel)?;
        self.refresh_templates();
        tracing::debug!("Docked panel {:?} {} of window {}", panel, side, target);
        Ok(id)
    }

    /// Shift a floating window, clamping its position to non-negative values
    pub fn move_window(&mut self, id: WindowId, delta: Point) -> Result<(), LayoutError> {
        let window = self.window_mut(id)?;
        let Placement::Floating { position, .. } = &mut window.placement else {
            return Err(LayoutError::NotFloating(id));
        };
        *position = Point::new((position.x + delta.x).max(0.0), (position.y + delta.y).max(0.0));
        Ok(())
    }

    /// Apply a resize delta `(dx, dy, dwidth, dheight)` to a floating window.
    ///
    /// An axis that would shrink below the minimum keeps both its position and
    /// size. A position pushed past zero is clamped and the size on that axis
    /// is left unchanged. Returns whether anything moved.
    pub fn change_window_rect(&mut self, id: WindowId, delta: Rect) -> Result<bool, LayoutError> {
        let min_width = self.metrics.min_width;
        let min_height = self.metrics.min_height;
        let window = self.window_mut(id)?;
        let Placement::Floating {
            position,
            dimension,
        } = &mut window.placement
        else {
            return Err(LayoutError::NotFloating(id));
        };

        let width = dimension.width + delta.width;
        let height = dimension.height + delta.height;
        let x = if width < min_width {
            position.x
        } else {
            position.x + delta.x
        };
        let y = if height < min_height {
            position.y
        } else {
            position.y + delta.y
        };

        let next_position = Point::new(x.max(0.0), y.max(0.0));
        let next_dimension = Size::new(
            if width < min_width || x < 0.0 {
                dimension.width
            } else {
                width
            },
            if height < min_height || y < 0.0 {
                dimension.height
            } else {
                height
            },
        );
        let changed = next_position != *position || next_dimension != *dimension;
        *position = next_position;
        *dimension = next_dimension;
        Ok(changed)
    }

    /// Drag the `side` border of a docked window. The move is refused when it
    /// would squeeze an area below the minimum size, break an area out of its
    /// rectangle, or squeeze a window's area out of the grid.
    pub fn move_side(
        &mut self,
        id: WindowId,
        side: Side,
        args: &MoveSideArgs,
    ) -> Result<bool, LayoutError> {
        let index = self.index_of(id)?;
        let area = self.windows[index]
            .area()
            .map(str::to_string)
            .ok_or(LayoutError::NotDocked(id))?;

        let mut candidate = self.grid.clone();
        if !candidate.move_border(&area, side, args, &self.metrics) {
            return Ok(false);
        }
        if let Err(err) = candidate.validate() {
            tracing::debug!("Rejected border move for window {}: {}", id, err);
            return Ok(false);
        }
        let lost = self
            .windows
            .iter()
            .filter_map(Window::area)
            .find(|area| !candidate.contains_area(area));
        if let Some(area) = lost {
            tracing::debug!("Rejected border move that removes area {:?}", area);
            return Ok(false);
        }

        // A crossed track whose only area had no window duplicates its neighbour
        if candidate.collapse() {
            tracing::debug!("Merged tracks left identical by a border move");
        }
        self.grid = candidate;
        self.refresh_templates();
        Ok(true)
    }

    /// Delete floating windows that lie entirely outside `container`.
    /// Returns the ids of the removed windows.
    pub fn remove_outside_windows(&mut self, container: Rect) -> Vec<WindowId> {
        let outside: Vec<WindowId> = self
            .windows
            .iter()
            .filter(|w| w.rect().is_some_and(|rect| container.is_outside(&rect)))
            .map(|w| w.id)
            .collect();
        if !outside.is_empty() {
            tracing::info!("Removing {} windows outside the container", outside.len());
            self.windows.retain(|w| !outside.contains(&w.id));
        }
        outside
    }

    fn index_of(&self, id: WindowId) -> Result<usize, LayoutError> {
        self.windows
            .iter()
            .position(|w| w.id == id)
            .ok_or(LayoutError::WindowNotFound(id))
    }

    fn window_mut(&mut self, id: WindowId) -> Result<&mut Window, LayoutError> {
        self.windows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(LayoutError::WindowNotFound(id))
    }

    fn hover_area(&self, hover: WindowId) -> Result<String, LayoutError> {
        let index = self.index_of(hover)?;
        self.windows[index]
            .area()
            .map(str::to_string)
            .ok_or(LayoutError::NotDocked(hover))
    }

    fn focus_index(&mut self, index: usize) -> bool {
        if self.windows[index].is_docked() {
            return false;
        }
        let top = self
            .windows
            .iter()
            .enumerate()
            .filter(|(i, w)| *i != index && w.is_floating())
            .map(|(_, w)| w.z_index)
            .max();
        match top {
            Some(top) if self.windows[index].z_index <= top => {
                self.windows[index].z_index = top + 1;
                true
            }
            _ => false,
        }
    }

    fn allocate_window_id(&mut self) -> WindowId {
        let id = WindowId(self.next_window_id);
        self.next_window_id += 1;
        id
    }

    fn allocate_area_name(&mut self) -> String {
        loop {
            let name = format!("w{}", self.next_area_id);
            self.next_area_id += 1;
            if !self.grid.contains_area(&name) {
                return name;
            }
        }
    }

    fn cascade_position(&self) -> Point {
        let gap = self.metrics.cascade_gap;
        let mut position = self.metrics.default_position();
        if gap <= 0.0 {
            return position;
        }
        while self.windows.iter().any(|w| w.position() == Some(position)) {
            position = Point::new(position.x + gap, position.y + gap);
        }
        position
    }

    fn release_area(&mut self, area: &str) {
        match self.grid.reclaim_area(area) {
            Some(side) => tracing::debug!("Area {:?} absorbed from the {} side", area, side),
            None => tracing::debug!("Area {:?} left vacant", area),
        }
    }

    fn refresh_templates(&mut self) {
        self.grid_template_areas = self.grid.template_areas();
        self.grid_template_rows = self.grid.template_rows();
        self.grid_template_columns = self.grid.template_columns();
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
