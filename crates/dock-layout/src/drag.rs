// ABOUTME: Drag-and-drop session for moving a window onto another one.
// ABOUTME: Debounces the first drop target probe, then applies the drop to the layout.

use std::time::{Duration, Instant};

use dock_core::{HoverSettings, Point, Rect, Side};

use crate::hit::{classify, DropZone};
use crate::layout::{Layout, LayoutError};
use crate::window::WindowId;

/// One-shot timer with an explicit deadline, driven by the caller's clock
#[derive(Debug, Clone)]
pub struct DebounceTimer<T> {
    delay: Duration,
    deadline: Option<Instant>,
    pending: Option<T>,
}

impl<T> DebounceTimer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            pending: None,
        }
    }

    /// Restart the countdown, replacing any pending value
    pub fn arm(&mut self, now: Instant, value: T) {
        self.deadline = Some(now + self.delay);
        self.pending = Some(value);
    }

    pub fn clear(&mut self) {
        self.deadline = None;
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Take the pending value once the deadline has passed
    pub fn fire(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }
}

/// What the host measured under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverProbe {
    pub window: WindowId,
    pub docked: bool,
    /// Rendered rectangle of the window under the pointer
    pub rect: Rect,
    pub pointer: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverTarget {
    pub window: WindowId,
    pub zone: DropZone,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropOutcome {
    /// No drop target, the dragged window stays where it is
    Nothing,
    /// The dragged window was folded into this window
    Merged(WindowId),
    /// The dragged window was docked beside the target
    Docked { window: WindowId, side: Side },
}

#[derive(Debug, Clone)]
pub struct DragSession {
    dragged: WindowId,
    settings: HoverSettings,
    timer: DebounceTimer<HoverProbe>,
    hover: Option<HoverTarget>,
}

impl DragSession {
    pub fn new(dragged: WindowId, settings: HoverSettings) -> Self {
        let timer = DebounceTimer::new(settings.drop_detection_delay());
        Self {
            dragged,
            settings,
            timer,
            hover: None,
        }
    }

    pub fn dragged(&self) -> WindowId {
        self.dragged
    }

    pub fn hover(&self) -> Option<HoverTarget> {
        self.hover
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// Report one pointer move. `movement` is the delta since the previous
    /// move and `probe` the window under the pointer, if any.
    ///
    /// Until a target is established each probe restarts the debounce timer.
    /// Afterwards probes resolve immediately. A move longer than the cancel
    /// distance drops the current target.
    pub fn pointer_moved(
        &mut self,
        now: Instant,
        movement: Point,
        probe: Option<HoverProbe>,
    ) -> Option<HoverTarget> {
        self.timer.clear();
        match probe.filter(|probe| probe.window != self.dragged) {
            None => self.hover = None,
            Some(probe) if self.hover.is_some() => self.hover = Some(self.resolve(&probe)),
            Some(probe) => self.timer.arm(now, probe),
        }
        if movement.length() > self.settings.cancel_distance {
            self.hover = None;
        }
        self.hover
    }

    /// Resolve a debounced probe whose delay has passed
    pub fn tick(&mut self, now: Instant) -> Option<HoverTarget> {
        if let Some(probe) = self.timer.fire(now) {
            let target = self.resolve(&probe);
            tracing::debug!("Hovering window {} at {:?}", target.window, target.zone);
            self.hover = Some(target);
        }
        self.hover
    }

    pub fn cancel(&mut self) {
        self.timer.clear();
        self.hover = None;
    }

    /// Release the dragged window over the current target. Edge zones dock it
    /// beside the target, the header and center merge it into the target.
    pub fn drop_on(&mut self, layout: &mut Layout) -> Result<DropOutcome, LayoutError> {
        self.timer.clear();
        let Some(target) = self.hover.take() else {
            return Ok(DropOutcome::Nothing);
        };

        layout.focus_window(target.window)?;
        match target.zone.side() {
            Some(side) => {
                layout.create_grid_window(self.dragged, target.window, side)?;
                Ok(DropOutcome::Docked {
                    window: self.dragged,
                    side,
                })
            }
            None => {
                let merged = layout.merge_window(self.dragged, target.window)?;
                Ok(DropOutcome::Merged(merged))
            }
        }
    }

    fn resolve(&self, probe: &HoverProbe) -> HoverTarget {
        HoverTarget {
            window: probe.window,
            zone: classify(probe.docked, &probe.rect, probe.pointer, &self.settings),
        }
    }
}
