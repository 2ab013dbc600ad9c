// ABOUTME: JSON contract for persisted layouts.
// ABOUTME: Mirrors the host grid's template strings plus each window's panels and placement.

use serde::{Deserialize, Serialize};

use dock_core::{Point, Rect, Size, WindowMetrics};

use crate::defaults::default_template;
use crate::layout::{Layout, LayoutError};
use crate::window::{Placement, Window};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_template_areas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_template_rows: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_template_columns: Option<String>,
    #[serde(default)]
    pub windows: Vec<WindowSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    /// Empty for floating windows
    #[serde(default)]
    pub grid_area: String,
    #[serde(default)]
    pub current: usize,
    #[serde(default)]
    pub panels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<[f64; 2]>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl WindowSnapshot {
    /// A window with either position or dimension floats; the missing half
    /// comes from `metrics`.
    pub fn into_window(self, metrics: &WindowMetrics) -> Window {
        let mut window = Window::new(self.panels).with_current(self.current);
        window.kind = self.kind;
        if self.position.is_some() || self.dimension.is_some() {
            let position = self
                .position
                .map_or_else(|| metrics.default_position(), Point::from);
            let dimension = self
                .dimension
                .map_or_else(|| metrics.default_dimension(), Size::from);
            window.set_floating(Rect::from_parts(position, dimension));
        } else {
            window.set_grid_area(self.grid_area);
        }
        window
    }
}

impl From<&Window> for WindowSnapshot {
    fn from(window: &Window) -> Self {
        let (grid_area, position, dimension) = match &window.placement {
            Placement::Docked { area } => (area.clone(), None, None),
            Placement::Floating {
                position,
                dimension,
            } => (
                String::new(),
                Some((*position).into()),
                Some((*dimension).into()),
            ),
        };
        Self {
            grid_area,
            current: window.current,
            panels: window.panels.clone(),
            position,
            dimension,
            kind: window.kind.clone(),
        }
    }
}

impl LayoutSnapshot {
    /// Build a layout from this snapshot.
    ///
    /// With no templates at all the windows are laid out in the built-in
    /// template. Otherwise missing templates are filled from the built-in one
    /// and every window area must exist in the resulting grid.
    pub fn into_layout(self, metrics: WindowMetrics) -> Result<Layout, LayoutError> {
        let windows: Vec<Window> = self
            .windows
            .into_iter()
            .map(|window| window.into_window(&metrics))
            .collect();

        if self.grid_template_areas.is_none()
            && self.grid_template_rows.is_none()
            && self.grid_template_columns.is_none()
        {
            return Ok(Layout::with_metrics(windows, metrics));
        }

        let docked = windows.iter().filter(|w| w.is_docked()).count();
        let fallback = default_template(docked).grid();
        let areas = self
            .grid_template_areas
            .unwrap_or_else(|| fallback.template_areas());
        let rows = self
            .grid_template_rows
            .unwrap_or_else(|| fallback.template_rows());
        let columns = self
            .grid_template_columns
            .unwrap_or_else(|| fallback.template_columns());
        Layout::with_templates(windows, &areas, &rows, &columns, metrics)
    }
}

impl Layout {
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            grid_template_areas: Some(self.grid_template_areas().to_string()),
            grid_template_rows: Some(self.grid_template_rows().to_string()),
            grid_template_columns: Some(self.grid_template_columns().to_string()),
            windows: self.windows().iter().map(WindowSnapshot::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    pub fn to_json_pretty(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// `Ok(None)` for a JSON `null`
    pub fn from_json(text: &str, metrics: WindowMetrics) -> Result<Option<Self>, LayoutError> {
        let snapshot: Option<LayoutSnapshot> = serde_json::from_str(text)?;
        snapshot
            .map(|snapshot| snapshot.into_layout(metrics))
            .transpose()
    }

    /// Parse persisted layout text. `None` on null or invalid input, never a
    /// partial layout.
    pub fn parse(text: &str) -> Option<Self> {
        Self::parse_with(text, WindowMetrics::default())
    }

    pub fn parse_with(text: &str, metrics: WindowMetrics) -> Option<Self> {
        match Self::from_json(text, metrics) {
            Ok(layout) => layout,
            Err(err) => {
                tracing::warn!("Ignoring stored layout: {}", err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dock_core::Side;

    fn sample() -> Layout {
        let mut layout = Layout::new(vec![
            Window::new(["editor", "notes"]).with_current(1),
            Window::new(["terminal"]).with_kind("console"),
            Window::new(["files"]),
        ]);
        layout.open_hidden_panel("search").unwrap();
        let first = layout.windows()[0].id();
        let second = layout.windows()[1].id();
        layout.create_grid_window(second, first, Side::Bottom).unwrap();
        layout
    }

    #[test]
    fn json_roundtrip_preserves_layout() {
        let layout = sample();
        let json = layout.to_json().unwrap();
        let restored = Layout::parse(&json).unwrap();

        assert_eq!(restored.grid_template_areas(), layout.grid_template_areas());
        assert_eq!(restored.grid_template_rows(), layout.grid_template_rows());
        assert_eq!(restored.grid_template_columns(), layout.grid_template_columns());
        assert_eq!(restored.snapshot(), layout.snapshot());
    }

    #[test]
    fn json_uses_host_field_names() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["gridTemplateAreas"].is_string());
        assert_eq!(value["windows"][0]["current"], 1);
        assert_eq!(value["windows"][1]["type"], "console");
        assert_eq!(value["windows"][3]["position"][0], 100.0);
        assert!(value["windows"][0].get("position").is_none());
    }

    #[test]
    fn invalid_input_gives_no_layout() {
        assert!(Layout::parse("null").is_none());
        assert!(Layout::parse("{not json").is_none());
        assert!(Layout::parse(r#"{"gridTemplateAreas": "\"a b\" \"c\""}"#).is_none());
        assert!(Layout::parse(
            r#"{"gridTemplateAreas": "\"a\"", "gridTemplateRows": "1fr",
                "gridTemplateColumns": "1fr",
                "windows": [{"gridArea": "zz", "current": 0, "panels": ["p"]}]}"#
        )
        .is_none());
        assert!(matches!(
            Layout::from_json("[1, 2]", WindowMetrics::default()),
            Err(LayoutError::Json(_))
        ));
    }

    #[test]
    fn missing_templates_use_defaults() {
        let layout = Layout::parse(
            r#"{"windows": [{"current": 0, "panels": ["a"]}, {"current": 0, "panels": ["b"]}]}"#,
        )
        .unwrap();
        assert_eq!(layout.grid_template_areas(), r#""a b""#);
        assert_eq!(layout.windows()[1].area(), Some("b"));
    }

    #[test]
    fn half_floating_window_gets_default_dimension() {
        let layout = Layout::parse(
            r#"{"gridTemplateAreas": "\"a\"", "gridTemplateRows": "1fr",
                "gridTemplateColumns": "1fr",
                "windows": [
                    {"gridArea": "a", "current": 0, "panels": ["a"]},
                    {"gridArea": "", "current": 0, "panels": ["f"], "position": [40, 50]}
                ]}"#,
        )
        .unwrap();
        let floating = &layout.windows()[1];
        assert_eq!(floating.rect(), Some(Rect::new(40.0, 50.0, 300.0, 150.0)));
    }
}
