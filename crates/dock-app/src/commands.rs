// ABOUTME: Subcommand handlers that apply CLI operations to a layout.
// ABOUTME: Resolves panels to windows and reports whether the layout needs saving.

use anyhow::{bail, Context, Result};
use dock_core::{Axis, DockConfig, Rect};
use dock_layout::{Layout, MoveSideArgs, Placement, Window, WindowId};

use crate::cli::Commands;

fn owner(layout: &Layout, panel: &str) -> Result<WindowId> {
    layout
        .window_by_panel(panel)
        .map(Window::id)
        .with_context(|| format!("No window shows panel {panel:?}"))
}

/// Apply one command. Returns true when the layout changed.
pub fn run(layout: &mut Layout, command: Commands, config: &DockConfig) -> Result<bool> {
    match command {
        Commands::Show { json } => {
            if json {
                println!("{}", layout.to_json_pretty()?);
            } else {
                print!("{}", describe(layout));
            }
            Ok(false)
        }

        Commands::Reset { groups } => {
            let windows = groups
                .iter()
                .map(|group| {
                    Window::new(
                        group
                            .split(',')
                            .map(str::trim)
                            .filter(|panel| !panel.is_empty()),
                    )
                })
                .collect();
            *layout = Layout::with_metrics(windows, config.window.clone());
            Ok(true)
        }

        Commands::Open { panel, into } => {
            match into {
                Some(into) => {
                    let target = owner(layout, &into)?;
                    layout.open_panel_in_window(target, &panel)?;
                }
                None => {
                    layout.open_hidden_panel(&panel)?;
                }
            }
            Ok(true)
        }

        Commands::Close { panel } => {
            let id = owner(layout, &panel)?;
            layout.close_panel(id, &panel)?;
            Ok(true)
        }

        Commands::Float {
            panel,
            x,
            y,
            width,
            height,
        } => {
            let id = owner(layout, &panel)?;
            layout.float_window(id, Rect::new(x, y, width, height))?;
            Ok(true)
        }

        Commands::Split {
            panel,
            beside,
            side,
        } => {
            let source = owner(layout, &panel)?;
            let target = owner(layout, &beside)?;
            let tabs = layout.window(source).map_or(0, |w| w.panels().len());
            if tabs > 1 {
                layout.dock_panel(source, &panel, target, side)?;
            } else {
                layout.create_grid_window(source, target, side)?;
            }
            Ok(true)
        }

        Commands::Merge { panel, into } => {
            let source = owner(layout, &panel)?;
            let target = owner(layout, &into)?;
            layout.merge_window(source, target)?;
            Ok(true)
        }

        Commands::Resize {
            panel,
            side,
            delta,
            extent,
            gap,
        } => {
            let id = owner(layout, &panel)?;
            let args = match side.axis() {
                Axis::Rows => MoveSideArgs {
                    movement_y: delta,
                    height: extent,
                    gap,
                    ..Default::default()
                },
                Axis::Columns => MoveSideArgs {
                    movement_x: delta,
                    width: extent,
                    gap,
                    ..Default::default()
                },
            };
            if !layout.move_side(id, side, &args)? {
                bail!("The {side} border of the window showing {panel:?} cannot move that far");
            }
            Ok(true)
        }

        Commands::Prune { width, height } => {
            let removed = layout.remove_outside_windows(Rect::new(0.0, 0.0, width, height));
            println!("Removed {} windows", removed.len());
            Ok(!removed.is_empty())
        }
    }
}

/// Human readable summary of the grid and its windows
pub fn describe(layout: &Layout) -> String {
    let mut out = format!(
        "areas:   {}\nrows:    {}\ncolumns: {}\n",
        layout.grid_template_areas(),
        layout.grid_template_rows(),
        layout.grid_template_columns()
    );

    for window in layout.windows() {
        let tabs: Vec<String> = window
            .panels()
            .iter()
            .enumerate()
            .map(|(index, panel)| {
                if index == window.current() {
                    format!("{panel}*")
                } else {
                    panel.clone()
                }
            })
            .collect();
        let placement = match window.placement() {
            Placement::Docked { area } => format!("docked in {area}"),
            Placement::Floating {
                position,
                dimension,
            } => format!(
                "floating at ({}, {}) {}x{} z{}",
                position.x,
                position.y,
                dimension.width,
                dimension.height,
                window.z_index()
            ),
        };
        out.push_str(&format!(
            "window {} {}: {}\n",
            window.id(),
            placement,
            tabs.join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dock_core::Side;

    fn sample() -> Layout {
        Layout::new(vec![Window::new(["editor", "notes"]), Window::new(["terminal"])])
    }

    #[test]
    fn reset_builds_one_window_per_group() {
        let mut layout = sample();
        let command = Commands::Reset {
            groups: vec!["a, b".to_string(), "c".to_string()],
        };
        assert!(run(&mut layout, command, &DockConfig::default()).unwrap());
        assert_eq!(layout.grid_template_areas(), r#""a b""#);
        assert_eq!(layout.windows()[0].panels(), ["a", "b"]);
    }

    #[test]
    fn split_tears_a_tab_out_of_a_group() {
        let mut layout = sample();
        let command = Commands::Split {
            panel: "notes".to_string(),
            beside: "terminal".to_string(),
            side: Side::Bottom,
        };
        run(&mut layout, command, &DockConfig::default()).unwrap();
        assert_eq!(layout.windows().len(), 3);
        assert_eq!(layout.window_by_panel("editor").unwrap().panels(), ["editor"]);
        assert!(layout.window_by_panel("notes").unwrap().is_docked());
    }

    #[test]
    fn unknown_panel_is_an_error() {
        let mut layout = sample();
        let command = Commands::Close {
            panel: "missing".to_string(),
        };
        let err = run(&mut layout, command, &DockConfig::default()).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn blocked_resize_is_reported() {
        let mut layout = sample();
        let command = Commands::Resize {
            panel: "editor".to_string(),
            side: Side::Left,
            delta: 50.0,
            extent: 600.0,
            gap: 0.0,
        };
        assert!(run(&mut layout, command, &DockConfig::default()).is_err());
    }

    #[test]
    fn describe_marks_active_tabs() {
        let mut layout = sample();
        layout.open_hidden_panel("search").unwrap();
        let text = describe(&layout);
        assert!(text.contains("areas:   \"a b\""));
        assert!(text.contains("docked in a: editor*, notes"));
        assert!(text.contains("floating at (100, 100) 300x150 z1: search*"));
        assert_eq!(text.lines().count(), 3 + layout.windows().len());
        assert!(text.starts_with("areas:   \"a b\"\nrows:    1fr\ncolumns: 1fr 1fr\n"));
    }
}
