// ABOUTME: Border dragging between docked areas.
// ABOUTME: Converts pixel movement into track fractions and re-cuts tracks a border crosses.

use dock_core::{Axis, Side, WindowMetrics};

use crate::grid::Grid;

/// One step of a border drag, in host pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveSideArgs {
    pub movement_x: f64,
    pub movement_y: f64,
    /// Rendered width of the window being resized
    pub width: f64,
    /// Rendered height of the window being resized
    pub height: f64,
    /// Gap between rendered grid tracks
    pub gap: f64,
}

#[derive(Debug, Clone, Copy)]
struct BorderDrag {
    movement: f64,
    extent: f64,
    gap: f64,
    min_extent: f64,
}

impl Grid {
    /// Move the `side` border of `area` by the drag in `args`.
    ///
    /// Returns false when nothing changed: the area is unknown, the border is
    /// the outer grid edge, or an area next to the border is already at the
    /// minimum size. The result may still need validating by the caller.
    pub(crate) fn move_border(
        &mut self,
        area: &str,
        side: Side,
        args: &MoveSideArgs,
        metrics: &WindowMetrics,
    ) -> bool {
        match side.axis() {
            Axis::Rows => self.move_row_border(
                area,
                side.is_leading(),
                BorderDrag {
                    movement: args.movement_y,
                    extent: args.height,
                    gap: args.gap,
                    min_extent: metrics.min_height,
                },
            ),
            Axis::Columns => {
                let mut flipped = self.transposed();
                let moved = flipped.move_row_border(
                    area,
                    side.is_leading(),
                    BorderDrag {
                        movement: args.movement_x,
                        extent: args.width,
                        gap: args.gap,
                        min_extent: metrics.min_width,
                    },
                );
                if moved {
                    *self = flipped.transposed();
                }
                moved
            }
        }
    }

    fn move_row_border(&mut self, area: &str, leading: bool, drag: BorderDrag) -> bool {
        let Some(bounds) = self.boundary(area) else {
            return false;
        };
        if drag.movement == 0.0 || drag.extent <= 0.0 || bounds.height <= 0.0 {
            return false;
        }
        let index = if leading {
            bounds.min_row
        } else {
            bounds.max_row + 1
        };
        if index == 0 || index >= self.rows.len() {
            return false;
        }

        // Pixels per fraction unit
        let unit = drag.extent / bounds.height;
        let movement = drag.movement / unit;
        let gap = drag.gap / unit;
        let above = self.rows[index - 1] + movement;
        let below = self.rows[index] - movement;

        // Every area on the shrinking side must still be at least the minimum
        let shrinking_row = if drag.movement > 0.0 { index } else { index - 1 };
        let mut neighbours: Vec<&String> = self.areas[shrinking_row].iter().collect();
        neighbours.sort_unstable();
        neighbours.dedup();
        let crowded = neighbours.iter().any(|name| {
            self.boundary(name)
                .map_or(true, |other| other.height * unit < drag.min_extent)
        });
        if crowded {
            return false;
        }

        if above >= 0.0 && below >= 0.0 {
            self.rows[index - 1] = above;
            self.rows[index] = below;
            return true;
        }

        // The border passed a whole track. That track joins the growing side
        // and is re-cut from the track beyond it.
        let (overflow, kept, far, crossed, near) = if above < 0.0 {
            (above, below, index.checked_sub(2), index - 1, index)
        } else {
            (
                below,
                above,
                Some(index + 1).filter(|&row| row < self.rows.len()),
                index,
                index - 1,
            )
        };
        let Some(far) = far else {
            return false;
        };
        let carved = -overflow - gap;
        let far_size = self.rows[far] + overflow;
        if carved < 0.0 || far_size < 0.0 {
            return false;
        }

        self.rows[near] = (kept + overflow + gap).max(0.0);
        self.rows[crossed] = carved;
        self.rows[far] = far_size;
        for col in 0..self.areas[crossed].len() {
            let source = if col < bounds.min_col || col > bounds.max_col {
                far
            } else {
                near
            };
            self.areas[crossed][col] = self.areas[source][col].clone();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(areas: &str, rows: &str, columns: &str) -> Grid {
        Grid::parse(areas, rows, columns).unwrap()
    }

    fn vertical(movement: f64, height: f64) -> MoveSideArgs {
        MoveSideArgs {
            movement_y: movement,
            height,
            width: 400.0,
            ..Default::default()
        }
    }

    #[test]
    fn bottom_border_transfers_fraction() {
        let mut g = grid(r#""a" "b""#, "1fr 1fr", "1fr");
        let metrics = WindowMetrics::default();
        // "a" renders 400px tall for 1fr, so 100px is a quarter fraction
        assert!(g.move_border("a", Side::Bottom, &vertical(-100.0, 400.0), &metrics));
        assert_eq!(g.template_rows(), "0.75fr 1.25fr");
        assert_eq!(g.template_areas(), r#""a" "b""#);
    }

    #[test]
    fn top_border_moves_the_seam_above() {
        let mut g = grid(r#""a" "b""#, "1fr 1fr", "1fr");
        let metrics = WindowMetrics::default();
        assert!(g.move_border("b", Side::Top, &vertical(100.0, 400.0), &metrics));
        assert_eq!(g.template_rows(), "1.25fr 0.75fr");
    }

    #[test]
    fn outer_edges_do_not_move() {
        let mut g = grid(r#""a" "b""#, "1fr 1fr", "1fr");
        let metrics = WindowMetrics::default();
        assert!(!g.move_border("a", Side::Top, &vertical(-100.0, 400.0), &metrics));
        assert!(!g.move_border("b", Side::Bottom, &vertical(100.0, 400.0), &metrics));
        assert!(!g.move_border("a", Side::Left, &vertical(0.0, 400.0), &metrics));
        assert_eq!(g.template_rows(), "1fr 1fr");
    }

    #[test]
    fn crowded_neighbour_blocks_the_move() {
        let mut g = grid(r#""a" "b""#, "3fr 1fr", "1fr");
        let metrics = WindowMetrics::default();
        // "b" renders at 80px, below the 100px minimum height
        assert!(!g.move_border("a", Side::Bottom, &vertical(20.0, 240.0), &metrics));
        assert_eq!(g.template_rows(), "3fr 1fr");
    }

    #[test]
    fn column_border_uses_horizontal_movement() {
        let mut g = grid(r#""a b""#, "1fr", "1fr 1fr");
        let metrics = WindowMetrics::default();
        let args = MoveSideArgs {
            movement_x: 200.0,
            width: 800.0,
            height: 300.0,
            ..Default::default()
        };
        assert!(g.move_border("a", Side::Right, &args, &metrics));
        assert_eq!(g.template_columns(), "1.25fr 0.75fr");
        assert_eq!(g.template_rows(), "1fr");
    }

    #[test]
    fn border_crossing_a_track_recuts_it() {
        // "c" spans both rows on the right; "a" sits over a thin track of "b"
        let mut g = grid(r#""a c" "b c" "d c""#, "2fr 0.5fr 2fr", "1fr 1fr");
        let metrics = WindowMetrics {
            min_height: 10.0,
            ..WindowMetrics::default()
        };
        // "a" is 2fr tall at 200px: 100px per fraction. Moving its bottom
        // border by 100px overruns the 0.5fr track below by 0.5fr.
        assert!(g.move_border("a", Side::Bottom, &vertical(100.0, 200.0), &metrics));
        assert_eq!(g.template_rows(), "2.5fr 0.5fr 1.5fr");
        assert_eq!(g.template_areas(), r#""a c" "a c" "d c""#);
        assert!(g.validate().is_ok());
    }
}
