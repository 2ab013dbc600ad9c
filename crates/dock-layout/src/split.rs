// ABOUTME: Structural grid edits: splitting an area in two and reclaiming a vacated one.
// ABOUTME: Column operations run as row operations on the transposed grid.

use dock_core::{Axis, Side};

use crate::grid::{find_limit_position, Boundary, Grid};

impl Grid {
    /// Split `area` at the midpoint of its extent and give the half on `side`
    /// to `new_area`. Returns false if `area` is not in the grid.
    pub(crate) fn split_area(&mut self, area: &str, side: Side, new_area: &str) -> bool {
        match side.axis() {
            Axis::Rows => self.split_rows(area, side.is_leading(), new_area),
            Axis::Columns => {
                let mut flipped = self.transposed();
                let split = flipped.split_rows(area, side.is_leading(), new_area);
                if split {
                    *self = flipped.transposed();
                }
                split
            }
        }
    }

    fn split_rows(&mut self, area: &str, leading: bool, new_area: &str) -> bool {
        let Some(bounds) = self.boundary(area) else {
            return false;
        };
        let heights: Vec<f64> = bounds.rows.iter().map(|&row| self.rows[row]).collect();
        let Some(limit) = find_limit_position(&heights, bounds.height / 2.0) else {
            return false;
        };
        let limit_row = bounds.rows[limit.index];

        // The track holding the midpoint is duplicated and cut at the midpoint
        let copy = self.areas[limit_row].clone();
        self.areas.insert(limit_row, copy);
        for &col in &bounds.columns {
            for (i, &row) in bounds.rows.iter().enumerate() {
                if leading && i <= limit.index {
                    self.areas[row][col] = new_area.to_string();
                } else if !leading && i >= limit.index {
                    self.areas[row + 1][col] = new_area.to_string();
                }
            }
        }
        self.rows[limit_row] = (self.rows[limit_row] - limit.margin).max(0.0);
        self.rows.insert(limit_row + 1, limit.margin);
        true
    }

    /// Give the cells of `area` to the neighbours along one of its edges, tried
    /// top, left, right, bottom. An edge qualifies when every neighbour along it
    /// lies within the area's span on that edge. Redundant tracks are collapsed
    /// either way. Returns the side that absorbed the area, if any.
    pub(crate) fn reclaim_area(&mut self, area: &str) -> Option<Side> {
        let cells = self.find_cells(area);
        let bounds = self.boundary(area)?;

        let absorbed = [Side::Top, Side::Left, Side::Right, Side::Bottom]
            .into_iter()
            .find(|&side| self.edge_absorbs(&bounds, side));

        if let Some(side) = absorbed {
            for cell in &cells {
                let (row, col) = match side {
                    Side::Top => (bounds.min_row - 1, cell.col),
                    Side::Bottom => (bounds.max_row + 1, cell.col),
                    Side::Left => (cell.row, bounds.min_col - 1),
                    Side::Right => (cell.row, bounds.max_col + 1),
                };
                self.areas[cell.row][cell.col] = self.areas[row][col].clone();
            }
        }
        self.collapse();
        absorbed
    }

    /// Distinct names in the track just outside `side` of `bounds`
    fn neighbours(&self, bounds: &Boundary, side: Side) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut push = |name: &String| {
            if !names.contains(name) {
                names.push(name.clone());
            }
        };
        match side {
            Side::Top => {
                if let Some(row) = bounds.min_row.checked_sub(1).map(|r| &self.areas[r]) {
                    bounds.columns.iter().for_each(|&col| push(&row[col]));
                }
            }
            Side::Bottom => {
                if let Some(row) = self.areas.get(bounds.max_row + 1) {
                    bounds.columns.iter().for_each(|&col| push(&row[col]));
                }
            }
            Side::Left => {
                if let Some(col) = bounds.min_col.checked_sub(1) {
                    bounds.rows.iter().for_each(|&row| push(&self.areas[row][col]));
                }
            }
            Side::Right => {
                for &row in &bounds.rows {
                    if let Some(name) = self.areas[row].get(bounds.max_col + 1) {
                        push(name);
                    }
                }
            }
        }
        names
    }

    fn edge_absorbs(&self, bounds: &Boundary, side: Side) -> bool {
        let names = self.neighbours(bounds, side);
        !names.is_empty()
            && names.iter().all(|name| {
                self.boundary(name).is_some_and(|other| match side.axis() {
                    Axis::Rows => other.min_col >= bounds.min_col && other.max_col <= bounds.max_col,
                    Axis::Columns => {
                        other.min_row >= bounds.min_row && other.max_row <= bounds.max_row
                    }
                })
            })
    }
}
