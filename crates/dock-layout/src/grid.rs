// ABOUTME: Area matrix utilities for the docked grid.
// ABOUTME: Parses and prints grid templates, measures areas, and collapses redundant tracks.

/// One area name per grid cell, row-major
pub type AreaMatrix = Vec<Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub col: usize,
    pub row: usize,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("Grid template has no cells")]
    Empty,

    #[error("Row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid track size: {0:?}")]
    InvalidTrack(String),

    #[error("Area {0:?} is not a rectangle")]
    NotRectangular(String),

    #[error("Template has {found} {axis}, grid has {expected}")]
    TrackCount {
        axis: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Extent of one area: the rows and columns it spans and their summed fractions
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
    /// Distinct rows, ascending
    pub rows: Vec<usize>,
    /// Distinct columns, ascending
    pub columns: Vec<usize>,
    pub width: f64,
    pub height: f64,
}

/// Where a running sum over track sizes first reaches a limit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimitPosition {
    pub index: usize,
    /// How far the running sum overshoots the limit at `index`
    pub margin: f64,
}

/// Parse `"a b" "c d"` style text (quoted rows or one row per line)
pub fn parse_areas(text: &str) -> Result<AreaMatrix, GridError> {
    let matrix: AreaMatrix = text
        .split(['"', '\'', '\n'])
        .filter(|row| !row.trim().is_empty())
        .map(|row| row.split_whitespace().map(str::to_string).collect())
        .collect();

    let expected = matrix.first().map(Vec::len).ok_or(GridError::Empty)?;
    for (row, cells) in matrix.iter().enumerate() {
        if cells.len() != expected {
            return Err(GridError::Ragged {
                row,
                expected,
                found: cells.len(),
            });
        }
    }
    Ok(matrix)
}

pub fn stringify_areas(matrix: &AreaMatrix) -> String {
    matrix
        .iter()
        .map(|row| format!("\"{}\"", row.join(" ")))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a `1fr 2.5fr` track list into its coefficients
pub fn parse_axis(text: &str) -> Result<Vec<f64>, GridError> {
    let tracks = text
        .split_whitespace()
        .map(parse_track)
        .collect::<Result<Vec<_>, _>>()?;
    if tracks.is_empty() {
        return Err(GridError::Empty);
    }
    Ok(tracks)
}

fn parse_track(token: &str) -> Result<f64, GridError> {
    let number = token.strip_suffix("fr").unwrap_or(token);
    number
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or_else(|| GridError::InvalidTrack(token.to_string()))
}

pub fn stringify_axis(tracks: &[f64]) -> String {
    tracks
        .iter()
        .map(|track| format!("{track}fr"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn find_cells(matrix: &AreaMatrix, area: &str) -> Vec<CellPos> {
    let mut cells = Vec::new();
    for (row, names) in matrix.iter().enumerate() {
        for (col, name) in names.iter().enumerate() {
            if name == area {
                cells.push(CellPos { col, row });
            }
        }
    }
    cells
}

pub fn boundary(cells: &[CellPos], rows: &[f64], columns: &[f64]) -> Option<Boundary> {
    let mut row_set: Vec<usize> = cells.iter().map(|cell| cell.row).collect();
    row_set.sort_unstable();
    row_set.dedup();
    let mut column_set: Vec<usize> = cells.iter().map(|cell| cell.col).collect();
    column_set.sort_unstable();
    column_set.dedup();

    let min_row = *row_set.first()?;
    let max_row = *row_set.last()?;
    let min_col = *column_set.first()?;
    let max_col = *column_set.last()?;
    let height: f64 = row_set.iter().filter_map(|&row| rows.get(row)).sum();
    let width: f64 = column_set.iter().filter_map(|&col| columns.get(col)).sum();

    Some(Boundary {
        min_row,
        max_row,
        min_col,
        max_col,
        rows: row_set,
        columns: column_set,
        width,
        height,
    })
}

/// Accumulate `tracks` until the running total reaches `limit`.
///
/// If rounding keeps the total just short of the limit the last track is
/// reported with a zero margin.
pub fn find_limit_position(tracks: &[f64], limit: f64) -> Option<LimitPosition> {
    let mut total = 0.0;
    for (index, track) in tracks.iter().enumerate() {
        total += track;
        if total >= limit {
            return Some(LimitPosition {
                index,
                margin: total - limit,
            });
        }
    }
    let index = tracks.len().checked_sub(1)?;
    Some(LimitPosition {
        index,
        margin: (total - limit).max(0.0),
    })
}

pub fn transpose(matrix: &AreaMatrix) -> AreaMatrix {
    let width = matrix.first().map_or(0, Vec::len);
    (0..width)
        .map(|col| matrix.iter().map(|row| row[col].clone()).collect())
        .collect()
}

/// Merge identical neighbouring rows or columns, summing their fractions,
/// until none are left. Returns whether anything was merged.
pub fn collapse_duplicates(
    matrix: &mut AreaMatrix,
    rows: &mut Vec<f64>,
    columns: &mut Vec<f64>,
) -> bool {
    let mut changed = false;
    loop {
        let duplicate_row = (1..matrix.len()).find(|&i| matrix[i - 1] == matrix[i]);
        if let Some(i) = duplicate_row {
            matrix.remove(i);
            let merged = rows.remove(i);
            rows[i - 1] += merged;
            changed = true;
            continue;
        }

        let width = matrix.first().map_or(0, Vec::len);
        let duplicate_column =
            (1..width).find(|&i| matrix.iter().all(|row| row[i - 1] == row[i]));
        if let Some(i) = duplicate_column {
            for row in matrix.iter_mut() {
                row.remove(i);
            }
            let merged = columns.remove(i);
            columns[i - 1] += merged;
            changed = true;
            continue;
        }

        return changed;
    }
}

/// Distinct area names in reading order
pub fn area_names(matrix: &AreaMatrix) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in matrix.iter().flatten() {
        if !names.contains(name) {
            names.push(name.clone());
        }
    }
    names
}

/// Every area must fill its bounding box exactly
pub fn check_rectangles(matrix: &AreaMatrix) -> Result<(), GridError> {
    for name in area_names(matrix) {
        let cells = find_cells(matrix, &name);
        let rows = cells.iter().map(|cell| cell.row);
        let cols = cells.iter().map(|cell| cell.col);
        let (Some(min_row), Some(max_row)) = (rows.clone().min(), rows.max()) else {
            continue;
        };
        let (Some(min_col), Some(max_col)) = (cols.clone().min(), cols.max()) else {
            continue;
        };
        if cells.len() != (max_row - min_row + 1) * (max_col - min_col + 1) {
            return Err(GridError::NotRectangular(name));
        }
    }
    Ok(())
}

/// The area matrix together with its row and column fractions
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub(crate) areas: AreaMatrix,
    pub(crate) rows: Vec<f64>,
    pub(crate) columns: Vec<f64>,
}

impl Grid {
    /// Parse the three template strings and check that they agree
    pub fn parse(areas: &str, rows: &str, columns: &str) -> Result<Self, GridError> {
        let grid = Self {
            areas: parse_areas(areas)?,
            rows: parse_axis(rows)?,
            columns: parse_axis(columns)?,
        };
        grid.validate()?;
        Ok(grid)
    }

    pub(crate) fn from_parts(areas: AreaMatrix, rows: Vec<f64>, columns: Vec<f64>) -> Self {
        Self {
            areas,
            rows,
            columns,
        }
    }

    pub fn validate(&self) -> Result<(), GridError> {
        if self.rows.len() != self.areas.len() {
            return Err(GridError::TrackCount {
                axis: "rows",
                expected: self.areas.len(),
                found: self.rows.len(),
            });
        }
        let width = self.column_count();
        if let Some((row, cells)) = self
            .areas
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != width)
        {
            return Err(GridError::Ragged {
                row,
                expected: width,
                found: cells.len(),
            });
        }
        if self.columns.len() != width {
            return Err(GridError::TrackCount {
                axis: "columns",
                expected: width,
                found: self.columns.len(),
            });
        }
        if let Some(track) = self
            .rows
            .iter()
            .chain(&self.columns)
            .find(|track| !track.is_finite() || **track < 0.0)
        {
            return Err(GridError::InvalidTrack(format!("{track}fr")));
        }
        check_rectangles(&self.areas)
    }

    pub fn areas(&self) -> &AreaMatrix {
        &self.areas
    }

    pub fn rows(&self) -> &[f64] {
        &self.rows
    }

    pub fn columns(&self) -> &[f64] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.areas.len()
    }

    pub fn column_count(&self) -> usize {
        self.areas.first().map_or(0, Vec::len)
    }

    pub fn template_areas(&self) -> String {
        stringify_areas(&self.areas)
    }

    pub fn template_rows(&self) -> String {
        stringify_axis(&self.rows)
    }

    pub fn template_columns(&self) -> String {
        stringify_axis(&self.columns)
    }

    pub fn area_names(&self) -> Vec<String> {
        area_names(&self.areas)
    }

    pub fn contains_area(&self, area: &str) -> bool {
        self.areas.iter().flatten().any(|name| name == area)
    }

    pub fn find_cells(&self, area: &str) -> Vec<CellPos> {
        find_cells(&self.areas, area)
    }

    pub fn boundary(&self, area: &str) -> Option<Boundary> {
        boundary(&self.find_cells(area), &self.rows, &self.columns)
    }

    pub fn collapse(&mut self) -> bool {
        collapse_duplicates(&mut self.areas, &mut self.rows, &mut self.columns)
    }

    /// Swap rows and columns so row algorithms can run on columns
    pub(crate) fn transposed(&self) -> Self {
        Self {
            areas: transpose(&self.areas),
            rows: self.columns.clone(),
            columns: self.rows.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[&str]]) -> AreaMatrix {
        rows.iter()
            .map(|row| row.iter().map(|name| name.to_string()).collect())
            .collect()
    }

    #[test]
    fn parses_quoted_rows_on_one_line() {
        let areas = parse_areas(r#""a b" "c d""#).unwrap();
        assert_eq!(areas, matrix(&[&["a", "b"], &["c", "d"]]));
    }

    #[test]
    fn parses_multiline_templates() {
        let areas = parse_areas(
            r#"
            "a d"
            "b d"
            "b e"
            "#,
        )
        .unwrap();
        assert_eq!(areas, matrix(&[&["a", "d"], &["b", "d"], &["b", "e"]]));
    }

    #[test]
    fn rejects_ragged_rows() {
        assert_eq!(
            parse_areas(r#""a b" "c""#),
            Err(GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(parse_areas("  "), Err(GridError::Empty));
    }

    #[test]
    fn stringified_areas_parse_back() {
        let areas = matrix(&[&["a", "a"], &["b", "c"]]);
        let text = stringify_areas(&areas);
        assert_eq!(text, r#""a a" "b c""#);
        assert_eq!(parse_areas(&text).unwrap(), areas);
    }

    #[test]
    fn axis_roundtrip() {
        let tracks = vec![1.0, 2.5, 0.3333333333333333, 0.0, 1e-7];
        let text = stringify_axis(&tracks);
        assert_eq!(parse_axis(&text).unwrap(), tracks);
        assert_eq!(stringify_axis(&[1.0, 2.0]), "1fr 2fr");
    }

    #[test]
    fn axis_rejects_bad_tracks() {
        assert_eq!(
            parse_axis("1fr auto"),
            Err(GridError::InvalidTrack("auto".to_string()))
        );
        assert_eq!(
            parse_axis("-1fr"),
            Err(GridError::InvalidTrack("-1fr".to_string()))
        );
        assert_eq!(parse_axis(""), Err(GridError::Empty));
    }

    #[test]
    fn finds_cells_and_measures_boundary() {
        let areas = matrix(&[&["a", "d"], &["b", "d"], &["b", "e"]]);
        let cells = find_cells(&areas, "d");
        assert_eq!(
            cells,
            vec![CellPos { col: 1, row: 0 }, CellPos { col: 1, row: 1 }]
        );

        let rows = [2.0, 1.0, 1.0];
        let columns = [1.0, 3.0];
        let b = boundary(&cells, &rows, &columns).unwrap();
        assert_eq!((b.min_row, b.max_row, b.min_col, b.max_col), (0, 1, 1, 1));
        assert_eq!(b.height, 3.0);
        assert_eq!(b.width, 3.0);
        assert!(boundary(&[], &rows, &columns).is_none());
    }

    #[test]
    fn limit_position_scans_running_sum() {
        let tracks = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            find_limit_position(&tracks, 1.0),
            Some(LimitPosition {
                index: 0,
                margin: 0.0
            })
        );
        assert_eq!(
            find_limit_position(&tracks, 2.0),
            Some(LimitPosition {
                index: 1,
                margin: 1.0
            })
        );
        assert_eq!(
            find_limit_position(&tracks, 3.0),
            Some(LimitPosition {
                index: 1,
                margin: 0.0
            })
        );
        assert_eq!(
            find_limit_position(&tracks, 4.0),
            Some(LimitPosition {
                index: 2,
                margin: 2.0
            })
        );
        assert_eq!(find_limit_position(&[], 1.0), None);
    }

    #[test]
    fn collapse_merges_rows_and_columns() {
        let mut areas = matrix(&[&["a", "a", "b"], &["a", "a", "b"], &["c", "c", "c"]]);
        let mut rows = vec![1.0, 2.0, 3.0];
        let mut columns = vec![1.0, 1.0, 2.0];

        assert!(collapse_duplicates(&mut areas, &mut rows, &mut columns));
        assert_eq!(areas, matrix(&[&["a", "b"], &["c", "c"]]));
        assert_eq!(rows, vec![3.0, 3.0]);
        assert_eq!(columns, vec![2.0, 2.0]);

        // Already minimal
        assert!(!collapse_duplicates(&mut areas, &mut rows, &mut columns));
    }

    #[test]
    fn collapse_repeats_until_stable() {
        let mut areas = matrix(&[&["a", "a", "a", "a"]]);
        let mut rows = vec![1.0];
        let mut columns = vec![1.0, 1.0, 1.0, 1.0];
        collapse_duplicates(&mut areas, &mut rows, &mut columns);
        assert_eq!(areas, matrix(&[&["a"]]));
        assert_eq!(columns, vec![4.0]);
    }

    #[test]
    fn detects_l_shapes() {
        let areas = matrix(&[&["a", "a"], &["a", "b"]]);
        assert_eq!(
            check_rectangles(&areas),
            Err(GridError::NotRectangular("a".to_string()))
        );
        assert!(check_rectangles(&matrix(&[&["a", "b"], &["a", "c"]])).is_ok());
    }

    #[test]
    fn transpose_swaps_axes() {
        let areas = matrix(&[&["a", "b", "c"], &["d", "e", "f"]]);
        let flipped = transpose(&areas);
        assert_eq!(flipped, matrix(&[&["a", "d"], &["b", "e"], &["c", "f"]]));
        assert_eq!(transpose(&flipped), areas);
    }

    #[test]
    fn grid_validates_track_counts() {
        assert!(Grid::parse(r#""a b""#, "1fr", "1fr 1fr").is_ok());
        assert_eq!(
            Grid::parse(r#""a b""#, "1fr 1fr", "1fr 1fr"),
            Err(GridError::TrackCount {
                axis: "rows",
                expected: 1,
                found: 2
            })
        );
        assert_eq!(
            Grid::parse(r#""a b""#, "1fr", "1fr"),
            Err(GridError::TrackCount {
                axis: "columns",
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn grid_templates_match_parts() {
        let grid = Grid::parse(r#""a b" "a c""#, "1fr 2fr", "3fr 1fr").unwrap();
        assert_eq!(grid.template_areas(), r#""a b" "a c""#);
        assert_eq!(grid.template_rows(), "1fr 2fr");
        assert_eq!(grid.template_columns(), "3fr 1fr");
        assert_eq!(grid.area_names(), vec!["a", "b", "c"]);
        assert_eq!(grid.boundary("a").unwrap().height, 3.0);
    }
}
