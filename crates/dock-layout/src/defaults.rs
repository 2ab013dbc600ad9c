// ABOUTME: Built-in grid templates used when a layout is created without one.
// ABOUTME: One template per docked window count from one to seven.

use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Template {
    pub areas: &'static [&'static [&'static str]],
    pub rows: &'static [f64],
    pub columns: &'static [f64],
}

impl Template {
    pub fn grid(&self) -> Grid {
        Grid::from_parts(
            self.areas
                .iter()
                .map(|row| row.iter().map(|name| name.to_string()).collect())
                .collect(),
            self.rows.to_vec(),
            self.columns.to_vec(),
        )
    }
}

pub static DEFAULT_TEMPLATES: [Template; 7] = [
    Template {
        areas: &[&["a"]],
        rows: &[1.0],
        columns: &[1.0],
    },
    Template {
        areas: &[&["a", "b"]],
        rows: &[1.0],
        columns: &[1.0, 1.0],
    },
    Template {
        areas: &[&["a", "b"], &["a", "c"]],
        rows: &[1.0, 1.0],
        columns: &[1.0, 1.0],
    },
    Template {
        areas: &[&["a", "b"], &["c", "d"]],
        rows: &[1.0, 1.0],
        columns: &[1.0, 1.0],
    },
    Template {
        areas: &[&["a", "d"], &["b", "d"], &["b", "e"], &["c", "e"]],
        rows: &[2.0, 1.0, 1.0, 2.0],
        columns: &[1.0, 1.0],
    },
    Template {
        areas: &[&["a", "b"], &["c", "d"], &["e", "f"]],
        rows: &[1.0, 1.0, 1.0],
        columns: &[1.0, 1.0],
    },
    Template {
        areas: &[
            &["a", "d"],
            &["a", "e"],
            &["b", "e"],
            &["b", "f"],
            &["c", "f"],
            &["c", "g"],
        ],
        rows: &[3.0, 1.0, 2.0, 2.0, 1.0, 3.0],
        columns: &[1.0, 1.0],
    },
];

/// Template for `docked` windows; counts outside one to seven get the single area
pub fn default_template(docked: usize) -> &'static Template {
    docked
        .checked_sub(1)
        .and_then(|index| DEFAULT_TEMPLATES.get(index))
        .unwrap_or(&DEFAULT_TEMPLATES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_is_valid() {
        for (index, template) in DEFAULT_TEMPLATES.iter().enumerate() {
            let grid = template.grid();
            assert!(grid.validate().is_ok(), "template {index} is invalid");
            assert_eq!(grid.area_names().len(), index + 1);
        }
    }

    #[test]
    fn template_selection_by_count() {
        assert_eq!(default_template(4).grid().template_areas(), r#""a b" "c d""#);
        assert_eq!(
            default_template(5).grid().template_rows(),
            "2fr 1fr 1fr 2fr"
        );
        assert_eq!(default_template(0), &DEFAULT_TEMPLATES[0]);
        assert_eq!(default_template(12), &DEFAULT_TEMPLATES[0]);
    }
}
