//! Grid geometry.
//!
//! Computes row count and cell dimensions once per layout run, then
//! resolves any linear cell index to an absolute page rectangle. All
//! rectangles are absolute coordinates — there is no transform stack to
//! save and restore.

use serde::Serialize;

use crate::error::{CalgridError, Result};

/// Axis-aligned rectangle in page coordinates (points).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CellRect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width of the rectangle
    pub width: f32,
    /// Height of the rectangle
    pub height: f32,
}

impl CellRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True if `other` lies fully inside `self` (edges may touch).
    pub fn contains(&self, other: &CellRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }
}

/// Pre-computed grid geometry for one layout run.
///
/// Cells are uniform: every index maps to a rectangle of the same size,
/// laid out row-major with `columns` cells per row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSpec {
    columns: usize,
    rows: usize,
    total_cells: usize,
    cell_width: f32,
    cell_height: f32,
}

impl GridSpec {
    /// Compute the grid for `total_cells` cells in `columns` columns
    /// filling the available area.
    ///
    /// # Errors
    /// Returns [`CalgridError::InvalidGrid`] when `columns` is zero or
    /// either dimension is non-positive.
    pub fn compute(
        total_cells: usize,
        columns: usize,
        available_width: f32,
        available_height: f32,
    ) -> Result<Self> {
        if columns == 0 {
            return Err(CalgridError::InvalidGrid(
                "column count must be at least 1".to_string(),
            ));
        }
        if !(available_width > 0.0 && available_height > 0.0) {
            return Err(CalgridError::InvalidGrid(format!(
                "page area must be positive, got {available_width} x {available_height}"
            )));
        }

        let rows = total_cells.div_ceil(columns);
        let cell_width = available_width / columns as f32;
        let cell_height = if rows == 0 {
            0.0
        } else {
            available_height / rows as f32
        };

        log::debug!(
            "grid: {columns} columns x {rows} rows, cell {cell_width} x {cell_height} pt"
        );

        Ok(Self {
            columns,
            rows,
            total_cells,
            cell_width,
            cell_height,
        })
    }

    /// Rectangle of the cell at a linear row-major index.
    pub fn cell_rect(&self, index: usize) -> CellRect {
        let col = index % self.columns;
        let row = index / self.columns;
        CellRect {
            x: col as f32 * self.cell_width,
            y: row as f32 * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    /// Number of columns per row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows (0 when the grid is empty).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total cell count the grid was computed for.
    pub fn total_cells(&self) -> usize {
        self.total_cells
    }

    /// Width of every cell.
    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Height of every cell.
    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn computes_rows_and_cell_size() {
        let grid = GridSpec::compute(31, 7, 700.0, 500.0).unwrap();
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cell_width(), 100.0);
        assert_eq!(grid.cell_height(), 100.0);
    }

    #[test]
    fn empty_grid_has_zero_rows() {
        let grid = GridSpec::compute(0, 7, 700.0, 500.0).unwrap();
        assert_eq!(grid.rows(), 0);
        assert_eq!(grid.total_cells(), 0);
    }

    #[test]
    fn cell_rect_row_major() {
        let grid = GridSpec::compute(21, 7, 700.0, 300.0).unwrap();

        let first = grid.cell_rect(0);
        assert_eq!((first.x, first.y), (0.0, 0.0));

        let last_in_row = grid.cell_rect(6);
        assert_eq!((last_in_row.x, last_in_row.y), (600.0, 0.0));

        let second_row = grid.cell_rect(7);
        assert_eq!((second_row.x, second_row.y), (0.0, 100.0));
    }

    #[test]
    fn zero_columns_rejected() {
        let err = GridSpec::compute(10, 0, 700.0, 500.0).unwrap_err();
        assert!(matches!(err, CalgridError::InvalidGrid(_)));
    }

    #[test]
    fn non_positive_dimensions_rejected() {
        assert!(GridSpec::compute(10, 7, 0.0, 500.0).is_err());
        assert!(GridSpec::compute(10, 7, 700.0, -1.0).is_err());
    }

    #[test]
    fn rect_containment() {
        let outer = CellRect::new(0.0, 0.0, 100.0, 50.0);
        assert!(outer.contains(&CellRect::new(10.0, 10.0, 50.0, 20.0)));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&CellRect::new(60.0, 10.0, 50.0, 20.0)));
    }
}
