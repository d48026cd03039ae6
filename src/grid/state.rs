//! Occupancy bitmap for a docking grid
//!
//! Each element records whether the corresponding cell is covered by a
//! dockable. Rectangles are addressed by their top-left [`Cell`] and a
//! [`Span`]; every rectangle must lie inside the current bounds, anything
//! else is a caller bug and panics.

use std::fmt;

use super::cell::{Cell, Span};

/// Row-major `height x width` boolean matrix
#[derive(Clone, PartialEq, Eq)]
pub struct GridState {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl GridState {
    /// Create an all-empty state
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Same dimensions, nothing occupied
    pub fn empty_copy(&self) -> Self {
        Self::new(self.width, self.height)
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        assert!(
            cell.column < self.width && cell.row < self.height,
            "cell {:?} outside {}x{} grid",
            cell,
            self.width,
            self.height
        );
        self.cells[self.index(cell.column, cell.row)]
    }

    /// Whether the rectangle lies inside the bounds
    pub fn contains_rect(&self, cell: Cell, span: Span) -> bool {
        cell.column + span.cols <= self.width && cell.row + span.rows <= self.height
    }

    /// Whether any cell of the rectangle is occupied
    pub fn conflicts(&self, cell: Cell, span: Span) -> bool {
        self.check_rect(cell, span);
        self.rect_indices(cell, span).any(|i| self.cells[i])
    }

    /// Mask of the cells that are both inside the rectangle and occupied
    pub fn conflicts_where(&self, cell: Cell, span: Span) -> GridState {
        self.check_rect(cell, span);
        let mut mask = self.empty_copy();
        for i in self.rect_indices(cell, span) {
            mask.cells[i] = self.cells[i];
        }
        mask
    }

    /// Mark the rectangle occupied. Callers check [`GridState::conflicts`] first.
    pub fn populate(&mut self, cell: Cell, span: Span) {
        self.set(cell, span, true);
    }

    pub fn unpopulate(&mut self, cell: Cell, span: Span) {
        self.set(cell, span, false);
    }

    /// Smallest width that keeps every occupied cell inside the grid
    pub fn min_width(&self) -> usize {
        self.occupied_cells()
            .map(|cell| cell.column + 1)
            .max()
            .unwrap_or(0)
    }

    /// Smallest height that keeps every occupied cell inside the grid
    pub fn min_height(&self) -> usize {
        self.occupied_cells()
            .map(|cell| cell.row + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(|(i, _)| Cell::new(i % self.width, i / self.width))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|occupied| **occupied).count()
    }

    /// Number of consecutive columns, counted from the right edge, that are
    /// empty in each of the first `rows` rows
    pub fn trailing_empty_columns(&self, rows: usize) -> usize {
        let rows = rows.min(self.height);
        (0..self.width)
            .rev()
            .take_while(|&column| (0..rows).all(|row| !self.cells[self.index(column, row)]))
            .count()
    }

    fn set(&mut self, cell: Cell, span: Span, value: bool) {
        self.check_rect(cell, span);
        for row in cell.row..cell.row + span.rows {
            let start = self.index(cell.column, row);
            self.cells[start..start + span.cols].fill(value);
        }
    }

    fn check_rect(&self, cell: Cell, span: Span) {
        assert!(
            cell.column + span.cols <= self.width && cell.row + span.rows <= self.height,
            "rectangle at {:?} with span {}x{} exceeds {}x{} grid",
            cell,
            span.cols,
            span.rows,
            self.width,
            self.height
        );
    }

    fn rect_indices(&self, cell: Cell, span: Span) -> impl Iterator<Item = usize> + '_ {
        (cell.row..cell.row + span.rows).flat_map(move |row| {
            (cell.column..cell.column + span.cols).map(move |column| self.index(column, row))
        })
    }

    fn index(&self, column: usize, row: usize) -> usize {
        row * self.width + column
    }
}

impl fmt::Debug for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GridState {}x{}", self.width, self.height)?;
        for row in 0..self.height {
            for column in 0..self.width {
                let mark = if self.cells[self.index(column, row)] { '#' } else { '.' };
                write!(f, "{}", mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
