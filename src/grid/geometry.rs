//! Grid geometry and pixel projection
//!
//! A [`GridGeometry`] is an immutable snapshot. Every change builds a new
//! value, so a reader holding one never sees half of an update.

use serde::{Deserialize, Serialize};

use super::cell::{BBox, Cell, Point, Size, Span};

/// Smallest allowed cell width in pixels
pub const MIN_CELL_WIDTH: u32 = 25;
/// Smallest allowed cell height in pixels
pub const MIN_CELL_HEIGHT: u32 = 25;
/// Largest cell width or height in pixels
pub const MAX_CELL_SIZE: u32 = 1 << 14;
/// Largest padding between columns or rows in pixels
pub const MAX_PADDING: u32 = 1 << 14;

/// Pixel lengths saturate here so every canvas coordinate fits in an `i32`
const MAX_PIXELS: u64 = i32::MAX as u64;

fn pixels(length: u64) -> u32 {
    length.min(MAX_PIXELS) as u32
}

/// `count` cells of `cell` pixels with `padding` between neighbours
fn run_length(count: usize, cell: u32, padding: u32) -> u32 {
    let count = count as u64;
    let cells = count.saturating_mul(u64::from(cell));
    let gaps = count.saturating_sub(1).saturating_mul(u64::from(padding));
    pixels(cells.saturating_add(gaps))
}

/// Left (or top) edge of cell `index` for the given pitch
fn offset(index: usize, pitch: u32) -> i32 {
    pixels((index as u64).saturating_mul(u64::from(pitch))) as i32
}

/// Grid dimensions in cells plus cell size and spacing in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub width: usize,
    pub height: usize,
    pub cell_width: u32,
    pub cell_height: u32,
    pub column_padding: u32,
    pub row_padding: u32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            cell_width: 50,
            cell_height: 50,
            column_padding: 0,
            row_padding: 0,
        }
    }
}

impl GridGeometry {
    /// Build a geometry, clamping the cell size and padding into range
    pub fn new(
        width: usize,
        height: usize,
        cell_width: u32,
        cell_height: u32,
        column_padding: u32,
        row_padding: u32,
    ) -> Self {
        Self {
            width,
            height,
            cell_width: cell_width.clamp(MIN_CELL_WIDTH, MAX_CELL_SIZE),
            cell_height: cell_height.clamp(MIN_CELL_HEIGHT, MAX_CELL_SIZE),
            column_padding: column_padding.min(MAX_PADDING),
            row_padding: row_padding.min(MAX_PADDING),
        }
    }

    /// Same geometry with the pixel fields pulled back into range
    pub fn clamped(&self) -> Self {
        Self::new(
            self.width,
            self.height,
            self.cell_width,
            self.cell_height,
            self.column_padding,
            self.row_padding,
        )
    }

    /// Horizontal distance between the left edges of adjacent columns
    pub fn column_pitch(&self) -> u32 {
        self.cell_width.saturating_add(self.column_padding)
    }

    /// Vertical distance between the top edges of adjacent rows
    pub fn row_pitch(&self) -> u32 {
        self.cell_height.saturating_add(self.row_padding)
    }

    /// Pixel box of a `span` rectangle whose top-left cell is `cell`
    ///
    /// Padding only contributes between the spanned cells, never after the last one.
    /// Coordinates saturate at `i32::MAX`.
    pub fn bbox(&self, cell: Cell, span: Span) -> BBox {
        BBox::new(
            offset(cell.column, self.column_pitch()),
            offset(cell.row, self.row_pitch()),
            run_length(span.cols, self.cell_width, self.column_padding),
            run_length(span.rows, self.cell_height, self.row_padding),
        )
    }

    /// Signed column/row under a canvas point (truncating toward zero)
    pub fn cell_at(&self, point: Point) -> (i64, i64) {
        (
            i64::from(point.x) / i64::from(self.column_pitch()),
            i64::from(point.y) / i64::from(self.row_pitch()),
        )
    }

    /// Clamp a signed cell so that `span` anchored there stays inside the grid
    ///
    /// Each axis is clamped independently to `[0, extent - span]`.
    pub fn clamp_anchor(&self, column: i64, row: i64, span: Span) -> Cell {
        let max_column = self.width.saturating_sub(span.cols) as i64;
        let max_row = self.height.saturating_sub(span.rows) as i64;
        Cell::new(
            column.clamp(0, max_column) as usize,
            row.clamp(0, max_row) as usize,
        )
    }

    /// Pixel size of the scrollable canvas
    pub fn scroll_extent(&self) -> Size {
        Size::new(
            pixels((self.width as u64).saturating_mul(u64::from(self.column_pitch()))),
            pixels((self.height as u64).saturating_mul(u64::from(self.row_pitch()))),
        )
    }

    /// One outline box per cell, row by row
    pub fn cell_outlines(&self) -> Vec<BBox> {
        let mut outlines = Vec::with_capacity(self.width * self.height);
        for row in 0..self.height {
            for column in 0..self.width {
                outlines.push(self.bbox(Cell::new(column, row), Span::new(1, 1)));
            }
        }
        outlines
    }

    /// Whether the cell size or padding differ, i.e. visuals need re-projecting
    pub fn pixels_differ(&self, other: &GridGeometry) -> bool {
        self.cell_width != other.cell_width
            || self.cell_height != other.cell_height
            || self.column_padding != other.column_padding
            || self.row_padding != other.row_padding
    }

    /// Whether the extent in cells differs
    pub fn extent_differs(&self, other: &GridGeometry) -> bool {
        self.width != other.width || self.height != other.height
    }
}

/// Partial geometry change; `None` leaves a field as it was
///
/// `Some(0)` is a real request: it is clamped for the extent and cell size
/// and honoured as-is for padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryUpdate {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub cell_width: Option<u32>,
    pub cell_height: Option<u32>,
    pub column_padding: Option<u32>,
    pub row_padding: Option<u32>,
}

impl GeometryUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    pub fn cell_width(mut self, cell_width: u32) -> Self {
        self.cell_width = Some(cell_width);
        self
    }

    pub fn cell_height(mut self, cell_height: u32) -> Self {
        self.cell_height = Some(cell_height);
        self
    }

    pub fn column_padding(mut self, column_padding: u32) -> Self {
        self.column_padding = Some(column_padding);
        self
    }

    pub fn row_padding(mut self, row_padding: u32) -> Self {
        self.row_padding = Some(row_padding);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply on top of `base`. Extent floors are the caller's responsibility.
    pub fn apply_to(&self, base: &GridGeometry) -> GridGeometry {
        GridGeometry::new(
            self.width.unwrap_or(base.width),
            self.height.unwrap_or(base.height),
            self.cell_width.unwrap_or(base.cell_width),
            self.cell_height.unwrap_or(base.cell_height),
            self.column_padding.unwrap_or(base.column_padding),
            self.row_padding.unwrap_or(base.row_padding),
        )
    }
}
