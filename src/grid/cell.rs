//! Value types shared by the grid engine

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

/// One grid unit, addressed by column and row
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Cell {
    pub column: usize,
    pub row: usize,
}

impl Cell {
    pub const ORIGIN: Cell = Cell { column: 0, row: 0 };

    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Whether this cell lies inside the rectangle anchored at `origin` with size `span`
    pub fn within(&self, origin: Cell, span: Span) -> bool {
        (origin.column..origin.column + span.cols).contains(&self.column)
            && (origin.row..origin.row + span.rows).contains(&self.row)
    }
}

/// Size of a dockable's rectangle in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub cols: usize,
    pub rows: usize,
}

impl Span {
    /// Create a span, panicking on a zero dimension
    ///
    /// Use [`Span::try_new`] for values that come from user input.
    pub fn new(cols: usize, rows: usize) -> Self {
        assert!(
            cols >= 1 && rows >= 1,
            "span must be at least 1x1, got {}x{}",
            cols,
            rows
        );
        Self { cols, rows }
    }

    pub fn try_new(cols: usize, rows: usize) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(GridError::InvalidSpan { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    /// Number of cells covered
    pub fn area(&self) -> usize {
        self.cols * self.rows
    }
}

/// Pixel position on the scrollable canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Pixel bounding box (top-left corner plus size)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BBox {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl BBox {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && i64::from(point.x) < i64::from(self.x) + i64::from(self.w)
            && i64::from(point.y) < i64::from(self.y) + i64::from(self.h)
    }

    /// Shrink the box by separate amounts on the top-left and bottom-right edges
    pub fn inset(&self, top_left: u32, bottom_right: u32) -> BBox {
        let total = top_left.saturating_add(bottom_right);
        let shift = i32::try_from(top_left).unwrap_or(i32::MAX);
        BBox {
            x: self.x.saturating_add(shift),
            y: self.y.saturating_add(shift),
            w: self.w.saturating_sub(total),
            h: self.h.saturating_sub(total),
        }
    }

    /// Centre point, used to aim synthetic pointer events at a cell
    pub fn center(&self) -> Point {
        let half = |length: u32| i32::try_from(length / 2).unwrap_or(i32::MAX);
        Point::new(
            self.x.saturating_add(half(self.w)),
            self.y.saturating_add(half(self.h)),
        )
    }
}
