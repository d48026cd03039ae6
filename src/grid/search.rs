//! Placement search over a [`GridState`]
//!
//! Two pieces: a nearest-fit search that finds the free rectangle closest to
//! an origin cell, and the growth policy used when the grid has no room left.

use super::cell::{Cell, Span};
use super::state::GridState;

/// Outcome of [`find_or_grow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A free rectangle exists at the current bounds
    Existing(Cell),
    /// The grid must grow to `width` x `height`; the rectangle then fits at `cell`
    Grow {
        width: usize,
        height: usize,
        cell: Cell,
    },
}

/// Find the free top-left cell nearest to `origin` (Manhattan distance)
///
/// Candidates are visited by increasing distance; at equal distance the
/// column offset ascends from negative to positive, and for each column
/// offset the negative row offset comes first. Returns `None` when no
/// rectangle of `span` fits at the current bounds.
pub fn find_empty_region(state: &GridState, origin: Cell, span: Span) -> Option<Cell> {
    if span.cols > state.width() || span.rows > state.height() {
        return None;
    }
    let max_column = (state.width() - span.cols) as i64;
    let max_row = (state.height() - span.rows) as i64;
    let origin_column = origin.column as i64;
    let origin_row = origin.row as i64;

    let column_reach = origin_column.max(max_column - origin_column).max(0);
    let row_reach = origin_row.max(max_row - origin_row).max(0);
    let max_distance = column_reach + row_reach;

    for distance in 0..=max_distance {
        for column_offset in -distance..=distance {
            let column = origin_column + column_offset;
            if !(0..=max_column).contains(&column) {
                continue;
            }
            let remaining = distance - column_offset.abs();
            let row_offsets: &[i64] = if remaining == 0 {
                &[0]
            } else {
                &[-remaining, remaining]
            };
            for row_offset in row_offsets {
                let row = origin_row + row_offset;
                if !(0..=max_row).contains(&row) {
                    continue;
                }
                let candidate = Cell::new(column as usize, row as usize);
                if !state.conflicts(candidate, span) {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

/// Nearest-fit from `hint`, or the smallest growth that makes `span` fit
///
/// Growth raises the height to at least `span.rows`, then widens the grid by
/// however many columns the empty right-hand edge is short of `span.cols`.
/// The rectangle goes flush against the right edge at row 0.
pub fn find_or_grow(state: &GridState, span: Span, hint: Cell) -> Placement {
    if let Some(cell) = find_empty_region(state, hint, span) {
        return Placement::Existing(cell);
    }

    let height = state.height().max(span.rows);
    let free_trailing = state.trailing_empty_columns(span.rows).min(span.cols);
    let width = state.width() + span.cols - free_trailing;
    tracing::debug!(
        free_trailing,
        width,
        height,
        "no free {}x{} region, growing grid",
        span.cols,
        span.rows
    );
    Placement::Grow {
        width,
        height,
        cell: Cell::new(width - span.cols, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_returned_when_free() {
        let state = GridState::new(5, 5);
        assert_eq!(
            find_empty_region(&state, Cell::new(2, 2), Span::new(1, 1)),
            Some(Cell::new(2, 2))
        );
    }

    #[test]
    fn test_tie_break_prefers_negative_column_offset() {
        let mut state = GridState::new(5, 5);
        state.populate(Cell::new(2, 2), Span::new(1, 1));
        assert_eq!(
            find_empty_region(&state, Cell::new(2, 2), Span::new(1, 1)),
            Some(Cell::new(1, 2))
        );
    }

    #[test]
    fn test_tie_break_order_within_ring() {
        let mut state = GridState::new(5, 5);
        state.populate(Cell::new(2, 2), Span::new(1, 1));
        state.populate(Cell::new(1, 2), Span::new(1, 1));
        assert_eq!(
            find_empty_region(&state, Cell::new(2, 2), Span::new(1, 1)),
            Some(Cell::new(2, 1))
        );
        state.populate(Cell::new(2, 1), Span::new(1, 1));
        assert_eq!(
            find_empty_region(&state, Cell::new(2, 2), Span::new(1, 1)),
            Some(Cell::new(2, 3))
        );
        state.populate(Cell::new(2, 3), Span::new(1, 1));
        assert_eq!(
            find_empty_region(&state, Cell::new(2, 2), Span::new(1, 1)),
            Some(Cell::new(3, 2))
        );
    }

    #[test]
    fn test_nearest_is_true_manhattan_minimum() {
        let mut state = GridState::new(7, 1);
        state.populate(Cell::new(0, 0), Span::new(6, 1));
        assert_eq!(
            find_empty_region(&state, Cell::new(0, 0), Span::new(1, 1)),
            Some(Cell::new(6, 0))
        );
    }

    #[test]
    fn test_span_larger_than_grid_finds_nothing() {
        let state = GridState::new(2, 2);
        assert_eq!(
            find_empty_region(&state, Cell::ORIGIN, Span::new(3, 1)),
            None
        );
    }

    #[test]
    fn test_full_grid_grows_by_span() {
        let mut state = GridState::new(3, 3);
        state.populate(Cell::ORIGIN, Span::new(3, 3));
        assert_eq!(
            find_or_grow(&state, Span::new(2, 1), Cell::ORIGIN),
            Placement::Grow {
                width: 5,
                height: 3,
                cell: Cell::new(3, 0),
            }
        );
    }

    #[test]
    fn test_growth_reuses_empty_trailing_columns() {
        let mut state = GridState::new(4, 2);
        state.populate(Cell::ORIGIN, Span::new(3, 2));
        // One free column on the right, the dockable needs two rows more than exist
        assert_eq!(
            find_or_grow(&state, Span::new(2, 3), Cell::ORIGIN),
            Placement::Grow {
                width: 5,
                height: 3,
                cell: Cell::new(3, 0),
            }
        );
    }

    #[test]
    fn test_growth_only_in_height_when_columns_are_free() {
        let mut state = GridState::new(4, 1);
        state.populate(Cell::ORIGIN, Span::new(1, 1));
        assert_eq!(
            find_or_grow(&state, Span::new(2, 2), Cell::ORIGIN),
            Placement::Grow {
                width: 4,
                height: 2,
                cell: Cell::new(2, 0),
            }
        );
    }
}
