//! Nearest-fit search and grid growth

mod common;

use common::{test_grid, Tile};
use spooky_console::grid::{find_empty_region, find_or_grow, Cell, GridState, Placement, Span};

// ========================================================================
// Nearest-fit
// ========================================================================

#[test]
fn test_empty_grid_returns_origin() {
    let state = GridState::new(5, 5);
    assert_eq!(
        find_empty_region(&state, Cell::new(2, 2), Span::new(1, 1)),
        Some(Cell::new(2, 2))
    );
}

#[test]
fn test_equidistant_neighbours_prefer_left() {
    let mut state = GridState::new(5, 5);
    state.populate(Cell::new(2, 2), Span::new(1, 1));
    assert_eq!(
        find_empty_region(&state, Cell::new(2, 2), Span::new(1, 1)),
        Some(Cell::new(1, 2))
    );
}

#[test]
fn test_search_is_clamped_to_bounds_for_span() {
    let state = GridState::new(4, 4);
    // A 2x2 block cannot start in the last column or row
    assert_eq!(
        find_empty_region(&state, Cell::new(3, 3), Span::new(2, 2)),
        Some(Cell::new(2, 2))
    );
}

#[test]
fn test_full_grid_reports_nothing() {
    let mut state = GridState::new(2, 2);
    state.populate(Cell::ORIGIN, Span::new(2, 2));
    assert_eq!(find_empty_region(&state, Cell::ORIGIN, Span::new(1, 1)), None);
}

#[test]
fn test_search_skips_regions_that_only_partially_fit() {
    let mut state = GridState::new(3, 2);
    state.populate(Cell::new(1, 0), Span::new(1, 1));
    assert_eq!(
        find_empty_region(&state, Cell::ORIGIN, Span::new(2, 2)),
        None
    );
    assert_eq!(
        find_empty_region(&state, Cell::ORIGIN, Span::new(1, 2)),
        Some(Cell::new(0, 0))
    );
}

// ========================================================================
// Growth
// ========================================================================

#[test]
fn test_find_or_grow_prefers_existing_space() {
    let mut state = GridState::new(3, 3);
    state.populate(Cell::ORIGIN, Span::new(1, 1));
    assert_eq!(
        find_or_grow(&state, Span::new(1, 1), Cell::ORIGIN),
        Placement::Existing(Cell::new(0, 1))
    );
}

#[test]
fn test_register_on_full_grid_grows_to_the_right() {
    let mut grid = test_grid(3, 3);
    grid.register(Tile::new(3, 3));
    let id = grid.register(Tile::new(2, 1));

    let geometry = grid.geometry();
    assert_eq!(geometry.width, 5);
    assert_eq!(geometry.height, 3);
    assert_eq!(grid.cell_of(id), Some(Cell::new(3, 0)));
    assert_eq!(grid.state().width(), 5);
    grid.check_invariants().unwrap();
}

#[test]
fn test_tall_dockable_grows_height() {
    let mut grid = test_grid(2, 2);
    let id = grid.register(Tile::new(1, 4));
    assert_eq!(grid.geometry().height, 4);
    assert_eq!(grid.geometry().width, 2);
    assert_eq!(grid.cell_of(id), Some(Cell::new(1, 0)));
    grid.check_invariants().unwrap();
}

#[test]
fn test_growth_updates_scroll_region() {
    let mut grid = test_grid(1, 1);
    grid.register(Tile::new(1, 1));
    grid.register(Tile::new(1, 1));
    let extent = grid.surface().scroll_region();
    assert_eq!((extent.width, extent.height), (100, 50));
}
