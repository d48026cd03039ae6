//! Drag sessions: commit, abort and the overlays drawn meanwhile

mod common;

use common::{test_grid, Tile};
use spooky_console::dockable::SpanUpdate;
use spooky_console::grid::{BBox, Cell, GeometryUpdate, LayoutChange, Point};
use spooky_console::host::{SurfaceEvent, VisualId};

#[test]
fn test_drag_commits_at_candidate() {
    let mut grid = test_grid(2, 2);
    let id = grid.register(Tile::new(1, 1));
    grid.begin_drag(id, Point::new(10, 10));
    grid.update_drag(Point::new(75, 75));
    assert_eq!(grid.drag_candidate(), Some(Cell::new(1, 1)));
    assert_eq!(grid.end_drag(), Cell::new(1, 1));
    assert_eq!(grid.cell_of(id), Some(Cell::new(1, 1)));
    assert!(!grid.is_dragging());
    grid.check_invariants().unwrap();
}

#[test]
fn test_drag_without_motion_stays_put() {
    let mut grid = test_grid(2, 2);
    let id = grid.register(Tile::new(1, 1));
    grid.begin_drag(id, Point::new(10, 10));
    assert_eq!(grid.end_drag(), Cell::ORIGIN);
    assert_eq!(grid.cell_of(id), Some(Cell::ORIGIN));
    assert!(grid.take_changes().iter().all(|change| !matches!(change, LayoutChange::Moved { .. })));
}

#[test]
fn test_cancel_returns_to_original_cell() {
    let mut grid = test_grid(3, 3);
    let id = grid.register(Tile::new(1, 1));
    grid.begin_drag(id, Point::new(10, 10));
    grid.update_drag(Point::new(120, 120));
    assert_eq!(grid.drag_candidate(), Some(Cell::new(2, 2)));
    assert_eq!(grid.cancel_drag(), Cell::ORIGIN);
    assert_eq!(grid.cell_of(id), Some(Cell::ORIGIN));
    grid.check_invariants().unwrap();
}

#[test]
fn test_dragged_dockable_leaves_occupancy() {
    let mut grid = test_grid(2, 2);
    let id = grid.register(Tile::new(2, 1));
    grid.begin_drag(id, Point::new(10, 10));
    assert_eq!(grid.state().occupied_count(), 0);
    assert_eq!(grid.dragged(), Some(id));
    // Still consistent: the lifted dockable is not expected in the bitmap
    grid.check_invariants().unwrap();

    let visual = grid.entry(id).unwrap().visual;
    assert!(!grid.surface().visual(visual).unwrap().visible);
    grid.end_drag();
    assert!(grid.surface().visual(visual).unwrap().visible);
    assert_eq!(grid.state().occupied_count(), 2);
}

#[test]
fn test_pointer_is_clamped_so_span_fits() {
    let mut grid = test_grid(3, 3);
    let id = grid.register(Tile::new(2, 2));
    grid.begin_drag(id, Point::new(10, 10));
    grid.update_drag(Point::new(500, -40));
    assert_eq!(grid.drag_candidate(), Some(Cell::new(1, 0)));
    grid.update_drag(Point::new(-500, 500));
    assert_eq!(grid.drag_candidate(), Some(Cell::new(0, 1)));
}

#[test]
fn test_candidate_avoids_other_dockables() {
    let mut grid = test_grid(3, 1);
    let a = grid.register(Tile::new(1, 1));
    let b = grid.register(Tile::new(1, 1));
    assert_eq!(grid.cell_of(b), Some(Cell::new(1, 0)));
    grid.begin_drag(a, Point::new(10, 10));
    // Over b: the nearest free cell to its left wins
    grid.update_drag(Point::new(60, 10));
    assert_eq!(grid.drag_candidate(), Some(Cell::new(0, 0)));
    grid.update_drag(Point::new(110, 10));
    assert_eq!(grid.drag_candidate(), Some(Cell::new(2, 0)));
    assert_eq!(grid.end_drag(), Cell::new(2, 0));
    grid.check_invariants().unwrap();
}

#[test]
fn test_overlays_drawn_and_cleared() {
    let mut grid = test_grid(2, 2);
    let id = grid.register(Tile::new(1, 1));
    grid.begin_drag(id, Point::new(60, 60));
    assert_eq!(grid.surface().grid_lines().len(), 4);
    assert_eq!(grid.surface().highlight(), Some(BBox::new(52, 52, 47, 47)));
    grid.end_drag();
    assert!(grid.surface().grid_lines().is_empty());
    assert_eq!(grid.surface().highlight(), None);
}

#[test]
fn test_geometry_change_mid_drag_redraws_overlay() {
    let mut grid = test_grid(2, 2);
    let id = grid.register(Tile::new(1, 1));
    grid.begin_drag(id, Point::new(60, 60));
    grid.set_geometry(GeometryUpdate::new().width(3).cell_width(40));
    assert_eq!(grid.surface().grid_lines().len(), 6);
    // Cell (1, 1) is now 40px wide
    assert_eq!(grid.surface().highlight(), Some(BBox::new(42, 52, 37, 47)));
    assert_eq!(grid.end_drag(), Cell::new(1, 1));
}

#[test]
fn test_candidate_taken_mid_drag_falls_back() {
    let mut grid = test_grid(2, 1);
    let a = grid.register(Tile::new(1, 1));
    grid.begin_drag(a, Point::new(10, 10));
    assert_eq!(grid.drag_candidate(), Some(Cell::ORIGIN));

    // Another dockable lands on both the candidate and the original cell
    let b = grid.register(Tile::new(1, 1));
    assert_eq!(grid.cell_of(b), Some(Cell::ORIGIN));
    assert_eq!(grid.end_drag(), Cell::new(1, 0));
    assert_eq!(grid.cell_of(a), Some(Cell::new(1, 0)));
    grid.check_invariants().unwrap();
}

#[test]
#[should_panic(expected = "while another drag is in progress")]
fn test_second_drag_panics() {
    let mut grid = test_grid(2, 2);
    let a = grid.register(Tile::new(1, 1));
    let b = grid.register(Tile::new(1, 1));
    grid.begin_drag(a, Point::new(10, 10));
    grid.begin_drag(b, Point::new(60, 10));
}

#[test]
#[should_panic(expected = "while a drag is in progress")]
fn test_resize_during_drag_panics() {
    let mut grid = test_grid(2, 2);
    let a = grid.register(Tile::new(1, 1));
    grid.begin_drag(a, Point::new(10, 10));
    let _ = grid.resize_dockable(a, SpanUpdate::new(Some(2), None));
}

// ========================================================================
// Surface events
// ========================================================================

#[test]
fn test_events_drive_a_full_drag() {
    let mut grid = test_grid(3, 3);
    let id = grid.register(Tile::new(1, 1));
    let visual = grid.entry(id).unwrap().visual;

    grid.handle_event(SurfaceEvent::DragPress {
        visual,
        pointer: Point::new(5, 5),
    });
    assert!(grid.is_dragging());
    grid.handle_event(SurfaceEvent::DragMotion {
        pointer: Point::new(105, 55),
    });
    grid.handle_event(SurfaceEvent::DragRelease);
    assert_eq!(grid.cell_of(id), Some(Cell::new(2, 1)));
}

#[test]
fn test_stray_events_are_ignored() {
    let mut grid = test_grid(2, 2);
    let id = grid.register(Tile::new(1, 1));
    grid.handle_event(SurfaceEvent::DragPress {
        visual: VisualId(99),
        pointer: Point::new(5, 5),
    });
    grid.handle_event(SurfaceEvent::DragMotion {
        pointer: Point::new(60, 60),
    });
    grid.handle_event(SurfaceEvent::DragRelease);
    grid.handle_event(SurfaceEvent::DragCancel);
    assert!(!grid.is_dragging());
    assert_eq!(grid.cell_of(id), Some(Cell::ORIGIN));
}

#[test]
fn test_drag_cancel_event_aborts() {
    let mut grid = test_grid(2, 2);
    let id = grid.register(Tile::new(1, 1));
    let visual = grid.entry(id).unwrap().visual;
    grid.handle_event(SurfaceEvent::DragPress {
        visual,
        pointer: Point::new(5, 5),
    });
    grid.handle_event(SurfaceEvent::DragMotion {
        pointer: Point::new(60, 60),
    });
    grid.handle_event(SurfaceEvent::DragCancel);
    assert_eq!(grid.cell_of(id), Some(Cell::ORIGIN));
}
