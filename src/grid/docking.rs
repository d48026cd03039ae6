//! The docking surface: registry, placement, drags and geometry changes
//!
//! A [`Grid`] owns its occupancy state, the authored and live geometry, the
//! registered dockables and at most one drag session. Everything it shows
//! goes through a [`Surface`].

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Point, Size, Span};
use super::geometry::{GeometryUpdate, GridGeometry};
use super::resize::{reflow, ResizeProtocol, ResizeTracker};
use super::search::{find_empty_region, find_or_grow, Placement};
use super::state::GridState;
use crate::dockable::{Dockable, DockableId, SpanUpdate};
use crate::error::{GridError, Result};
use crate::host::{Surface, SurfaceEvent, VisualId};
use crate::theme::{GridVisual, GridVisualUpdate, HighlightUpdate, HighlightVisual};

/// Quiet period before a burst of viewport notifications is applied
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(50);

// The highlight sits just inside the cell outlines
const HIGHLIGHT_INSET_TOP_LEFT: u32 = 2;
const HIGHLIGHT_INSET_BOTTOM_RIGHT: u32 = 1;

/// Construction parameters for a [`Grid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub geometry: GridGeometry,
    pub resize_protocol: ResizeProtocol,
    pub resize_debounce: Duration,
    pub highlight: HighlightVisual,
    pub grid_visual: GridVisual,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            geometry: GridGeometry::default(),
            resize_protocol: ResizeProtocol::default(),
            resize_debounce: RESIZE_DEBOUNCE,
            highlight: HighlightVisual::default(),
            grid_visual: GridVisual::default(),
        }
    }
}

/// Where a registered dockable lives: its visual handle and top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockableEntry {
    pub visual: VisualId,
    pub cell: Cell,
}

/// A committed layout mutation, queued for whoever persists layouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "kebab-case")]
pub enum LayoutChange {
    Registered {
        id: DockableId,
        title: String,
        cell: Cell,
        span: Span,
    },
    Moved {
        id: DockableId,
        from: Cell,
        to: Cell,
    },
    Resized {
        id: DockableId,
        span: Span,
        cell: Cell,
    },
    Removed {
        id: DockableId,
    },
    Geometry {
        geometry: GridGeometry,
    },
    Protocol {
        protocol: ResizeProtocol,
    },
}

struct Docked {
    widget: Box<dyn Dockable>,
    entry: DockableEntry,
    /// False while the dockable is lifted out of the occupancy (dragging, re-placing)
    placed: bool,
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    dockable: DockableId,
    original_cell: Cell,
    candidate: Option<Cell>,
}

/// A cell grid that places, moves and drags dockables without overlap
pub struct Grid<S: Surface> {
    surface: S,
    state: GridState,
    geometry: GridGeometry,
    orig_geometry: GridGeometry,
    dockables: BTreeMap<DockableId, Docked>,
    next_id: u64,
    drag: Option<DragSession>,
    resize: ResizeTracker,
    protocol: ResizeProtocol,
    debounce: Duration,
    highlight: HighlightVisual,
    grid_visual: GridVisual,
    changes: Vec<LayoutChange>,
}

impl<S: Surface> Grid<S> {
    /// Create an empty grid on `surface` and apply the initial resize protocol
    pub fn new(surface: S, config: GridConfig) -> Self {
        let mut geometry = config.geometry;
        geometry.width = geometry.width.max(1);
        geometry.height = geometry.height.max(1);

        let mut grid = Self {
            surface,
            state: GridState::new(geometry.width, geometry.height),
            geometry,
            orig_geometry: geometry,
            dockables: BTreeMap::new(),
            next_id: 1,
            drag: None,
            resize: ResizeTracker::new(),
            protocol: config.resize_protocol,
            debounce: config.resize_debounce,
            highlight: config.highlight,
            grid_visual: config.grid_visual,
            changes: Vec::new(),
        };
        grid.surface.set_scroll_region(geometry.scroll_extent());
        if grid.protocol != ResizeProtocol::None {
            let viewport = grid.surface.viewport();
            grid.apply_viewport(viewport);
        }
        grid
    }

    // ========================================================================
    // Registry
    // ========================================================================

    /// Place a dockable at the free region nearest to (0, 0), growing the grid if needed
    pub fn register<D: Dockable + 'static>(&mut self, dockable: D) -> DockableId {
        self.register_boxed(Box::new(dockable))
    }

    pub fn register_boxed(&mut self, widget: Box<dyn Dockable>) -> DockableId {
        let span = widget.span();
        let cell = self.locate(span, Cell::ORIGIN);

        let id = DockableId(self.next_id);
        self.next_id += 1;

        let visual = self
            .surface
            .attach(widget.title(), self.geometry.bbox(cell, span));
        self.surface.bind_drag(visual, None);
        for region in widget.drag_regions() {
            self.surface.bind_drag(visual, Some(region));
        }
        self.state.populate(cell, span);

        tracing::debug!(%id, title = widget.title(), ?cell, ?span, "registered dockable");
        self.changes.push(LayoutChange::Registered {
            id,
            title: widget.title().to_string(),
            cell,
            span,
        });
        self.dockables.insert(
            id,
            Docked {
                widget,
                entry: DockableEntry { visual, cell },
                placed: true,
            },
        );
        id
    }

    /// Move to `cell` if the rectangle there is free apart from the dockable itself
    ///
    /// Returns false and changes nothing when the target conflicts with
    /// another dockable or leaves the grid.
    pub fn move_dockable(&mut self, id: DockableId, cell: Cell) -> bool {
        self.assert_not_dragged(id, "move");
        let (span, old) = {
            let docked = self.docked(id);
            (docked.widget.span(), docked.entry.cell)
        };
        if !self.state.contains_rect(cell, span) {
            return false;
        }
        let conflicts = self.state.conflicts_where(cell, span);
        if conflicts
            .occupied_cells()
            .any(|conflict| !conflict.within(old, span))
        {
            tracing::debug!(%id, ?cell, "move rejected by conflict");
            return false;
        }

        self.state.unpopulate(old, span);
        self.place(id, cell);
        if cell != old {
            self.changes.push(LayoutChange::Moved {
                id,
                from: old,
                to: cell,
            });
        }
        true
    }

    /// Change a dockable's span and re-place it as close to its old cell as possible
    ///
    /// # Panics
    ///
    /// If a drag is in progress.
    pub fn resize_dockable(&mut self, id: DockableId, update: SpanUpdate) -> Result<Cell> {
        assert!(
            self.drag.is_none(),
            "cannot resize dockable {} while a drag is in progress",
            id
        );
        let (old_span, old_cell) = {
            let docked = self.docked(id);
            (docked.widget.span(), docked.entry.cell)
        };
        let span = update.apply_to(old_span)?;

        self.state.unpopulate(old_cell, old_span);
        {
            let docked = self.docked_mut(id);
            docked.widget.set_span(span);
            docked.placed = false;
        }
        let cell = self.locate(span, old_cell);
        self.place(id, cell);

        tracing::debug!(%id, ?span, ?cell, "resized dockable");
        self.changes.push(LayoutChange::Resized { id, span, cell });
        Ok(cell)
    }

    /// Unregister a dockable and hand it back
    ///
    /// # Panics
    ///
    /// If `id` is unknown or currently being dragged.
    pub fn remove(&mut self, id: DockableId) -> Box<dyn Dockable> {
        self.assert_not_dragged(id, "remove");
        let docked = self
            .dockables
            .remove(&id)
            .unwrap_or_else(|| panic!("no dockable with id {} on this grid", id));
        let span = docked.widget.span();
        if docked.placed {
            self.state.unpopulate(docked.entry.cell, span);
        }
        for region in docked.widget.drag_regions() {
            self.surface.unbind_drag(docked.entry.visual, Some(region));
        }
        self.surface.unbind_drag(docked.entry.visual, None);
        self.surface.destroy(docked.entry.visual);

        tracing::debug!(%id, "removed dockable");
        self.changes.push(LayoutChange::Removed { id });
        docked.widget
    }

    // ========================================================================
    // Drag session
    // ========================================================================

    /// Lift a dockable out of the occupancy and start tracking the pointer
    ///
    /// # Panics
    ///
    /// If another drag is in progress or `id` is unknown.
    pub fn begin_drag(&mut self, id: DockableId, pointer: Point) {
        assert!(
            self.drag.is_none(),
            "cannot drag dockable {} while another drag is in progress",
            id
        );
        let (span, entry) = {
            let docked = self.docked(id);
            (docked.widget.span(), docked.entry)
        };

        self.surface
            .draw_grid_lines(&self.geometry.cell_outlines(), &self.grid_visual);
        self.state.unpopulate(entry.cell, span);
        self.docked_mut(id).placed = false;
        self.surface.hide(entry.visual);
        self.drag = Some(DragSession {
            dockable: id,
            original_cell: entry.cell,
            candidate: None,
        });

        tracing::debug!(%id, cell = ?entry.cell, "drag started");
        self.update_drag(pointer);
    }

    /// Recompute the landing cell for the pointer and move the highlight there
    ///
    /// # Panics
    ///
    /// If no drag is in progress.
    pub fn update_drag(&mut self, pointer: Point) {
        let session = self
            .drag
            .expect("update_drag requires a drag in progress");
        let span = self.docked(session.dockable).widget.span();

        self.surface.clear_highlight();
        let (column, row) = self.geometry.cell_at(pointer);
        let anchor = self.geometry.clamp_anchor(column, row, span);
        let candidate = if self.state.contains_rect(anchor, span) {
            find_empty_region(&self.state, anchor, span)
        } else {
            None
        };
        if let Some(cell) = candidate {
            self.draw_highlight(cell, span);
        }
        tracing::trace!(?pointer, ?anchor, ?candidate, "drag motion");

        if let Some(session) = self.drag.as_mut() {
            session.candidate = candidate;
        }
    }

    /// Drop the dragged dockable at the candidate cell, or back where it started
    ///
    /// # Panics
    ///
    /// If no drag is in progress.
    pub fn end_drag(&mut self) -> Cell {
        self.finish_drag(true)
    }

    /// Abort the drag and return the dockable to its original cell
    ///
    /// # Panics
    ///
    /// If no drag is in progress.
    pub fn cancel_drag(&mut self) -> Cell {
        self.finish_drag(false)
    }

    fn finish_drag(&mut self, commit: bool) -> Cell {
        let session = self
            .drag
            .take()
            .expect("ending a drag requires a drag in progress");
        let id = session.dockable;
        let span = self.docked(id).widget.span();

        self.surface.clear_grid_lines();
        self.surface.clear_highlight();

        // Other mutations may have happened mid-drag, so both cells are re-checked
        let candidate = session.candidate.filter(|_| commit);
        let target = match candidate {
            Some(cell) if self.fits(cell, span) => cell,
            _ if self.fits(session.original_cell, span) => session.original_cell,
            _ => self.locate(span, session.original_cell),
        };

        self.place(id, target);
        let visual = self.docked(id).entry.visual;
        self.surface.show(visual);

        tracing::debug!(%id, ?target, committed = commit, "drag finished");
        if target != session.original_cell {
            self.changes.push(LayoutChange::Moved {
                id,
                from: session.original_cell,
                to: target,
            });
        }
        target
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Replace the authored geometry, keeping every dockable inside it
    ///
    /// Width and height are raised to the smallest extent that still holds
    /// every placed dockable (and at least one cell). Returns the new
    /// authored geometry; the live geometry may differ once the active
    /// resize protocol is re-applied.
    pub fn set_geometry(&mut self, update: GeometryUpdate) -> GridGeometry {
        let mut next = update.apply_to(&self.orig_geometry);
        next.width = next.width.max(self.state.min_width()).max(1);
        next.height = next.height.max(self.state.min_height()).max(1);

        let previous = self.geometry;
        self.orig_geometry = next;
        self.geometry = next;
        self.surface.set_scroll_region(next.scroll_extent());
        if next.extent_differs(&previous) {
            self.rebuild_state();
        }
        if next.pixels_differ(&previous) {
            self.reproject();
        }
        tracing::debug!(?next, "geometry set");
        self.changes.push(LayoutChange::Geometry { geometry: next });

        if self.protocol != ResizeProtocol::None {
            if let Some(viewport) = self.resize.last_applied() {
                self.apply_viewport(viewport);
            }
        }
        self.refresh_drag_overlay();
        next
    }

    /// Switch the resize protocol, restoring the authored geometry first
    ///
    /// Any pending debounced resize is dropped. Protocols other than
    /// [`ResizeProtocol::None`] are applied straight away against the
    /// current viewport.
    pub fn set_resize_protocol(&mut self, protocol: ResizeProtocol) {
        self.protocol = protocol;
        if let Some(timer) = self.resize.cancel() {
            self.surface.cancel(timer);
        }
        self.swap_geometry(self.orig_geometry);
        if protocol != ResizeProtocol::None {
            let viewport = self.surface.viewport();
            self.apply_viewport(viewport);
        }
        tracing::debug!(%protocol, "resize protocol set");
        self.changes.push(LayoutChange::Protocol { protocol });
    }

    pub fn set_highlight_visual(&mut self, update: HighlightUpdate) -> HighlightVisual {
        self.highlight = update.apply_to(&self.highlight);
        self.refresh_drag_overlay();
        self.highlight
    }

    pub fn set_grid_visual(&mut self, update: GridVisualUpdate) -> GridVisual {
        self.grid_visual = update.apply_to(&self.grid_visual);
        self.refresh_drag_overlay();
        self.grid_visual
    }

    // ========================================================================
    // Host events
    // ========================================================================

    /// Route an event from the surface. Events that do not apply are ignored.
    pub fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::DragPress { visual, pointer } => {
                if self.drag.is_some() {
                    tracing::debug!(?visual, "press ignored, drag already in progress");
                    return;
                }
                match self.dockable_for_visual(visual) {
                    Some(id) => self.begin_drag(id, pointer),
                    None => tracing::debug!(?visual, "press on unknown visual ignored"),
                }
            }
            SurfaceEvent::DragMotion { pointer } => {
                if self.drag.is_some() {
                    self.update_drag(pointer);
                }
            }
            SurfaceEvent::DragRelease => {
                if self.drag.is_some() {
                    self.end_drag();
                }
            }
            SurfaceEvent::DragCancel => {
                if self.drag.is_some() {
                    self.cancel_drag();
                }
            }
            SurfaceEvent::Resized(viewport) => {
                if self.protocol == ResizeProtocol::None {
                    return;
                }
                if self.resize.notify(viewport) {
                    let timer = self.surface.schedule(self.debounce);
                    self.resize.set_timer(timer);
                }
            }
            SurfaceEvent::Timer(timer) => {
                if let Some(viewport) = self.resize.fire(timer) {
                    self.apply_viewport(viewport);
                }
            }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Live geometry (after any resize protocol)
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// Geometry last set through [`Grid::set_geometry`]
    pub fn orig_geometry(&self) -> GridGeometry {
        self.orig_geometry
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Top-left cell; for a dragged dockable, the cell it was lifted from
    pub fn cell_of(&self, id: DockableId) -> Option<Cell> {
        self.dockables.get(&id).map(|docked| docked.entry.cell)
    }

    pub fn span_of(&self, id: DockableId) -> Option<Span> {
        self.dockables.get(&id).map(|docked| docked.widget.span())
    }

    pub fn entry(&self, id: DockableId) -> Option<DockableEntry> {
        self.dockables.get(&id).map(|docked| docked.entry)
    }

    pub fn dockable(&self, id: DockableId) -> Option<&dyn Dockable> {
        self.dockables.get(&id).map(|docked| docked.widget.as_ref())
    }

    /// Registered dockables in id order
    pub fn dockables(&self) -> impl Iterator<Item = (DockableId, &dyn Dockable)> + '_ {
        self.dockables
            .iter()
            .map(|(id, docked)| (*id, docked.widget.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.dockables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dockables.is_empty()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn dragged(&self) -> Option<DockableId> {
        self.drag.map(|session| session.dockable)
    }

    pub fn drag_candidate(&self) -> Option<Cell> {
        self.drag.and_then(|session| session.candidate)
    }

    pub fn resize_protocol(&self) -> ResizeProtocol {
        self.protocol
    }

    pub fn highlight_visual(&self) -> HighlightVisual {
        self.highlight
    }

    pub fn grid_visual(&self) -> GridVisual {
        self.grid_visual
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Drain the layout changes recorded since the last call
    pub fn take_changes(&mut self) -> Vec<LayoutChange> {
        std::mem::take(&mut self.changes)
    }

    /// Check that occupancy matches the registry exactly and nothing overlaps
    pub fn check_invariants(&self) -> Result<()> {
        let mut expected = self.state.empty_copy();
        for (id, docked) in &self.dockables {
            if !docked.placed {
                continue;
            }
            let cell = docked.entry.cell;
            let span = docked.widget.span();
            if !expected.contains_rect(cell, span) {
                return Err(GridError::Invariant {
                    cell,
                    reason: format!("dockable {} extends past the grid", id),
                });
            }
            let overlap = expected.conflicts_where(cell, span);
            if let Some(cell) = overlap.occupied_cells().next() {
                return Err(GridError::Invariant {
                    cell,
                    reason: format!("dockable {} overlaps another dockable", id),
                });
            }
            expected.populate(cell, span);
        }

        for row in 0..self.state.height() {
            for column in 0..self.state.width() {
                let cell = Cell::new(column, row);
                match (self.state.is_occupied(cell), expected.is_occupied(cell)) {
                    (true, false) => {
                        return Err(GridError::Invariant {
                            cell,
                            reason: "occupied but no dockable covers it".to_string(),
                        })
                    }
                    (false, true) => {
                        return Err(GridError::Invariant {
                            cell,
                            reason: "covered by a dockable but not occupied".to_string(),
                        })
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn docked(&self, id: DockableId) -> &Docked {
        self.dockables
            .get(&id)
            .unwrap_or_else(|| panic!("no dockable with id {} on this grid", id))
    }

    fn docked_mut(&mut self, id: DockableId) -> &mut Docked {
        self.dockables
            .get_mut(&id)
            .unwrap_or_else(|| panic!("no dockable with id {} on this grid", id))
    }

    fn dockable_for_visual(&self, visual: VisualId) -> Option<DockableId> {
        self.dockables
            .iter()
            .find(|(_, docked)| docked.entry.visual == visual)
            .map(|(id, _)| *id)
    }

    fn assert_not_dragged(&self, id: DockableId, action: &str) {
        assert!(
            self.dragged() != Some(id),
            "cannot {} dockable {} while it is being dragged",
            action,
            id
        );
    }

    fn fits(&self, cell: Cell, span: Span) -> bool {
        self.state.contains_rect(cell, span) && !self.state.conflicts(cell, span)
    }

    /// Nearest free cell to `hint`, growing the grid when nothing fits
    fn locate(&mut self, span: Span, hint: Cell) -> Cell {
        match find_or_grow(&self.state, span, hint) {
            Placement::Existing(cell) => cell,
            Placement::Grow {
                width,
                height,
                cell,
            } => {
                self.set_geometry(GeometryUpdate::new().width(width).height(height));
                cell
            }
        }
    }

    /// Occupy `cell` and move the visual there. Conflicts are the caller's concern.
    fn place(&mut self, id: DockableId, cell: Cell) {
        let docked = self
            .dockables
            .get_mut(&id)
            .unwrap_or_else(|| panic!("no dockable with id {} on this grid", id));
        let span = docked.widget.span();
        self.state.populate(cell, span);
        docked.entry.cell = cell;
        docked.placed = true;
        self.surface
            .place(docked.entry.visual, self.geometry.bbox(cell, span));
    }

    /// Fresh occupancy from the placed dockables, never by reshaping the old bitmap
    fn rebuild_state(&mut self) {
        let mut state = GridState::new(self.orig_geometry.width, self.orig_geometry.height);
        for docked in self.dockables.values().filter(|docked| docked.placed) {
            state.populate(docked.entry.cell, docked.widget.span());
        }
        self.state = state;
    }

    fn reproject(&mut self) {
        for docked in self.dockables.values().filter(|docked| docked.placed) {
            let bbox = self.geometry.bbox(docked.entry.cell, docked.widget.span());
            self.surface.place(docked.entry.visual, bbox);
        }
    }

    fn swap_geometry(&mut self, next: GridGeometry) {
        let previous = self.geometry;
        self.geometry = next;
        if next.pixels_differ(&previous) {
            self.reproject();
            self.refresh_drag_overlay();
        }
    }

    fn apply_viewport(&mut self, viewport: Size) {
        let next = reflow(&self.orig_geometry, self.protocol, viewport);
        self.resize.mark_applied(viewport);
        if next != self.geometry {
            tracing::debug!(?viewport, protocol = %self.protocol, "reflowing grid");
        }
        self.swap_geometry(next);
    }

    fn draw_highlight(&mut self, cell: Cell, span: Span) {
        let bbox = self
            .geometry
            .bbox(cell, span)
            .inset(HIGHLIGHT_INSET_TOP_LEFT, HIGHLIGHT_INSET_BOTTOM_RIGHT);
        self.surface.draw_highlight(bbox, &self.highlight);
    }

    /// Redraw the drag overlays after the geometry or the visuals changed
    fn refresh_drag_overlay(&mut self) {
        let Some(session) = self.drag else {
            return;
        };
        let span = self.docked(session.dockable).widget.span();
        self.surface
            .draw_grid_lines(&self.geometry.cell_outlines(), &self.grid_visual);
        self.surface.clear_highlight();

        let candidate = session.candidate.filter(|cell| self.fits(*cell, span));
        if let Some(cell) = candidate {
            self.draw_highlight(cell, span);
        }
        if let Some(session) = self.drag.as_mut() {
            session.candidate = candidate;
        }
    }
}
