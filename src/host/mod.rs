//! Render-host abstraction
//!
//! The docking engine never touches a GUI toolkit directly. It talks to a
//! [`Surface`]: one scrollable canvas per window that can host opaque
//! visuals, draw two kinds of overlay, report the viewport size and run
//! one-shot timers. Pointer gestures and window notifications come back
//! from the host as [`SurfaceEvent`]s, which the owner feeds to
//! [`crate::grid::Grid::handle_event`].
//!
//! [`HeadlessToolkit`] is the in-memory implementation used by the shell
//! and the tests.

mod headless;

pub use headless::{HeadlessSurface, HeadlessToolkit, SurfaceCall, VisualRecord};

use std::time::Duration;

use crate::grid::{BBox, Point, Size};
use crate::theme::{GridVisual, HighlightVisual};

/// Opaque handle for a visual attached to a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualId(pub u64);

/// Handle for a scheduled one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Events a surface delivers to its grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Drag button pressed on a visual (or one of its bound regions)
    DragPress { visual: VisualId, pointer: Point },
    /// Pointer moved while the drag button is held
    DragMotion { pointer: Point },
    /// Drag button released
    DragRelease,
    /// The pointer grab was lost mid-drag
    DragCancel,
    /// Viewport size changed
    Resized(Size),
    /// A timer from [`Surface::schedule`] expired
    Timer(TimerId),
}

/// Canvas operations the docking engine needs from a toolkit
pub trait Surface {
    /// Attach a visual for `title` occupying `bbox` on the canvas
    fn attach(&mut self, title: &str, bbox: BBox) -> VisualId;
    /// Move and resize an attached visual
    fn place(&mut self, visual: VisualId, bbox: BBox);
    fn show(&mut self, visual: VisualId);
    fn hide(&mut self, visual: VisualId);
    fn destroy(&mut self, visual: VisualId);

    /// Route drag gestures on `visual` (or its named sub-region) to the grid
    fn bind_drag(&mut self, visual: VisualId, region: Option<&str>);
    /// Remove a binding made with [`Surface::bind_drag`]
    fn unbind_drag(&mut self, visual: VisualId, region: Option<&str>);

    fn draw_grid_lines(&mut self, outlines: &[BBox], visual: &GridVisual);
    fn clear_grid_lines(&mut self);
    fn draw_highlight(&mut self, bbox: BBox, visual: &HighlightVisual);
    fn clear_highlight(&mut self);

    /// Size of the scrollable area
    fn set_scroll_region(&mut self, extent: Size);
    /// Currently visible pixel size
    fn viewport(&self) -> Size;

    fn schedule(&mut self, delay: Duration) -> TimerId;
    fn cancel(&mut self, timer: TimerId);

    fn set_title(&mut self, title: &str);
}

/// Factory for window surfaces
pub trait Toolkit {
    type Surface: Surface;

    /// Create a top-level window surface
    fn create_surface(&mut self, title: &str) -> Self::Surface;
}
