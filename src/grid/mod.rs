//! Grid-docking layout engine
//!
//! - [`cell`]: value types (cells, spans, pixel boxes)
//! - [`state`]: the occupancy bitmap
//! - [`geometry`]: cell sizes, padding and pixel projection
//! - [`search`]: nearest-fit search and the growth policy
//! - [`resize`]: how window resizes reflow the geometry
//! - [`docking`]: the [`Grid`] itself

pub mod cell;
pub mod docking;
pub mod geometry;
pub mod resize;
pub mod search;
pub mod state;

pub use cell::{BBox, Cell, Point, Size, Span};
pub use docking::{DockableEntry, Grid, GridConfig, LayoutChange, RESIZE_DEBOUNCE};
pub use geometry::{GeometryUpdate, GridGeometry, MIN_CELL_HEIGHT, MIN_CELL_WIDTH};
pub use resize::{reflow, ResizeProtocol, ResizeTracker};
pub use search::{find_empty_region, find_or_grow, Placement};
pub use state::GridState;
