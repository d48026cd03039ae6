//! The capability a widget needs to live on a [`crate::grid::Grid`]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::Span;

/// Identifier the grid hands out when a dockable is registered
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DockableId(pub u64);

impl fmt::Display for DockableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something that occupies a rectangle of cells and can be dragged around
///
/// The grid owns registered dockables. Spans are only changed through
/// [`crate::grid::Grid::resize_dockable`], which calls [`Dockable::set_span`]
/// and then re-places the dockable.
pub trait Dockable {
    /// Label shown on the visual
    fn title(&self) -> &str;

    /// Current size in cells
    fn span(&self) -> Span;

    fn set_span(&mut self, span: Span);

    /// Named sub-regions that also start a drag, besides the widget itself
    fn drag_regions(&self) -> &[String] {
        &[]
    }
}

impl fmt::Debug for dyn Dockable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dockable")
            .field("title", &self.title())
            .field("span", &self.span())
            .finish()
    }
}

/// Partial span change; `None` keeps the current value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanUpdate {
    pub cols: Option<usize>,
    pub rows: Option<usize>,
}

impl SpanUpdate {
    pub fn new(cols: Option<usize>, rows: Option<usize>) -> Self {
        Self { cols, rows }
    }

    /// Resolve against `current`, rejecting zero dimensions
    pub fn apply_to(&self, current: Span) -> Result<Span> {
        Span::try_new(
            self.cols.unwrap_or(current.cols),
            self.rows.unwrap_or(current.rows),
        )
    }
}
