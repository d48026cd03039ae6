//! Window-resize reflow policy
//!
//! When the viewport grows past the grid's authored scroll extent, the
//! resize protocol decides where the slack goes. The computation itself is
//! pure; [`ResizeTracker`] holds the debounce bookkeeping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::cell::Size;
use super::geometry::GridGeometry;
use crate::error::GridError;
use crate::host::TimerId;

/// How extra viewport space is distributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeProtocol {
    /// Keep the authored geometry whatever the window size
    None,
    /// Grow each cell to share the slack equally
    #[default]
    #[serde(alias = "cells")]
    ExpandCells,
    /// Grow the padding between columns/rows instead
    #[serde(alias = "padding")]
    AddPadding,
}

impl ResizeProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResizeProtocol::None => "none",
            ResizeProtocol::ExpandCells => "cells",
            ResizeProtocol::AddPadding => "padding",
        }
    }
}

impl fmt::Display for ResizeProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeProtocol {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(ResizeProtocol::None),
            "cells" | "expand-cells" => Ok(ResizeProtocol::ExpandCells),
            "padding" | "add-padding" => Ok(ResizeProtocol::AddPadding),
            _ => Err(GridError::UnknownResizeProtocol(s.to_string())),
        }
    }
}

/// Geometry to use for `viewport`, derived from the authored geometry
///
/// An axis reflows only when the viewport is at least as large as the
/// authored scroll extent along it. With neither axis reflowing the authored
/// geometry comes back unchanged.
pub fn reflow(authored: &GridGeometry, protocol: ResizeProtocol, viewport: Size) -> GridGeometry {
    let extent = authored.scroll_extent();
    let mut geometry = *authored;

    if viewport.width >= extent.width {
        match protocol {
            ResizeProtocol::None => {}
            ResizeProtocol::ExpandCells => {
                if authored.width > 0 {
                    geometry.cell_width = share(viewport.width, authored.width);
                }
            }
            ResizeProtocol::AddPadding => {
                if authored.width > 1 {
                    let used = run(authored.width, authored.cell_width);
                    geometry.column_padding =
                        share(viewport.width.saturating_sub(used), authored.width - 1);
                }
            }
        }
    }

    if viewport.height >= extent.height {
        match protocol {
            ResizeProtocol::None => {}
            ResizeProtocol::ExpandCells => {
                if authored.height > 0 {
                    geometry.cell_height = share(viewport.height, authored.height);
                }
            }
            ResizeProtocol::AddPadding => {
                if authored.height > 1 {
                    let used = run(authored.height, authored.cell_height);
                    geometry.row_padding =
                        share(viewport.height.saturating_sub(used), authored.height - 1);
                }
            }
        }
    }

    geometry.clamped()
}

/// `pixels` split evenly over `parts` (non-zero)
fn share(pixels: u32, parts: usize) -> u32 {
    (u64::from(pixels) / parts as u64) as u32
}

/// Pixels used by `count` cells of `cell` pixels, saturating
fn run(count: usize, cell: u32) -> u32 {
    u32::try_from((count as u64).saturating_mul(u64::from(cell))).unwrap_or(u32::MAX)
}

/// Debounce state for viewport notifications
#[derive(Debug, Default)]
pub struct ResizeTracker {
    /// Most recent viewport size not yet applied
    pending: Option<Size>,
    /// Timer that will apply `pending`
    timer: Option<TimerId>,
    /// Last viewport size that was applied
    applied: Option<Size>,
}

impl ResizeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notification. Returns true when a timer must be scheduled.
    pub fn notify(&mut self, viewport: Size) -> bool {
        let needs_timer = self.timer.is_none();
        self.pending = Some(viewport);
        needs_timer
    }

    pub fn set_timer(&mut self, timer: TimerId) {
        self.timer = Some(timer);
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_some()
    }

    /// Consume the pending size if `timer` is the one we scheduled
    pub fn fire(&mut self, timer: TimerId) -> Option<Size> {
        if self.timer != Some(timer) {
            return None;
        }
        self.timer = None;
        let viewport = self.pending.take()?;
        self.applied = Some(viewport);
        Some(viewport)
    }

    /// Forget the pending notification, returning the timer to cancel
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.pending = None;
        self.timer.take()
    }

    pub fn mark_applied(&mut self, viewport: Size) {
        self.applied = Some(viewport);
    }

    pub fn last_applied(&self) -> Option<Size> {
        self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authored() -> GridGeometry {
        GridGeometry::new(4, 2, 50, 50, 0, 0)
    }

    #[test]
    fn test_parse_protocols() {
        assert_eq!("none".parse::<ResizeProtocol>(), Ok(ResizeProtocol::None));
        assert_eq!("Cells".parse::<ResizeProtocol>(), Ok(ResizeProtocol::ExpandCells));
        assert_eq!("add-padding".parse::<ResizeProtocol>(), Ok(ResizeProtocol::AddPadding));
        assert_eq!(
            "stretch".parse::<ResizeProtocol>(),
            Err(GridError::UnknownResizeProtocol("stretch".to_string()))
        );
    }

    #[test]
    fn test_expand_cells_floor_divides() {
        let g = reflow(&authored(), ResizeProtocol::ExpandCells, Size::new(403, 150));
        assert_eq!(g.cell_width, 100);
        assert_eq!(g.cell_height, 75);
        assert_eq!(g.column_padding, 0);
    }

    #[test]
    fn test_smaller_viewport_keeps_authored() {
        let g = reflow(&authored(), ResizeProtocol::ExpandCells, Size::new(199, 99));
        assert_eq!(g, authored());
    }

    #[test]
    fn test_only_triggered_axis_changes() {
        let g = reflow(&authored(), ResizeProtocol::ExpandCells, Size::new(400, 80));
        assert_eq!(g.cell_width, 100);
        assert_eq!(g.cell_height, 50);
    }

    #[test]
    fn test_add_padding_spreads_slack() {
        let g = reflow(&authored(), ResizeProtocol::AddPadding, Size::new(260, 130));
        assert_eq!(g.column_padding, (260 - 200) / 3);
        assert_eq!(g.row_padding, 30);
        assert_eq!(g.cell_width, 50);
    }

    #[test]
    fn test_add_padding_single_column_unchanged() {
        let single = GridGeometry::new(1, 1, 50, 50, 0, 0);
        let g = reflow(&single, ResizeProtocol::AddPadding, Size::new(500, 500));
        assert_eq!(g, single);
    }

    #[test]
    fn test_tracker_coalesces_notifications() {
        let mut tracker = ResizeTracker::new();
        assert!(tracker.notify(Size::new(100, 100)));
        tracker.set_timer(TimerId(7));
        assert!(!tracker.notify(Size::new(120, 100)));
        assert!(!tracker.notify(Size::new(140, 100)));
        assert_eq!(tracker.fire(TimerId(3)), None);
        assert_eq!(tracker.fire(TimerId(7)), Some(Size::new(140, 100)));
        assert!(!tracker.is_pending());
        assert_eq!(tracker.last_applied(), Some(Size::new(140, 100)));
    }

    #[test]
    fn test_tracker_cancel_returns_timer() {
        let mut tracker = ResizeTracker::new();
        tracker.notify(Size::new(100, 100));
        tracker.set_timer(TimerId(1));
        assert_eq!(tracker.cancel(), Some(TimerId(1)));
        assert_eq!(tracker.fire(TimerId(1)), None);
    }
}
