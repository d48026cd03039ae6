//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::Duration;

use spooky_console::dockable::Dockable;
use spooky_console::grid::{Grid, GridConfig, GridGeometry, ResizeProtocol, Size, Span};
use spooky_console::host::HeadlessSurface;

/// Minimal dockable with a fixed title
pub struct Tile {
    title: String,
    span: Span,
    regions: Vec<String>,
}

impl Tile {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            title: "tile".to_string(),
            span: Span::new(cols, rows),
            regions: Vec::new(),
        }
    }

    pub fn titled(title: &str, cols: usize, rows: usize) -> Self {
        Self {
            title: title.to_string(),
            ..Self::new(cols, rows)
        }
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.regions.push(region.to_string());
        self
    }
}

impl Dockable for Tile {
    fn title(&self) -> &str {
        &self.title
    }

    fn span(&self) -> Span {
        self.span
    }

    fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    fn drag_regions(&self) -> &[String] {
        &self.regions
    }
}

/// `width` x `height` grid of 50px cells that ignores window resizes
pub fn test_grid(width: usize, height: usize) -> Grid<HeadlessSurface> {
    grid_with(width, height, ResizeProtocol::None, Size::new(100, 100))
}

/// Grid of 50px cells with no padding, the given protocol and initial viewport
pub fn grid_with(
    width: usize,
    height: usize,
    protocol: ResizeProtocol,
    viewport: Size,
) -> Grid<HeadlessSurface> {
    let config = GridConfig {
        geometry: GridGeometry::new(width, height, 50, 50, 0, 0),
        resize_protocol: protocol,
        resize_debounce: Duration::from_millis(50),
        ..GridConfig::default()
    };
    Grid::new(HeadlessSurface::new(viewport), config)
}

/// Resize the viewport and let the debounce timer expire
pub fn resize_and_settle(grid: &mut Grid<HeadlessSurface>, viewport: Size) {
    let event = grid.surface_mut().resize_viewport(viewport);
    grid.handle_event(event);
    settle(grid);
}

/// Advance the clock past the debounce delay and deliver due timers
pub fn settle(grid: &mut Grid<HeadlessSurface>) {
    let events = grid.surface_mut().advance(Duration::from_millis(50));
    for event in events {
        grid.handle_event(event);
    }
}
