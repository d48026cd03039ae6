//! Spooky console - grid-docking layout engine and command shell
//!
//! Widgets ([`dockable::Dockable`]) are registered onto a cell
//! [`grid::Grid`], placed without overlap, dragged and re-snapped, resized,
//! and kept consistent as the grid grows or is reflowed on window resize.
//! The engine draws through the [`host::Surface`] trait; the shell drives it
//! through the in-memory [`host::HeadlessToolkit`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod dockable;
pub mod error;
pub mod grid;
pub mod host;
pub mod journal;
pub mod shell;
pub mod theme;
pub mod tracing;
pub mod widgets;
pub mod window;

// Re-export commonly used types
pub use config::ConsoleConfig;
pub use dockable::{Dockable, DockableId, SpanUpdate};
pub use error::{GridError, Result};
pub use grid::{Cell, Grid, GridConfig, GridGeometry, ResizeProtocol, Span};
pub use window::WindowManager;
