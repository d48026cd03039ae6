//! Error types for the console library
//!
//! Precondition violations (unknown dockable ids, resizing while dragging)
//! are caller bugs and panic instead of showing up here.

use thiserror::Error;

use crate::grid::Cell;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, GridError>;

/// Recoverable errors raised when invalid configuration enters the engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("span must be at least 1x1, got {cols}x{rows}")]
    InvalidSpan { cols: usize, rows: usize },
    #[error("unknown resize protocol `{0}` (expected none, cells or padding)")]
    UnknownResizeProtocol(String),
    #[error("invalid colour `{0}`")]
    InvalidColour(String),
    #[error("window {0} does not exist")]
    UnknownWindow(usize),
    #[error("no dockable with id {0}")]
    UnknownDockable(u64),
    #[error("unknown widget kind `{0}`")]
    UnknownWidget(String),
    #[error("grid invariant violated at {cell:?}: {reason}")]
    Invariant { cell: Cell, reason: String },
}
