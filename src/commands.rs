//! Shell command table
//!
//! Each line typed at the prompt is parsed with clap into a
//! [`ShellCommand`]. The [`crate::shell::Shell`] maps every variant onto a
//! window-manager or grid operation.

use clap::{Args, Parser, Subcommand};

use crate::grid::ResizeProtocol;
use crate::theme::Color;

/// One shell line
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "spooky",
    no_binary_name = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Open a window
    #[command(disable_help_flag = true)]
    New {
        /// Grid width in cells
        #[arg(short = 'w', long, default_value_t = 5)]
        width: usize,
        /// Grid height in cells
        #[arg(short = 'h', long, default_value_t = 5)]
        height: usize,
    },

    /// Close a window
    #[command(visible_aliases = ["remove", "del", "delete"])]
    Destroy { window: usize },

    /// Make a window the target of later commands
    #[command(visible_alias = "sel")]
    Select { window: usize },

    /// Change a grid's geometry
    #[command(visible_alias = "geom", disable_help_flag = true)]
    Geometry {
        #[command(flatten)]
        target: GridTarget,
        #[arg(short = 'w', long)]
        width: Option<usize>,
        #[arg(short = 'h', long)]
        height: Option<usize>,
        #[arg(short = 'W', long)]
        cell_width: Option<u32>,
        #[arg(short = 'H', long)]
        cell_height: Option<u32>,
        #[arg(short = 'c', long)]
        column_padding: Option<u32>,
        #[arg(short = 'r', long)]
        row_padding: Option<u32>,
    },

    /// Choose how window resizes reflow a grid (default: --cells)
    #[command(name = "resize-proto", visible_alias = "rp")]
    ResizeProto {
        #[command(flatten)]
        target: GridTarget,
        #[command(flatten)]
        protocol: ProtocolFlags,
    },

    /// Style the drag highlight
    #[command(name = "highlight-visual", visible_alias = "hv")]
    HighlightVisual {
        #[command(flatten)]
        target: GridTarget,
        #[arg(short = 'w', long = "bd-width")]
        border_width: Option<u32>,
        #[arg(short = 'c', long = "bd-colour", value_parser = Color::from_hex)]
        border_colour: Option<Color>,
        #[arg(short = 'f', long, value_parser = Color::from_hex)]
        fill: Option<Color>,
    },

    /// Style the grid lines shown while dragging
    #[command(name = "grid-visual", visible_alias = "gv")]
    GridVisual {
        #[command(flatten)]
        target: GridTarget,
        #[arg(short = 'w', long)]
        width: Option<u32>,
        #[arg(short = 'c', long, value_parser = Color::from_hex)]
        colour: Option<Color>,
    },

    /// Add a widget to a grid
    Add {
        #[command(flatten)]
        target: GridTarget,
        /// label, button, indicator, labelled-text, indicator-bank, text-bank, gyro, plot, browser
        kind: String,
        #[arg(short = 't', long)]
        title: Option<String>,
        #[arg(long)]
        cols: Option<usize>,
        #[arg(long)]
        rows: Option<usize>,
    },

    /// Move a widget to a cell
    Move {
        #[command(flatten)]
        target: GridTarget,
        id: u64,
        column: usize,
        row: usize,
    },

    /// Change a widget's span
    Span {
        #[command(flatten)]
        target: GridTarget,
        id: u64,
        #[arg(long)]
        cols: Option<usize>,
        #[arg(long)]
        rows: Option<usize>,
    },

    /// Remove a widget
    Drop {
        #[command(flatten)]
        target: GridTarget,
        id: u64,
    },

    /// Simulate a pointer drag
    Drag {
        #[command(flatten)]
        target: GridTarget,
        #[command(subcommand)]
        action: DragAction,
    },

    /// Simulate the window being resized
    Viewport {
        #[command(flatten)]
        target: GridTarget,
        width: u32,
        height: u32,
    },

    /// Advance the clock, firing due timers
    Tick {
        #[command(flatten)]
        target: GridTarget,
        millis: u64,
    },

    /// Draw a grid's canvas
    Show {
        #[command(flatten)]
        target: GridTarget,
    },

    /// List a grid's widgets
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        target: GridTarget,
    },

    /// List open windows
    Windows,

    /// Leave the shell
    #[command(visible_aliases = ["exit", "q"])]
    Quit,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum DragAction {
    /// Press on a widget at canvas pixel X Y
    #[command(allow_negative_numbers = true)]
    Start { id: u64, x: i32, y: i32 },
    /// Move the pointer to canvas pixel X Y
    #[command(allow_negative_numbers = true)]
    To { x: i32, y: i32 },
    /// Release the pointer
    Stop,
    /// Lose the pointer grab
    Cancel,
}

/// `-g/--grid N`; the selected window when omitted
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridTarget {
    #[arg(short = 'g', long = "grid", value_name = "WINDOW")]
    pub window: Option<usize>,
}

#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[group(multiple = false)]
pub struct ProtocolFlags {
    #[arg(long)]
    pub none: bool,
    #[arg(long)]
    pub cells: bool,
    #[arg(long)]
    pub padding: bool,
}

impl ProtocolFlags {
    pub fn protocol(&self) -> ResizeProtocol {
        if self.none {
            ResizeProtocol::None
        } else if self.padding {
            ResizeProtocol::AddPadding
        } else {
            ResizeProtocol::ExpandCells
        }
    }
}

impl ShellCommand {
    /// Window this command addresses explicitly, if any
    pub fn target(&self) -> Option<usize> {
        match self {
            ShellCommand::Geometry { target, .. }
            | ShellCommand::ResizeProto { target, .. }
            | ShellCommand::HighlightVisual { target, .. }
            | ShellCommand::GridVisual { target, .. }
            | ShellCommand::Add { target, .. }
            | ShellCommand::Move { target, .. }
            | ShellCommand::Span { target, .. }
            | ShellCommand::Drop { target, .. }
            | ShellCommand::Drag { target, .. }
            | ShellCommand::Viewport { target, .. }
            | ShellCommand::Tick { target, .. }
            | ShellCommand::Show { target }
            | ShellCommand::List { target } => target.window,
            ShellCommand::New { .. }
            | ShellCommand::Destroy { .. }
            | ShellCommand::Select { .. }
            | ShellCommand::Windows
            | ShellCommand::Quit => None,
        }
    }
}

/// Split a line into words and parse it
///
/// Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, clap::Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    ShellLine::try_parse_from(line.split_whitespace()).map(|parsed| Some(parsed.command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ShellCommand {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_new_uses_short_h_for_height() {
        assert_eq!(
            parse("new -w 3 -h 7"),
            ShellCommand::New {
                width: 3,
                height: 7
            }
        );
        assert_eq!(
            parse("new"),
            ShellCommand::New {
                width: 5,
                height: 5
            }
        );
    }

    #[test]
    fn test_aliases() {
        assert_eq!(parse("del 2"), ShellCommand::Destroy { window: 2 });
        assert_eq!(parse("sel 1"), ShellCommand::Select { window: 1 });
        assert_eq!(parse("q"), ShellCommand::Quit);
        assert!(matches!(parse("ls"), ShellCommand::List { .. }));
    }

    #[test]
    fn test_geometry_flags() {
        let command = parse("geom -g 2 -W 60 -c 0");
        assert_eq!(command.target(), Some(2));
        let ShellCommand::Geometry {
            cell_width,
            column_padding,
            width,
            ..
        } = command
        else {
            panic!("expected geometry");
        };
        assert_eq!(cell_width, Some(60));
        assert_eq!(column_padding, Some(0));
        assert_eq!(width, None);
    }

    #[test]
    fn test_resize_proto_defaults_to_cells() {
        let ShellCommand::ResizeProto { protocol, .. } = parse("rp") else {
            panic!("expected resize-proto");
        };
        assert_eq!(protocol.protocol(), ResizeProtocol::ExpandCells);
        let ShellCommand::ResizeProto { protocol, .. } = parse("rp --padding") else {
            panic!("expected resize-proto");
        };
        assert_eq!(protocol.protocol(), ResizeProtocol::AddPadding);
        assert!(parse_line("rp --none --padding").is_err());
    }

    #[test]
    fn test_colour_arguments_are_validated() {
        let ShellCommand::HighlightVisual { fill, .. } = parse("hv -f #102030") else {
            panic!("expected highlight-visual");
        };
        assert_eq!(fill, Some(Color::rgb(0x10, 0x20, 0x30)));
        assert!(parse_line("gv -c chartreuse").is_err());
    }

    #[test]
    fn test_drag_accepts_negative_pixels() {
        assert_eq!(
            parse("drag to -5 12"),
            ShellCommand::Drag {
                target: GridTarget::default(),
                action: DragAction::To { x: -5, y: 12 },
            }
        );
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# setup").unwrap(), None);
    }
}
