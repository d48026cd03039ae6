//! Line-oriented console shell
//!
//! Reads commands from a script or stdin, runs them against a
//! [`WindowManager`] backed by the headless toolkit and writes the results
//! to an output stream. Command failures are printed and logged; they never
//! end the session.

use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};

use crate::commands::{self, DragAction, ShellCommand};
use crate::config::ConsoleConfig;
use crate::dockable::{DockableId, SpanUpdate};
use crate::error::GridError;
use crate::grid::{Cell, GeometryUpdate, Grid, Point, Size};
use crate::host::{HeadlessSurface, HeadlessToolkit, SurfaceEvent};
use crate::journal::LayoutJournal;
use crate::theme::{GridVisualUpdate, HighlightUpdate};
use crate::widgets::{Widget, WidgetKind};
use crate::window::WindowManager;

const PROMPT: &str = "spooky> ";

/// Whether the shell should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    manager: WindowManager<HeadlessToolkit>,
    selected: Option<usize>,
    journal: Option<LayoutJournal>,
}

impl Shell {
    pub fn new(config: &ConsoleConfig) -> anyhow::Result<Self> {
        let grid_config = config
            .grid_config()
            .context("Invalid grid settings in config")?;
        let toolkit = HeadlessToolkit::new(config.viewport.size());
        Ok(Self {
            manager: WindowManager::new(toolkit, config.prog_name.clone(), grid_config),
            selected: None,
            journal: None,
        })
    }

    /// Append every layout change to `journal`
    pub fn with_journal(mut self, journal: LayoutJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn manager(&self) -> &WindowManager<HeadlessToolkit> {
        &self.manager
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn journal(&self) -> Option<&LayoutJournal> {
        self.journal.as_ref()
    }

    /// Read commands until end of input or `quit`
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        out: &mut W,
        interactive: bool,
    ) -> anyhow::Result<Flow> {
        if interactive {
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }
        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            match self.run_line(&line, out) {
                Ok(Flow::Quit) => return Ok(Flow::Quit),
                Ok(Flow::Continue) => {}
                Err(e) => {
                    tracing::warn!("command `{}` failed: {:#}", line.trim(), e);
                    writeln!(out, "error: {:#}", e)?;
                }
            }
            if interactive {
                write!(out, "{}", PROMPT)?;
                out.flush()?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Run every command in the file at `path`
    pub fn run_script<W: Write>(&mut self, path: &Path, out: &mut W) -> anyhow::Result<Flow> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open script {}", path.display()))?;
        tracing::info!("Running script {}", path.display());
        self.run(std::io::BufReader::new(file), out, false)
    }

    /// Parse and execute one line
    pub fn run_line<W: Write>(&mut self, line: &str, out: &mut W) -> anyhow::Result<Flow> {
        let command = match commands::parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                // Help output and usage errors both come back from clap as errors
                write!(out, "{}", e.render())?;
                return Ok(Flow::Continue);
            }
        };
        let flow = self.execute(command, out);
        self.record_changes()?;
        flow
    }

    /// Execute a parsed command
    pub fn execute<W: Write>(&mut self, command: ShellCommand, out: &mut W) -> anyhow::Result<Flow> {
        tracing::debug!(?command, "executing");
        let explicit = command.target();
        match command {
            ShellCommand::New { width, height } => {
                let number = self.manager.new_window(width, height);
                if self.selected.is_none() {
                    self.selected = Some(number);
                }
                writeln!(out, "window {}", number)?;
            }
            ShellCommand::Destroy { window } => {
                self.record_changes()?;
                self.manager.destroy_window(window)?;
                if self.selected == Some(window) {
                    self.selected = None;
                }
            }
            ShellCommand::Select { window } => {
                self.manager.window(window)?;
                self.selected = Some(window);
            }
            ShellCommand::Geometry {
                width,
                height,
                cell_width,
                cell_height,
                column_padding,
                row_padding,
                ..
            } => {
                let update = GeometryUpdate {
                    width,
                    height,
                    cell_width,
                    cell_height,
                    column_padding,
                    row_padding,
                };
                let geometry = self.grid(explicit)?.set_geometry(update);
                writeln!(
                    out,
                    "{}x{} cells of {}x{} px, padding {}/{}",
                    geometry.width,
                    geometry.height,
                    geometry.cell_width,
                    geometry.cell_height,
                    geometry.column_padding,
                    geometry.row_padding
                )?;
            }
            ShellCommand::ResizeProto { protocol, .. } => {
                self.grid(explicit)?
                    .set_resize_protocol(protocol.protocol());
            }
            ShellCommand::HighlightVisual {
                border_width,
                border_colour,
                fill,
                ..
            } => {
                self.grid(explicit)?.set_highlight_visual(HighlightUpdate {
                    border_width,
                    border_colour,
                    fill,
                });
            }
            ShellCommand::GridVisual { width, colour, .. } => {
                self.grid(explicit)?
                    .set_grid_visual(GridVisualUpdate { width, colour });
            }
            ShellCommand::Add {
                kind,
                title,
                cols,
                rows,
                ..
            } => {
                let kind: WidgetKind = kind.parse()?;
                let mut widget = Widget::new(kind).with_span(cols, rows)?;
                if let Some(title) = title {
                    widget = widget.with_title(title);
                }
                let grid = self.grid(explicit)?;
                let id = grid.register(widget);
                writeln!(out, "added {} at {}", id, cell_label(grid.cell_of(id)))?;
            }
            ShellCommand::Move {
                id, column, row, ..
            } => {
                let grid = self.grid(explicit)?;
                let id = idle_dockable(grid, id)?;
                if grid.move_dockable(id, Cell::new(column, row)) {
                    writeln!(out, "moved {} to ({}, {})", id, column, row)?;
                } else {
                    writeln!(out, "cannot move {} to ({}, {})", id, column, row)?;
                }
            }
            ShellCommand::Span { id, cols, rows, .. } => {
                let grid = self.grid(explicit)?;
                let id = idle_dockable(grid, id)?;
                if grid.is_dragging() {
                    bail!("finish the drag in progress before resizing");
                }
                let cell = grid.resize_dockable(id, SpanUpdate::new(cols, rows))?;
                writeln!(out, "{} now at ({}, {})", id, cell.column, cell.row)?;
            }
            ShellCommand::Drop { id, .. } => {
                let grid = self.grid(explicit)?;
                let id = idle_dockable(grid, id)?;
                let widget = grid.remove(id);
                writeln!(out, "removed {} ({})", id, widget.title())?;
            }
            ShellCommand::Drag { action, .. } => {
                let grid = self.grid(explicit)?;
                drag(grid, action, out)?;
            }
            ShellCommand::Viewport { width, height, .. } => {
                let grid = self.grid(explicit)?;
                let event = grid.surface_mut().resize_viewport(Size::new(width, height));
                grid.handle_event(event);
            }
            ShellCommand::Tick { millis, .. } => {
                let grid = self.grid(explicit)?;
                let events = grid.surface_mut().advance(Duration::from_millis(millis));
                for event in events {
                    grid.handle_event(event);
                }
                let geometry = grid.geometry();
                writeln!(
                    out,
                    "cells {}x{} px, padding {}/{}",
                    geometry.cell_width,
                    geometry.cell_height,
                    geometry.column_padding,
                    geometry.row_padding
                )?;
            }
            ShellCommand::Show { .. } => {
                let grid = self.grid(explicit)?;
                let geometry = grid.geometry();
                let scale = (geometry.cell_width.min(geometry.cell_height) / 2).max(1);
                write!(out, "{}", grid.surface().render(scale))?;
            }
            ShellCommand::List { .. } => {
                let grid = self.grid(explicit)?;
                for (id, dockable) in grid.dockables() {
                    let span = dockable.span();
                    writeln!(
                        out,
                        "{:>3}  {:<16} {}x{} at {}",
                        id,
                        dockable.title(),
                        span.cols,
                        span.rows,
                        cell_label(grid.cell_of(id))
                    )?;
                }
            }
            ShellCommand::Windows => {
                for window in self.manager.windows() {
                    let grid = window.grid();
                    let geometry = grid.orig_geometry();
                    let marker = if self.selected == Some(window.number()) {
                        '*'
                    } else {
                        ' '
                    };
                    writeln!(
                        out,
                        "{}{} {}  {}x{} [{}] {} widgets",
                        marker,
                        window.number(),
                        window.title(),
                        geometry.width,
                        geometry.height,
                        grid.resize_protocol(),
                        grid.len()
                    )?;
                }
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Flush the journal, if any
    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.record_changes()?;
        if let Some(journal) = self.journal.as_mut() {
            journal.flush()?;
        }
        Ok(())
    }

    fn grid(&mut self, explicit: Option<usize>) -> anyhow::Result<&mut Grid<HeadlessSurface>> {
        let number = explicit
            .or(self.selected)
            .context("no window selected (use `new` or `select`)")?;
        Ok(self.manager.grid_mut(number)?)
    }

    /// Move queued layout changes from every grid into the journal
    fn record_changes(&mut self) -> anyhow::Result<()> {
        for number in self.manager.numbers() {
            let changes = self.manager.grid_mut(number)?.take_changes();
            if let Some(journal) = self.journal.as_mut() {
                journal.record_all(number, changes)?;
            }
        }
        Ok(())
    }
}

fn cell_label(cell: Option<Cell>) -> String {
    match cell {
        Some(cell) => format!("({}, {})", cell.column, cell.row),
        None => "-".to_string(),
    }
}

/// Resolve a user-supplied id to a registered dockable that is not being dragged
fn idle_dockable(grid: &Grid<HeadlessSurface>, id: u64) -> anyhow::Result<DockableId> {
    let id = DockableId(id);
    if grid.dockable(id).is_none() {
        return Err(GridError::UnknownDockable(id.0).into());
    }
    if grid.dragged() == Some(id) {
        bail!("widget {} is being dragged", id);
    }
    Ok(id)
}

fn drag<W: Write>(
    grid: &mut Grid<HeadlessSurface>,
    action: DragAction,
    out: &mut W,
) -> anyhow::Result<()> {
    match action {
        DragAction::Start { id, x, y } => {
            if grid.is_dragging() {
                bail!("a drag is already in progress");
            }
            let id = DockableId(id);
            let entry = grid
                .entry(id)
                .ok_or(GridError::UnknownDockable(id.0))?;
            grid.handle_event(SurfaceEvent::DragPress {
                visual: entry.visual,
                pointer: Point::new(x, y),
            });
            writeln!(out, "dragging {}, over {}", id, cell_label(grid.drag_candidate()))?;
        }
        DragAction::To { x, y } => {
            if !grid.is_dragging() {
                bail!("no drag in progress");
            }
            grid.handle_event(SurfaceEvent::DragMotion {
                pointer: Point::new(x, y),
            });
            writeln!(out, "over {}", cell_label(grid.drag_candidate()))?;
        }
        DragAction::Stop | DragAction::Cancel => {
            let Some(id) = grid.dragged() else {
                bail!("no drag in progress");
            };
            let event = if action == DragAction::Stop {
                SurfaceEvent::DragRelease
            } else {
                SurfaceEvent::DragCancel
            };
            grid.handle_event(event);
            writeln!(out, "dropped {} at {}", id, cell_label(grid.cell_of(id)))?;
        }
    }
    Ok(())
}
