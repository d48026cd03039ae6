//! Numbered top-level windows, one docking grid each

use std::collections::BTreeMap;

use crate::error::{GridError, Result};
use crate::grid::{Grid, GridConfig};
use crate::host::{Surface, Toolkit};

/// A top-level window and the grid filling it
pub struct Window<S: Surface> {
    number: usize,
    title: String,
    grid: Grid<S>,
}

impl<S: Surface> Window<S> {
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn grid(&self) -> &Grid<S> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid<S> {
        &mut self.grid
    }

    pub fn into_grid(self) -> Grid<S> {
        self.grid
    }
}

/// Creates, numbers and destroys windows
///
/// Window numbers start at 1; a new window takes the smallest number not
/// currently in use, so numbers freed by destroyed windows are reused.
pub struct WindowManager<T: Toolkit> {
    toolkit: T,
    prog_name: String,
    defaults: GridConfig,
    windows: BTreeMap<usize, Window<T::Surface>>,
}

impl<T: Toolkit> WindowManager<T> {
    pub fn new(toolkit: T, prog_name: impl Into<String>, defaults: GridConfig) -> Self {
        Self {
            toolkit,
            prog_name: prog_name.into(),
            defaults,
            windows: BTreeMap::new(),
        }
    }

    pub fn prog_name(&self) -> &str {
        &self.prog_name
    }

    /// Open a window whose grid is `width` x `height` cells
    pub fn new_window(&mut self, width: usize, height: usize) -> usize {
        let number = self.next_number();
        let title = format!("{} ({})", self.prog_name, number);
        let surface = self.toolkit.create_surface(&title);

        let mut config = self.defaults;
        config.geometry.width = width;
        config.geometry.height = height;
        let grid = Grid::new(surface, config);

        tracing::info!(number, %title, width, height, "window opened");
        self.windows.insert(
            number,
            Window {
                number,
                title,
                grid,
            },
        );
        number
    }

    /// Close window `number`, handing back what it held
    pub fn destroy_window(&mut self, number: usize) -> Result<Window<T::Surface>> {
        let window = self
            .windows
            .remove(&number)
            .ok_or(GridError::UnknownWindow(number))?;
        tracing::info!(number, "window destroyed");
        Ok(window)
    }

    pub fn window(&self, number: usize) -> Result<&Window<T::Surface>> {
        self.windows
            .get(&number)
            .ok_or(GridError::UnknownWindow(number))
    }

    pub fn window_mut(&mut self, number: usize) -> Result<&mut Window<T::Surface>> {
        self.windows
            .get_mut(&number)
            .ok_or(GridError::UnknownWindow(number))
    }

    pub fn grid(&self, number: usize) -> Result<&Grid<T::Surface>> {
        self.window(number).map(Window::grid)
    }

    pub fn grid_mut(&mut self, number: usize) -> Result<&mut Grid<T::Surface>> {
        self.window_mut(number).map(Window::grid_mut)
    }

    /// Open window numbers in ascending order
    pub fn numbers(&self) -> Vec<usize> {
        self.windows.keys().copied().collect()
    }

    pub fn windows(&self) -> impl Iterator<Item = &Window<T::Surface>> {
        self.windows.values()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    fn next_number(&self) -> usize {
        (1..)
            .find(|n| !self.windows.contains_key(n))
            .unwrap_or(self.windows.len() + 1)
    }
}
