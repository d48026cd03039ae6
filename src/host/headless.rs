//! In-memory surface used by the shell and the tests
//!
//! Every call is recorded so tests can assert on what the grid asked the
//! toolkit to do. Time only moves when [`HeadlessSurface::advance`] is
//! called, which makes debounce behaviour deterministic.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use super::{Surface, SurfaceEvent, TimerId, Toolkit, VisualId};
use crate::grid::{BBox, Point, Size};
use crate::theme::{GridVisual, HighlightVisual};

/// A recorded surface call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Attach(VisualId, BBox),
    Place(VisualId, BBox),
    Show(VisualId),
    Hide(VisualId),
    Destroy(VisualId),
    BindDrag(VisualId, Option<String>),
    UnbindDrag(VisualId, Option<String>),
    DrawGridLines(usize),
    ClearGridLines,
    DrawHighlight(BBox),
    ClearHighlight,
    ScrollRegion(Size),
    Schedule(TimerId, Duration),
    Cancel(TimerId),
}

/// State of one attached visual
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualRecord {
    pub title: String,
    pub bbox: BBox,
    pub visible: bool,
    /// Bound drag sources; `None` is the visual itself
    pub drag_bindings: BTreeSet<Option<String>>,
}

/// Toolkit producing [`HeadlessSurface`]s with a fixed initial viewport
#[derive(Debug, Clone)]
pub struct HeadlessToolkit {
    viewport: Size,
}

impl HeadlessToolkit {
    pub fn new(viewport: Size) -> Self {
        Self { viewport }
    }
}

impl Default for HeadlessToolkit {
    fn default() -> Self {
        Self::new(Size::new(250, 250))
    }
}

impl Toolkit for HeadlessToolkit {
    type Surface = HeadlessSurface;

    fn create_surface(&mut self, title: &str) -> HeadlessSurface {
        let mut surface = HeadlessSurface::new(self.viewport);
        surface.set_title(title);
        surface
    }
}

/// Recording surface with a manual clock
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    title: String,
    viewport: Size,
    scroll_region: Size,
    visuals: BTreeMap<VisualId, VisualRecord>,
    next_visual: u64,
    grid_lines: Vec<BBox>,
    highlight: Option<BBox>,
    timers: BTreeMap<TimerId, Duration>,
    next_timer: u64,
    now: Duration,
    calls: Vec<SurfaceCall>,
}

impl HeadlessSurface {
    pub fn new(viewport: Size) -> Self {
        Self {
            title: String::new(),
            viewport,
            scroll_region: Size::default(),
            visuals: BTreeMap::new(),
            next_visual: 1,
            grid_lines: Vec::new(),
            highlight: None,
            timers: BTreeMap::new(),
            next_timer: 1,
            now: Duration::ZERO,
            calls: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Change the viewport as a window-manager resize would, returning the
    /// notification the grid should receive
    pub fn resize_viewport(&mut self, viewport: Size) -> SurfaceEvent {
        self.viewport = viewport;
        SurfaceEvent::Resized(viewport)
    }

    /// Move the clock forward and collect the timers that expired, in deadline order
    pub fn advance(&mut self, elapsed: Duration) -> Vec<SurfaceEvent> {
        self.now += elapsed;
        let mut due: Vec<(Duration, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, deadline)| **deadline <= self.now)
            .map(|(id, deadline)| (*deadline, *id))
            .collect();
        due.sort();
        for (_, id) in &due {
            self.timers.remove(id);
        }
        due.into_iter()
            .map(|(_, id)| SurfaceEvent::Timer(id))
            .collect()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn visual(&self, visual: VisualId) -> Option<&VisualRecord> {
        self.visuals.get(&visual)
    }

    pub fn visuals(&self) -> impl Iterator<Item = (VisualId, &VisualRecord)> {
        self.visuals.iter().map(|(id, record)| (*id, record))
    }

    pub fn grid_lines(&self) -> &[BBox] {
        &self.grid_lines
    }

    pub fn highlight(&self) -> Option<BBox> {
        self.highlight
    }

    pub fn scroll_region(&self) -> Size {
        self.scroll_region
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// ASCII picture of the canvas, one character per `scale` pixels
    ///
    /// Visible visuals are drawn with the first letter of their title, the
    /// highlight with `+`, empty canvas with `.`.
    pub fn render(&self, scale: u32) -> String {
        let scale = scale.max(1);
        let columns = self.scroll_region.width.div_ceil(scale) as usize;
        let rows = self.scroll_region.height.div_ceil(scale) as usize;
        let mut canvas = vec![vec!['.'; columns]; rows];

        let mut paint = |bbox: BBox, mark: char| {
            for (y, line) in canvas.iter_mut().enumerate() {
                for (x, slot) in line.iter_mut().enumerate() {
                    let at = |i: usize| i32::try_from(i as u64 * u64::from(scale)).unwrap_or(i32::MAX);
                    let point = Point::new(at(x), at(y));
                    if bbox.contains(point) {
                        *slot = mark;
                    }
                }
            }
        };

        for record in self.visuals.values().filter(|record| record.visible) {
            let mark = record.title.chars().next().unwrap_or('?');
            paint(record.bbox, mark);
        }
        if let Some(bbox) = self.highlight {
            paint(bbox, '+');
        }

        let mut out = String::with_capacity(rows * (columns + 1));
        for line in canvas {
            out.extend(line);
            out.push('\n');
        }
        out
    }

    fn record_mut(&mut self, visual: VisualId) -> &mut VisualRecord {
        self.visuals
            .get_mut(&visual)
            .unwrap_or_else(|| panic!("visual {:?} is not attached", visual))
    }
}

impl Surface for HeadlessSurface {
    fn attach(&mut self, title: &str, bbox: BBox) -> VisualId {
        let id = VisualId(self.next_visual);
        self.next_visual += 1;
        self.visuals.insert(
            id,
            VisualRecord {
                title: title.to_string(),
                bbox,
                visible: true,
                drag_bindings: BTreeSet::new(),
            },
        );
        self.calls.push(SurfaceCall::Attach(id, bbox));
        id
    }

    fn place(&mut self, visual: VisualId, bbox: BBox) {
        self.record_mut(visual).bbox = bbox;
        self.calls.push(SurfaceCall::Place(visual, bbox));
    }

    fn show(&mut self, visual: VisualId) {
        self.record_mut(visual).visible = true;
        self.calls.push(SurfaceCall::Show(visual));
    }

    fn hide(&mut self, visual: VisualId) {
        self.record_mut(visual).visible = false;
        self.calls.push(SurfaceCall::Hide(visual));
    }

    fn destroy(&mut self, visual: VisualId) {
        self.visuals.remove(&visual);
        self.calls.push(SurfaceCall::Destroy(visual));
    }

    fn bind_drag(&mut self, visual: VisualId, region: Option<&str>) {
        let region = region.map(str::to_string);
        self.record_mut(visual).drag_bindings.insert(region.clone());
        self.calls.push(SurfaceCall::BindDrag(visual, region));
    }

    fn unbind_drag(&mut self, visual: VisualId, region: Option<&str>) {
        let region = region.map(str::to_string);
        self.record_mut(visual).drag_bindings.remove(&region);
        self.calls.push(SurfaceCall::UnbindDrag(visual, region));
    }

    fn draw_grid_lines(&mut self, outlines: &[BBox], _visual: &GridVisual) {
        self.grid_lines = outlines.to_vec();
        self.calls.push(SurfaceCall::DrawGridLines(outlines.len()));
    }

    fn clear_grid_lines(&mut self) {
        self.grid_lines.clear();
        self.calls.push(SurfaceCall::ClearGridLines);
    }

    fn draw_highlight(&mut self, bbox: BBox, _visual: &HighlightVisual) {
        self.highlight = Some(bbox);
        self.calls.push(SurfaceCall::DrawHighlight(bbox));
    }

    fn clear_highlight(&mut self) {
        self.highlight = None;
        self.calls.push(SurfaceCall::ClearHighlight);
    }

    fn set_scroll_region(&mut self, extent: Size) {
        self.scroll_region = extent;
        self.calls.push(SurfaceCall::ScrollRegion(extent));
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        self.timers.insert(id, self.now + delay);
        self.calls.push(SurfaceCall::Schedule(id, delay));
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
        self.calls.push(SurfaceCall::Cancel(timer));
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let mut surface = HeadlessSurface::new(Size::new(100, 100));
        let late = surface.schedule(Duration::from_millis(80));
        let early = surface.schedule(Duration::from_millis(20));
        assert!(surface.advance(Duration::from_millis(10)).is_empty());
        assert_eq!(
            surface.advance(Duration::from_millis(100)),
            vec![SurfaceEvent::Timer(early), SurfaceEvent::Timer(late)]
        );
        assert_eq!(surface.pending_timers(), 0);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut surface = HeadlessSurface::new(Size::new(100, 100));
        let timer = surface.schedule(Duration::from_millis(50));
        surface.cancel(timer);
        assert!(surface.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_render_draws_visible_visuals() {
        let mut surface = HeadlessSurface::new(Size::new(100, 100));
        surface.set_scroll_region(Size::new(40, 20));
        let id = surface.attach("gyro", BBox::new(0, 0, 20, 10));
        assert_eq!(surface.render(10), "gg..\n....\n");
        surface.hide(id);
        assert_eq!(surface.render(10), "....\n....\n");
    }
}
