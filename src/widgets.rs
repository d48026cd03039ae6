//! Console widget kinds
//!
//! The docking engine only needs the [`Dockable`] capability; this module
//! describes the widgets the console offers, each with its usual footprint
//! and the sub-regions that can be grabbed to drag it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dockable::Dockable;
use crate::error::{GridError, Result};
use crate::grid::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    Label,
    Button,
    Indicator,
    LabelledText,
    IndicatorBank,
    TextBank,
    Gyro,
    Plot,
    Browser,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 9] = [
        WidgetKind::Label,
        WidgetKind::Button,
        WidgetKind::Indicator,
        WidgetKind::LabelledText,
        WidgetKind::IndicatorBank,
        WidgetKind::TextBank,
        WidgetKind::Gyro,
        WidgetKind::Plot,
        WidgetKind::Browser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Label => "label",
            WidgetKind::Button => "button",
            WidgetKind::Indicator => "indicator",
            WidgetKind::LabelledText => "labelled-text",
            WidgetKind::IndicatorBank => "indicator-bank",
            WidgetKind::TextBank => "text-bank",
            WidgetKind::Gyro => "gyro",
            WidgetKind::Plot => "plot",
            WidgetKind::Browser => "browser",
        }
    }

    /// Footprint used when no span is given
    pub fn default_span(&self) -> Span {
        match self {
            WidgetKind::Label
            | WidgetKind::Button
            | WidgetKind::Indicator
            | WidgetKind::LabelledText => Span::new(1, 1),
            WidgetKind::IndicatorBank | WidgetKind::TextBank => Span::new(2, 3),
            WidgetKind::Gyro => Span::new(2, 2),
            WidgetKind::Plot => Span::new(9, 9),
            WidgetKind::Browser => Span::new(5, 5),
        }
    }

    /// Child regions that relay drag gestures to the widget
    pub fn drag_regions(&self) -> &'static [&'static str] {
        match self {
            WidgetKind::Indicator => &["label"],
            WidgetKind::LabelledText => &["title", "text"],
            WidgetKind::Plot => &["toolbar"],
            _ => &[],
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetKind {
    type Err = GridError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        WidgetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| GridError::UnknownWidget(s.to_string()))
    }
}

/// A concrete dockable widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    kind: WidgetKind,
    title: String,
    span: Span,
    regions: Vec<String>,
}

impl Widget {
    /// Widget of `kind` titled after the kind, at its default span
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            title: kind.as_str().to_string(),
            span: kind.default_span(),
            regions: kind.drag_regions().iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Override the footprint, rejecting zero dimensions
    pub fn with_span(mut self, cols: Option<usize>, rows: Option<usize>) -> Result<Self> {
        self.span = Span::try_new(
            cols.unwrap_or(self.span.cols),
            rows.unwrap_or(self.span.rows),
        )?;
        Ok(self)
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }
}

impl Dockable for Widget {
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
