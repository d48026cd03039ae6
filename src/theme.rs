//! Colours and the two visual accents drawn while dragging
//!
//! Visual settings come from the YAML config as hex strings and are
//! resolved into [`Color`] values here. Nothing is global: a grid receives
//! its [`HighlightVisual`] and [`GridVisual`] at construction and through
//! its setters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};

pub const GRAY_SCALE_0: Color = Color::rgb(0x00, 0x00, 0x00);
pub const GRAY_SCALE_2: Color = Color::rgb(0x22, 0x22, 0x22);
pub const GRAY_SCALE_4: Color = Color::rgb(0x44, 0x44, 0x44);

/// RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        let invalid = || GridError::InvalidColour(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(invalid()),
        }
    }

    /// Format as "#RRGGBB", or "#RRGGBBAA" when not opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Rectangle drawn where a dragged dockable would land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightVisual {
    pub border_width: u32,
    pub border_colour: Color,
    pub fill: Color,
}

impl Default for HighlightVisual {
    fn default() -> Self {
        Self {
            border_width: 2,
            border_colour: GRAY_SCALE_2,
            fill: GRAY_SCALE_4,
        }
    }
}

/// Cell outlines drawn while a drag is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridVisual {
    pub width: u32,
    pub colour: Color,
}

impl Default for GridVisual {
    fn default() -> Self {
        Self {
            width: 1,
            colour: GRAY_SCALE_0,
        }
    }
}

/// Partial update for [`HighlightVisual`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightUpdate {
    pub border_width: Option<u32>,
    pub border_colour: Option<Color>,
    pub fill: Option<Color>,
}

impl HighlightUpdate {
    pub fn apply_to(&self, base: &HighlightVisual) -> HighlightVisual {
        HighlightVisual {
            border_width: self.border_width.unwrap_or(base.border_width),
            border_colour: self.border_colour.unwrap_or(base.border_colour),
            fill: self.fill.unwrap_or(base.fill),
        }
    }
}

/// Partial update for [`GridVisual`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridVisualUpdate {
    pub width: Option<u32>,
    pub colour: Option<Color>,
}

impl GridVisualUpdate {
    pub fn apply_to(&self, base: &GridVisual) -> GridVisual {
        GridVisual {
            width: self.width.unwrap_or(base.width),
            colour: self.colour.unwrap_or(base.colour),
        }
    }
}

/// Visual settings as written in the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualsData {
    #[serde(default)]
    pub highlight: HighlightData,
    #[serde(default)]
    pub grid: GridVisualData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightData {
    pub border_width: u32,
    pub border_colour: String,
    pub fill: String,
}

impl Default for HighlightData {
    fn default() -> Self {
        let visual = HighlightVisual::default();
        Self {
            border_width: visual.border_width,
            border_colour: visual.border_colour.to_hex(),
            fill: visual.fill.to_hex(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridVisualData {
    pub width: u32,
    pub colour: String,
}

impl Default for GridVisualData {
    fn default() -> Self {
        let visual = GridVisual::default();
        Self {
            width: visual.width,
            colour: visual.colour.to_hex(),
        }
    }
}

impl VisualsData {
    /// Parse the colour strings
    pub fn resolve(&self) -> Result<(HighlightVisual, GridVisual)> {
        let highlight = HighlightVisual {
            border_width: self.highlight.border_width,
            border_colour: Color::from_hex(&self.highlight.border_colour)?,
            fill: Color::from_hex(&self.highlight.fill)?,
        };
        let grid = GridVisual {
            width: self.grid.width,
            colour: Color::from_hex(&self.grid.colour)?,
        };
        Ok((highlight, grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_rgb_and_rgba() {
        assert_eq!(Color::from_hex("#222222"), Ok(GRAY_SCALE_2));
        assert_eq!(
            Color::from_hex("33335580"),
            Ok(Color::rgba(0x33, 0x33, 0x55, 0x80))
        );
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_hex_round_trip_formatting() {
        assert_eq!(GRAY_SCALE_4.to_hex(), "#444444");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn test_default_visuals_resolve() {
        let (highlight, grid) = VisualsData::default().resolve().unwrap();
        assert_eq!(highlight, HighlightVisual::default());
        assert_eq!(grid, GridVisual::default());
    }

    #[test]
    fn test_partial_updates() {
        let base = HighlightVisual::default();
        let updated = HighlightUpdate {
            border_width: Some(4),
            ..Default::default()
        }
        .apply_to(&base);
        assert_eq!(updated.border_width, 4);
        assert_eq!(updated.fill, base.fill);
    }
}
