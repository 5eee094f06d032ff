//! Chart style configuration.

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// Trace colors, assigned to series in order and reused cyclically.
pub const SERIES_PALETTE: [&str; 5] = ["#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A"];

/// Color for axis labels and legend text.
pub const TEXT_COLOR: &str = "#7f7f7f";

/// Size and typography of a rendered chart.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub font_size: u32,
    /// Draw the chart title above the plot area.
    pub show_title: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            font_family: "sans-serif".to_string(),
            font_size: 14,
            show_title: false,
        }
    }
}

impl ChartStyle {
    /// Load a style from a JSON string. Missing fields take their defaults.
    pub fn from_json(json_str: &str) -> Result<Self> {
        let style: Self =
            serde_json::from_str(json_str).map_err(|e| RenderError::Style(e.to_string()))?;
        style.validate()?;
        Ok(style)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 100 || self.height < 100 {
            return Err(RenderError::Style(format!(
                "chart size {}x{} is too small",
                self.width, self.height
            )));
        }
        if self.font_size == 0 {
            return Err(RenderError::Style("font_size must be positive".to_string()));
        }
        if self.font_family.trim().is_empty() {
            return Err(RenderError::Style("font_family must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Convert hex color to RGB tuple
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Color of the `index`-th series.
pub fn series_color(index: usize) -> RGBColor {
    let hex = SERIES_PALETTE[index % SERIES_PALETTE.len()];
    let (r, g, b) = hex_to_rgb(hex).unwrap_or((0, 0, 0));
    RGBColor(r, g, b)
}

pub fn text_color() -> RGBColor {
    let (r, g, b) = hex_to_rgb(TEXT_COLOR).unwrap_or((0x7f, 0x7f, 0x7f));
    RGBColor(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FF0000"), Some((255, 0, 0)));
        assert_eq!(hex_to_rgb("#00FF00"), Some((0, 255, 0)));
        assert_eq!(hex_to_rgb("#0000FF"), Some((0, 0, 255)));
        assert_eq!(hex_to_rgb("FF0000"), Some((255, 0, 0)));
        assert_eq!(hex_to_rgb("#GGGGGG"), None);
        assert_eq!(hex_to_rgb("#FFF"), None);
    }

    #[test]
    fn test_palette_parses_and_cycles() {
        for hex in SERIES_PALETTE {
            assert!(hex_to_rgb(hex).is_some(), "bad palette entry {hex}");
        }
        assert_eq!(series_color(0), RGBColor(0x63, 0x6e, 0xfa));
        assert_eq!(series_color(5), series_color(0));
    }

    #[test]
    fn test_default_style() {
        let style = ChartStyle::default();
        assert_eq!(style.size(), (800, 500));
        assert_eq!(style.font_size, 14);
        assert!(!style.show_title);
        assert!(style.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let style = ChartStyle::from_json(r#"{"width": 1024, "show_title": true}"#).unwrap();
        assert_eq!(style.width, 1024);
        assert_eq!(style.height, 500);
        assert!(style.show_title);
    }

    #[test]
    fn test_from_json_rejects_tiny_chart() {
        let err = ChartStyle::from_json(r#"{"width": 10}"#).unwrap_err();
        assert!(matches!(err, RenderError::Style(_)));
    }
}
