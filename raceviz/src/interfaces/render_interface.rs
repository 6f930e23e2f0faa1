use helpers::general::AnalysisError;
use serde::{Deserialize, Serialize};

/// RgbColor is the parsed form of a CSS color string, used to compare colors that are written
/// differently (e.g. `red` and `#ff0000`) and handed to the renderer as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RgbColor {
    pub fn parse(color: &str) -> Result<RgbColor, AnalysisError> {
        let tmp_color = color
            .trim()
            .parse::<css_color_parser::Color>()
            .map_err(|_| AnalysisError::InvalidInput(format!("Could not parse color {}!", color)))?;

        Ok(RgbColor {
            r: tmp_color.r,
            g: tmp_color.g,
            b: tmp_color.b,
            a: (tmp_color.a.max(0.0).min(1.0) * 255.0).round() as u8,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// DashStyle is the line style of a series, used to tell apart labels that share a preferred
/// color (e.g. teammates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashStyle {
    Solid,
    Dash,
    Dot,
    DashDot,
}

impl Default for DashStyle {
    fn default() -> Self {
        DashStyle::Solid
    }
}
