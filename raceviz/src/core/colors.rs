use crate::interfaces::render_interface::{DashStyle, RgbColor};
use helpers::general::AnalysisError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Fallback palette with 20 distinct colors (Plotly and D3 qualitative palettes).
pub const DEFAULT_PALETTE: [&str; 20] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52", "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
    "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// * `color` - CSS color of the label, e.g. #00d2be
/// * `dash` - Line style of the label
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LabelStyle {
    pub color: Option<String>,
    #[serde(default)]
    pub dash: DashStyle,
}

/// StyleTable maps season -> label (driver or team) -> style. It is read from a configuration
/// file such that new seasons and competitors do not require code changes.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct StyleTable {
    pub seasons: HashMap<u32, HashMap<String, LabelStyle>>,
}

impl StyleTable {
    pub fn preferred_color(&self, season: u32, label: &str) -> Option<String> {
        self.seasons
            .get(&season)
            .and_then(|labels| labels.get(label))
            .and_then(|style| style.color.to_owned())
    }

    pub fn dash_style(&self, season: u32, label: &str) -> DashStyle {
        self.seasons
            .get(&season)
            .and_then(|labels| labels.get(label))
            .map(|style| style.dash)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorEntry {
    pub label: String,
    pub color: String,
    pub rgb: RgbColor,
    pub from_fallback: bool,
}

/// ColorAssignment maps each label to a color, all colors are pairwise distinct.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ColorAssignment {
    pub entries: Vec<ColorEntry>,
}

impl ColorAssignment {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.color.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// ColorAssigner assigns a distinct color to every label. The preferred color of a label is used
/// if it is available, differs from the "no color" sentinel and is not taken yet. Otherwise the
/// next unused color of the cyclic fallback palette is drawn.
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    palette: Vec<String>,
    sentinel: Option<String>,
}

impl Default for ColorAssigner {
    fn default() -> Self {
        ColorAssigner::new(DEFAULT_PALETTE.iter().map(|c| (*c).to_owned()).collect())
    }
}

impl ColorAssigner {
    pub fn new(palette: Vec<String>) -> ColorAssigner {
        ColorAssigner {
            palette,
            sentinel: None,
        }
    }

    /// with_sentinel sets a color that marks a label as "no color", e.g. gray.
    pub fn with_sentinel(mut self, sentinel: &str) -> ColorAssigner {
        self.sentinel = Some(sentinel.to_owned());
        self
    }

    pub fn assign<S, F>(&self, labels: &[S], preferred: F) -> Result<ColorAssignment, AnalysisError>
    where
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let sentinel = self.sentinel.as_deref().map(RgbColor::parse).transpose()?;
        let palette = self
            .palette
            .iter()
            .map(|c| RgbColor::parse(c).map(|rgb| (c, rgb)))
            .collect::<Result<Vec<(&String, RgbColor)>, AnalysisError>>()?;

        let mut assignment = ColorAssignment::default();
        let mut used: HashSet<RgbColor> = HashSet::new();
        let mut cursor = 0;

        for label in labels.iter().map(|l| l.as_ref()) {
            if assignment.get(label).is_some() {
                continue;
            }

            // preferred color
            if let Some(color) = preferred(label) {
                let rgb = RgbColor::parse(&color)?;

                if Some(rgb) != sentinel && !used.contains(&rgb) {
                    used.insert(rgb);
                    assignment.entries.push(ColorEntry {
                        label: label.to_owned(),
                        color,
                        rgb,
                        from_fallback: false,
                    });
                    continue;
                }

                debug!(
                    "Preferred color {} of {} is not usable, falling back to the palette",
                    color, label
                );
            }

            // fallback palette -> at most one full cycle starting at the cursor
            let mut drawn = None;

            for _ in 0..palette.len() {
                let (color, rgb) = palette[cursor % palette.len()];
                cursor += 1;

                if Some(rgb) != sentinel && !used.contains(&rgb) {
                    drawn = Some((color, rgb));
                    break;
                }
            }

            let (color, rgb) = drawn.ok_or_else(|| {
                AnalysisError::PaletteExhausted(format!(
                    "No unused color left for {} after assigning {} labels!",
                    label,
                    assignment.len()
                ))
            })?;

            used.insert(rgb);
            assignment.entries.push(ColorEntry {
                label: label.to_owned(),
                color: color.to_owned(),
                rgb,
                from_fallback: true,
            });
        }

        Ok(assignment)
    }
}
