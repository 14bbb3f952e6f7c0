use serde::{Deserialize, Serialize};

pub const COUNTRY_FILL: &str = "#33415c";
pub const COUNTRY_STROKE: &str = "#060a0f";
pub const HIGHLIGHT_FILL: &str = "#6ea9ff";
pub const HIGHLIGHT_STROKE: &str = "white";
pub const GRATICULE_STROKE: &str = "#232323";

/// Fill/stroke pair applied to one rendered shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeStyle<'a> {
    pub fill: &'a str,
    pub stroke: &'a str,
}

/// CSS colors for countries, the hover highlight and the graticule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub fill: String,
    pub stroke: String,
    pub highlight_fill: String,
    pub highlight_stroke: String,
    pub graticule_stroke: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            fill: COUNTRY_FILL.to_string(),
            stroke: COUNTRY_STROKE.to_string(),
            highlight_fill: HIGHLIGHT_FILL.to_string(),
            highlight_stroke: HIGHLIGHT_STROKE.to_string(),
            graticule_stroke: GRATICULE_STROKE.to_string(),
        }
    }
}

impl Palette {
    pub fn country(&self, highlighted: bool) -> ShapeStyle<'_> {
        if highlighted {
            ShapeStyle {
                fill: &self.highlight_fill,
                stroke: &self.highlight_stroke,
            }
        } else {
            ShapeStyle {
                fill: &self.fill,
                stroke: &self.stroke,
            }
        }
    }

    pub fn graticule(&self) -> ShapeStyle<'_> {
        ShapeStyle {
            fill: "none",
            stroke: &self.graticule_stroke,
        }
    }
}
