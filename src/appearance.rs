//! Drawing inputs derived from a region.
//!
//! The renderer draws a circle from an [`Appearance`]; nothing here draws.

use serde::{Deserialize, Serialize};

use crate::constants::{HIGHLIGHTED_STROKE_COLOR, HIGHLIGHTED_STROKE_WIDTH};
use crate::model::PointRegion;
use crate::selection::Selectable;

/// Stroke used while a region is highlighted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightStyle {
    #[serde(default = "default_highlight_color")]
    pub stroke_color: String,
    #[serde(default = "default_highlight_width")]
    pub stroke_width: f32,
}

fn default_highlight_color() -> String {
    HIGHLIGHTED_STROKE_COLOR.to_string()
}

fn default_highlight_width() -> f32 {
    HIGHLIGHTED_STROKE_WIDTH
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            stroke_color: default_highlight_color(),
            stroke_width: default_highlight_width(),
        }
    }
}

/// Everything the renderer needs to draw one keypoint marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appearance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Marker scale, the inverse of the zoom so markers keep their size
    pub scale: f32,
    pub opacity: f32,
    pub fill: Option<String>,
    pub stroke: String,
    pub stroke_width: f32,
    pub draggable: bool,
}

impl PointRegion {
    /// Drawing inputs at `zoom_scale`.
    pub fn appearance(&self, zoom_scale: f32, editable: bool, highlight: &HighlightStyle) -> Appearance {
        let scale = if zoom_scale.is_finite() && zoom_scale > 0.0 {
            1.0 / zoom_scale
        } else {
            1.0
        };

        let (stroke, stroke_width) = if self.is_highlighted() {
            (highlight.stroke_color.clone(), highlight.stroke_width)
        } else {
            (self.stroke_color().to_string(), self.stroke_width())
        };

        Appearance {
            x: self.x(),
            y: self.y(),
            radius: self.radius(),
            scale,
            opacity: self.opacity(),
            fill: self.fill_color().map(str::to_string),
            stroke,
            stroke_width,
            draggable: editable,
        }
    }
}
