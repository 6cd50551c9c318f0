//! The keypoint region entity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_OPACITY, DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, KEYPOINT_REGION_TYPE,
};
use crate::model::label::{LabelState, SelectedLabels};
use crate::normalize::CoordinateSystem;

/// Process-unique identifier of a region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Label state handling of a region.
pub trait Stateful {
    /// Attached label states in attachment order.
    fn label_states(&self) -> &[LabelState];

    /// Append a label state. Equal states are not merged.
    fn add_label_state(&mut self, state: LabelState);

    /// Refresh stroke and fill color from the first label state.
    fn update_appearance_from_state(&mut self);
}

/// A single annotated point on an image.
///
/// `x`, `y` and `radius` are stage pixels once the coordinate system is
/// [`CoordinateSystem::Pixel`]. `relative_x`/`relative_y` are percentages of
/// the stage and act as the anchor pixel positions are re-derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRegion {
    id: RegionId,
    pid: RegionId,

    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) relative_x: f32,
    pub(crate) relative_y: f32,
    pub(crate) radius: f32,
    pub(crate) coordinate_system: CoordinateSystem,
    pub(crate) surface_width: Option<f32>,
    pub(crate) surface_height: Option<f32>,
    /// Whether `relative_x`/`relative_y` hold a real anchor yet
    pub(crate) anchored: bool,

    opacity: f32,
    fill_color: Option<String>,
    stroke_color: String,
    stroke_width: f32,

    label_states: Vec<LabelState>,

    selected: bool,
    highlighted: bool,
}

impl PointRegion {
    /// Create a region at `(x, y)` expressed in `coordinate_system` units.
    pub fn new(x: f32, y: f32, radius: f32, coordinate_system: CoordinateSystem) -> Self {
        Self {
            id: RegionId::generate(),
            pid: RegionId::generate(),
            x,
            y,
            relative_x: 0.0,
            relative_y: 0.0,
            radius,
            coordinate_system,
            surface_width: None,
            surface_height: None,
            anchored: false,
            opacity: DEFAULT_OPACITY,
            fill_color: None,
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            label_states: Vec::new(),
            selected: false,
            highlighted: false,
        }
    }

    /// Set the opacity, clamped to 0.0-1.0.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Set the stroke width.
    pub fn with_stroke_width(mut self, stroke_width: f32) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Attach a label state and refresh the colors from it.
    pub fn with_label_state(mut self, state: impl Into<LabelState>) -> Self {
        self.add_label_state(state.into());
        self.update_appearance_from_state();
        self
    }

    pub fn id(&self) -> &RegionId {
        &self.id
    }

    /// Secondary id used to reference this region from relations.
    pub fn pid(&self) -> &RegionId {
        &self.pid
    }

    /// Region type discriminant.
    pub fn kind(&self) -> &'static str {
        KEYPOINT_REGION_TYPE
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn relative_x(&self) -> f32 {
        self.relative_x
    }

    pub fn relative_y(&self) -> f32 {
        self.relative_y
    }

    /// Marker radius (the `width` field of stored results).
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn fill_color(&self) -> Option<&str> {
        self.fill_color.as_deref()
    }

    pub fn stroke_color(&self) -> &str {
        &self.stroke_color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinate_system
    }

    /// Last surface size delivered by a resize, if any.
    pub fn surface_size(&self) -> Option<(f32, f32)> {
        self.surface_width.zip(self.surface_height)
    }

    /// Move the point to stage pixel coordinates. No bounds are enforced.
    ///
    /// The relative anchor follows the move once a surface size is known.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.sync_relative();
    }

    /// Override the fill color.
    pub fn set_fill_color(&mut self, color: impl Into<String>) {
        self.fill_color = Some(color.into());
    }

    pub(crate) fn set_selected_flag(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_highlighted_flag(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub(crate) fn selected_flag(&self) -> bool {
        self.selected
    }

    pub(crate) fn highlighted_flag(&self) -> bool {
        self.highlighted
    }
}

impl Stateful for PointRegion {
    fn label_states(&self) -> &[LabelState] {
        &self.label_states
    }

    fn add_label_state(&mut self, state: LabelState) {
        self.label_states.push(state);
    }

    fn update_appearance_from_state(&mut self) {
        let Some(color) = self
            .label_states
            .first()
            .and_then(|s| s.selected_color())
            .map(str::to_string)
        else {
            return;
        };
        self.stroke_color = color.clone();
        self.fill_color = Some(color);
    }
}
