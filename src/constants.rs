//! Global constants for keypoint regions

/// Stroke color used while a region is highlighted
pub const HIGHLIGHTED_STROKE_COLOR: &str = "#ff0000";

/// Stroke width used while a region is highlighted
pub const HIGHLIGHTED_STROKE_WIDTH: f32 = 2.0;

/// Default stroke width for a keypoint marker
pub const DEFAULT_STROKE_WIDTH: f32 = 1.0;

/// Default stroke color when no label state provides one
pub const DEFAULT_STROKE_COLOR: &str = "#666666";

/// Default marker opacity
pub const DEFAULT_OPACITY: f32 = 0.9;

/// Key under which selected label names are serialized
pub const DEFAULT_LABEL_FIELD: &str = "keypointlabels";

/// Key under which selected choices are serialized
pub const CHOICES_FIELD: &str = "choices";

/// Discriminant tag of the keypoint region type
pub const KEYPOINT_REGION_TYPE: &str = "keypointregion";
