//! Stored result format of a keypoint region.
//!
//! Output coordinates are percentages of the stage at the moment of
//! serialization. `width` carries the marker radius.
//!
//! ```json
//! {
//!   "original_width": 1920,
//!   "original_height": 1080,
//!   "value": { "x": 25.0, "y": 40.0, "width": 0.5, "keypointlabels": ["Nose"] }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{CHOICES_FIELD, DEFAULT_LABEL_FIELD};
use crate::error::RegionError;
use crate::image::ImageObject;
use crate::model::{Choices, KeyPointLabels, LabelState, PointRegion, SelectedLabels};
use crate::normalize::CoordinateSystem;

/// One stored keypoint result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionResult {
    /// Natural image width
    pub original_width: u32,
    /// Natural image height
    pub original_height: u32,
    pub value: KeyPointValue,
}

/// Position, size and labels of a stored keypoint, in percent of the stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPointValue {
    pub x: f32,
    pub y: f32,
    /// Marker radius
    pub width: f32,
    /// Selected label names keyed by the label control's field name
    #[serde(flatten)]
    pub labels: BTreeMap<String, Vec<String>>,
}

impl KeyPointValue {
    /// Label names under `field`, empty if absent.
    pub fn label_names(&self, field: &str) -> &[String] {
        self.labels.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

impl RegionResult {
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, RegionError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a single result from JSON.
    pub fn from_json(json: &str) -> Result<Self, RegionError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl PointRegion {
    /// Snapshot this region against the image's current stage size.
    ///
    /// Fails if the natural size is unknown or the stage has no area.
    pub fn serialize(
        &self,
        control: &impl SelectedLabels,
        image: &ImageObject,
    ) -> Result<RegionResult, RegionError> {
        let (original_width, original_height) = image
            .natural_size()
            .ok_or_else(|| RegionError::missing_dimensions("natural image size"))?;

        let (stage_width, stage_height) = (image.stage_width(), image.stage_height());
        if !(stage_width > 0.0 && stage_height > 0.0) {
            return Err(RegionError::missing_dimensions(format!(
                "stage size {}x{}",
                stage_width, stage_height
            )));
        }

        let mut labels = BTreeMap::new();
        labels.insert(control.field_name().to_string(), control.selected_names());

        Ok(RegionResult {
            original_width,
            original_height,
            value: KeyPointValue {
                x: self.x() * 100.0 / stage_width,
                y: self.y() * 100.0 / stage_height,
                width: self.radius() * 100.0 / stage_width,
                labels,
            },
        })
    }

    /// Rebuild a region from a stored result.
    ///
    /// The region comes back in percent space; the first resize converts it
    /// to pixels unless the session already has user edits. Every known label
    /// key becomes a label state, `keypointlabels` first. Unknown keys are
    /// skipped with a warning.
    pub fn from_result(result: &RegionResult, to_name: &str) -> Result<Self, RegionError> {
        let value = &result.value;
        if !(value.x.is_finite() && value.y.is_finite() && value.width.is_finite()) {
            return Err(RegionError::invalid_coordinates(format!(
                "non-finite keypoint ({}, {}) width {}",
                value.x, value.y, value.width
            )));
        }

        let mut region = PointRegion::new(value.x, value.y, value.width, CoordinateSystem::Percent);

        let keyed_first = value.labels.get_key_value(DEFAULT_LABEL_FIELD);
        let others = value
            .labels
            .iter()
            .filter(|(field, _)| field.as_str() != DEFAULT_LABEL_FIELD);

        for (field, names) in keyed_first.into_iter().chain(others) {
            if names.is_empty() {
                continue;
            }
            match label_state_for(field, names, to_name) {
                Some(state) => region = region.with_label_state(state),
                None => log::warn!("Skipping unknown label field '{}' in stored result", field),
            }
        }

        Ok(region)
    }
}

fn label_state_for(field: &str, names: &[String], to_name: &str) -> Option<LabelState> {
    match field {
        DEFAULT_LABEL_FIELD => {
            let mut control = names
                .iter()
                .fold(KeyPointLabels::new(DEFAULT_LABEL_FIELD, to_name), |c, name| {
                    c.with_label(name.as_str())
                });
            for name in names {
                control.select(name);
            }
            Some(control.into())
        }
        CHOICES_FIELD => {
            let mut control = Choices::new(CHOICES_FIELD, names.to_vec());
            for name in names {
                control.select(name);
            }
            Some(control.into())
        }
        _ => None,
    }
}
