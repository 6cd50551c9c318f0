//! Data models for keypoint regions and their label states.

mod label;
mod region;

pub use label::{Choices, KeyPointLabels, Label, LabelState, SelectedLabels};
pub use region::{PointRegion, RegionId, Stateful};
