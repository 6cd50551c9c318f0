//! Keypoint regions on a zoomable image.
//!
//! A keypoint keeps one logical position consistent across the image's natural
//! size, the stage size it is currently drawn at, and the percentage format it
//! is stored in.
//!
//! ```
//! use keypoint_region::{CoordinateSystem, ImageObject, PointRegion, RegionError, Session};
//!
//! fn main() -> Result<(), RegionError> {
//!     let image = ImageObject::new("img").with_size((1920, 1080), (960.0, 540.0));
//!     let mut session = Session::new(image);
//!     let id = session.add_region(PointRegion::new(480.0, 270.0, 5.0, CoordinateSystem::Pixel));
//!
//!     session.update_image_size((1920, 1080), (1920.0, 1080.0));
//!     let region = session.region(&id).ok_or_else(|| RegionError::not_found(&id))?;
//!     assert_eq!((region.x(), region.y()), (960.0, 540.0));
//!
//!     let stored = session.serialize_region(&id)?;
//!     assert_eq!((stored.value.x, stored.value.y), (50.0, 50.0));
//!     Ok(())
//! }
//! ```

pub mod appearance;
pub mod color_utils;
pub mod config;
pub mod constants;
mod error;
mod image;
pub mod model;
pub mod normalize;
pub mod selection;
mod serialize;
mod session;

#[cfg(test)]
mod tests;

pub use appearance::{Appearance, HighlightStyle};
pub use error::RegionError;
pub use image::ImageObject;
pub use model::{Choices, KeyPointLabels, LabelState, PointRegion, RegionId, SelectedLabels, Stateful};
pub use normalize::{CoordinateSystem, Normalizable, to_pixel, to_relative};
pub use selection::{CursorHint, Selectable, SelectionSlot};
pub use serialize::{KeyPointValue, RegionResult};
pub use session::{RegionPanel, Session};
