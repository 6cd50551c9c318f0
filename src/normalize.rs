//! Pixel/percentage coordinate conversion.
//!
//! A region keeps two representations of its position: stage pixels, which
//! the renderer consumes, and percentages of the stage, which survive zoom
//! and resize. Only this module writes either representation in bulk.

use serde::{Deserialize, Serialize};

use crate::model::PointRegion;

/// Unit convention of a region's `x`, `y` and radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoordinateSystem {
    /// Stage pixels
    #[default]
    #[serde(rename = "px")]
    Pixel,
    /// Percent (0-100) of the stage
    #[serde(rename = "perc")]
    Percent,
}

fn is_valid_dimension(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Convert pixel coordinates to percentages of `width` x `height`.
///
/// Returns `None` when either dimension is zero, negative or not finite.
pub fn to_relative(x: f32, y: f32, width: f32, height: f32) -> Option<(f32, f32)> {
    if !is_valid_dimension(width) || !is_valid_dimension(height) {
        return None;
    }
    Some((x / width * 100.0, y / height * 100.0))
}

/// Convert percentages back to pixels of a `width` x `height` surface.
///
/// Returns `None` under the same conditions as [`to_relative`].
pub fn to_pixel(rel_x: f32, rel_y: f32, width: f32, height: f32) -> Option<(f32, f32)> {
    if !is_valid_dimension(width) || !is_valid_dimension(height) {
        return None;
    }
    Some((width * rel_x / 100.0, height * rel_y / 100.0))
}

/// Coordinate maintenance driven by the owning image.
pub trait Normalizable {
    /// Establish the relative anchor. Called once, when the region is
    /// attached to an image whose stage is `stage_width` x `stage_height`.
    fn on_attach(&mut self, stage_width: f32, stage_height: f32);

    /// React to the image reporting a new surface size.
    ///
    /// `user_generated` is the session-wide "a user edit was recorded" flag;
    /// while it is unset, percent-space regions are converted to pixels once.
    fn on_surface_resize(&mut self, surface_width: f32, surface_height: f32, user_generated: bool);
}

impl Normalizable for PointRegion {
    fn on_attach(&mut self, stage_width: f32, stage_height: f32) {
        match self.coordinate_system {
            CoordinateSystem::Percent => {
                self.relative_x = self.x;
                self.relative_y = self.y;
                self.anchored = true;
            }
            CoordinateSystem::Pixel => {
                match to_relative(self.x, self.y, stage_width, stage_height) {
                    Some((rx, ry)) => {
                        self.relative_x = rx;
                        self.relative_y = ry;
                        self.anchored = true;
                    }
                    None => log::warn!(
                        "Region {}: stage size {}x{} unusable, anchoring deferred to first resize",
                        self.id(),
                        stage_width,
                        stage_height
                    ),
                }
            }
        }
        if is_valid_dimension(stage_width) && is_valid_dimension(stage_height) {
            self.surface_width = Some(stage_width);
            self.surface_height = Some(stage_height);
        }
        log::debug!(
            "Attached region {} ({:?}) at relative ({}, {})",
            self.id(),
            self.coordinate_system,
            self.relative_x,
            self.relative_y
        );
    }

    fn on_surface_resize(&mut self, surface_width: f32, surface_height: f32, user_generated: bool) {
        self.surface_width = Some(surface_width);
        self.surface_height = Some(surface_height);

        match self.coordinate_system {
            CoordinateSystem::Pixel if !self.anchored => {
                if let Some((rx, ry)) = to_relative(self.x, self.y, surface_width, surface_height) {
                    self.relative_x = rx;
                    self.relative_y = ry;
                    self.anchored = true;
                    log::debug!(
                        "Region {} anchored on resize at relative ({}, {})",
                        self.id(),
                        rx,
                        ry
                    );
                }
            }
            CoordinateSystem::Pixel => {
                if let Some((x, y)) =
                    to_pixel(self.relative_x, self.relative_y, surface_width, surface_height)
                {
                    self.x = x;
                    self.y = y;
                }
            }
            CoordinateSystem::Percent if !user_generated => {
                let Some((x, y)) = to_pixel(self.x, self.y, surface_width, surface_height) else {
                    log::warn!(
                        "Region {}: surface size {}x{} unusable, percent conversion deferred",
                        self.id(),
                        surface_width,
                        surface_height
                    );
                    return;
                };
                self.x = x;
                self.y = y;
                self.radius = surface_width * self.radius / 100.0;
                self.coordinate_system = CoordinateSystem::Pixel;
                log::debug!(
                    "Region {} converted from percent to pixels: ({}, {}) r={}",
                    self.id(),
                    self.x,
                    self.y,
                    self.radius
                );
            }
            CoordinateSystem::Percent => {
                log::debug!(
                    "Region {} kept in percent space, session already has user edits",
                    self.id()
                );
            }
        }
    }
}

impl PointRegion {
    /// Re-derive the relative anchor after a direct move.
    pub(crate) fn sync_relative(&mut self) {
        match self.coordinate_system {
            CoordinateSystem::Percent => {
                self.relative_x = self.x;
                self.relative_y = self.y;
            }
            CoordinateSystem::Pixel => {
                let Some((width, height)) = self.surface_size() else {
                    return;
                };
                if let Some((rx, ry)) = to_relative(self.x, self.y, width, height) {
                    self.relative_x = rx;
                    self.relative_y = ry;
                    self.anchored = true;
                }
            }
        }
    }
}
