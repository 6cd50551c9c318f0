//! The image object that owns keypoint regions.
//!
//! The image knows its natural (unscaled) size, the current stage size the
//! renderer draws at, and which of its regions is selected.

use crate::model::{PointRegion, RegionId};
use crate::normalize::Normalizable;
use crate::selection::{Selectable, SelectionSlot};

/// An annotated image and its regions.
#[derive(Debug, Clone)]
pub struct ImageObject {
    /// Object name referenced by label controls
    pub name: String,
    natural_width: Option<u32>,
    natural_height: Option<u32>,
    stage_width: f32,
    stage_height: f32,
    zoom_scale: f32,
    selection: SelectionSlot,
    regions: Vec<PointRegion>,
}

impl ImageObject {
    /// Create an image whose dimensions are not known yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            natural_width: None,
            natural_height: None,
            stage_width: 0.0,
            stage_height: 0.0,
            zoom_scale: 1.0,
            selection: SelectionSlot::new(),
            regions: Vec::new(),
        }
    }

    /// Set natural and stage size up front, before any region is attached.
    pub fn with_size(mut self, natural: (u32, u32), stage: (f32, f32)) -> Self {
        self.natural_width = Some(natural.0);
        self.natural_height = Some(natural.1);
        self.stage_width = stage.0;
        self.stage_height = stage.1;
        self
    }

    /// Intrinsic pixel size of the image, once loaded.
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        self.natural_width.zip(self.natural_height)
    }

    pub fn stage_width(&self) -> f32 {
        self.stage_width
    }

    pub fn stage_height(&self) -> f32 {
        self.stage_height
    }

    pub fn zoom_scale(&self) -> f32 {
        self.zoom_scale
    }

    pub fn set_zoom_scale(&mut self, zoom_scale: f32) {
        self.zoom_scale = zoom_scale;
    }

    /// Id of the selected region.
    pub fn selected(&self) -> Option<&RegionId> {
        self.selection.current()
    }

    pub fn regions(&self) -> &[PointRegion] {
        &self.regions
    }

    pub fn region(&self, id: &RegionId) -> Option<&PointRegion> {
        self.regions.iter().find(|r| r.id() == id)
    }

    pub(crate) fn region_mut(&mut self, id: &RegionId) -> Option<&mut PointRegion> {
        self.regions.iter_mut().find(|r| r.id() == id)
    }

    /// Take ownership of a region and compute its relative anchor.
    pub(crate) fn attach(&mut self, mut region: PointRegion) -> RegionId {
        region.on_attach(self.stage_width, self.stage_height);
        let id = region.id().clone();
        self.regions.push(region);
        id
    }

    /// Remove a region, clearing the selection if it held it.
    pub(crate) fn detach(&mut self, id: &RegionId) -> Option<PointRegion> {
        let index = self.regions.iter().position(|r| r.id() == id)?;
        self.selection.clear_if(id);
        Some(self.regions.remove(index))
    }

    /// Make `id` the selected region, unselecting the previous one.
    pub(crate) fn set_selected(&mut self, id: &RegionId) {
        if let Some(prev) = self.selection.replace(id.clone()) {
            if let Some(region) = self.region_mut(&prev) {
                region.set_selected(false);
                log::debug!("Region {} unselected by selection of {}", prev, id);
            }
        }
    }

    /// Clear the selection if it still holds `id`.
    pub(crate) fn clear_selected(&mut self, id: &RegionId) -> bool {
        self.selection.clear_if(id)
    }

    /// Record new natural and stage sizes and notify every region in order.
    pub(crate) fn resize(&mut self, natural: (u32, u32), stage: (f32, f32), user_generated: bool) {
        self.natural_width = Some(natural.0);
        self.natural_height = Some(natural.1);
        self.stage_width = stage.0;
        self.stage_height = stage.1;

        log::debug!(
            "Image '{}' resized: natural {}x{}, stage {}x{}",
            self.name,
            natural.0,
            natural.1,
            stage.0,
            stage.1
        );

        for region in &mut self.regions {
            region.on_surface_resize(stage.0, stage.1, user_generated);
        }
    }
}
