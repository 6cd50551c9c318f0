//! Annotation session: the unit that edits the regions of one image.
//!
//! The session owns the image (and through it every region), the highlighted
//! node slot, and the flag recording whether any user edit happened. All
//! selection transitions go through here so the image slot and the session
//! slot never disagree.

use crate::appearance::{Appearance, HighlightStyle};
use crate::error::RegionError;
use crate::image::ImageObject;
use crate::model::{KeyPointLabels, LabelState, PointRegion, RegionId, SelectedLabels, Stateful};
use crate::selection::{CursorHint, Selectable, SelectionSlot};
use crate::serialize::RegionResult;

/// Editing state loaded into the labeling panel for the selected region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionPanel {
    /// Region whose state is loaded
    pub region: Option<RegionId>,
    /// Selected label names shown in the panel
    pub labels: Vec<String>,
}

/// An active annotation session over one image.
#[derive(Debug, Clone)]
pub struct Session {
    image: ImageObject,
    highlighted: SelectionSlot,
    panel: RegionPanel,
    sent_user_generate: bool,
    editable: bool,
    relation_mode: bool,
}

impl Session {
    /// Start an editable session over `image`.
    pub fn new(image: ImageObject) -> Self {
        Self {
            image,
            highlighted: SelectionSlot::new(),
            panel: RegionPanel::default(),
            sent_user_generate: false,
            editable: true,
            relation_mode: false,
        }
    }

    pub fn image(&self) -> &ImageObject {
        &self.image
    }

    pub fn region(&self, id: &RegionId) -> Option<&PointRegion> {
        self.image.region(id)
    }

    fn region_mut(&mut self, id: &RegionId) -> Result<&mut PointRegion, RegionError> {
        self.image
            .region_mut(id)
            .ok_or_else(|| RegionError::not_found(id))
    }

    /// Region shown as highlighted by the session.
    pub fn highlighted_node(&self) -> Option<&RegionId> {
        self.highlighted.current()
    }

    /// Editing state currently loaded for a region.
    pub fn panel(&self) -> &RegionPanel {
        &self.panel
    }

    /// Whether a user-generated edit has been recorded in this session.
    pub fn sent_user_generate(&self) -> bool {
        self.sent_user_generate
    }

    /// Record a user-generated edit. Stops legacy percent conversion for
    /// every region of the session from now on.
    pub fn mark_user_generated(&mut self) {
        if !self.sent_user_generate {
            log::debug!("Session received its first user-generated edit");
        }
        self.sent_user_generate = true;
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    pub fn relation_mode(&self) -> bool {
        self.relation_mode
    }

    pub fn set_relation_mode(&mut self, relation_mode: bool) {
        self.relation_mode = relation_mode;
    }

    /// Attach a region to the image.
    pub fn add_region(&mut self, region: PointRegion) -> RegionId {
        self.image.attach(region)
    }

    /// Remove a region, releasing any slot that referenced it.
    pub fn remove_region(&mut self, id: &RegionId) -> Result<PointRegion, RegionError> {
        let region = self
            .image
            .detach(id)
            .ok_or_else(|| RegionError::not_found(id))?;
        self.highlighted.clear_if(id);
        if self.panel.region.as_ref() == Some(id) {
            self.panel = RegionPanel::default();
        }
        log::debug!("Removed region {}", id);
        Ok(region)
    }

    /// Move a region as the result of a drag. Counts as a user edit.
    pub fn move_region(&mut self, id: &RegionId, x: f32, y: f32) -> Result<(), RegionError> {
        self.region_mut(id)?.set_position(x, y);
        self.mark_user_generated();
        Ok(())
    }

    /// Attach a label state to a region and refresh its colors.
    pub fn add_label_state(&mut self, id: &RegionId, state: LabelState) -> Result<(), RegionError> {
        let region = self.region_mut(id)?;
        region.add_label_state(state);
        region.update_appearance_from_state();
        Ok(())
    }

    /// Deliver new natural and stage sizes of the image to every region.
    pub fn update_image_size(&mut self, natural: (u32, u32), stage: (f32, f32)) {
        self.image.resize(natural, stage, self.sent_user_generate);
    }

    pub fn set_zoom_scale(&mut self, zoom_scale: f32) {
        self.image.set_zoom_scale(zoom_scale);
    }

    /// Select a region, evicting any previous selection.
    pub fn select_region(&mut self, id: &RegionId) -> Result<(), RegionError> {
        self.region_mut(id)?.set_selected(true);
        self.highlighted.replace(id.clone());
        self.image.set_selected(id);
        self.load_region_state(id);
        log::debug!("Selected region {}", id);
        Ok(())
    }

    /// Deselect a region and release the slots it held.
    pub fn deselect_region(&mut self, id: &RegionId) -> Result<(), RegionError> {
        self.region_mut(id)?.set_selected(false);
        self.image.clear_selected(id);
        self.highlighted.clear_if(id);
        self.unload_region_state(id);
        log::debug!("Deselected region {}", id);
        Ok(())
    }

    /// Handle a click on a region: toggles selection.
    ///
    /// Returns `Ok(false)` without changes when the session is read-only.
    pub fn click_region(&mut self, id: &RegionId) -> Result<bool, RegionError> {
        if !self.editable {
            return Ok(false);
        }
        let region = self.region_mut(id)?;
        region.set_highlight(false);
        if region.is_selected() {
            self.deselect_region(id)?;
        } else {
            self.select_region(id)?;
        }
        Ok(true)
    }

    /// Handle the pointer entering or leaving a region.
    ///
    /// Highlighting only follows hover while relations are being drawn.
    pub fn hover_region(&mut self, id: &RegionId, entered: bool) -> Result<CursorHint, RegionError> {
        let relation_mode = self.relation_mode;
        let region = self.region_mut(id)?;
        if !entered {
            if relation_mode {
                region.set_highlight(false);
            }
            return Ok(CursorHint::Default);
        }
        if relation_mode {
            region.set_highlight(true);
            Ok(CursorHint::Crosshair)
        } else {
            Ok(CursorHint::Pointer)
        }
    }

    /// Drawing inputs for a region at the image's current zoom.
    pub fn appearance(&self, id: &RegionId, highlight: &HighlightStyle) -> Result<Appearance, RegionError> {
        let region = self.region(id).ok_or_else(|| RegionError::not_found(id))?;
        Ok(region.appearance(self.image.zoom_scale(), self.editable, highlight))
    }

    /// Serialize a region with its first label state as the label control.
    pub fn serialize_region(&self, id: &RegionId) -> Result<RegionResult, RegionError> {
        let region = self.region(id).ok_or_else(|| RegionError::not_found(id))?;
        match region.label_states().first() {
            Some(state) => region.serialize(state, &self.image),
            None => region.serialize(&KeyPointLabels::default(), &self.image),
        }
    }

    /// Serialize every region in attachment order.
    pub fn serialize_all(&self) -> Result<Vec<RegionResult>, RegionError> {
        self.image
            .regions()
            .iter()
            .map(|r| self.serialize_region(r.id()))
            .collect()
    }

    fn load_region_state(&mut self, id: &RegionId) {
        let labels: Vec<String> = self
            .image
            .region(id)
            .map(|r| {
                r.label_states()
                    .iter()
                    .flat_map(|s| s.selected_names())
                    .collect()
            })
            .unwrap_or_default();
        self.panel = RegionPanel {
            region: Some(id.clone()),
            labels,
        };
    }

    fn unload_region_state(&mut self, id: &RegionId) {
        if self.panel.region.as_ref() == Some(id) {
            self.panel = RegionPanel::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::CoordinateSystem;

    fn session_with_two() -> (Session, RegionId, RegionId) {
        let image = ImageObject::new("img").with_size((1000, 500), (1000.0, 500.0));
        let mut session = Session::new(image);
        let a = session.add_region(PointRegion::new(10.0, 10.0, 5.0, CoordinateSystem::Pixel));
        let b = session.add_region(PointRegion::new(20.0, 20.0, 5.0, CoordinateSystem::Pixel));
        (session, a, b)
    }

    fn is_selected(session: &Session, id: &RegionId) -> bool {
        session.region(id).expect("region exists").is_selected()
    }

    #[test]
    fn test_select_sets_both_slots() {
        let (mut session, a, _) = session_with_two();
        session.select_region(&a).unwrap();

        assert!(is_selected(&session, &a));
        assert_eq!(session.image().selected(), Some(&a));
        assert_eq!(session.highlighted_node(), Some(&a));
        assert_eq!(session.panel().region.as_ref(), Some(&a));
    }

    #[test]
    fn test_selection_is_exclusive() {
        let (mut session, a, b) = session_with_two();
        session.select_region(&a).unwrap();
        session.select_region(&b).unwrap();

        assert!(!is_selected(&session, &a));
        assert!(is_selected(&session, &b));
        assert_eq!(session.image().selected(), Some(&b));
        assert_eq!(session.highlighted_node(), Some(&b));
    }

    #[test]
    fn test_deselect_clears_slots() {
        let (mut session, a, _) = session_with_two();
        session.select_region(&a).unwrap();
        session.deselect_region(&a).unwrap();

        assert!(!is_selected(&session, &a));
        assert_eq!(session.image().selected(), None);
        assert_eq!(session.highlighted_node(), None);
        assert_eq!(session.panel(), &RegionPanel::default());
    }

    #[test]
    fn test_stale_deselect_keeps_current_selection() {
        let (mut session, a, b) = session_with_two();
        session.select_region(&b).unwrap();
        session.deselect_region(&a).unwrap();

        assert_eq!(session.image().selected(), Some(&b));
        assert_eq!(session.highlighted_node(), Some(&b));
        assert!(is_selected(&session, &b));
    }

    #[test]
    fn test_unknown_region() {
        let (mut session, _, _) = session_with_two();
        let missing = RegionId::from("missing");
        assert!(matches!(
            session.select_region(&missing),
            Err(RegionError::RegionNotFound { .. })
        ));
        assert!(session.move_region(&missing, 1.0, 1.0).is_err());
        assert_eq!(session.image().selected(), None);
    }

    #[test]
    fn test_click_toggles_selection() {
        let (mut session, a, _) = session_with_two();
        assert!(session.click_region(&a).unwrap());
        assert!(is_selected(&session, &a));
        assert!(session.click_region(&a).unwrap());
        assert!(!is_selected(&session, &a));
    }

    #[test]
    fn test_click_ignored_when_read_only() {
        let (mut session, a, _) = session_with_two();
        session.set_editable(false);
        assert!(!session.click_region(&a).unwrap());
        assert!(!is_selected(&session, &a));
    }

    #[test]
    fn test_hover_highlights_only_in_relation_mode() {
        let (mut session, a, _) = session_with_two();
        assert_eq!(session.hover_region(&a, true).unwrap(), CursorHint::Pointer);
        assert!(!session.region(&a).unwrap().is_highlighted());

        session.set_relation_mode(true);
        assert_eq!(session.hover_region(&a, true).unwrap(), CursorHint::Crosshair);
        assert!(session.region(&a).unwrap().is_highlighted());

        assert_eq!(session.hover_region(&a, false).unwrap(), CursorHint::Default);
        assert!(!session.region(&a).unwrap().is_highlighted());
    }

    #[test]
    fn test_highlight_independent_of_selection() {
        let (mut session, a, _) = session_with_two();
        session.set_relation_mode(true);
        session.hover_region(&a, true).unwrap();
        session.click_region(&a).unwrap();

        let region = session.region(&a).unwrap();
        assert!(region.is_selected());
        assert!(!region.is_highlighted());
    }

    #[test]
    fn test_remove_releases_slots() {
        let (mut session, a, b) = session_with_two();
        session.select_region(&a).unwrap();
        let removed = session.remove_region(&a).unwrap();

        assert_eq!(removed.id(), &a);
        assert_eq!(session.image().selected(), None);
        assert_eq!(session.highlighted_node(), None);
        assert_eq!(session.image().regions().len(), 1);
        assert!(session.region(&b).is_some());
    }

    #[test]
    fn test_move_marks_user_generated() {
        let (mut session, a, _) = session_with_two();
        assert!(!session.sent_user_generate());
        session.move_region(&a, 42.0, 24.0).unwrap();
        assert!(session.sent_user_generate());
        assert_eq!(session.region(&a).unwrap().x(), 42.0);
    }

    #[test]
    fn test_appearance_uses_session_zoom_and_editable() {
        let (mut session, a, _) = session_with_two();
        session.set_zoom_scale(4.0);
        session.set_editable(false);

        let look = session.appearance(&a, &HighlightStyle::default()).unwrap();
        assert_eq!(look.scale, 0.25);
        assert!(!look.draggable);
        assert_eq!((look.x, look.y), (10.0, 10.0));
    }

    #[test]
    fn test_panel_loads_selected_labels() {
        let (mut session, a, _) = session_with_two();
        let mut labels = KeyPointLabels::new("kp", "img").with_label("Nose");
        labels.select("Nose");
        session.add_label_state(&a, labels.into()).unwrap();

        session.select_region(&a).unwrap();
        assert_eq!(session.panel().labels, vec!["Nose"]);
        assert!(session.region(&a).unwrap().fill_color().is_some());
    }
}
