//! Tests for region attachment, resizing and selection through a session.

use crate::image::ImageObject;
use crate::model::{PointRegion, RegionId};
use crate::normalize::CoordinateSystem;
use crate::selection::Selectable;
use crate::session::Session;

const EPSILON: f32 = 0.001;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn position(session: &Session, id: &RegionId) -> (f32, f32) {
    let region = session.region(id).expect("region exists");
    (region.x(), region.y())
}

#[test]
fn test_pixel_region_follows_resizes() {
    let image = ImageObject::new("img").with_size((2000, 1000), (200.0, 100.0));
    let mut session = Session::new(image);
    let id = session.add_region(PointRegion::new(100.0, 50.0, 5.0, CoordinateSystem::Pixel));

    let region = session.region(&id).unwrap();
    assert_eq!((region.relative_x(), region.relative_y()), (50.0, 50.0));

    session.update_image_size((2000, 1000), (200.0, 100.0));
    assert_eq!(position(&session, &id), (100.0, 50.0));

    session.update_image_size((2000, 1000), (400.0, 300.0));
    assert_eq!(position(&session, &id), (200.0, 150.0));
}

#[test]
fn test_pixel_region_added_before_stage_keeps_position() {
    let mut session = Session::new(ImageObject::new("img"));
    let id = session.add_region(PointRegion::new(100.0, 50.0, 5.0, CoordinateSystem::Pixel));

    session.update_image_size((400, 200), (400.0, 200.0));
    assert_eq!(position(&session, &id), (100.0, 50.0));

    session.update_image_size((400, 200), (200.0, 100.0));
    assert_eq!(position(&session, &id), (50.0, 25.0));

    let result = session.serialize_region(&id).unwrap();
    assert_eq!((result.value.x, result.value.y), (25.0, 25.0));
}

#[test]
fn test_percent_region_converts_once() {
    let mut session = Session::new(ImageObject::new("img"));
    let id = session.add_region(PointRegion::new(10.0, 20.0, 5.0, CoordinateSystem::Percent));

    session.update_image_size((1000, 500), (1000.0, 500.0));
    let region = session.region(&id).unwrap();
    assert_eq!(region.coordinate_system(), CoordinateSystem::Pixel);
    assert_eq!((region.x(), region.y(), region.radius()), (100.0, 100.0, 50.0));

    session.update_image_size((1000, 500), (1000.0, 500.0));
    let region = session.region(&id).unwrap();
    assert_eq!((region.x(), region.y(), region.radius()), (100.0, 100.0, 50.0));
}

#[test]
fn test_converted_region_tracks_later_resizes() {
    let mut session = Session::new(ImageObject::new("img"));
    let id = session.add_region(PointRegion::new(10.0, 20.0, 5.0, CoordinateSystem::Percent));

    session.update_image_size((1000, 500), (1000.0, 500.0));
    session.update_image_size((1000, 500), (500.0, 250.0));
    assert_eq!(position(&session, &id), (50.0, 50.0));
}

#[test]
fn test_user_edit_suppresses_conversion_for_all_regions() {
    let mut session = Session::new(ImageObject::new("img").with_size((100, 100), (100.0, 100.0)));
    let edited = session.add_region(PointRegion::new(10.0, 10.0, 5.0, CoordinateSystem::Pixel));
    let legacy = session.add_region(PointRegion::new(30.0, 40.0, 2.0, CoordinateSystem::Percent));

    session.move_region(&edited, 20.0, 20.0).unwrap();
    session.update_image_size((1000, 500), (1000.0, 500.0));

    let region = session.region(&legacy).unwrap();
    assert_eq!(region.coordinate_system(), CoordinateSystem::Percent);
    assert_eq!((region.x(), region.y(), region.radius()), (30.0, 40.0, 2.0));
    assert_eq!(region.surface_size(), Some((1000.0, 500.0)));
}

#[test]
fn test_attach_percent_region_copies_anchor() {
    let mut session = Session::new(ImageObject::new("img").with_size((1000, 500), (1000.0, 500.0)));
    let id = session.add_region(PointRegion::new(30.0, 40.0, 1.0, CoordinateSystem::Percent));

    let region = session.region(&id).unwrap();
    assert_eq!((region.relative_x(), region.relative_y()), (30.0, 40.0));
    assert_eq!((region.x(), region.y()), (30.0, 40.0));
}

#[test]
fn test_relative_anchor_survives_many_resizes() {
    let mut session = Session::new(ImageObject::new("img").with_size((640, 480), (640.0, 480.0)));
    let id = session.add_region(PointRegion::new(123.0, 321.0, 5.0, CoordinateSystem::Pixel));

    for (w, h) in [(320.0, 240.0), (1280.0, 960.0), (77.0, 13.0), (640.0, 480.0)] {
        session.update_image_size((640, 480), (w, h));
    }
    let (x, y) = position(&session, &id);
    assert!(approx_eq(x, 123.0), "x drifted to {}", x);
    assert!(approx_eq(y, 321.0), "y drifted to {}", y);
}

#[test]
fn test_selecting_b_unselects_a() {
    let mut session = Session::new(ImageObject::new("img").with_size((100, 100), (100.0, 100.0)));
    let a = session.add_region(PointRegion::new(10.0, 10.0, 5.0, CoordinateSystem::Pixel));
    let b = session.add_region(PointRegion::new(20.0, 20.0, 5.0, CoordinateSystem::Pixel));

    session.select_region(&a).unwrap();
    session.select_region(&b).unwrap();

    assert!(!session.region(&a).unwrap().is_selected());
    assert!(session.region(&b).unwrap().is_selected());
    assert_eq!(session.image().selected(), Some(&b));

    let selected_count = session
        .image()
        .regions()
        .iter()
        .filter(|r| r.is_selected())
        .count();
    assert_eq!(selected_count, 1);
}

#[test]
fn test_selection_survives_resize() {
    let mut session = Session::new(ImageObject::new("img").with_size((100, 100), (100.0, 100.0)));
    let a = session.add_region(PointRegion::new(10.0, 10.0, 5.0, CoordinateSystem::Pixel));
    session.select_region(&a).unwrap();

    session.update_image_size((100, 100), (50.0, 50.0));
    assert!(session.region(&a).unwrap().is_selected());
    assert_eq!(session.image().selected(), Some(&a));
    assert_eq!(position(&session, &a), (5.0, 5.0));
}
