//! End-to-end runs of the layout → interaction → lighting → governor pipeline.

use galleria_app::gallery::build_gallery;
use galleria_app::manifest::Manifest;
use galleria_app::tour::{Tour, TourAction, TourScript, TourSettings};
use galleria_assets::{FrameStyle, ImageFileLoader, TextureCache};
use galleria_camera::{NavigationMode, SelectionSource};
use galleria_input::Viewport;
use galleria_layout::LayoutOptions;
use galleria_lighting::LightId;
use galleria_perf::PerformanceGrade;
use winit::keyboard::KeyCode;

fn tour(items: usize) -> Tour {
    let manifest = Manifest::placeholders(items);
    let mut cache = TextureCache::new();
    let loader = ImageFileLoader::new(".");
    let gallery = pollster::block_on(build_gallery(
        &manifest.items,
        &LayoutOptions::default(),
        FrameStyle::default(),
        &mut cache,
        &loader,
    ));
    Tour::new(gallery, cache, TourSettings::default())
}

fn center() -> (f64, f64) {
    let c = Viewport::default().center();
    (f64::from(c.x), f64::from(c.y))
}

#[test]
fn test_programmatic_focus_lights_the_frame() {
    let mut tour = tour(12);
    let mut script = TourScript::new();
    script.push(0.1, TourAction::Focus(3));
    let report = tour.run(&script, 2.0);

    assert_eq!(report.camera.selected, Some(3));
    assert_eq!(report.camera.mode, NavigationMode::Idle);
    assert_eq!(report.light_focus, Some(3));
    assert_eq!(report.focus_completed, 1);
    assert_eq!(report.selections.len(), 1);
    assert_eq!(report.selections[0].source, SelectionSource::Programmatic);

    let rig = tour.director().rig().unwrap();
    let (baseline, _) = rig.spot_baseline(3).unwrap();
    assert!(rig.get(LightId::Spot(3)).unwrap().intensity > baseline);
    assert!(report.camera_moves > 0);
}

#[test]
fn test_double_tap_refocuses_after_clear() {
    let mut tour = tour(12);
    let (cx, cy) = center();
    let mut script = TourScript::new();
    script
        .push(0.1, TourAction::Focus(3))
        .key(1.5, KeyCode::Escape)
        .double_tap(2.0, cx, cy);
    let report = tour.run(&script, 3.5);

    let sources: Vec<SelectionSource> = report.selections.iter().map(|s| s.source).collect();
    assert_eq!(
        sources,
        vec![
            SelectionSource::Programmatic,
            SelectionSource::Cleared,
            SelectionSource::DoubleTap,
        ]
    );
    assert_eq!(report.camera.selected, Some(3));
    assert_eq!(report.light_focus, Some(3));
}

#[test]
fn test_reset_then_idle_auto_rotates() {
    let mut tour = tour(12);
    let mut script = TourScript::new();
    script
        .push(0.1, TourAction::Focus(3))
        .push(2.0, TourAction::ResetView)
        .key(4.0, KeyCode::ArrowLeft);
    let report = tour.run(&script, 17.0);

    assert_eq!(report.camera.selected, None);
    assert_eq!(report.light_focus, None);
    assert_eq!(
        report.selections.last().map(|s| s.source),
        Some(SelectionSource::Reset)
    );
    assert_eq!(report.camera.mode, NavigationMode::AutoRotating);
    let home = TourSettings::default().interaction.home_position;
    assert!((report.camera.pose.position - home).length() < 1e-3);
}

#[test]
fn test_demo_tour() {
    let mut tour = tour(12);
    let script = TourScript::demo(12, Viewport::default(), 30.0);
    let report = tour.run(&script, 30.0);

    assert!(report.sim_time >= 30.0);
    assert!(report.frames >= 1790);
    let sources: Vec<SelectionSource> = report.selections.iter().map(|s| s.source).collect();
    assert_eq!(
        sources,
        vec![
            SelectionSource::Programmatic,
            SelectionSource::Programmatic,
            SelectionSource::Cleared,
            SelectionSource::DoubleTap,
            SelectionSource::Reset,
            SelectionSource::Programmatic,
        ]
    );
    assert_eq!(report.camera.selected, Some(2));
    assert!(report.lights.count > 0);
    assert_eq!(report.warnings, 0);
    assert_eq!(report.grade, PerformanceGrade::Excellent);
    assert_eq!(report.performance.geometries, 4);

    tour.dispose();
    assert_eq!(tour.director().sink().attached(), 0);
    assert!(!tour.governor().is_monitoring());
}

#[test]
fn test_empty_gallery_is_quiet() {
    let mut tour = tour(0);
    let mut script = TourScript::new();
    script
        .push(0.1, TourAction::Focus(0))
        .key(0.2, KeyCode::ArrowLeft)
        .push(0.3, TourAction::ResetView);
    let report = tour.run(&script, 1.5);

    assert!(report.selections.is_empty());
    assert_eq!(report.camera.selected, None);
    assert_eq!(report.light_focus, None);
}
