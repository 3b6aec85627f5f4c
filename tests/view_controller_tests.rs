use gpui::point;
use gpui_chart_select::data_types::{ScaleBounds, SelectionRect, ViewTransform, ZoomPolicy};
use gpui_chart_select::view_controller::ViewController;

fn controller() -> ViewController {
    ViewController::new(ScaleBounds::default(), ZoomPolicy::Uniform, 5.0)
}

#[test]
fn test_reset_is_idempotent() {
    let mut vc = controller();
    vc.zoom_to_box(&SelectionRect::new(0.0, 0.0, 60.0, 50.0), 240.0, 210.0);
    vc.reset();
    assert_eq!(vc.transform(), ViewTransform::IDENTITY);
    vc.reset();
    assert_eq!(vc.transform(), ViewTransform::IDENTITY);
}

#[test]
fn test_zoom_to_full_viewport_is_identity() {
    let mut vc = controller();
    assert!(vc.zoom_to_box(&SelectionRect::new(0.0, 0.0, 240.0, 210.0), 240.0, 210.0));
    assert!(vc.transform().is_identity());
}

#[test]
fn test_zoom_to_box_uniform() {
    let mut vc = controller();
    assert!(vc.zoom_to_box(&SelectionRect::new(0.0, 0.0, 60.0, 50.0), 240.0, 210.0));
    let t = vc.transform();
    // min(240/60, 210/50) = 4; centre (30, 25) lands on the viewport centre.
    assert_eq!(t.scale_x, 4.0);
    assert_eq!(t.scale_y, 4.0);
    assert_eq!(t.translate_x, 0.0);
    assert_eq!(t.translate_y, 5.0);
    assert_eq!(t.apply(point(30.0, 25.0)), point(120.0, 105.0));
}

#[test]
fn test_zoom_to_box_independent() {
    let mut vc = ViewController::new(ScaleBounds::default(), ZoomPolicy::Independent, 5.0);
    vc.zoom_to_box(&SelectionRect::new(0.0, 0.0, 60.0, 105.0), 240.0, 210.0);
    let t = vc.transform();
    assert_eq!(t.scale_x, 4.0);
    assert_eq!(t.scale_y, 2.0);
}

#[test]
fn test_policy_switch() {
    let mut vc = controller();
    assert_eq!(vc.policy(), ZoomPolicy::Uniform);
    assert_eq!(vc.bounds(), ScaleBounds::default());
    vc.set_policy(ZoomPolicy::Independent);

    vc.zoom_to_box(&SelectionRect::new(0.0, 0.0, 120.0, 21.0), 240.0, 210.0);
    let t = vc.transform();
    assert_eq!((t.scale_x, t.scale_y), (2.0, 10.0));
}

#[test]
fn test_zoom_to_box_scale_is_monotonic_and_clamped() {
    let mut previous = 0.0;
    for width in [200.0, 120.0, 60.0, 30.0, 20.0, 10.0, 6.0] {
        let rect = SelectionRect::new(100.0, 100.0, 100.0 + width, 100.0 + width);
        let t = ViewController::compute_box_transform(
            &rect,
            240.0,
            210.0,
            ScaleBounds::default(),
            ZoomPolicy::Uniform,
        );
        assert!(t.scale_x >= previous, "scale shrank for width {}", width);
        assert!(t.scale_x <= 10.0);
        previous = t.scale_x;
    }
    assert_eq!(previous, 10.0);
}

#[test]
fn test_zoom_to_box_never_below_one() {
    let mut vc = controller();
    vc.zoom_to_box(&SelectionRect::new(-100.0, -100.0, 500.0, 500.0), 240.0, 210.0);
    assert_eq!(vc.transform().scale_x, 1.0);
}

#[test]
fn test_zoom_to_degenerate_box_is_noop() {
    let mut vc = controller();
    assert!(!vc.zoom_to_box(&SelectionRect::new(10.0, 10.0, 13.0, 80.0), 240.0, 210.0));
    assert!(vc.transform().is_identity());
}

#[test]
fn test_zoom_at_keeps_pivot_fixed() {
    let mut vc = controller();
    let pivot = point(100.0, 50.0);
    let before = vc.transform().invert(pivot);
    vc.zoom_at(pivot, 2.0);

    let t = vc.transform();
    assert_eq!(t.scale_x, 2.0);
    assert_eq!((t.translate_x, t.translate_y), (-100.0, -50.0));
    assert_eq!(t.apply(before), pivot);
}

#[test]
fn test_zoom_at_respects_bounds() {
    let mut vc = controller();
    vc.zoom_at(point(10.0, 10.0), 0.5);
    assert!(vc.transform().is_identity());

    vc.zoom_at(point(10.0, 10.0), 50.0);
    assert_eq!(vc.transform().scale_x, 10.0);
}

#[test]
fn test_pan_by_translates_only() {
    let mut vc = controller();
    vc.zoom_at(point(0.0, 0.0), 2.0);
    vc.pan_by(15.0, -5.0);
    let t = vc.transform();
    assert_eq!(t.scale_x, 2.0);
    assert_eq!((t.translate_x, t.translate_y), (15.0, -5.0));
}

#[test]
fn test_set_transform_clamps_scale() {
    let mut vc = controller();
    vc.set_transform(ViewTransform {
        scale_x: 50.0,
        scale_y: 0.1,
        translate_x: 3.0,
        translate_y: f32::NAN,
    });
    let t = vc.transform();
    assert_eq!((t.scale_x, t.scale_y), (10.0, 1.0));
    assert_eq!((t.translate_x, t.translate_y), (3.0, 0.0));
}

#[test]
fn test_compute_zoom_factor() {
    assert_eq!(ViewController::compute_zoom_factor(100.0, 100.0), 0.5);
    assert_eq!(ViewController::compute_zoom_factor(-100.0, 100.0), 2.0);
}
