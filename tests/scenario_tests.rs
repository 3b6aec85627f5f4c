//! End-to-end interaction flows through the `Chart` session.

use gpui::{point, px, Pixels, Point};
use gpui_chart_select::data_types::{
    BrushKind, ChartConfig, DataPoint, InteractionMode, ViewTransform,
};
use gpui_chart_select::error::{ChartError, ExportError};
use gpui_chart_select::rendering::Primitive;
use gpui_chart_select::Chart;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// 24px bars with 16px gaps: band centres at 26.25 + 37.5 * i.
fn compact_config() -> ChartConfig {
    ChartConfig {
        bar_width: 24.0,
        bar_padding: 16.0,
        ..ChartConfig::default()
    }
}

fn origin() -> Point<Pixels> {
    point(px(0.0), px(0.0))
}

/// Window position of a chart-local point with the surface at the origin.
fn at(chart: &Chart, x: f32, y: f32) -> Point<Pixels> {
    let m = chart.config().margins;
    point(px(x + m.left), px(y + m.top))
}

fn drag_local(chart: &mut Chart, from: (f32, f32), to: (f32, f32)) {
    let down = at(chart, from.0, from.1);
    let up = at(chart, to.0, to.1);
    chart.pointer_down(down, origin());
    chart.pointer_move(up, origin());
    chart.pointer_up();
}

fn values(chart: &Chart) -> Vec<(&str, f64)> {
    chart
        .data()
        .iter()
        .map(|p| (p.category.as_str(), p.value))
        .collect()
}

#[test]
fn test_crop_feb_to_apr() {
    let mut chart = Chart::new(compact_config()).unwrap();
    chart.toggle_select_mode();
    drag_local(&mut chart, (40.0, 20.0), (160.0, 150.0));

    let rect = *chart.selection().unwrap();
    assert_eq!((rect.x1, rect.y1, rect.x2, rect.y2), (40.0, 20.0, 160.0, 150.0));

    assert!(chart.crop_to_selection());
    assert_eq!(values(&chart), [("feb", 30.0), ("mar", 70.0), ("apr", 90.0)]);
    assert_eq!(chart.mode(), InteractionMode::Idle);
    assert!(chart.selection().is_none());
}

#[test]
fn test_crop_with_empty_result_keeps_data() {
    let mut chart = Chart::new(compact_config()).unwrap();
    chart.toggle_select_mode();
    drag_local(&mut chart, (0.0, 20.0), (10.0, 150.0));

    assert!(!chart.crop_to_selection());
    assert_eq!(chart.data(), chart.seed());
}

#[test]
fn test_degenerate_selection_is_ignored_everywhere() {
    let mut chart = Chart::new(compact_config()).unwrap();
    chart.mount_scene();
    chart.toggle_select_mode();
    drag_local(&mut chart, (40.0, 20.0), (43.0, 150.0));

    assert!(!chart.has_valid_selection());
    assert!(!chart.zoom_to_selection());
    assert!(!chart.crop_to_selection());
    assert!(matches!(
        chart.export_selection(),
        Err(ExportError::DegenerateSelection { .. })
    ));
    assert_eq!(chart.transform(), ViewTransform::IDENTITY);
    assert_eq!(chart.data().len(), 6);
}

#[test]
fn test_cancel_after_partial_drag() {
    let mut chart = Chart::new(compact_config()).unwrap();
    chart.mount_scene();
    chart.toggle_select_mode();
    chart.pointer_down(at(&chart, 40.0, 20.0), origin());
    chart.pointer_move(at(&chart, 120.0, 100.0), origin());
    assert!(chart.is_dragging());

    assert_eq!(chart.toggle_select_mode(), InteractionMode::Idle);
    assert!(chart.selection().is_none());
    assert!(!chart.crop_to_selection());
    assert!(chart.export_selection().is_err());
    assert_eq!(chart.data().len(), 6);

    // A fresh selection works again.
    chart.toggle_select_mode();
    drag_local(&mut chart, (40.0, 20.0), (160.0, 150.0));
    assert!(chart.has_valid_selection());
}

#[test]
fn test_zoom_to_selection() {
    let mut chart = Chart::new(compact_config()).unwrap();
    assert_eq!((chart.inner_width(), chart.inner_height()), (240.0, 210.0));

    chart.toggle_select_mode();
    drag_local(&mut chart, (0.0, 0.0), (120.0, 105.0));
    assert!(chart.zoom_to_selection());
    assert_eq!(
        chart.transform(),
        ViewTransform {
            scale_x: 2.0,
            scale_y: 2.0,
            translate_x: 0.0,
            translate_y: 0.0
        }
    );
    assert_eq!(chart.mode(), InteractionMode::Idle);
    assert!(chart.selection().is_none());

    chart.reset_zoom();
    assert!(chart.transform().is_identity());
}

#[test]
fn test_second_zoom_replaces_the_first() {
    let mut chart = Chart::new(compact_config()).unwrap();
    chart.toggle_select_mode();
    drag_local(&mut chart, (0.0, 0.0), (120.0, 105.0));
    chart.zoom_to_selection();
    let first = chart.transform();

    // Same rectangle on screen: zoom-to-box reads it as drawn, so nothing compounds.
    chart.toggle_select_mode();
    drag_local(&mut chart, (0.0, 0.0), (120.0, 105.0));
    assert!(chart.zoom_to_selection());
    assert_eq!(chart.transform(), first);
    assert_eq!(chart.transform().scale_x, 2.0);
}

#[test]
fn test_crop_while_zoomed_uses_visible_bars() {
    let mut chart = Chart::new(compact_config()).unwrap();
    chart.toggle_select_mode();
    drag_local(&mut chart, (0.0, 0.0), (120.0, 105.0));
    chart.zoom_to_selection();

    // On screen x 0..120 now shows local x 0..60, i.e. only jan's band centre.
    chart.toggle_select_mode();
    drag_local(&mut chart, (0.0, 10.0), (120.0, 100.0));
    assert!(chart.crop_to_selection());
    assert_eq!(values(&chart), [("jan", 50.0)]);
}

#[test]
fn test_reset_data_restores_seed() {
    let mut chart = Chart::new(compact_config()).unwrap();
    chart.toggle_select_mode();
    drag_local(&mut chart, (40.0, 20.0), (160.0, 150.0));
    chart.crop_to_selection();
    assert_eq!(chart.data().len(), 3);
    assert_eq!(chart.inner_width(), 120.0);

    chart.reset_data();
    assert_eq!(chart.data(), chart.seed());
}

#[test]
fn test_randomize_keeps_categories() {
    let mut chart = Chart::new(ChartConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    chart.randomize(&mut rng);

    let seed = chart.seed().to_vec();
    for (point, original) in chart.data().iter().zip(&seed) {
        assert_eq!(point.category, original.category);
        assert_eq!(point.color, original.color);
        assert!((10.0..=100.0).contains(&point.value));
        assert_eq!(point.value.fract(), 0.0);
    }

    let mut again = Chart::new(ChartConfig::default()).unwrap();
    again.randomize(&mut StdRng::seed_from_u64(7));
    assert_eq!(again.data(), chart.data());
}

#[test]
fn test_pan_and_wheel_only_when_idle() {
    let mut chart = Chart::new(ChartConfig::default()).unwrap();
    chart.pointer_down(point(px(100.0), px(100.0)), origin());
    chart.pointer_move(point(px(110.0), px(95.0)), origin());
    chart.pointer_up();
    let t = chart.transform();
    assert_eq!((t.translate_x, t.translate_y), (10.0, -5.0));
    assert!(chart.selection().is_none());

    assert!(chart.zoom_at(point(px(120.0), px(130.0)), origin(), 2.0));
    assert_eq!(chart.transform().scale_x, 2.0);

    chart.toggle_select_mode();
    let before = chart.transform();
    assert!(!chart.zoom_at(point(px(120.0), px(130.0)), origin(), 2.0));
    assert_eq!(chart.transform(), before);
}

#[test]
fn test_horizontal_brush_crop() {
    let config = ChartConfig {
        brush: BrushKind::Horizontal,
        ..compact_config()
    };
    let mut chart = Chart::new(config).unwrap();
    chart.toggle_select_mode();
    // A flat drag still selects the full plot height.
    drag_local(&mut chart, (40.0, 50.0), (160.0, 50.0));
    let rect = chart.selection().unwrap();
    assert_eq!((rect.y1, rect.y2), (0.0, 210.0));

    assert!(chart.crop_to_selection());
    assert_eq!(chart.data().len(), 3);
}

#[test]
fn test_scene_follows_state() {
    let mut chart = Chart::new(compact_config()).unwrap();
    assert_eq!(chart.build_scene().bars().count(), 6);
    assert_eq!(chart.grid_ticks(), [0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

    chart.toggle_select_mode();
    drag_local(&mut chart, (40.0, 20.0), (160.0, 150.0));
    let scene = chart.build_scene();
    assert!(matches!(
        scene.overlay.as_slice(),
        [Primitive::Fill { .. }, Primitive::Outline { .. }]
    ));
    assert!(!scene
        .primitives
        .iter()
        .any(|p| matches!(p, Primitive::Fill { .. } | Primitive::Outline { .. })));

    chart.crop_to_selection();
    let scene = chart.mount_scene().clone();
    assert_eq!(scene.bars().count(), 3);
    assert_eq!(scene.width, 120.0 + 40.0);
    assert!(scene.overlay.is_empty());
}

#[test]
fn test_bars_carry_corner_radius() {
    let mut chart = Chart::new(compact_config()).unwrap();
    let radii = |chart: &Chart| -> Vec<f32> {
        chart
            .build_scene()
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Bar { corner_radius, .. } => Some(*corner_radius),
                _ => None,
            })
            .collect()
    };
    assert_eq!(radii(&chart), vec![8.0; 6]);

    // Rounding follows the zoom like the rest of the bar.
    chart.zoom_at(at(&chart, 0.0, 210.0), origin(), 2.0);
    let scene = chart.build_scene();
    for (bounds, radius) in scene.bars().zip(radii(&chart)) {
        assert!(radius <= 16.0);
        assert!(radius <= bounds.size.width / 2.0 && radius <= bounds.size.height / 2.0);
    }
    assert!(radii(&chart).contains(&16.0));
}

#[test]
fn test_controls_follow_selection() {
    let mut chart = Chart::new(compact_config()).unwrap();
    let idle = chart.controls();
    assert!(!idle.selecting);
    assert!(!idle.zoom_to_box && !idle.crop && !idle.export_selection);

    chart.toggle_select_mode();
    assert!(chart.controls().selecting);
    assert!(!chart.controls().export_selection);

    drag_local(&mut chart, (40.0, 20.0), (160.0, 150.0));
    let ready = chart.controls();
    assert!(ready.zoom_to_box && ready.crop && ready.export_selection);

    // Too small to act on.
    chart.toggle_select_mode();
    chart.toggle_select_mode();
    drag_local(&mut chart, (40.0, 20.0), (42.0, 150.0));
    assert!(!chart.controls().export_selection);

    // Cancel drops everything again.
    chart.toggle_select_mode();
    assert_eq!(chart.controls(), idle);
}

#[test]
fn test_invalid_datasets_are_rejected() {
    assert!(matches!(
        Chart::with_data(ChartConfig::default(), vec![]),
        Err(ChartError::EmptyDataset)
    ));
    let duplicate = vec![
        DataPoint::new("jan", "#f64c4c", 1.0),
        DataPoint::new("jan", "#ff8801", 2.0),
    ];
    assert!(matches!(
        Chart::with_data(ChartConfig::default(), duplicate),
        Err(ChartError::DuplicateCategory(c)) if c == "jan"
    ));
}
