use gpui::{point, px, Bounds};
use gpui_chart_select::data_types::{DataPoint, Margins, ViewTransform};
use gpui_chart_select::scales::{BandScale, ValueScale};
use gpui_chart_select::transform::{clip_rect, to_local, to_surface, PlotTransform};

const CATEGORIES: [&str; 6] = ["jan", "feb", "mar", "apr", "may", "jun"];

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_to_local_subtracts_origin_and_margins() {
    let margins = Margins::default();
    let local = to_local(point(px(120.0), px(80.0)), point(px(10.0), px(5.0)), &margins);
    assert_eq!(local.x, 90.0);
    assert_eq!(local.y, 45.0);

    let surface = to_surface(local, &margins);
    assert_eq!(surface.x, 110.0);
    assert_eq!(surface.y, 75.0);
}

#[test]
fn test_to_local_can_leave_the_plot() {
    // Pointer inside the left margin maps to a negative local x.
    let local = to_local(point(px(5.0), px(10.0)), point(px(0.0), px(0.0)), &Margins::default());
    assert_eq!(local.x, -15.0);
    assert_eq!(local.y, -20.0);
}

#[test]
fn test_band_scale_layout() {
    // 24px bars with 16px gaps over six categories.
    let scale = BandScale::new(CATEGORIES, (0.0, 240.0), 0.4);
    assert!(approx(scale.step(), 37.5));
    assert!(approx(scale.bandwidth(), 22.5));
    assert!(approx(scale.position("jan").unwrap(), 15.0));

    let centers: Vec<f32> = CATEGORIES.iter().map(|c| scale.center(c).unwrap()).collect();
    let expected = [26.25, 63.75, 101.25, 138.75, 176.25, 213.75];
    for (got, want) in centers.iter().zip(expected) {
        assert!(approx(*got, want), "center {} != {}", got, want);
    }
    assert_eq!(scale.center("jul"), None);
}

#[test]
fn test_band_scale_reversed_range() {
    let forward = BandScale::new(CATEGORIES, (0.0, 240.0), 0.4);
    let reversed = BandScale::new(CATEGORIES, (240.0, 0.0), 0.4);
    assert!(approx(
        reversed.position("jan").unwrap(),
        forward.position("jun").unwrap()
    ));
}

#[test]
fn test_value_scale_linear() {
    let scale = ValueScale::new((0.0, 110.0), (210.0, 0.0));
    assert!(approx(scale.map(0.0), 210.0));
    assert!(approx(scale.map(55.0), 105.0));
    assert!(approx(scale.map(110.0), 0.0));
    assert!((scale.invert(105.0) - 55.0).abs() < 1e-6);
}

#[test]
fn test_plot_transform_bar_bounds() {
    let transform = PlotTransform::new(
        BandScale::new(CATEGORIES, (0.0, 240.0), 0.4),
        ValueScale::new((0.0, 110.0), (220.0, 0.0)),
        ViewTransform::IDENTITY,
        Margins::default(),
        (240.0, 220.0),
    );
    let bar = transform
        .bar_bounds(&DataPoint::new("feb", "#ff8801", 55.0))
        .unwrap();
    assert!(approx(bar.origin.x, 52.5));
    assert!(approx(bar.origin.y, 110.0));
    assert!(approx(bar.size.width, 22.5));
    assert!(approx(bar.size.height, 110.0));

    assert!(transform.bar_bounds(&DataPoint::new("dec", "#ff8801", 10.0)).is_none());
}

#[test]
fn test_plot_transform_view_roundtrip() {
    let view = ViewTransform {
        scale_x: 2.0,
        scale_y: 2.0,
        translate_x: -30.0,
        translate_y: 10.0,
    };
    let transform = PlotTransform::new(
        BandScale::new(CATEGORIES, (0.0, 240.0), 0.4),
        ValueScale::new((0.0, 110.0), (210.0, 0.0)),
        view,
        Margins::default(),
        (240.0, 210.0),
    );
    let surface = transform.local_to_surface(point(50.0, 40.0));
    assert!(approx(surface.x, 50.0 * 2.0 - 30.0 + 20.0));
    assert!(approx(surface.y, 40.0 * 2.0 + 10.0 + 30.0));

    let back = transform.surface_to_local(surface);
    assert!(approx(back.x, 50.0));
    assert!(approx(back.y, 40.0));
}

#[test]
fn test_project_clipped_to_plot_area() {
    let transform = PlotTransform::new(
        BandScale::new(CATEGORIES, (0.0, 240.0), 0.4),
        ValueScale::new((0.0, 110.0), (210.0, 0.0)),
        ViewTransform {
            scale_x: 4.0,
            scale_y: 4.0,
            translate_x: 0.0,
            translate_y: 0.0,
        },
        Margins::default(),
        (240.0, 210.0),
    );
    // Far right bar is pushed out of the plot by the zoom.
    let outside = Bounds::new(point(200.0, 100.0), gpui::size(20.0, 50.0));
    assert!(transform.project_clipped(outside).is_none());

    let partial = Bounds::new(point(50.0, 40.0), gpui::size(20.0, 20.0));
    let clipped = transform.project_clipped(partial).unwrap();
    let plot = transform.plot_area();
    assert!(clipped.origin.x >= plot.origin.x);
    assert!(clipped.origin.x + clipped.size.width <= plot.origin.x + plot.size.width + 1e-3);
    assert!(clipped.origin.y + clipped.size.height <= plot.origin.y + plot.size.height + 1e-3);
}

#[test]
fn test_clip_rect_orders_corners() {
    let clip = Bounds::new(point(0.0, 0.0), gpui::size(100.0, 100.0));
    let r = clip_rect(point(80.0, 90.0), point(20.0, 10.0), &clip).unwrap();
    assert_eq!(r.origin, point(20.0, 10.0));
    assert_eq!(r.size, gpui::size(60.0, 80.0));
    assert!(clip_rect(point(120.0, 0.0), point(150.0, 50.0), &clip).is_none());
}
