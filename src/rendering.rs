//! Backend-neutral display list for the bar chart.
//!
//! The gpui view paints a [`Scene`] every frame and the exporter rasterizes a
//! frozen copy of the same scene: grid, bars and labels. The selection overlay
//! lives in [`Scene::overlay`] and is only painted on screen, so exported
//! pixels are the chart's own.
//! All primitives are in surface pixels and already clipped to the plot area.

use crate::data_types::{DataPoint, SelectionRect};
use crate::theme::ChartTheme;
use crate::transform::{to_surface, PlotTransform};
use crate::utils::Rgba8;
use gpui::{point, size, Bounds, Point};

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Bar {
        bounds: Bounds<f32>,
        color: Rgba8,
        /// Already clamped to half the shorter side.
        corner_radius: f32,
    },
    Fill {
        bounds: Bounds<f32>,
        color: Rgba8,
    },
    Outline {
        bounds: Bounds<f32>,
        color: Rgba8,
        width: f32,
    },
    Line {
        from: Point<f32>,
        to: Point<f32>,
        color: Rgba8,
        width: f32,
    },
}

/// Text size shared by the live view and the exporter.
pub const LABEL_FONT_SIZE: f32 = 11.0;

/// A bar label anchored at its centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub anchor: Point<f32>,
    pub color: Rgba8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: Rgba8,
    pub primitives: Vec<Primitive>,
    pub labels: Vec<Label>,
    /// Selection feedback drawn over everything else, never exported.
    pub overlay: Vec<Primitive>,
}

impl Scene {
    pub fn new(width: f32, height: f32, background: Rgba8) -> Self {
        Self {
            width,
            height,
            background,
            primitives: Vec::new(),
            labels: Vec::new(),
            overlay: Vec::new(),
        }
    }

    pub fn bars(&self) -> impl Iterator<Item = &Bounds<f32>> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Bar { bounds, .. } => Some(bounds),
            _ => None,
        })
    }
}

pub struct SceneInput<'a> {
    pub data: &'a [DataPoint],
    pub transform: &'a PlotTransform,
    pub theme: &'a ChartTheme,
    pub grid_ticks: &'a [f64],
    /// Unzoomed corner radius; scales with the view like the bars do.
    pub bar_corner_radius: f32,
    pub surface_size: (f32, f32),
    /// Drawn unzoomed on top of the plot while in select mode.
    pub selection: Option<&'a SelectionRect>,
}

pub fn build_scene(input: &SceneInput<'_>) -> Scene {
    let t = input.transform;
    let mut scene = Scene::new(input.surface_size.0, input.surface_size.1, input.theme.background);

    paint_grid(&mut scene, t, input.grid_ticks, input.theme.grid_line);
    let radius = input.bar_corner_radius * t.view.scale_x.min(t.view.scale_y);

    for datum in input.data {
        let Some(local) = t.bar_bounds(datum) else {
            continue;
        };
        let Some(bounds) = t.project_clipped(local) else {
            continue;
        };
        let color = Rgba8::parse_hex(&datum.color).unwrap_or(input.theme.value_label);
        let corner_radius = radius
            .min(bounds.size.width / 2.0)
            .min(bounds.size.height / 2.0)
            .max(0.0);
        scene.primitives.push(Primitive::Bar {
            bounds,
            color,
            corner_radius,
        });

        let top_center = t.local_to_surface(point(
            local.origin.x + local.size.width / 2.0,
            local.origin.y,
        ));
        if contains(&t.plot_area(), top_center) {
            scene.labels.push(Label {
                text: format!("{}", datum.value.round()),
                anchor: point(top_center.x, top_center.y - 6.0),
                color: input.theme.value_label,
            });
        }
        let category_x = t.local_to_surface(point(local.origin.x + local.size.width / 2.0, 0.0)).x;
        let plot = t.plot_area();
        if category_x >= plot.origin.x && category_x <= plot.origin.x + plot.size.width {
            scene.labels.push(Label {
                text: datum.category.clone(),
                anchor: point(category_x, plot.origin.y + plot.size.height + 15.0),
                color: input.theme.axis_label,
            });
        }
    }

    if let Some(sel) = input.selection {
        let norm = sel.normalized();
        let origin = to_surface(point(norm.x1, norm.y1), &t.margins);
        let bounds = Bounds::new(origin, size(norm.width(), norm.height()));
        scene.overlay.push(Primitive::Fill {
            bounds,
            color: input.theme.selection_fill,
        });
        scene.overlay.push(Primitive::Outline {
            bounds,
            color: input.theme.selection_stroke,
            width: 1.0,
        });
    }

    scene
}

// Horizontal grid lines at each tick, following the zoom but always 1px wide on screen.
fn paint_grid(scene: &mut Scene, t: &PlotTransform, ticks: &[f64], color: Rgba8) {
    let plot = t.plot_area();
    for &tick in ticks {
        let y_local = t.y_scale.map(tick);
        let left = t.local_to_surface(point(0.0, y_local));
        let right = t.local_to_surface(point(t.plot_size.0, y_local));
        if left.y < plot.origin.y || left.y > plot.origin.y + plot.size.height {
            continue;
        }
        let x0 = left.x.max(plot.origin.x);
        let x1 = right.x.min(plot.origin.x + plot.size.width);
        if x1 <= x0 {
            continue;
        }
        scene.primitives.push(Primitive::Line {
            from: point(x0, left.y),
            to: point(x1, left.y),
            color,
            width: 1.0,
        });
    }
}

fn contains(bounds: &Bounds<f32>, p: Point<f32>) -> bool {
    p.x >= bounds.origin.x
        && p.x <= bounds.origin.x + bounds.size.width
        && p.y >= bounds.origin.y
        && p.y <= bounds.origin.y + bounds.size.height
}
