use super::actions::ChartActionHandler;
use crate::chart::{Chart, ControlState};
use crate::data_types::severity_legend;
use crate::rendering::{Label, Primitive, Scene, LABEL_FONT_SIZE};
use crate::theme::ChartTheme;
use crate::utils::Rgba8;
use gpui::prelude::*;
use gpui::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Paints the chart's scene and lays out the controls around it.
pub struct ChartRenderer {
    pub chart: Entity<Chart>,

    // Surface bounds shared with the input handler
    pub surface_bounds: Rc<RefCell<Bounds<Pixels>>>,
}

impl ChartRenderer {
    pub fn new(chart: Entity<Chart>, surface_bounds: Rc<RefCell<Bounds<Pixels>>>) -> Self {
        Self {
            chart,
            surface_bounds,
        }
    }

    pub fn render_control_button(
        id: &'static str,
        label: &'static str,
        enabled: bool,
        theme: &ChartTheme,
        on_click: impl Fn(&MouseDownEvent, &mut Window, &mut App) + 'static,
    ) -> impl IntoElement {
        let text = theme.value_label.to_hsla();
        let accent = theme.selection_stroke.to_hsla();
        div()
            .id(id)
            .px_2()
            .py_1()
            .rounded_md()
            .text_size(px(12.0))
            .bg(theme.button_background.to_hsla())
            .border_1()
            .border_color(theme.button_border.to_hsla())
            .when(enabled, |d| {
                d.text_color(text)
                    .hover(|s| s.border_color(accent))
                    .cursor_pointer()
                    .on_mouse_down(MouseButton::Left, on_click)
            })
            .when(!enabled, |d| d.text_color(text.opacity(0.35)))
            .child(label)
    }

    fn render_legend(theme: &ChartTheme) -> impl IntoElement {
        div()
            .flex()
            .gap_3()
            .text_size(px(11.0))
            .text_color(theme.axis_label.to_hsla())
            .children(severity_legend().into_iter().map(|entry| {
                let swatch = Rgba8::parse_hex(&entry.color).unwrap_or(theme.axis_label);
                div()
                    .flex()
                    .items_center()
                    .gap_1()
                    .child(div().size(px(10.0)).rounded_sm().bg(swatch.to_hsla()))
                    .child(entry.label)
            }))
    }

    fn render_label(label: &Label) -> impl IntoElement {
        const LABEL_WIDTH: f32 = 48.0;
        div()
            .absolute()
            .left(px(label.anchor.x - LABEL_WIDTH / 2.0))
            .top(px(label.anchor.y - 7.0))
            .w(px(LABEL_WIDTH))
            .flex()
            .justify_center()
            .text_size(px(LABEL_FONT_SIZE))
            .text_color(label.color.to_hsla())
            .child(label.text.clone())
    }

    fn render_controls(
        actions: &ChartActionHandler,
        theme: &ChartTheme,
        controls: ControlState,
    ) -> Div {
        let select_label = if controls.selecting {
            "Cancel"
        } else {
            "Select Area"
        };
        div()
            .flex()
            .flex_wrap()
            .gap_1()
            .child(Self::render_control_button("select", select_label, true, theme, {
                let actions = actions.clone();
                move |_, _, cx| {
                    cx.stop_propagation();
                    actions.toggle_select(cx);
                }
            }))
            .child(Self::render_control_button("zoom-to-box", "Zoom To Box", controls.zoom_to_box, theme, {
                let actions = actions.clone();
                move |_, _, cx| {
                    cx.stop_propagation();
                    actions.zoom_to_box(cx);
                }
            }))
            .child(Self::render_control_button("crop", "Crop", controls.crop, theme, {
                let actions = actions.clone();
                move |_, _, cx| {
                    cx.stop_propagation();
                    actions.crop_selection(cx);
                }
            }))
            .child(Self::render_control_button("export", "Export PNG", controls.export_selection, theme, {
                let actions = actions.clone();
                move |_, _, cx| {
                    cx.stop_propagation();
                    actions.export_selection(cx);
                }
            }))
            .child(Self::render_control_button("export-chart", "Export Chart", true, theme, {
                let actions = actions.clone();
                move |_, _, cx| {
                    cx.stop_propagation();
                    actions.export_chart(cx);
                }
            }))
            .child(Self::render_control_button("reset-zoom", "Reset Zoom", true, theme, {
                let actions = actions.clone();
                move |_, _, cx| {
                    cx.stop_propagation();
                    actions.reset_zoom(cx);
                }
            }))
            .child(Self::render_control_button("reset-data", "Reset Data", true, theme, {
                let actions = actions.clone();
                move |_, _, cx| {
                    cx.stop_propagation();
                    actions.reset_data(cx);
                }
            }))
            .child(Self::render_control_button("randomize", "Randomize", true, theme, {
                let actions = actions.clone();
                move |_, _, cx| {
                    cx.stop_propagation();
                    actions.randomize(cx);
                }
            }))
    }

    pub fn render<V: 'static>(
        &mut self,
        actions: &ChartActionHandler,
        _window: &mut Window,
        cx: &mut Context<V>,
    ) -> Div {
        let (scene, theme, controls) = self.chart.update(cx, |c, _| {
            let scene = c.mount_scene().clone();
            (scene, c.theme.clone(), c.controls())
        });

        let surface_rc = self.surface_bounds.clone();
        let labels: Vec<_> = scene.labels.iter().map(Self::render_label).collect();
        let (width, height) = (scene.width, scene.height);
        let scene = Rc::new(scene);

        // The border sits on a wrapper so the surface keeps the scene's exact size.
        let surface = div()
            .relative()
            .w(px(width))
            .h(px(height))
            .when(controls.selecting, |d| d.cursor(CursorStyle::Crosshair))
            .child(
                canvas(
                    move |bounds, _, _| {
                        *surface_rc.borrow_mut() = bounds;
                    },
                    move |bounds, (), window, _cx| {
                        window.with_content_mask(Some(ContentMask { bounds }), |window| {
                            paint_scene(window, bounds.origin, &scene);
                        });
                    },
                )
                .size_full()
                .absolute(),
            )
            .children(labels);

        div()
            .flex()
            .flex_col()
            .items_start()
            .gap_2()
            .p_2()
            .bg(theme.background.to_hsla())
            .child(Self::render_controls(actions, &theme, controls))
            .child(
                div()
                    .flex_none()
                    .border_1()
                    .border_color(theme.border.to_hsla())
                    .child(surface),
            )
            .child(Self::render_legend(&theme))
    }
}

/// Paints every primitive and then the overlay, offset by the surface origin.
/// Labels are laid out as text elements on top.
pub fn paint_scene(window: &mut Window, origin: Point<Pixels>, scene: &Scene) {
    let to_bounds = |b: &Bounds<f32>| {
        Bounds::new(
            point(origin.x + px(b.origin.x), origin.y + px(b.origin.y)),
            size(px(b.size.width), px(b.size.height)),
        )
    };

    window.paint_quad(fill(
        Bounds::new(origin, size(px(scene.width), px(scene.height))),
        scene.background.to_hsla(),
    ));

    for primitive in scene.primitives.iter().chain(&scene.overlay) {
        match primitive {
            Primitive::Bar {
                bounds,
                color,
                corner_radius,
            } => {
                window.paint_quad(
                    fill(to_bounds(bounds), color.to_hsla()).corner_radii(px(*corner_radius)),
                );
            }
            Primitive::Fill { bounds, color } => {
                window.paint_quad(fill(to_bounds(bounds), color.to_hsla()));
            }
            Primitive::Outline { bounds, color, .. } => {
                window.paint_quad(gpui::outline(
                    to_bounds(bounds),
                    color.to_hsla(),
                    BorderStyle::Solid,
                ));
            }
            Primitive::Line {
                from,
                to,
                color,
                width,
            } => {
                let mut builder = PathBuilder::stroke(px(*width));
                builder.move_to(point(origin.x + px(from.x), origin.y + px(from.y)));
                builder.line_to(point(origin.x + px(to.x), origin.y + px(to.y)));
                if let Ok(path) = builder.build() {
                    window.paint_path(path, color.to_hsla());
                }
            }
        }
    }
}
