use crate::chart::Chart;
use crate::utils::PixelsExt;
use crate::view_controller::ViewController;
use gpui::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Wheel delta (in pixels) that doubles or halves the zoom.
const WHEEL_SENSITIVITY: f32 = 200.0;

#[derive(Clone)]
pub struct ChartInputHandler {
    pub chart: Entity<Chart>,
    pub focus_handle: FocusHandle,

    // Shared with the renderer, refreshed on every prepaint
    pub surface_bounds: Rc<RefCell<Bounds<Pixels>>>,
}

impl ChartInputHandler {
    pub fn new(
        chart: Entity<Chart>,
        focus_handle: FocusHandle,
        surface_bounds: Rc<RefCell<Bounds<Pixels>>>,
    ) -> Self {
        Self {
            chart,
            focus_handle,
            surface_bounds,
        }
    }

    pub fn handle_mouse_down(&self, event: &MouseDownEvent, window: &mut Window, cx: &mut App) {
        window.focus(&self.focus_handle);
        let surface = self.surface_bounds.borrow().clone();
        if !surface.contains(&event.position) {
            return;
        }
        self.chart.update(cx, |c, cx| {
            if c.pointer_down(event.position, surface.origin) {
                cx.notify();
            }
        });
    }

    pub fn handle_mouse_move(&self, event: &MouseMoveEvent, _win: &mut Window, cx: &mut App) {
        let surface = self.surface_bounds.borrow().clone();
        self.chart.update(cx, |c, cx| {
            // Button released outside the view: finish the gesture instead of dragging on.
            if event.pressed_button != Some(MouseButton::Left) {
                if c.pointer_up() {
                    cx.notify();
                }
                return;
            }
            if c.pointer_move(event.position, surface.origin) {
                cx.notify();
            }
        });
    }

    pub fn handle_mouse_up(&self, _event: &MouseUpEvent, _win: &mut Window, cx: &mut App) {
        self.chart.update(cx, |c, cx| {
            if c.pointer_up() {
                cx.notify();
            }
        });
    }

    pub fn handle_scroll_wheel(&self, event: &ScrollWheelEvent, _win: &mut Window, cx: &mut App) {
        let surface = self.surface_bounds.borrow().clone();
        if !surface.contains(&event.position) {
            return;
        }
        let delta_y = match event.delta {
            ScrollDelta::Pixels(p) => p.y.as_f32(),
            ScrollDelta::Lines(p) => p.y * 20.0,
        };
        if delta_y == 0.0 {
            return;
        }
        let factor = ViewController::compute_zoom_factor(-delta_y, WHEEL_SENSITIVITY);
        self.chart.update(cx, |c, cx| {
            if c.zoom_at(event.position, surface.origin, factor) {
                cx.notify();
            }
        });
    }
}
