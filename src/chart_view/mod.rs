pub mod actions;
pub mod input;
pub mod renderer;

use crate::chart::Chart;
use gpui::prelude::*;
use gpui::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

pub use actions::{
    CropSelection, ExportChart, ExportSelection, Randomize, ResetData, ResetZoom, ToggleSelect,
    ZoomToBox,
};

use self::actions::ChartActionHandler;
use self::input::ChartInputHandler;
use self::renderer::ChartRenderer;

/// Interactive bar chart widget: select an area, then zoom to it, crop the
/// data to it or export it as a PNG.
pub struct BarChartView {
    pub chart: Entity<Chart>,

    // Components (Delegates)
    renderer: ChartRenderer,
    input: ChartInputHandler,
    actions: ChartActionHandler,

    focus_handle: FocusHandle,
}

impl Focusable for BarChartView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl BarChartView {
    pub fn new(chart: Entity<Chart>, cx: &mut Context<Self>) -> Self {
        cx.observe(&chart, |_, _, cx| cx.notify()).detach();

        let focus_handle = cx.focus_handle();
        let surface_bounds = Rc::new(RefCell::new(Bounds::default()));

        let renderer = ChartRenderer::new(chart.clone(), surface_bounds.clone());
        let input = ChartInputHandler::new(chart.clone(), focus_handle.clone(), surface_bounds);
        let actions = ChartActionHandler::new(chart.clone());

        Self {
            chart,
            renderer,
            input,
            actions,
            focus_handle,
        }
    }

    /// Window-space bounds of the chart surface as of the last prepaint.
    pub fn surface_bounds(&self) -> Bounds<Pixels> {
        *self.renderer.surface_bounds.borrow()
    }

    pub fn toggle_select(&self, cx: &mut App) {
        self.actions.toggle_select(cx);
    }

    /// Path or error message of the last finished export, if any.
    pub fn last_export(&self) -> Option<Result<PathBuf, String>> {
        self.actions.last_export.lock().clone()
    }
}

impl Render for BarChartView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let actions = self.actions.clone();
        let element = self.renderer.render(&actions, window, cx);

        let input = self.input.clone();
        let entity_id = cx.entity_id();

        element
            .id(("bar-chart-view", entity_id))
            .track_focus(&self.focus_handle)
            .on_mouse_down(MouseButton::Left, {
                let input = input.clone();
                move |e, w, c| input.handle_mouse_down(e, w, c)
            })
            .on_mouse_move({
                let input = input.clone();
                move |e, w, c| input.handle_mouse_move(e, w, c)
            })
            .on_mouse_up(MouseButton::Left, {
                let input = input.clone();
                move |e, w, c| input.handle_mouse_up(e, w, c)
            })
            .on_scroll_wheel({
                let input = input.clone();
                move |e, w, c| input.handle_scroll_wheel(e, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_toggle_select(a, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_zoom_to_box(a, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_crop_selection(a, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_export_selection(a, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_export_chart(a, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_reset_zoom(a, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_reset_data(a, w, c)
            })
            .on_action({
                let actions = actions.clone();
                move |a, w, c| actions.handle_randomize(a, w, c)
            })
    }
}
