//! Chart Model
//!
//! `Chart` is the single source of truth for one interactive bar chart: the
//! working dataset, the view transform, the selection and the interaction mode.
//! Every state change goes through one of its methods; the view only reads the
//! resulting values and re-renders. It is a plain struct so it can be driven
//! directly in tests, and it is held as a GPUI entity by `BarChartView`.

use crate::crop::{crop_window, CropOutcome};
use crate::data_types::{
    seed_data, ChartConfig, DataPoint, Dataset, InteractionMode, SelectionRect, ViewTransform,
};
use crate::error::{ChartError, ExportError};
use crate::export::{ExportJob, SnapshotExporter};
use crate::rendering::{build_scene, Scene, SceneInput};
use crate::scales::{BandScale, ValueScale};
use crate::selection::SelectionTracker;
use crate::theme::ChartTheme;
use crate::transform::{to_local, PlotTransform};
use crate::view_controller::ViewController;
use gpui::{point, Pixels, Point};
use rand::Rng;
use tracing::{info, warn};

/// Enabled state of the selection-driven controls. Full-chart export,
/// reset and randomize are always available.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlState {
    pub selecting: bool,
    pub zoom_to_box: bool,
    pub crop: bool,
    pub export_selection: bool,
}

pub struct Chart {
    config: ChartConfig,
    pub theme: ChartTheme,
    dataset: Dataset,
    selection: SelectionTracker,
    view: ViewController,
    exporter: SnapshotExporter,
    /// Last scene handed to the painter; `None` while nothing is mounted.
    mounted_scene: Option<Scene>,
    /// Pointer position of an in-progress pan drag.
    pan_anchor: Option<Point<Pixels>>,
}

impl Chart {
    pub fn new(config: ChartConfig) -> Result<Self, ChartError> {
        Self::with_data(config, seed_data())
    }

    pub fn with_data(config: ChartConfig, seed: Vec<DataPoint>) -> Result<Self, ChartError> {
        config.validate()?;
        let dataset = Dataset::new(seed)?;
        Ok(Self {
            selection: SelectionTracker::new(config.brush, config.inner_height()),
            view: ViewController::from_config(&config),
            exporter: SnapshotExporter::new(&config)?,
            theme: ChartTheme::default(),
            dataset,
            config,
            mounted_scene: None,
            pan_anchor: None,
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn data(&self) -> &[DataPoint] {
        self.dataset.points()
    }

    pub fn seed(&self) -> &[DataPoint] {
        self.dataset.seed()
    }

    pub fn mode(&self) -> InteractionMode {
        self.selection.mode()
    }

    pub fn selection(&self) -> Option<&SelectionRect> {
        self.selection.selection()
    }

    pub fn is_dragging(&self) -> bool {
        self.selection.is_dragging()
    }

    pub fn transform(&self) -> ViewTransform {
        self.view.transform()
    }

    pub fn view_controller(&self) -> &ViewController {
        &self.view
    }

    pub fn inner_width(&self) -> f32 {
        self.config.inner_width(self.dataset.len())
    }

    pub fn inner_height(&self) -> f32 {
        self.config.inner_height()
    }

    pub fn chart_width(&self) -> f32 {
        self.config.chart_width(self.dataset.len())
    }

    pub fn x_scale(&self) -> BandScale {
        BandScale::new(
            self.dataset.categories(),
            (0.0, self.inner_width()),
            self.config.band_padding(),
        )
    }

    pub fn y_scale(&self) -> ValueScale {
        ValueScale::new(self.config.y_domain, (self.inner_height(), 0.0))
    }

    pub fn plot_transform(&self) -> PlotTransform {
        PlotTransform::new(
            self.x_scale(),
            self.y_scale(),
            self.view.transform(),
            self.config.margins,
            (self.inner_width(), self.inner_height()),
        )
    }

    pub fn grid_ticks(&self) -> Vec<f64> {
        match &self.config.grid_ticks {
            Some(ticks) => ticks.clone(),
            None => self.y_scale().ticks(self.config.tick_count),
        }
    }

    // --- Selection ---

    pub fn toggle_select_mode(&mut self) -> InteractionMode {
        self.pan_anchor = None;
        self.selection.toggle_mode()
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.pan_anchor = None;
        self.selection.set_mode(mode);
    }

    /// Pointer pressed at a window position; `surface_origin` is where the chart surface starts.
    /// In select mode this starts a selection, otherwise a pan drag.
    pub fn pointer_down(&mut self, position: Point<Pixels>, surface_origin: Point<Pixels>) -> bool {
        let local = to_local(position, surface_origin, &self.config.margins);
        match self.mode() {
            InteractionMode::Selecting => self.selection.pointer_down(local),
            InteractionMode::Idle => {
                self.pan_anchor = Some(position);
                true
            }
        }
    }

    pub fn pointer_move(&mut self, position: Point<Pixels>, surface_origin: Point<Pixels>) -> bool {
        if let Some(anchor) = self.pan_anchor {
            let delta = position - anchor;
            self.view.pan_by(f32::from(delta.x), f32::from(delta.y));
            self.pan_anchor = Some(position);
            return true;
        }
        let local = to_local(position, surface_origin, &self.config.margins);
        self.selection.pointer_move(local)
    }

    pub fn pointer_up(&mut self) -> bool {
        let panned = self.pan_anchor.take().is_some();
        self.selection.pointer_up() || panned
    }

    /// A finished selection that is large enough to act on.
    pub fn valid_selection(&self) -> Option<SelectionRect> {
        if self.selection.is_dragging() {
            return None;
        }
        self.selection.valid_selection(self.config.min_selection_size)
    }

    pub fn has_valid_selection(&self) -> bool {
        self.valid_selection().is_some()
    }

    /// Which toolbar controls accept input right now.
    pub fn controls(&self) -> ControlState {
        let actionable = self.has_valid_selection();
        ControlState {
            selecting: self.mode() == InteractionMode::Selecting,
            zoom_to_box: actionable,
            crop: actionable,
            export_selection: actionable,
        }
    }

    // --- Consumers ---

    /// Zooms the view onto the selection, then leaves select mode.
    /// Without a valid selection nothing changes.
    ///
    /// The rectangle is used as drawn, in screen space, so a second zoom
    /// replaces the first instead of composing with it.
    /// [`Chart::crop_to_selection`] maps it through the inverse view instead.
    pub fn zoom_to_selection(&mut self) -> bool {
        let Some(rect) = self.valid_selection() else {
            warn!("zoom-to-box requested without a valid selection");
            return false;
        };
        let zoomed = self.view.zoom_to_box(&rect, self.inner_width(), self.inner_height());
        if zoomed {
            self.selection.set_mode(InteractionMode::Idle);
        }
        zoomed
    }

    /// Narrows the dataset to the bars under the selection, then leaves select mode.
    /// Without a valid selection nothing changes; an empty result keeps the data.
    /// Unlike zoom-to-box, the rectangle is mapped through the inverse view first.
    pub fn crop_to_selection(&mut self) -> bool {
        let Some(rect) = self.valid_selection() else {
            warn!("crop requested without a valid selection");
            return false;
        };
        // The overlay is drawn unzoomed; map it into the bars' space first.
        let view = self.view.transform();
        let a = view.invert(point(rect.x1, rect.y1));
        let b = view.invert(point(rect.x2, rect.y2));
        let window = SelectionRect::new(a.x, a.y, b.x, b.y);

        let cropped = match crop_window(self.data(), &window, &self.x_scale(), 0.0) {
            CropOutcome::Cropped(kept) => {
                let kept_len = kept.len();
                match self.dataset.replace(kept) {
                    Ok(()) => {
                        info!(kept = kept_len, "dataset cropped to selection");
                        true
                    }
                    Err(err) => {
                        warn!(%err, "crop result rejected");
                        false
                    }
                }
            }
            CropOutcome::Empty => {
                warn!("crop selection contains no bars; dataset kept");
                false
            }
            CropOutcome::Degenerate => false,
        };
        self.selection.set_mode(InteractionMode::Idle);
        cropped
    }

    /// Freezes the mounted scene and the selection for a background export.
    /// The selection stays in place.
    pub fn prepare_export(&self) -> Result<ExportJob, ExportError> {
        let rect = match self.selection.selection() {
            Some(rect) if !self.selection.is_dragging() => *rect,
            Some(rect) => {
                return Err(ExportError::DegenerateSelection {
                    width: rect.width(),
                    height: rect.height(),
                })
            }
            None => {
                return Err(ExportError::DegenerateSelection {
                    width: 0.0,
                    height: 0.0,
                })
            }
        };
        self.exporter.prepare(self.mounted_scene.as_ref(), &rect)
    }

    /// Prepares the export and, once the job is frozen, consumes the selection.
    /// On failure the selection and mode stay as they were.
    pub fn export_selection(&mut self) -> Result<ExportJob, ExportError> {
        let job = self.prepare_export()?;
        self.selection.set_mode(InteractionMode::Idle);
        Ok(job)
    }

    pub fn prepare_full_export(&self) -> Result<ExportJob, ExportError> {
        self.exporter.prepare_full(self.mounted_scene.as_ref())
    }

    // --- View ---

    pub fn reset_zoom(&mut self) {
        self.view.reset();
    }

    /// Wheel zoom about a window position; ignored while selecting.
    pub fn zoom_at(&mut self, position: Point<Pixels>, surface_origin: Point<Pixels>, factor: f32) -> bool {
        if self.mode() == InteractionMode::Selecting {
            return false;
        }
        let pivot = to_local(position, surface_origin, &self.config.margins);
        self.view.zoom_at(pivot, factor);
        true
    }

    // --- Data ---

    pub fn reset_data(&mut self) {
        self.dataset.reset();
        info!(points = self.dataset.len(), "dataset reset to seed");
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let next = self
            .dataset
            .randomized(rng, self.config.random_min, self.config.random_max);
        if let Err(err) = self.dataset.replace(next) {
            warn!(%err, "randomized dataset rejected");
            return;
        }
        info!("dataset values randomized");
    }

    // --- Scene ---

    pub fn build_scene(&self) -> Scene {
        let transform = self.plot_transform();
        let ticks = self.grid_ticks();
        let overlay = match self.mode() {
            InteractionMode::Selecting => self.selection.selection(),
            InteractionMode::Idle => None,
        };
        build_scene(&SceneInput {
            data: self.data(),
            transform: &transform,
            theme: &self.theme,
            grid_ticks: &ticks,
            bar_corner_radius: self.config.bar_corner_radius,
            surface_size: (self.chart_width(), self.config.height),
            selection: overlay,
        })
    }

    /// Rebuilds the scene and records it as the one currently on screen.
    pub fn mount_scene(&mut self) -> &Scene {
        self.selection.set_extent_height(self.inner_height());
        let scene = self.build_scene();
        self.mounted_scene.insert(scene)
    }

    pub fn unmount_scene(&mut self) {
        self.mounted_scene = None;
    }

    pub fn mounted_scene(&self) -> Option<&Scene> {
        self.mounted_scene.as_ref()
    }
}
