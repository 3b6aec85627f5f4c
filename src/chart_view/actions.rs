use crate::chart::Chart;
use crate::export::{selection_file_name, ExportJob, FULL_EXPORT_FILE_NAME};
use chrono::Utc;
use gpui::*;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

actions!(
    gpui_chart_select,
    [
        ToggleSelect,
        ZoomToBox,
        CropSelection,
        ExportSelection,
        ExportChart,
        ResetZoom,
        ResetData,
        Randomize
    ]
);

/// Outcome of the most recent export, filled in by the background task.
pub type ExportSlot = Arc<Mutex<Option<Result<PathBuf, String>>>>;

#[derive(Clone)]
pub struct ChartActionHandler {
    pub chart: Entity<Chart>,
    pub last_export: ExportSlot,
}

impl ChartActionHandler {
    pub fn new(chart: Entity<Chart>) -> Self {
        Self {
            chart,
            last_export: Arc::new(Mutex::new(None)),
        }
    }

    pub fn toggle_select(&self, cx: &mut App) {
        self.chart.update(cx, |c, cx| {
            c.toggle_select_mode();
            cx.notify();
        });
    }

    pub fn zoom_to_box(&self, cx: &mut App) {
        self.chart.update(cx, |c, cx| {
            if c.zoom_to_selection() {
                cx.notify();
            }
        });
    }

    pub fn crop_selection(&self, cx: &mut App) {
        self.chart.update(cx, |c, cx| {
            c.crop_to_selection();
            cx.notify();
        });
    }

    pub fn export_selection(&self, cx: &mut App) {
        let job = self.chart.update(cx, |c, cx| {
            let job = c.export_selection();
            cx.notify();
            job.map(|job| (job, export_dir(c)))
        });
        match job {
            Ok((job, dir)) => {
                self.spawn_export(job, dir.join(selection_file_name(Utc::now())), cx)
            }
            Err(err) => warn!(%err, "selection export skipped"),
        }
    }

    pub fn export_chart(&self, cx: &mut App) {
        let chart = self.chart.read(cx);
        let job = chart.prepare_full_export().map(|job| (job, export_dir(chart)));
        match job {
            Ok((job, dir)) => self.spawn_export(job, dir.join(FULL_EXPORT_FILE_NAME), cx),
            Err(err) => warn!(%err, "chart export skipped"),
        }
    }

    pub fn reset_zoom(&self, cx: &mut App) {
        self.chart.update(cx, |c, cx| {
            c.reset_zoom();
            cx.notify();
        });
    }

    pub fn reset_data(&self, cx: &mut App) {
        self.chart.update(cx, |c, cx| {
            c.reset_data();
            cx.notify();
        });
    }

    pub fn randomize(&self, cx: &mut App) {
        self.chart.update(cx, |c, cx| {
            c.randomize(&mut rand::rng());
            cx.notify();
        });
    }

    // The job owns its scene and region, so the UI can keep going while it rasterizes.
    fn spawn_export(&self, job: ExportJob, path: PathBuf, cx: &mut App) {
        let slot = self.last_export.clone();
        cx.background_executor()
            .spawn(async move {
                let outcome = job.write_to(&path).map_err(|err| format!("{err:#}"));
                *slot.lock() = Some(outcome);
            })
            .detach();
    }

    pub fn handle_toggle_select(&self, _: &ToggleSelect, _win: &mut Window, cx: &mut App) {
        self.toggle_select(cx);
    }

    pub fn handle_zoom_to_box(&self, _: &ZoomToBox, _win: &mut Window, cx: &mut App) {
        self.zoom_to_box(cx);
    }

    pub fn handle_crop_selection(&self, _: &CropSelection, _win: &mut Window, cx: &mut App) {
        self.crop_selection(cx);
    }

    pub fn handle_export_selection(&self, _: &ExportSelection, _win: &mut Window, cx: &mut App) {
        self.export_selection(cx);
    }

    pub fn handle_export_chart(&self, _: &ExportChart, _win: &mut Window, cx: &mut App) {
        self.export_chart(cx);
    }

    pub fn handle_reset_zoom(&self, _: &ResetZoom, _win: &mut Window, cx: &mut App) {
        self.reset_zoom(cx);
    }

    pub fn handle_reset_data(&self, _: &ResetData, _win: &mut Window, cx: &mut App) {
        self.reset_data(cx);
    }

    pub fn handle_randomize(&self, _: &Randomize, _win: &mut Window, cx: &mut App) {
        self.randomize(cx);
    }
}

fn export_dir(chart: &Chart) -> PathBuf {
    chart
        .config()
        .export_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
}
