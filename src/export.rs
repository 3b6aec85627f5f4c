//! PNG snapshots of the rendered chart.
//!
//! Exporting happens in two steps. [`SnapshotExporter::prepare`] runs on the UI
//! thread: it validates the selection and freezes an owned copy of the scene
//! and region into an [`ExportJob`]. The job is `Send + 'static` and is
//! rasterized later (typically on a background executor), so nothing the user
//! does after invoking the export can change what ends up in the image.

use crate::data_types::{ChartConfig, Margins, SelectionRect};
use crate::error::{ChartError, ExportError};
use crate::glyphs::draw_label;
use crate::rendering::{Primitive, Scene};
use crate::utils::Rgba8;
use chrono::{DateTime, Utc};
use eyre::WrapErr;
use std::path::{Path, PathBuf};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::{info, warn};

pub const FULL_EXPORT_FILE_NAME: &str = "chart-crop.png";

/// `chart-selection-<unix millis>.png`
pub fn selection_file_name(now: DateTime<Utc>) -> String {
    format!("chart-selection-{}.png", now.timestamp_millis())
}

/// Region of the surface to export, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ExportRegion {
    /// Margin-adjusted region covered by a chart-local selection.
    pub fn from_selection(rect: &SelectionRect, margins: &Margins) -> Self {
        Self {
            x: rect.min_x() + margins.left,
            y: rect.min_y() + margins.top,
            width: rect.width(),
            height: rect.height(),
        }
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.round().max(0.0) as u32,
            self.height.round().max(0.0) as u32,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl Snapshot {
    pub fn save(&self, path: impl AsRef<Path>) -> eyre::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(path, &self.png)
            .wrap_err_with(|| format!("failed to write snapshot to {}", path.display()))
    }
}

#[derive(Clone, Debug)]
pub struct SnapshotExporter {
    margins: Margins,
    min_selection_size: f32,
    background: Rgba8,
}

impl SnapshotExporter {
    pub fn new(config: &ChartConfig) -> Result<Self, ChartError> {
        Ok(Self {
            margins: config.margins,
            min_selection_size: config.min_selection_size,
            background: Rgba8::parse_hex(&config.export_background)?,
        })
    }

    /// Freezes the scene and the selection's region into a job.
    pub fn prepare(&self, scene: Option<&Scene>, selection: &SelectionRect) -> Result<ExportJob, ExportError> {
        if selection.is_degenerate(self.min_selection_size) {
            return Err(ExportError::DegenerateSelection {
                width: selection.width(),
                height: selection.height(),
            });
        }
        let scene = scene.ok_or(ExportError::SceneUnavailable)?;
        Ok(ExportJob {
            scene: scene.clone(),
            region: ExportRegion::from_selection(selection, &self.margins),
            background: self.background,
        })
    }

    /// Job covering the whole surface.
    pub fn prepare_full(&self, scene: Option<&Scene>) -> Result<ExportJob, ExportError> {
        let scene = scene.ok_or(ExportError::SceneUnavailable)?;
        Ok(ExportJob {
            region: ExportRegion {
                x: 0.0,
                y: 0.0,
                width: scene.width,
                height: scene.height,
            },
            scene: scene.clone(),
            background: self.background,
        })
    }

    /// Prepare and rasterize in one go, on the calling thread.
    pub fn export(&self, scene: Option<&Scene>, selection: &SelectionRect) -> Result<Snapshot, ExportError> {
        self.prepare(scene, selection)?.rasterize()
    }
}

#[derive(Clone, Debug)]
pub struct ExportJob {
    scene: Scene,
    region: ExportRegion,
    background: Rgba8,
}

impl ExportJob {
    pub fn region(&self) -> ExportRegion {
        self.region
    }

    pub fn rasterize(self) -> Result<Snapshot, ExportError> {
        let (width, height) = self.region.pixel_size();
        let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::Surface { width, height })?;
        pixmap.fill(skia_color(self.background));

        // Shift the scene so the region's top-left lands on the image origin.
        // The selection overlay is left out.
        let shift = Transform::from_translate(-self.region.x, -self.region.y);
        for primitive in &self.scene.primitives {
            draw_primitive(&mut pixmap, primitive, shift);
        }
        for label in &self.scene.labels {
            draw_label(&mut pixmap, label, shift);
        }

        let png = pixmap
            .encode_png()
            .map_err(|e| ExportError::Encode(e.to_string()))?;
        Ok(Snapshot { width, height, png })
    }

    /// Rasterizes and writes the PNG to `path`, logging the outcome.
    pub fn write_to(self, path: &Path) -> eyre::Result<PathBuf> {
        let region = self.region;
        let snapshot = match self.rasterize() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, "snapshot export failed");
                return Err(err).wrap_err("snapshot export failed");
            }
        };
        snapshot.save(path)?;
        info!(
            path = %path.display(),
            x = region.x,
            y = region.y,
            width = snapshot.width,
            height = snapshot.height,
            "snapshot exported"
        );
        Ok(path.to_path_buf())
    }
}

fn skia_color(c: Rgba8) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn paint_for(c: Rgba8) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(c.r, c.g, c.b, c.a);
    paint.anti_alias = true;
    paint
}

/// Rectangle with circular corners, approximated by cubics.
fn rounded_rect(rect: Rect, radius: f32) -> Option<tiny_skia::Path> {
    const KAPPA: f32 = 0.552_284_8;
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    if r <= 0.0 {
        return Some(PathBuilder::from_rect(rect));
    }
    let (l, t, rt, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let k = r * KAPPA;
    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.cubic_to(rt - r + k, t, rt, t + r - k, rt, t + r);
    pb.line_to(rt, b - r);
    pb.cubic_to(rt, b - r + k, rt - r + k, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.cubic_to(l + r - k, b, l, b - r + k, l, b - r);
    pb.line_to(l, t + r);
    pb.cubic_to(l, t + r - k, l + r - k, t, l + r, t);
    pb.close();
    pb.finish()
}

fn draw_primitive(pixmap: &mut Pixmap, primitive: &Primitive, shift: Transform) {
    match primitive {
        Primitive::Bar {
            bounds,
            color,
            corner_radius,
        } => {
            let path = Rect::from_xywh(bounds.origin.x, bounds.origin.y, bounds.size.width, bounds.size.height)
                .and_then(|rect| rounded_rect(rect, *corner_radius));
            if let Some(path) = path {
                pixmap.fill_path(&path, &paint_for(*color), FillRule::Winding, shift, None);
            }
        }
        Primitive::Fill { bounds, color } => {
            if let Some(rect) =
                Rect::from_xywh(bounds.origin.x, bounds.origin.y, bounds.size.width, bounds.size.height)
            {
                pixmap.fill_rect(rect, &paint_for(*color), shift, None);
            }
        }
        Primitive::Outline { bounds, color, width } => {
            if let Some(rect) =
                Rect::from_xywh(bounds.origin.x, bounds.origin.y, bounds.size.width, bounds.size.height)
            {
                let path = PathBuilder::from_rect(rect);
                let stroke = Stroke {
                    width: *width,
                    ..Stroke::default()
                };
                pixmap.stroke_path(&path, &paint_for(*color), &stroke, shift, None);
            }
        }
        Primitive::Line { from, to, color, width } => {
            let mut builder = PathBuilder::new();
            builder.move_to(from.x, from.y);
            builder.line_to(to.x, to.y);
            if let Some(path) = builder.finish() {
                let stroke = Stroke {
                    width: *width,
                    ..Stroke::default()
                };
                pixmap.stroke_path(&path, &paint_for(*color), &stroke, shift, None);
            }
        }
    }
}
