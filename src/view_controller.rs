use crate::data_types::{ChartConfig, ScaleBounds, SelectionRect, ViewTransform, ZoomPolicy};
use gpui::Point;
use tracing::{debug, info};

/// ViewController owns the view transform and is the only place it is mutated.
/// It has no GPUI dependencies beyond geometry types to facilitate testing.
#[derive(Clone, Debug)]
pub struct ViewController {
    transform: ViewTransform,
    bounds: ScaleBounds,
    policy: ZoomPolicy,
    min_selection_size: f32,
}

impl ViewController {
    pub fn new(bounds: ScaleBounds, policy: ZoomPolicy, min_selection_size: f32) -> Self {
        Self {
            transform: ViewTransform::IDENTITY,
            bounds,
            policy,
            min_selection_size,
        }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.scale_bounds, config.zoom_policy, config.min_selection_size)
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn policy(&self) -> ZoomPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ZoomPolicy) {
        self.policy = policy;
    }

    pub fn bounds(&self) -> ScaleBounds {
        self.bounds
    }

    pub fn reset(&mut self) {
        self.transform = ViewTransform::IDENTITY;
        info!("view transform reset");
    }

    /// Writes back a transform produced elsewhere (e.g. a gesture), clamping the scales.
    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.transform = ViewTransform {
            scale_x: self.bounds.clamp(transform.scale_x),
            scale_y: self.bounds.clamp(transform.scale_y),
            translate_x: finite_or(transform.translate_x, self.transform.translate_x),
            translate_y: finite_or(transform.translate_y, self.transform.translate_y),
        };
    }

    /// Frames `rect` in the viewport. Returns false (and leaves the transform
    /// alone) when the rectangle or the viewport is too small to act on.
    pub fn zoom_to_box(&mut self, rect: &SelectionRect, viewport_width: f32, viewport_height: f32) -> bool {
        if rect.is_degenerate(self.min_selection_size) {
            debug!(width = rect.width(), height = rect.height(), "zoom-to-box ignored: degenerate selection");
            return false;
        }
        if !(viewport_width > 0.0 && viewport_height > 0.0) {
            return false;
        }
        self.transform =
            Self::compute_box_transform(rect, viewport_width, viewport_height, self.bounds, self.policy);
        info!(
            scale_x = self.transform.scale_x,
            scale_y = self.transform.scale_y,
            translate_x = self.transform.translate_x,
            translate_y = self.transform.translate_y,
            "zoomed to box"
        );
        true
    }

    /// Transform that centres `rect` in the viewport at the fitting scale.
    /// The rectangle must not be degenerate.
    pub fn compute_box_transform(
        rect: &SelectionRect,
        viewport_width: f32,
        viewport_height: f32,
        bounds: ScaleBounds,
        policy: ZoomPolicy,
    ) -> ViewTransform {
        let fit_x = viewport_width / rect.width();
        let fit_y = viewport_height / rect.height();
        let (scale_x, scale_y) = match policy {
            ZoomPolicy::Uniform => {
                let s = bounds.clamp(fit_x.min(fit_y));
                (s, s)
            }
            ZoomPolicy::Independent => (bounds.clamp(fit_x), bounds.clamp(fit_y)),
        };
        let center = rect.center();
        ViewTransform {
            scale_x,
            scale_y,
            translate_x: viewport_width / 2.0 - center.x * scale_x,
            translate_y: viewport_height / 2.0 - center.y * scale_y,
        }
    }

    /// Translation only; the scale is untouched.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.transform.translate_x += dx;
        self.transform.translate_y += dy;
    }

    /// Scales about `pivot` (in local pixels), keeping the pivot fixed on screen.
    /// The resulting scale is clamped to the configured bounds on each axis.
    pub fn zoom_at(&mut self, pivot: Point<f32>, factor: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let t = self.transform;
        let new_sx = self.bounds.clamp(t.scale_x * factor);
        let new_sy = self.bounds.clamp(t.scale_y * factor);
        let rx = new_sx / t.scale_x;
        let ry = new_sy / t.scale_y;
        self.transform = ViewTransform {
            scale_x: new_sx,
            scale_y: new_sy,
            translate_x: pivot.x - (pivot.x - t.translate_x) * rx,
            translate_y: pivot.y - (pivot.y - t.translate_y) * ry,
        };
    }

    /// Calculates a zoom factor based on a pixel delta (wheel or drag).
    pub fn compute_zoom_factor(delta: f32, sensitivity: f32) -> f32 {
        let factor = 1.0 + delta.abs() / sensitivity;
        if delta > 0.0 {
            1.0 / factor
        } else {
            factor
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
