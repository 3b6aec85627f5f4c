//! Coordinate projection between the pointer surface, chart-local space and the zoomed plot.
//!
//! Three spaces are involved:
//! - *surface*: pixels relative to the top-left of the chart surface (margins included),
//! - *local*: surface minus the chart margins; selections and scales live here,
//! - *view*: local after the [`ViewTransform`] (what is actually drawn inside the plot area).

use crate::data_types::{DataPoint, Margins, ViewTransform};
use crate::scales::{BandScale, ValueScale};
use crate::utils::PixelsExt;
use gpui::{point, size, Bounds, Pixels, Point};

/// Converts a window-space pointer position into chart-local coordinates.
///
/// Every pointer phase (down, move, up) goes through here so that both corners
/// of a selection are expressed in the same space.
pub fn to_local(position: Point<Pixels>, surface_origin: Point<Pixels>, margins: &Margins) -> Point<f32> {
    Point::new(
        (position.x - surface_origin.x).as_f32() - margins.left,
        (position.y - surface_origin.y).as_f32() - margins.top,
    )
}

/// Chart-local back to surface pixels.
pub fn to_surface(local: Point<f32>, margins: &Margins) -> Point<f32> {
    Point::new(local.x + margins.left, local.y + margins.top)
}

#[derive(Clone)]
pub struct PlotTransform {
    pub x_scale: BandScale,
    pub y_scale: ValueScale,
    pub view: ViewTransform,
    pub margins: Margins,
    /// Plot area size in local pixels.
    pub plot_size: (f32, f32),
}

impl PlotTransform {
    pub fn new(
        x_scale: BandScale,
        y_scale: ValueScale,
        view: ViewTransform,
        margins: Margins,
        plot_size: (f32, f32),
    ) -> Self {
        Self {
            x_scale,
            y_scale,
            view,
            margins,
            plot_size,
        }
    }

    /// Bar rectangle in local, unzoomed coordinates.
    pub fn bar_bounds(&self, datum: &DataPoint) -> Option<Bounds<f32>> {
        let x = self.x_scale.position(&datum.category)?;
        let top = self.y_scale.map(datum.value);
        let baseline = self.plot_size.1;
        let (y, h) = if top <= baseline {
            (top, baseline - top)
        } else {
            (baseline, top - baseline)
        };
        Some(Bounds::new(
            point(x, y),
            size(self.x_scale.bandwidth(), h),
        ))
    }

    /// Local → zoomed → surface.
    pub fn local_to_surface(&self, p: Point<f32>) -> Point<f32> {
        to_surface(self.view.apply(p), &self.margins)
    }

    /// Surface → local, undoing the margins and the zoom.
    pub fn surface_to_local(&self, p: Point<f32>) -> Point<f32> {
        self.view.invert(Point::new(p.x - self.margins.left, p.y - self.margins.top))
    }

    /// Plot area in surface coordinates; zoomed content is clipped to it.
    pub fn plot_area(&self) -> Bounds<f32> {
        Bounds::new(
            point(self.margins.left, self.margins.top),
            size(self.plot_size.0, self.plot_size.1),
        )
    }

    /// Projects a local rectangle through the zoom and clips it to the plot area.
    pub fn project_clipped(&self, local: Bounds<f32>) -> Option<Bounds<f32>> {
        let a = self.local_to_surface(local.origin);
        let b = self.local_to_surface(point(
            local.origin.x + local.size.width,
            local.origin.y + local.size.height,
        ));
        clip_rect(a, b, &self.plot_area())
    }
}

/// Intersection of the rectangle spanned by `a`/`b` with `clip`; `None` when empty.
pub fn clip_rect(a: Point<f32>, b: Point<f32>, clip: &Bounds<f32>) -> Option<Bounds<f32>> {
    let left = a.x.min(b.x).max(clip.origin.x);
    let right = a.x.max(b.x).min(clip.origin.x + clip.size.width);
    let top = a.y.min(b.y).max(clip.origin.y);
    let bottom = a.y.max(b.y).min(clip.origin.y + clip.size.height);
    if right <= left || bottom <= top {
        return None;
    }
    Some(Bounds::new(point(left, top), size(right - left, bottom - top)))
}
