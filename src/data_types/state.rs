use gpui::Point;
use serde::{Deserialize, Serialize};

/// Whether pointer drags draw a selection or go to pan/zoom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Selecting,
}

/// Drag-defined rectangle in chart-local (margin-relative, unzoomed) pixels.
///
/// Corners keep the order they were recorded in; use the `min_*`/`max_*`
/// accessors when the orientation matters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl SelectionRect {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Zero-sized rectangle anchored at `p`.
    pub fn at(p: Point<f32>) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).abs()
    }

    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).abs()
    }

    pub fn min_x(&self) -> f32 {
        self.x1.min(self.x2)
    }

    pub fn max_x(&self) -> f32 {
        self.x1.max(self.x2)
    }

    pub fn min_y(&self) -> f32 {
        self.y1.min(self.y2)
    }

    pub fn max_y(&self) -> f32 {
        self.y1.max(self.y2)
    }

    pub fn center(&self) -> Point<f32> {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Too small in either direction to act on.
    pub fn is_degenerate(&self, min_size: f32) -> bool {
        !(self.width() >= min_size && self.height() >= min_size)
    }

    /// Top-left / bottom-right ordering.
    pub fn normalized(&self) -> Self {
        Self::new(self.min_x(), self.min_y(), self.max_x(), self.max_y())
    }
}

/// Affine view transform applied to the plot contents: `screen = local * scale + translate`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn apply(&self, p: Point<f32>) -> Point<f32> {
        Point::new(
            p.x * self.scale_x + self.translate_x,
            p.y * self.scale_y + self.translate_y,
        )
    }

    /// Inverse mapping. Scales are kept >= 1 by the controller so this is always defined.
    pub fn invert(&self, p: Point<f32>) -> Point<f32> {
        Point::new(
            (p.x - self.translate_x) / self.scale_x,
            (p.y - self.translate_y) / self.scale_y,
        )
    }
}
