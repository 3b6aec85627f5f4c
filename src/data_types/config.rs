use crate::error::ChartError;
use crate::utils::Rgba8;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 30.0,
            right: 20.0,
            bottom: 40.0,
            left: 20.0,
        }
    }
}

/// How zoom-to-box derives the scale from the selected rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomPolicy {
    /// One factor for both axes, the tighter of the two fits.
    #[default]
    Uniform,
    /// Each axis fits its own extent.
    Independent,
}

/// Shape of the drag selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushKind {
    /// Free rectangle, both corners tracked.
    #[default]
    Rectangle,
    /// X range only; the rectangle always spans the full plot height.
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: f32,
    pub max: f32,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self { min: 1.0, max: 10.0 }
    }
}

impl ScaleBounds {
    pub fn clamp(&self, scale: f32) -> f32 {
        if scale.is_nan() {
            return self.min;
        }
        scale.clamp(self.min, self.max)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub bar_width: f32,
    pub bar_padding: f32,
    pub bar_corner_radius: f32,
    pub margins: Margins,
    /// Total surface height including margins.
    pub height: f32,
    pub y_domain: (f64, f64),
    /// Explicit grid values; falls back to `tick_count` nice ticks when absent.
    pub grid_ticks: Option<Vec<f64>>,
    pub tick_count: usize,
    pub scale_bounds: ScaleBounds,
    pub min_selection_size: f32,
    pub zoom_policy: ZoomPolicy,
    pub brush: BrushKind,
    pub random_min: u32,
    pub random_max: u32,
    pub export_background: String,
    pub export_dir: Option<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            bar_width: 35.0,
            bar_padding: 25.0,
            bar_corner_radius: 8.0,
            margins: Margins::default(),
            height: 280.0,
            y_domain: (0.0, 110.0),
            grid_ticks: Some(vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]),
            tick_count: 6,
            scale_bounds: ScaleBounds::default(),
            min_selection_size: 5.0,
            zoom_policy: ZoomPolicy::Uniform,
            brush: BrushKind::Rectangle,
            random_min: 10,
            random_max: 100,
            export_background: "#ffffff".to_string(),
            export_dir: None,
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ChartConfig =
            serde_json::from_str(json).wrap_err("failed to parse chart config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read chart config {}", path.display()))?;
        Self::from_json_str(&json).wrap_err_with(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> std::result::Result<(), ChartError> {
        let invalid = |msg: &str| Err(ChartError::InvalidConfig(msg.to_string()));
        if !(self.bar_width > 0.0) || self.bar_padding < 0.0 {
            return invalid("bar width must be positive and padding non-negative");
        }
        if !(self.bar_corner_radius >= 0.0) {
            return invalid("bar corner radius must be non-negative");
        }
        if !(self.inner_height() > 0.0) {
            return invalid("height must exceed the vertical margins");
        }
        if !(self.y_domain.1 > self.y_domain.0) {
            return invalid("y domain must be increasing");
        }
        if !(self.scale_bounds.min > 0.0) || self.scale_bounds.max < self.scale_bounds.min {
            return invalid("scale bounds must satisfy 0 < min <= max");
        }
        if !(self.min_selection_size >= 0.0) {
            return invalid("minimum selection size must be non-negative");
        }
        Rgba8::parse_hex(&self.export_background)?;
        Ok(())
    }

    /// Pixel distance between consecutive band starts before padding.
    pub fn step(&self) -> f32 {
        self.bar_width + self.bar_padding
    }

    pub fn band_padding(&self) -> f32 {
        self.bar_padding / self.step()
    }

    pub fn inner_width(&self, count: usize) -> f32 {
        self.step() * count as f32
    }

    pub fn inner_height(&self) -> f32 {
        self.height - self.margins.top - self.margins.bottom
    }

    pub fn chart_width(&self, count: usize) -> f32 {
        self.inner_width(count) + self.margins.left + self.margins.right
    }
}
