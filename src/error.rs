//! Error types surfaced by the chart session and the snapshot exporter.
//!
//! Degenerate selections and empty crops are absorbed inside the session and
//! never show up here; these variants only cover what a caller can act on.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("invalid chart configuration: {0}")]
    InvalidConfig(String),

    #[error("duplicate category '{0}' in dataset")]
    DuplicateCategory(String),

    #[error("dataset must contain at least one point")]
    EmptyDataset,

    #[error("invalid color token '{0}'")]
    InvalidColor(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("selection {width}x{height} is below the minimum export size")]
    DegenerateSelection { width: f32, height: f32 },

    #[error("no rendered scene is mounted")]
    SceneUnavailable,

    #[error("failed to allocate a {width}x{height} raster surface")]
    Surface { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}
