//! gpui_chart_select: an interactive GPUI bar chart with area selection,
//! zoom-to-box, crop and PNG export.

pub mod chart;
pub mod chart_view;
pub mod crop;
pub mod data_types;
pub mod error;
pub mod export;
pub mod glyphs;
pub mod rendering;
pub mod scales;
pub mod selection;
pub mod theme;
pub mod transform;
pub mod utils;
pub mod view_controller;

pub use chart::{Chart, ControlState};
pub use chart_view::BarChartView;
pub use data_types::{ChartConfig, DataPoint, InteractionMode, SelectionRect, ViewTransform};
pub use error::{ChartError, ExportError};
pub use export::{ExportJob, Snapshot, SnapshotExporter};
