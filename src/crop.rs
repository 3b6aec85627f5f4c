//! Narrowing the working dataset to the bars inside a selection.

use crate::data_types::{DataPoint, SelectionRect};
use crate::scales::BandScale;

#[derive(Clone, Debug, PartialEq)]
pub enum CropOutcome {
    /// Non-empty subset, in original order.
    Cropped(Vec<DataPoint>),
    /// Selection too small to act on.
    Degenerate,
    /// No band centre falls inside the selection.
    Empty,
}

/// Points whose band centre lies within the selection's x extent, inclusive.
/// Points missing from the scale's domain are never included.
pub fn window_filter(dataset: &[DataPoint], rect: &SelectionRect, x_scale: &BandScale) -> Vec<DataPoint> {
    let (lo, hi) = (rect.min_x(), rect.max_x());
    dataset
        .iter()
        .filter(|d| {
            x_scale
                .center(&d.category)
                .is_some_and(|pos| pos >= lo && pos <= hi)
        })
        .cloned()
        .collect()
}

pub fn crop_window(
    dataset: &[DataPoint],
    rect: &SelectionRect,
    x_scale: &BandScale,
    min_selection_size: f32,
) -> CropOutcome {
    if rect.is_degenerate(min_selection_size) {
        return CropOutcome::Degenerate;
    }
    let kept = window_filter(dataset, rect, x_scale);
    if kept.is_empty() {
        CropOutcome::Empty
    } else {
        CropOutcome::Cropped(kept)
    }
}

/// Never returns an empty set: degenerate selections and empty results hand
/// back the input unchanged.
pub fn apply_crop(
    dataset: &[DataPoint],
    rect: &SelectionRect,
    x_scale: &BandScale,
    min_selection_size: f32,
) -> Vec<DataPoint> {
    match crop_window(dataset, rect, x_scale, min_selection_size) {
        CropOutcome::Cropped(kept) => kept,
        CropOutcome::Degenerate | CropOutcome::Empty => dataset.to_vec(),
    }
}
