use crate::error::ChartError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One bar of the chart, keyed by its category label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub category: String,
    /// Hex colour token, e.g. `#f64c4c`.
    pub color: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(category: impl Into<String>, color: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            color: color.into(),
            value,
        }
    }
}

pub const CRITICAL: &str = "#f64c4c";
pub const HIGH: &str = "#ff8801";
pub const INFO: &str = "#40bf7f";
pub const WARNING: &str = "#ffd47f";

/// Monthly alert counts the demo widgets start from.
pub fn seed_data() -> Vec<DataPoint> {
    vec![
        DataPoint::new("jan", CRITICAL, 50.0),
        DataPoint::new("feb", HIGH, 30.0),
        DataPoint::new("mar", INFO, 70.0),
        DataPoint::new("apr", WARNING, 90.0),
        DataPoint::new("may", INFO, 40.0),
        DataPoint::new("jun", CRITICAL, 60.0),
    ]
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub color: String,
    pub label: String,
}

pub fn severity_legend() -> Vec<LegendEntry> {
    [
        (CRITICAL, "Critical"),
        (HIGH, "High"),
        (INFO, "Info"),
        (WARNING, "Warning"),
    ]
    .into_iter()
    .map(|(color, label)| LegendEntry {
        color: color.to_string(),
        label: label.to_string(),
    })
    .collect()
}

/// Working set of points plus the seed it was created from.
///
/// The working set is only ever swapped as a whole; individual points are
/// never edited in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    seed: Vec<DataPoint>,
    points: Vec<DataPoint>,
}

impl Dataset {
    pub fn new(seed: Vec<DataPoint>) -> Result<Self, ChartError> {
        validate_points(&seed)?;
        Ok(Self {
            points: seed.clone(),
            seed,
        })
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn seed(&self) -> &[DataPoint] {
        &self.seed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.points.iter().map(|p| p.category.as_str())
    }

    /// Swaps the working set. Empty or inconsistent replacements are refused
    /// and the current set is kept.
    pub fn replace(&mut self, points: Vec<DataPoint>) -> Result<(), ChartError> {
        validate_points(&points)?;
        self.points = points;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.points = self.seed.clone();
    }

    /// Same categories and colours, every value redrawn from `min..=max`.
    pub fn randomized<R: Rng + ?Sized>(&self, rng: &mut R, min: u32, max: u32) -> Vec<DataPoint> {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.points
            .iter()
            .map(|p| DataPoint {
                value: rng.random_range(lo..=hi) as f64,
                ..p.clone()
            })
            .collect()
    }
}

fn validate_points(points: &[DataPoint]) -> Result<(), ChartError> {
    if points.is_empty() {
        return Err(ChartError::EmptyDataset);
    }
    let mut seen = HashSet::new();
    for p in points {
        if !seen.insert(p.category.as_str()) {
            return Err(ChartError::DuplicateCategory(p.category.clone()));
        }
    }
    Ok(())
}
