use d3rs::scale::{LinearScale, Scale as D3Scale};

/// Ordinal band scale: each category gets an equal-width band inside the range,
/// separated by `padding` (fraction of a step) and with half-steps of outer padding.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f32, f32),
    padding: f32,
    step: f32,
    bandwidth: f32,
    start: f32,
}

impl BandScale {
    pub fn new<I, S>(domain: I, range: (f32, f32), padding: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scale = Self {
            domain: domain.into_iter().map(Into::into).collect(),
            range,
            padding: padding.clamp(0.0, 1.0),
            step: 0.0,
            bandwidth: 0.0,
            start: range.0,
        };
        scale.rescale();
        scale
    }

    fn rescale(&mut self) {
        let n = self.domain.len() as f32;
        let (r0, r1) = self.range;
        let (lo, hi) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let inner = self.padding;
        let outer = self.padding;

        self.step = (hi - lo) / (n - inner + outer * 2.0).max(1.0);
        self.start = lo + (hi - lo - self.step * (n - inner)) * 0.5;
        self.bandwidth = self.step * (1.0 - inner);
    }

    /// Left edge of the category's band.
    pub fn position(&self, category: &str) -> Option<f32> {
        let index = self.domain.iter().position(|c| c == category)?;
        let slot = if self.range.1 < self.range.0 {
            self.domain.len() - 1 - index
        } else {
            index
        };
        Some(self.start + self.step * slot as f32)
    }

    pub fn center(&self, category: &str) -> Option<f32> {
        self.position(category).map(|x| x + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }
}

/// Continuous value axis backed by the d3 linear scale.
#[derive(Clone)]
pub struct ValueScale {
    inner: LinearScale,
    domain: (f64, f64),
    range: (f32, f32),
}

impl ValueScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        let mut d_min = domain.0;
        let mut d_max = domain.1;
        if (d_max - d_min).abs() < f64::EPSILON {
            d_min -= 0.5;
            d_max += 0.5;
        }
        let inner = LinearScale::new()
            .domain(d_min, d_max)
            .range(range.0 as f64, range.1 as f64);
        Self {
            inner,
            domain: (d_min, d_max),
            range,
        }
    }

    pub fn map(&self, value: f64) -> f32 {
        let res = self.inner.scale(value) as f32;
        if res.is_nan() || res.is_infinite() {
            0.0
        } else {
            res
        }
    }

    pub fn invert(&self, pixel: f32) -> f64 {
        self.inner.invert(pixel as f64).unwrap_or(self.domain.0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        self.inner.ticks(count)
    }
}
