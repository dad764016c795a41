/// Half-open range `[min, max)` of acceptable ray parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x < self.max
    }

    /// Same bounds with the upper end moved in to `max`.
    pub fn with_max(&self, max: f64) -> Self {
        Self { min: self.min, max }
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }
}
