/// A closed range of ray parameters `[min, max]`.
///
/// The slab test returns one of these, and the kd-tree narrows it as it
/// descends through split planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// True when the interval holds no value (max < min).
    pub fn is_empty(&self) -> bool {
        self.max < self.min
    }

    /// Same lower bound, new upper bound.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// Same upper bound, new lower bound.
    pub fn with_min(&self, min: f32) -> Interval {
        Interval::new(min, self.max)
    }
}
