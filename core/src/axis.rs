use serde::{Deserialize, Serialize};

/// Sampling of a single axis of a grid file: how many samples, where the axis is
/// centered and how long it is.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisDescriptor {
    pub count: usize,
    pub origin: f64,
    pub extent: f64,
}

impl AxisDescriptor {
    pub fn new(count: usize, origin: f64, extent: f64) -> Self {
        Self {
            count,
            origin,
            extent,
        }
    }

    /// Lower bound of the axis, `origin - extent / 2`
    pub fn min(&self) -> f64 {
        self.origin - self.extent / 2.0
    }

    /// Upper bound of the axis, `origin + extent / 2`
    pub fn max(&self) -> f64 {
        self.origin + self.extent / 2.0
    }

    /// Distance between two neighbouring sample centers.
    pub fn step(&self) -> f64 {
        self.extent / self.count as f64
    }

    /// Coordinates of the sample centers, half a step in from each boundary.
    ///
    /// Centers are computed from their index rather than by accumulating the step,
    /// so the result always holds exactly `count` values.
    pub fn centers(&self) -> Vec<f64> {
        let step = self.step();
        let first = self.min() + step / 2.0;

        (0..self.count).map(|i| first + i as f64 * step).collect()
    }

    /// An axis collapses to a single coordinate when it only holds one sample.
    pub fn is_degenerate(&self) -> bool {
        self.count == 1
    }
}

/// The x, y and z axes of a grid file, in that order.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub x: AxisDescriptor,
    pub y: AxisDescriptor,
    pub z: AxisDescriptor,
}

impl Axes {
    /// Total number of samples the grid holds.
    pub fn sample_count(&self) -> usize {
        self.x.count * self.y.count * self.z.count
    }

    pub fn origins(&self) -> [f64; 3] {
        [self.x.origin, self.y.origin, self.z.origin]
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &AxisDescriptor)> {
        [('x', &self.x), ('y', &self.y), ('z', &self.z)].into_iter()
    }
}
