//! Coordinates of the sample centers of a grid.
use ndarray::{Array2, Array3};
use serde::Serialize;

use crate::axis::Axes;

/// Sample center coordinates, one array per axis, indexed like the
/// [`crate::field::ScalarField`] of the same grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Mesh {
    Planar {
        x: Array2<f64>,
        y: Array2<f64>,
    },
    Volumetric {
        x: Array3<f64>,
        y: Array3<f64>,
        z: Array3<f64>,
    },
}

impl Mesh {
    /// Build the mesh spanned by the axes. A single sample along z only needs a
    /// planar mesh over x and y.
    pub fn build(axes: &Axes) -> Self {
        let xs = axes.x.centers();
        let ys = axes.y.centers();

        if axes.z.is_degenerate() {
            let shape = (xs.len(), ys.len());
            return Self::Planar {
                x: Array2::from_shape_fn(shape, |(i, _)| xs[i]),
                y: Array2::from_shape_fn(shape, |(_, j)| ys[j]),
            };
        }

        let zs = axes.z.centers();
        let shape = (xs.len(), ys.len(), zs.len());
        Self::Volumetric {
            x: Array3::from_shape_fn(shape, |(i, _, _)| xs[i]),
            y: Array3::from_shape_fn(shape, |(_, j, _)| ys[j]),
            z: Array3::from_shape_fn(shape, |(_, _, k)| zs[k]),
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Planar { x, .. } => x.shape(),
            Self::Volumetric { x, .. } => x.shape(),
        }
    }
}
