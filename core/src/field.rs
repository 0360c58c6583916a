//! Reshaping of the flat sample stream into an indexed scalar field.
use ndarray::{Array2, Array3, ShapeError};
use serde::Serialize;

use crate::{
    axis::Axes,
    grd::{Dimensionality, FormatError, FunctionTag},
};

/// The samples of a grid file as a 2D or 3D array.
///
/// Planar fields are indexed `[x][y]`, matching [`crate::mesh::Mesh::Planar`].
/// Volumetric fields keep the quirks of the tools that write them: Fourier maps
/// are stored x-slowest and are indexed `[x][y][z]` straight away, every other 3D
/// function has its first and last axes exchanged after reading.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ScalarField {
    Planar(Array2<f64>),
    Volumetric(Array3<f64>),
}

impl ScalarField {
    /// Arrange `samples` (in file order) according to the axes and the kind of grid.
    pub fn reshape(
        samples: Vec<f64>,
        axes: &Axes,
        dimensionality: Dimensionality,
        function_tag: &FunctionTag,
    ) -> Result<Self, FormatError> {
        let (nx, ny, nz) = (axes.x.count, axes.y.count, axes.z.count);

        match dimensionality {
            Dimensionality::Planar => {
                if nz != 1 {
                    return Err(FormatError::ShapeMismatch {
                        shape: vec![nx, ny, nz],
                        details: "a planar grid must have a single sample along z".to_owned(),
                    });
                }
                // rows are y, x varies fastest in the file
                let field = Array2::from_shape_vec((ny, nx), samples)
                    .map_err(|e| shape_mismatch(&[ny, nx], e))?;

                Ok(Self::Planar(
                    field.reversed_axes().as_standard_layout().into_owned(),
                ))
            }
            Dimensionality::Volumetric => {
                let mut field = Array3::from_shape_vec((nx, ny, nz), samples)
                    .map_err(|e| shape_mismatch(&[nx, ny, nz], e))?;

                if function_tag.is_fourier() {
                    return Ok(Self::Volumetric(field));
                }

                field.swap_axes(0, 2);
                Ok(Self::Volumetric(field.as_standard_layout().into_owned()))
            }
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Planar(field) => field.shape(),
            Self::Volumetric(field) => field.shape(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Planar(field) => field.len(),
            Self::Volumetric(field) => field.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            Self::Planar(field) => Box::new(field.iter().copied()),
            Self::Volumetric(field) => Box::new(field.iter().copied()),
        }
    }

    /// Smallest and largest sample, `None` for an empty field.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values().fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
    }
}

fn shape_mismatch(shape: &[usize], error: ShapeError) -> FormatError {
    FormatError::ShapeMismatch {
        shape: shape.to_vec(),
        details: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::ScalarField;
    use crate::{
        axis::{AxisDescriptor, Axes},
        grd::{Dimensionality, FunctionTag},
    };

    fn axes(nx: usize, ny: usize, nz: usize) -> Axes {
        Axes {
            x: AxisDescriptor::new(nx, 0.0, nx as f64),
            y: AxisDescriptor::new(ny, 0.0, ny as f64),
            z: AxisDescriptor::new(nz, 0.0, if nz == 1 { 0.0 } else { nz as f64 }),
        }
    }

    fn samples(n: usize) -> Vec<f64> {
        (0..n).map(|v| v as f64).collect()
    }

    #[test]
    fn planar_field_is_indexed_x_then_y() {
        let field = ScalarField::reshape(
            samples(6),
            &axes(2, 3, 1),
            Dimensionality::Planar,
            &FunctionTag::new("RHO"),
        )
        .unwrap();

        let ScalarField::Planar(field) = field else {
            panic!("expected a planar field");
        };
        assert_eq!(field.shape(), &[2, 3]);
        assert_eq!(field[[1, 2]], 5.0);
        assert_eq!(field[[1, 0]], 1.0);
        assert_eq!(field[[0, 1]], 2.0);
    }

    #[test]
    fn fourier_volume_keeps_file_order() {
        let field = ScalarField::reshape(
            samples(24),
            &axes(2, 3, 4),
            Dimensionality::Volumetric,
            &FunctionTag::new("FOU"),
        )
        .unwrap();

        let ScalarField::Volumetric(field) = field else {
            panic!("expected a volumetric field");
        };
        assert_eq!(field.shape(), &[2, 3, 4]);
        // x slowest, z fastest
        assert_eq!(field[[1, 2, 3]], 23.0);
        assert_eq!(field[[0, 0, 1]], 1.0);
        assert_eq!(field[[1, 0, 0]], 12.0);
    }

    #[test]
    fn other_volumes_swap_first_and_last_axis() {
        let field = ScalarField::reshape(
            samples(24),
            &axes(2, 3, 4),
            Dimensionality::Volumetric,
            &FunctionTag::new("RHO"),
        )
        .unwrap();

        let ScalarField::Volumetric(field) = field else {
            panic!("expected a volumetric field");
        };
        // the shape follows the swap too, exactly as the writing tools expect
        assert_eq!(field.shape(), &[4, 3, 2]);
        assert_eq!(field[[3, 2, 1]], 23.0);
        assert_eq!(field[[1, 0, 0]], 1.0);
        assert_eq!(field[[0, 0, 1]], 12.0);
    }

    #[test]
    fn cubic_volume_without_fourier_tag_is_x_fastest() {
        let field = ScalarField::reshape(
            samples(27),
            &axes(3, 3, 3),
            Dimensionality::Volumetric,
            &FunctionTag::none(),
        )
        .unwrap();

        let ScalarField::Volumetric(field) = field else {
            panic!("expected a volumetric field");
        };
        // sample i + 3j + 9k sits at [i][j][k]
        assert_eq!(field[[2, 0, 0]], 2.0);
        assert_eq!(field[[0, 1, 0]], 3.0);
        assert_eq!(field[[0, 0, 2]], 18.0);
    }

    #[test]
    fn reshaping_keeps_every_sample() {
        for (dimensionality, (nx, ny, nz), tag) in [
            (Dimensionality::Planar, (5, 7, 1), "FOU"),
            (Dimensionality::Volumetric, (2, 5, 3), "FOU"),
            (Dimensionality::Volumetric, (4, 1, 6), "NONE"),
        ] {
            let n = nx * ny * nz;
            let field = ScalarField::reshape(
                samples(n),
                &axes(nx, ny, nz),
                dimensionality,
                &FunctionTag::new(tag),
            )
            .unwrap();

            assert_eq!(field.len(), n);
            let mut values = field.values().collect::<Vec<_>>();
            values.sort_by(f64::total_cmp);
            assert_eq!(values, samples(n));
        }
    }

    #[test]
    fn planar_grid_with_depth_is_rejected() {
        let result = ScalarField::reshape(
            samples(12),
            &axes(2, 3, 2),
            Dimensionality::Planar,
            &FunctionTag::none(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn range_spans_all_values() {
        let field = ScalarField::reshape(
            vec![0.5, -2.0, 3.5, 1.0],
            &axes(2, 2, 1),
            Dimensionality::Planar,
            &FunctionTag::none(),
        )
        .unwrap();

        assert_eq!(field.range(), Some((-2.0, 3.5)));
    }
}
