use std::path::Path;

use crate::{
    atom::{normalize_atoms, Atom},
    axis::Axes,
    field::ScalarField,
    grd::{Dimensionality, FormatError, FunctionTag, ParsedGrid, ReadError},
    mesh::Mesh,
};

/// A grid file after reshaping its samples and cleaning up its atoms: what
/// renderers work with.
#[derive(Clone, Debug, PartialEq)]
pub struct GridData {
    pub dimensionality: Dimensionality,
    pub function_tag: FunctionTag,
    pub axes: Axes,
    pub field: ScalarField,
    pub atoms: Vec<Atom>,
}

impl GridData {
    /// Read, parse and post-process a grid file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        Ok(Self::from_parsed(ParsedGrid::read(path)?)?)
    }

    pub fn from_parsed(parsed: ParsedGrid) -> Result<Self, FormatError> {
        let ParsedGrid {
            dimensionality,
            function_tag,
            axes,
            raw_atoms,
            samples,
        } = parsed;

        let field = ScalarField::reshape(samples, &axes, dimensionality, &function_tag)?;
        let atoms = normalize_atoms(&raw_atoms, axes.origins());
        log::info!(
            "{}D {function_tag} grid with {} samples and {} atoms",
            dimensionality.rank(),
            field.len(),
            atoms.len()
        );

        Ok(Self {
            dimensionality,
            function_tag,
            axes,
            field,
            atoms,
        })
    }

    /// Sample center coordinates of the grid.
    pub fn mesh(&self) -> Mesh {
        Mesh::build(&self.axes)
    }

    /// `[x.min, x.max, y.min, y.max]`
    pub fn planar_bounds(&self) -> [f64; 4] {
        [
            self.axes.x.min(),
            self.axes.x.max(),
            self.axes.y.min(),
            self.axes.y.max(),
        ]
    }
}
