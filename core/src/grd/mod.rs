//! Reading of XD grid (`.grd`) files.
//!
//! A grid file is plain text with a fixed positional layout: a two line header
//! (dimensionality and the function that was sampled), free-form text up to a
//! `! Grid` marker, the axis description, the atom list, free-form text up to a
//! `! Values` marker and finally the samples themselves.
mod error;
mod parser;

use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

pub use error::{FormatError, ReadError};
pub use parser::parse;

use crate::axis::Axes;

/// Whether a grid file samples a plane or a volume.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimensionality {
    Planar,
    Volumetric,
}

impl Dimensionality {
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '2' => Some(Self::Planar),
            '3' => Some(Self::Volumetric),
            _ => None,
        }
    }

    pub fn rank(&self) -> usize {
        match self {
            Self::Planar => 2,
            Self::Volumetric => 3,
        }
    }
}

/// Code of the physical quantity a grid file holds, e.g. `FOU` for a Fourier map.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionTag(String);

impl FunctionTag {
    /// Written by tools that leave the function out of the header, e.g. ADDGRID.
    pub const NONE: &'static str = "NONE";
    const FOURIER: &'static str = "FOU";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn none() -> Self {
        Self(Self::NONE.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fourier maps are the one 3D function whose samples are stored x-slowest.
    pub fn is_fourier(&self) -> bool {
        self.0 == Self::FOURIER
    }
}

impl fmt::Display for FunctionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An atom exactly as listed in the grid file, relative to the grid origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawAtomRecord {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Everything a grid file holds, before any reshaping or clean up.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedGrid {
    pub dimensionality: Dimensionality,
    pub function_tag: FunctionTag,
    pub axes: Axes,
    pub raw_atoms: Vec<RawAtomRecord>,
    /// Samples in file order, `axes.sample_count()` of them.
    pub samples: Vec<f64>,
}

impl ParsedGrid {
    /// Read and parse a whole grid file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        log::info!("read {} bytes from {}", text.len(), path.display());

        Ok(parse(&text)?)
    }
}
