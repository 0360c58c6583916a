use std::{fs::File, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{color::Color, contour::ContourLevelSet};

/// Appearance of a 2D contour plot. Every field has a default, so a parameter file
/// only needs to list what it changes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub contours: ContourConfig,
    pub lines: LineConfig,
    pub atoms: AtomConfig,
    pub bonds: BondConfig,
    pub labels: LabelConfig,
    pub save: SaveConfig,
}

#[derive(Debug, Error)]
pub enum PlotConfigError {
    #[error("failed to access parameter file")]
    Io(#[from] io::Error),
    #[error("malformed parameter file")]
    Json(#[from] serde_json::Error),
}

impl PlotConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlotConfigError> {
        Ok(serde_json::from_reader(File::open(path)?)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PlotConfigError> {
        Ok(serde_json::to_writer_pretty(
            File::options()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?,
            self,
        )?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Linear levels for Fourier and deformation maps, logarithmic ones otherwise
    pub use_linear: bool,
    pub pos_lim: f64,
    pub neg_lim: f64,
    pub step: f64,
    /// Logarithmic levels are `base * 10^exponent`
    pub bases: Vec<f64>,
    pub exponents: Vec<f64>,
    pub zero_contour: bool,
}

impl ContourConfig {
    pub fn levels(&self) -> ContourLevelSet {
        if self.use_linear {
            ContourLevelSet::linear(self.step, self.pos_lim, self.neg_lim)
        } else {
            ContourLevelSet::logarithmic(&self.bases, &self.exponents)
        }
    }
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            use_linear: true,
            pos_lim: 2.0,
            neg_lim: -2.0,
            step: 0.05,
            bases: vec![1.0, 2.0, 4.0, 8.0],
            exponents: vec![-2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0],
            zero_contour: false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    Dashdot,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    pub positive_color: Color,
    pub positive_style: LineStyle,
    pub negative_color: Color,
    pub negative_style: LineStyle,
    pub zero_color: Color,
    pub zero_style: LineStyle,
    pub width: f64,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            positive_color: Color::rgb(0.0, 0.0, 1.0),
            positive_style: LineStyle::Solid,
            negative_color: Color::rgb(1.0, 0.0, 0.0),
            negative_style: LineStyle::Dashed,
            zero_color: Color::BLACK,
            zero_style: LineStyle::Dotted,
            width: 0.8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtomConfig {
    pub size: f64,
    pub show_symmetry_atoms: bool,
    /// Atoms further than this from the plotted plane are left out
    pub plane_cutoff: f64,
}

impl Default for AtomConfig {
    fn default() -> Self {
        Self {
            size: 10.0,
            show_symmetry_atoms: true,
            plane_cutoff: 0.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondConfig {
    pub show_bonds: bool,
    pub color: Color,
    pub thickness: f64,
    pub show_symmetry_bonds: bool,
}

impl Default for BondConfig {
    fn default() -> Self {
        Self {
            show_bonds: true,
            color: Color::BLACK,
            thickness: 2.0,
            show_symmetry_bonds: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub label_atoms: bool,
    pub label_symmetry_atoms: bool,
    pub color: Color,
    pub size: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            label_atoms: true,
            label_symmetry_atoms: false,
            color: Color::BLACK,
            size: 15.0,
            x_offset: 0.1,
            y_offset: 0.1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Image format the renderer should produce, e.g. `png`, `eps` or `pdf`
    pub format: String,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            format: "png".to_owned(),
        }
    }
}
