//! Render-ready descriptions of a grid file: everything a plotting backend needs to
//! draw it, with the plot parameters already applied.
use anyhow::{bail, Result};
use ndarray::{Array2, Array3};
use serde::Serialize;
use xdgrd_core::{
    atom::Atom,
    axis::Axes,
    color::Color,
    config::{LineStyle, PlotConfig},
    data::GridData,
    field::ScalarField,
    geometry::{crop_atoms, find_bonds, Bond},
    grd::FunctionTag,
    mesh::Mesh,
    periodic_table::AtomPropertyTable,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContourLayer {
    pub levels: Vec<f64>,
    pub color: Color,
    pub style: LineStyle,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AtomMarker {
    pub label: String,
    pub position: [f64; 2],
    pub face_color: Color,
    pub edge_color: Color,
    pub edge_width: f64,
    pub size: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextLabel {
    pub text: String,
    pub position: [f64; 2],
    pub color: Color,
    pub size: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BondSegment {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub color: Color,
    pub thickness: f64,
}

/// A 2D contour plot of a planar grid, with the atoms close to the plane.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContourScene {
    pub function_tag: FunctionTag,
    /// `[x.min, x.max, y.min, y.max]`
    pub bounds: [f64; 4],
    pub x: Array2<f64>,
    pub y: Array2<f64>,
    pub field: Array2<f64>,
    pub positive: ContourLayer,
    pub negative: ContourLayer,
    pub zero: Option<ContourLayer>,
    pub bonds: Vec<BondSegment>,
    pub atoms: Vec<AtomMarker>,
    pub labels: Vec<TextLabel>,
    /// Image format the backend should save to
    pub format: String,
}

impl ContourScene {
    pub fn build(data: &GridData, config: &PlotConfig, table: &AtomPropertyTable) -> Result<Self> {
        let (ScalarField::Planar(field), Mesh::Planar { x, y }) = (&data.field, data.mesh()) else {
            bail!(
                "grid is {}-dimensional, contour plots need a 2D grid",
                data.dimensionality.rank()
            );
        };

        let levels = config.contours.levels();
        let lines = &config.lines;
        let layer = |levels: Vec<f64>, color: Color, style: LineStyle| ContourLayer {
            levels,
            color,
            style,
            width: lines.width,
        };

        let near_plane = |atom: &Atom| atom.z().abs() <= config.atoms.plane_cutoff;

        let bonds = if config.bonds.show_bonds {
            find_bonds(&data.atoms, table)
                .into_iter()
                .map(|Bond { a, b, .. }| (&data.atoms[a], &data.atoms[b]))
                .filter(|&(a, b)| near_plane(a) && near_plane(b))
                .filter(|(a, b)| {
                    config.bonds.show_symmetry_bonds
                        || !(a.is_symmetry_generated || b.is_symmetry_generated)
                })
                .map(|(a, b)| BondSegment {
                    from: [a.x(), a.y()],
                    to: [b.x(), b.y()],
                    color: config.bonds.color,
                    thickness: config.bonds.thickness,
                })
                .collect()
        } else {
            Vec::new()
        };

        let shown = data
            .atoms
            .iter()
            .filter(|&atom| near_plane(atom))
            .filter(|atom| config.atoms.show_symmetry_atoms || !atom.is_symmetry_generated)
            .collect::<Vec<_>>();

        let atoms = shown
            .iter()
            .map(|atom| AtomMarker {
                label: atom.label.clone(),
                position: [atom.x(), atom.y()],
                face_color: table.color(&atom.element),
                edge_color: Color::BLACK,
                edge_width: config.bonds.thickness,
                size: config.atoms.size,
            })
            .collect();

        let style = &config.labels;
        let labels = if style.label_atoms {
            shown
                .iter()
                .filter(|atom| style.label_symmetry_atoms || !atom.is_symmetry_generated)
                .map(|atom| TextLabel {
                    text: atom.label.clone(),
                    position: [atom.x() + style.x_offset, atom.y() + style.y_offset],
                    color: style.color,
                    size: style.size,
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            function_tag: data.function_tag.clone(),
            bounds: data.planar_bounds(),
            x,
            y,
            field: field.clone(),
            positive: layer(levels.positive, lines.positive_color, lines.positive_style),
            negative: layer(levels.negative, lines.negative_color, lines.negative_style),
            zero: config
                .contours
                .zero_contour
                .then(|| layer(vec![0.0], lines.zero_color, lines.zero_style)),
            bonds,
            atoms,
            labels,
            format: config.save.format.clone(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VolumeAtom {
    pub label: String,
    pub position: [f64; 3],
    pub color: Color,
    pub covalent_radius: f64,
    pub is_symmetry_generated: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisCenters {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

/// A volumetric grid with the atoms inside its (cropped) bounds. Bonds index into
/// `atoms`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VolumeScene {
    pub function_tag: FunctionTag,
    pub axes: Axes,
    pub centers: AxisCenters,
    pub field: Array3<f64>,
    pub atoms: Vec<VolumeAtom>,
    pub bonds: Vec<Bond>,
}

impl VolumeScene {
    pub fn build(data: &GridData, crop_percent: f64, table: &AtomPropertyTable) -> Result<Self> {
        let ScalarField::Volumetric(field) = &data.field else {
            bail!(
                "grid is {}-dimensional, volume export needs a 3D grid",
                data.dimensionality.rank()
            );
        };
        if !(crop_percent >= 0.0 && crop_percent.is_finite()) {
            bail!("crop percentage must not be negative, got {crop_percent}");
        }

        let cropped = crop_atoms(&data.atoms, crop_percent, &data.axes);
        log::debug!(
            "{} of {} atoms left after cropping to {crop_percent}%",
            cropped.len(),
            data.atoms.len()
        );

        Ok(Self {
            function_tag: data.function_tag.clone(),
            axes: data.axes,
            centers: AxisCenters {
                x: data.axes.x.centers(),
                y: data.axes.y.centers(),
                z: data.axes.z.centers(),
            },
            field: field.clone(),
            bonds: find_bonds(&cropped, table),
            atoms: cropped
                .iter()
                .map(|atom| VolumeAtom {
                    label: atom.label.clone(),
                    position: [atom.x(), atom.y(), atom.z()],
                    color: table.color(&atom.element),
                    covalent_radius: table.covalent_radius(&atom.element),
                    is_symmetry_generated: atom.is_symmetry_generated,
                })
                .collect(),
        })
    }
}

/// `{function}_{label}{label}{label}` from the first three atoms of the file.
pub fn output_stem(data: &GridData) -> String {
    let labels = data
        .atoms
        .iter()
        .take(3)
        .map(|atom| atom.label.as_str())
        .collect::<String>();

    format!("{}_{labels}", data.function_tag)
}
