mod label;

use nalgebra::Vector3;
use serde::Serialize;

pub use label::{normalize_label, AtomLabel};

use crate::grd::RawAtomRecord;

/// An atom of a grid file, in absolute coordinates and with a canonical label.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Atom {
    pub label: String,
    pub position: Vector3<f64>,
    pub is_symmetry_generated: bool,
    pub symmetry_tag: Option<String>,
    /// Chemical symbol used to look up color and covalent radius
    pub element: String,
}

impl Atom {
    /// Normalize the label of a raw record and shift it by the grid origin.
    pub fn from_raw(record: &RawAtomRecord, origin: &Vector3<f64>) -> Self {
        let AtomLabel {
            text,
            element,
            symmetry_tag,
        } = normalize_label(&record.label);

        Self {
            label: text,
            position: Vector3::new(record.x, record.y, record.z) + origin,
            is_symmetry_generated: symmetry_tag.is_some(),
            symmetry_tag,
            element,
        }
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn z(&self) -> f64 {
        self.position.z
    }

    pub fn distance(&self, other: &Atom) -> f64 {
        (other.position - self.position).norm()
    }
}

/// Turn the atom records of a grid file into atoms, keeping their order.
pub fn normalize_atoms(records: &[RawAtomRecord], origin: [f64; 3]) -> Vec<Atom> {
    let origin = Vector3::from(origin);

    records
        .iter()
        .map(|record| Atom::from_raw(record, &origin))
        .collect()
}
