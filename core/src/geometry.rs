//! Bonds and cropping derived from atom positions.
use itertools::Itertools;
use serde::Serialize;

use crate::{atom::Atom, axis::Axes, periodic_table::AtomPropertyTable};

/// Two atoms, by index, close enough to be considered bonded.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
}

/// All pairs of atoms that are no further apart than the sum of their covalent
/// radii. Elements the table doesn't know count with radius zero.
pub fn find_bonds(atoms: &[Atom], table: &AtomPropertyTable) -> Vec<Bond> {
    let radii = atoms
        .iter()
        .map(|atom| table.covalent_radius(&atom.element))
        .collect::<Vec<_>>();

    let bonds = (0..atoms.len())
        .tuple_combinations()
        .filter_map(|(a, b)| {
            let distance = atoms[a].distance(&atoms[b]);
            (distance <= radii[a] + radii[b]).then_some(Bond { a, b, distance })
        })
        .collect::<Vec<_>>();

    log::debug!("{} bonds between {} atoms", bonds.len(), atoms.len());
    bonds
}

/// Keep the atoms that lie strictly inside the grid bounds scaled by `percent`.
///
/// Each bound is scaled on its own (`min * percent / 100`, `max * percent / 100`),
/// not the extent around the origin, so for grids that aren't centered on zero
/// the kept box is shifted as well as shrunk.
pub fn crop_atoms(atoms: &[Atom], percent: f64, axes: &Axes) -> Vec<Atom> {
    let scale = percent / 100.0;

    atoms
        .iter()
        .filter(|atom| {
            axes.iter()
                .zip(atom.position.iter())
                .all(|((_, axis), &coordinate)| {
                    coordinate > axis.min() * scale && coordinate < axis.max() * scale
                })
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{crop_atoms, find_bonds};
    use crate::{
        atom::normalize_atoms,
        axis::{AxisDescriptor, Axes},
        grd::RawAtomRecord,
        periodic_table::AtomPropertyTable,
    };

    fn atoms(records: &[(&str, f64, f64, f64)]) -> Vec<crate::atom::Atom> {
        let records = records
            .iter()
            .map(|&(label, x, y, z)| RawAtomRecord {
                label: label.to_owned(),
                x,
                y,
                z,
            })
            .collect::<Vec<_>>();

        normalize_atoms(&records, [0.0; 3])
    }

    #[test]
    fn bond_threshold_is_inclusive() {
        let table = AtomPropertyTable::default();

        let bonded = find_bonds(&atoms(&[("C(1)", 0.0, 0.0, 0.0), ("O(1)", 1.5, 0.0, 0.0)]), &table);
        assert_eq!(bonded.len(), 1);
        assert_eq!((bonded[0].a, bonded[0].b), (0, 1));
        assert_relative_eq!(bonded[0].distance, 1.5);

        let apart = find_bonds(&atoms(&[("C(1)", 0.0, 0.0, 0.0), ("O(1)", 1.501, 0.0, 0.0)]), &table);
        assert!(apart.is_empty());
    }

    #[test]
    fn every_pair_is_checked_once() {
        let table = AtomPropertyTable::default();
        let bonds = find_bonds(
            &atoms(&[
                ("C(1)", 0.0, 0.0, 0.0),
                ("C(2)", 1.4, 0.0, 0.0),
                ("C(3)", 0.7, 1.2, 0.0),
                ("O(1)", 10.0, 0.0, 0.0),
            ]),
            &table,
        );

        let pairs = bonds.iter().map(|b| (b.a, b.b)).collect::<Vec<_>>();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn unknown_elements_have_no_radius() {
        let table = AtomPropertyTable::default();

        // Q has radius 0, so it only bonds to C within C's radius
        let bonds = find_bonds(&atoms(&[("C(1)", 0.0, 0.0, 0.0), ("Q(1)", 0.7, 0.0, 0.0)]), &table);
        assert_eq!(bonds.len(), 1);

        let bonds = find_bonds(&atoms(&[("C(1)", 0.0, 0.0, 0.0), ("Q(1)", 0.8, 0.0, 0.0)]), &table);
        assert!(bonds.is_empty());
    }

    #[test]
    fn crop_scales_each_bound() {
        let axes = Axes {
            x: AxisDescriptor::new(10, 0.0, 10.0),
            y: AxisDescriptor::new(10, 0.0, 10.0),
            z: AxisDescriptor::new(10, 0.0, 10.0),
        };
        let all = atoms(&[
            ("C(1)", 0.0, 0.0, 0.0),
            ("C(2)", 3.9, -3.9, 0.0),
            ("C(3)", 4.5, 0.0, 0.0),
            ("C(4)", 0.0, 0.0, -5.0),
        ]);

        let cropped = crop_atoms(&all, 80.0, &axes);
        let labels = cropped.iter().map(|a| a.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, ["C(1)", "C(2)"]);

        // bounds are exclusive, so nothing on the boundary survives even at 100%
        let cropped = crop_atoms(&all, 100.0, &axes);
        assert_eq!(cropped.len(), 3);
    }

    #[test]
    fn crop_of_an_off_center_grid_moves_the_box() {
        let axes = Axes {
            x: AxisDescriptor::new(10, 10.0, 4.0),
            y: AxisDescriptor::new(10, 0.0, 4.0),
            z: AxisDescriptor::new(10, 0.0, 4.0),
        };
        let all = atoms(&[("C(1)", 9.0, 0.0, 0.0), ("C(2)", 5.0, 0.0, 0.0)]);

        // x bounds 8..12 become 4..6 at 50%
        let cropped = crop_atoms(&all, 50.0, &axes);
        assert_eq!(cropped.len(), 1);
        assert_eq!(cropped[0].label, "C(2)");
    }
}
