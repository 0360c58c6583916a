//! Per-element display color and covalent radius.
use std::collections::HashMap;

use serde::Serialize;

use crate::{color::Color, config::AtomOverrides};

/// Display color and covalent radius (in Å) of one element.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct AtomProperties {
    pub color: Color,
    pub covalent_radius: f64,
}

/// Lookup table from element symbol to [`AtomProperties`].
///
/// Built once with [`AtomPropertyTable::builder`] and only read afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct AtomPropertyTable {
    properties: HashMap<String, AtomProperties>,
}

impl AtomPropertyTable {
    /// Start from the built-in properties of H through Rn.
    pub fn builder() -> AtomPropertyTableBuilder {
        AtomPropertyTableBuilder::with_defaults()
    }

    pub fn get(&self, element: &str) -> Option<&AtomProperties> {
        self.properties.get(element)
    }

    /// Covalent radius of `element`, zero for elements the table doesn't know.
    pub fn covalent_radius(&self, element: &str) -> f64 {
        match self.get(element) {
            Some(properties) => properties.covalent_radius,
            None => {
                log::trace!("no covalent radius for '{element}'");
                0.0
            }
        }
    }

    /// Color of `element`, black for elements the table doesn't know.
    pub fn color(&self, element: &str) -> Color {
        match self.get(element) {
            Some(properties) => properties.color,
            None => {
                log::trace!("no color for '{element}'");
                Color::BLACK
            }
        }
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Default for AtomPropertyTable {
    fn default() -> Self {
        Self::builder().build()
    }
}

pub struct AtomPropertyTableBuilder {
    properties: HashMap<String, AtomProperties>,
}

impl AtomPropertyTableBuilder {
    pub fn empty() -> Self {
        Self {
            properties: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let properties = DEFAULT_PROPERTIES
            .iter()
            .map(|&(symbol, covalent_radius, color)| {
                (
                    symbol.to_owned(),
                    AtomProperties {
                        color,
                        covalent_radius,
                    },
                )
            })
            .collect();

        Self { properties }
    }

    /// Set the color of an element. Elements without a radius get radius zero.
    pub fn color(mut self, element: impl Into<String>, color: Color) -> Self {
        self.entry(element.into()).color = color;
        self
    }

    /// Set the covalent radius of an element. Elements without a color are black.
    pub fn covalent_radius(mut self, element: impl Into<String>, radius: f64) -> Self {
        self.entry(element.into()).covalent_radius = radius;
        self
    }

    /// Apply every color and radius of an override file on top of the current values.
    pub fn apply_overrides(self, overrides: &AtomOverrides) -> Self {
        if !overrides.colors.is_empty() {
            log::info!("non standard colors: {:?}", overrides.colors);
        }
        if !overrides.radii.is_empty() {
            log::info!("non standard radii: {:?}", overrides.radii);
        }

        let builder = overrides
            .colors
            .iter()
            .fold(self, |builder, (element, color)| builder.color(element, *color));

        overrides
            .radii
            .iter()
            .fold(builder, |builder, (element, radius)| {
                builder.covalent_radius(element, *radius)
            })
    }

    pub fn build(self) -> AtomPropertyTable {
        AtomPropertyTable {
            properties: self.properties,
        }
    }

    fn entry(&mut self, element: String) -> &mut AtomProperties {
        self.properties.entry(element).or_insert(AtomProperties {
            color: Color::BLACK,
            covalent_radius: 0.0,
        })
    }
}

/// (symbol, covalent radius, color)
const DEFAULT_PROPERTIES: &[(&str, f64, Color)] = &[
    ("H", 0.38, Color::rgb(1.0, 1.0, 1.0)),
    ("He", 0.32, Color::rgb(1.0, 0.1, 0.6)),
    ("Li", 1.34, Color::rgb(0.6, 0.6, 0.6)),
    ("Be", 0.9, Color::rgb(0.6, 0.6, 0.6)),
    ("B", 0.82, Color::rgb(0.15, 0.55, 0.15)),
    ("C", 0.77, Color::rgb(0.3, 0.3, 0.3)),
    ("N", 0.75, Color::rgb(0.0, 0.0, 1.0)),
    ("O", 0.73, Color::rgb(1.0, 0.0, 0.0)),
    ("F", 0.71, Color::rgb(0.0, 1.0, 0.0)),
    ("Ne", 0.69, Color::rgb(1.0, 0.1, 0.6)),
    ("Na", 1.54, Color::rgb(0.6, 0.6, 0.6)),
    ("Mg", 1.3, Color::rgb(0.6, 0.6, 0.6)),
    ("Al", 1.18, Color::rgb(0.6, 0.6, 0.6)),
    ("Si", 1.11, Color::rgb(0.45, 0.55, 0.6)),
    ("P", 1.06, Color::rgb(0.5, 0.0, 0.0)),
    ("S", 1.02, Color::rgb(1.0, 1.0, 0.0)),
    ("Cl", 0.99, Color::rgb(0.8, 0.1, 0.55)),
    ("Ar", 0.97, Color::rgb(1.0, 0.1, 0.6)),
    ("K", 1.96, Color::rgb(0.6, 0.6, 0.6)),
    ("Ca", 1.74, Color::rgb(0.6, 0.6, 0.6)),
    ("Sc", 1.44, Color::rgb(0.6, 0.6, 0.6)),
    ("Ti", 1.36, Color::rgb(0.6, 0.6, 0.6)),
    ("V", 1.25, Color::rgb(0.6, 0.6, 0.6)),
    ("Cr", 1.27, Color::rgb(0.6, 0.6, 0.6)),
    ("Mn", 1.39, Color::rgb(0.55, 0.25, 0.05)),
    ("Fe", 1.25, Color::rgb(1.0, 0.3, 0.0)),
    ("Co", 1.26, Color::rgb(0.1, 0.1, 0.45)),
    ("Ni", 1.21, Color::rgb(0.0, 0.5, 0.0)),
    ("Cu", 1.38, Color::rgb(0.0, 1.0, 1.0)),
    ("Zn", 1.31, Color::rgb(0.9, 0.9, 0.9)),
    ("Ga", 1.26, Color::rgb(0.6, 0.6, 0.6)),
    ("Ge", 1.22, Color::rgb(0.6, 0.6, 0.6)),
    ("As", 1.19, Color::rgb(0.6, 0.6, 0.6)),
    ("Se", 1.16, Color::rgb(0.6, 0.6, 0.6)),
    ("Br", 1.14, Color::rgb(0.55, 0.0, 0.0)),
    ("Kr", 1.1, Color::rgb(1.0, 0.1, 0.6)),
    ("Rb", 2.11, Color::rgb(0.6, 0.6, 0.6)),
    ("Sr", 1.92, Color::rgb(0.6, 0.6, 0.6)),
    ("Y", 1.62, Color::rgb(0.6, 0.6, 0.6)),
    ("Zr", 1.48, Color::rgb(0.6, 0.6, 0.6)),
    ("Nb", 1.37, Color::rgb(0.6, 0.6, 0.6)),
    ("Mo", 1.45, Color::rgb(0.6, 0.6, 0.6)),
    ("Tc", 1.56, Color::rgb(0.6, 0.6, 0.6)),
    ("Ru", 1.26, Color::rgb(0.6, 0.6, 0.6)),
    ("Rh", 1.35, Color::rgb(0.6, 0.6, 0.6)),
    ("Pd", 1.31, Color::rgb(0.6, 0.6, 0.6)),
    ("Ag", 1.53, Color::rgb(0.6, 0.6, 0.6)),
    ("Cd", 1.48, Color::rgb(0.6, 0.6, 0.6)),
    ("In", 1.44, Color::rgb(0.6, 0.6, 0.6)),
    ("Sn", 1.41, Color::rgb(0.6, 0.6, 0.6)),
    ("Sb", 1.38, Color::rgb(0.6, 0.6, 0.6)),
    ("Te", 1.35, Color::rgb(0.6, 0.6, 0.6)),
    ("I", 1.33, Color::rgb(0.5, 0.0, 0.5)),
    ("Xe", 1.3, Color::rgb(1.0, 0.1, 0.6)),
    ("Cs", 2.25, Color::rgb(0.6, 0.6, 0.6)),
    ("Ba", 1.98, Color::rgb(0.6, 0.6, 0.6)),
    ("La", 1.69, Color::rgb(0.6, 0.6, 0.6)),
    ("Lu", 1.6, Color::rgb(0.6, 0.6, 0.6)),
    ("Hf", 1.5, Color::rgb(0.6, 0.6, 0.6)),
    ("Ta", 1.38, Color::rgb(0.6, 0.6, 0.6)),
    ("W", 1.46, Color::rgb(0.6, 0.6, 0.6)),
    ("Re", 1.59, Color::rgb(0.6, 0.6, 0.6)),
    ("Os", 1.28, Color::rgb(0.6, 0.6, 0.6)),
    ("Ir", 1.37, Color::rgb(0.6, 0.6, 0.6)),
    ("Pt", 1.28, Color::rgb(0.6, 0.6, 0.6)),
    ("Au", 1.44, Color::rgb(1.0, 0.85, 0.0)),
    ("Hg", 1.49, Color::rgb(0.6, 0.6, 0.6)),
    ("Tl", 1.48, Color::rgb(0.6, 0.6, 0.6)),
    ("Pb", 1.47, Color::rgb(0.6, 0.6, 0.6)),
    ("Bi", 1.46, Color::rgb(0.6, 0.6, 0.6)),
    ("Rn", 1.45, Color::rgb(0.6, 0.6, 0.6)),
];

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{AtomPropertyTable, AtomPropertyTableBuilder};
    use crate::{color::Color, config::AtomOverrides};

    #[test]
    fn defaults() {
        let table = AtomPropertyTable::default();

        assert_eq!(table.len(), 71);
        assert_relative_eq!(table.covalent_radius("C"), 0.77);
        assert_relative_eq!(table.covalent_radius("Fe"), 1.25);
        assert_eq!(table.color("O"), Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn unknown_elements_fall_back() {
        let table = AtomPropertyTable::default();

        assert_eq!(table.covalent_radius("Q"), 0.0);
        assert_eq!(table.covalent_radius("FE"), 0.0);
        assert_eq!(table.color("Uuo"), Color::BLACK);
    }

    #[test]
    fn overrides_replace_and_extend() {
        let overrides = AtomOverrides::parse(
            "start_color\nFe = #0000ff\nD = (1, 1, 1)\nend_color\n\nstart_radii\nC = 0.7\nD = 0.3\nend_radii\n",
        );

        let table = AtomPropertyTable::builder().apply_overrides(&overrides).build();

        assert_eq!(table.color("Fe"), Color::rgb(0.0, 0.0, 1.0));
        assert_relative_eq!(table.covalent_radius("Fe"), 1.25);
        assert_relative_eq!(table.covalent_radius("C"), 0.7);
        assert_eq!(table.color("C"), Color::rgb(0.3, 0.3, 0.3));
        assert_eq!(table.color("D"), Color::rgb(1.0, 1.0, 1.0));
        assert_relative_eq!(table.covalent_radius("D"), 0.3);
    }

    #[test]
    fn table_from_overrides_alone() {
        let overrides = AtomOverrides::parse("start_color\nFe = #ff0000\nend_color\nstart_radii\nH = 0.3\nend_radii\n");

        let table = AtomPropertyTableBuilder::empty().apply_overrides(&overrides).build();

        assert_eq!(table.len(), 2);
        assert_eq!(table.color("Fe"), Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(table.covalent_radius("Fe"), 0.0);
        assert_eq!(table.color("H"), Color::BLACK);
        assert_relative_eq!(table.covalent_radius("H"), 0.3);
        assert_eq!(table.covalent_radius("C"), 0.0);
    }
}
