use std::str::FromStr;

use smallvec::SmallVec;

use crate::axis::{AxisDescriptor, Axes};

use super::{Dimensionality, FormatError, FunctionTag, ParsedGrid, RawAtomRecord};

const GRID_MARKER: &str = "! Grid";
const VALUES_MARKER: &str = "! Values";

/// Walks the lines of a grid file front to back, remembering where it is so every
/// failure can name the line that caused it.
struct LineCursor<'a> {
    lines: Vec<&'a str>,
    position: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            position: 0,
        }
    }

    /// 1-based number of the line returned last
    fn line_number(&self) -> usize {
        self.position
    }

    fn next_line(&mut self, expected: &'static str) -> Result<&'a str, FormatError> {
        let line = self
            .lines
            .get(self.position)
            .copied()
            .ok_or(FormatError::UnexpectedEof { expected })?;
        self.position += 1;
        Ok(line)
    }

    /// Skip lines up to and including the first one starting with `marker`.
    fn skip_past(&mut self, marker: &'static str) -> Result<(), FormatError> {
        while let Some(line) = self.lines.get(self.position) {
            self.position += 1;
            if line.starts_with(marker) {
                log::trace!("found '{marker}' on line {}", self.position);
                return Ok(());
            }
        }

        Err(FormatError::MissingMarker { marker })
    }

    /// All lines that were not consumed yet, with their line numbers.
    fn remaining(self) -> impl Iterator<Item = (usize, &'a str)> {
        let start = self.position;
        self.lines
            .into_iter()
            .enumerate()
            .skip(start)
            .map(|(index, line)| (index + 1, line))
    }
}

/// Parse the text of a grid file.
///
/// The file is either parsed completely or not at all: any structural problem
/// aborts with a [`FormatError`] describing the first expectation that failed.
pub fn parse(text: &str) -> Result<ParsedGrid, FormatError> {
    let mut cursor = LineCursor::new(text);

    let dimensionality = parse_dimensionality(cursor.next_line("dimensionality header")?)?;
    let function_tag = parse_function_tag(cursor.next_line("function header")?);
    log::debug!("{}D grid of function {function_tag}", dimensionality.rank());

    cursor.skip_past(GRID_MARKER)?;

    let counts = parse_triple::<usize>(&mut cursor, "sample count")?;
    let origins = parse_triple::<f64>(&mut cursor, "axis origin")?;
    let extents = parse_triple::<f64>(&mut cursor, "axis extent")?;
    let axes = build_axes(counts, origins, extents)?;
    log::debug!("grid axes: {axes:?}");

    cursor.next_line("separator line")?;
    let raw_atoms = parse_atoms(&mut cursor)?;
    log::debug!("read {} atoms", raw_atoms.len());

    cursor.skip_past(VALUES_MARKER)?;

    let expected = axes.sample_count();
    let mut samples = Vec::with_capacity(expected.min(text.len()));
    for (line, content) in cursor.remaining() {
        for token in content.split_whitespace() {
            samples.push(parse_number::<f64>(token, line, "sample value")?);
        }
    }

    if samples.len() != expected {
        return Err(FormatError::SampleCountMismatch {
            expected,
            found: samples.len(),
        });
    }

    Ok(ParsedGrid {
        dimensionality,
        function_tag,
        axes,
        raw_atoms,
        samples,
    })
}

fn parse_dimensionality(line: &str) -> Result<Dimensionality, FormatError> {
    line.chars()
        .next()
        .and_then(Dimensionality::from_digit)
        .ok_or_else(|| FormatError::UnsupportedDimensionality {
            found: line.chars().take(1).collect(),
        })
}

fn parse_function_tag(line: &str) -> FunctionTag {
    let tokens = line.split_whitespace().collect::<SmallVec<[&str; 4]>>();

    match tokens.as_slice() {
        [_, .., last] => FunctionTag::new(*last),
        _ => FunctionTag::none(),
    }
}

fn parse_number<T: FromStr>(token: &str, line: usize, expected: &'static str) -> Result<T, FormatError> {
    token.parse::<T>().map_err(|_| FormatError::InvalidNumber {
        line,
        token: token.to_owned(),
        expected,
    })
}

/// Read the first three numbers of the next line, one per axis.
fn parse_triple<T: FromStr + Copy + Default>(
    cursor: &mut LineCursor,
    expected: &'static str,
) -> Result<[T; 3], FormatError> {
    let content = cursor.next_line(expected)?;
    let line = cursor.line_number();

    let tokens = content
        .split_whitespace()
        .take(3)
        .collect::<SmallVec<[&str; 3]>>();
    if tokens.len() < 3 {
        return Err(FormatError::MissingValues {
            line,
            expected: 3,
            found: tokens.len(),
        });
    }

    let mut triple = [T::default(); 3];
    for (slot, token) in triple.iter_mut().zip(&tokens) {
        *slot = parse_number(token, line, expected)?;
    }

    Ok(triple)
}

fn build_axes(counts: [usize; 3], origins: [f64; 3], extents: [f64; 3]) -> Result<Axes, FormatError> {
    let [x, y, z] = [0, 1, 2].map(|i| AxisDescriptor::new(counts[i], origins[i], extents[i]));
    let axes = Axes { x, y, z };

    for (name, axis) in axes.iter() {
        let details = if axis.count == 0 {
            "sample count must be at least 1"
        } else if !axis.origin.is_finite() || !axis.extent.is_finite() {
            "origin and extent must be finite"
        } else if axis.extent < 0.0 {
            "extent must not be negative"
        } else if axis.extent == 0.0 && axis.count > 1 {
            "zero extent is only allowed for a single sample"
        } else {
            continue;
        };

        return Err(FormatError::InvalidAxis {
            axis: name,
            details: details.to_owned(),
        });
    }

    counts
        .iter()
        .try_fold(1usize, |total, &count| total.checked_mul(count))
        .ok_or_else(|| FormatError::InvalidAxis {
            axis: 'z',
            details: "sample counts overflow the addressable grid size".to_owned(),
        })?;

    Ok(axes)
}

fn parse_atoms(cursor: &mut LineCursor) -> Result<Vec<RawAtomRecord>, FormatError> {
    let content = cursor.next_line("atom count")?;
    let line = cursor.line_number();
    let count_token = content
        .split_whitespace()
        .next()
        .ok_or(FormatError::MissingValues {
            line,
            expected: 1,
            found: 0,
        })?;
    let expected = parse_number::<usize>(count_token, line, "atom count")?;

    let mut atoms = Vec::with_capacity(expected.min(cursor.lines.len()));
    for found in 0..expected {
        let truncated = FormatError::TruncatedAtomList { expected, found };

        let content = cursor.next_line("atom list").map_err(|_| truncated.clone())?;
        let line = cursor.line_number();

        let tokens = content
            .split_whitespace()
            .take(4)
            .collect::<SmallVec<[&str; 4]>>();
        let &[label, x, y, z] = tokens.as_slice() else {
            return Err(truncated);
        };

        atoms.push(RawAtomRecord {
            label: label.to_owned(),
            x: parse_number(x, line, "atom coordinate")?,
            y: parse_number(y, line, "atom coordinate")?,
            z: parse_number(z, line, "atom coordinate")?,
        });
    }

    Ok(atoms)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::parse;
    use crate::grd::{Dimensionality, FormatError, FunctionTag};

    const PLANAR: &str = "\
2DGRDFIL  0    FOU
Fourier map of some plane   FOU
! Gridpoints, Origin, Physical Dimensions
    2    3    1
  0.5000  -0.2500  0.0000
  2.0000   3.0000  0.0000
! Objects
   2
C(1)     0.1000   0.2000   0.0000
O(1)    -0.3000   0.4000   0.0100
! Connections
! Values
 0.0 1.0 2.0
 3.0 4.0
 5.0
";

    #[test]
    fn planar_file() {
        let grid = parse(PLANAR).unwrap();

        assert_eq!(grid.dimensionality, Dimensionality::Planar);
        assert_eq!(grid.function_tag, FunctionTag::new("FOU"));

        assert_eq!(grid.axes.x.count, 2);
        assert_eq!(grid.axes.y.count, 3);
        assert_eq!(grid.axes.z.count, 1);
        assert_relative_eq!(grid.axes.x.origin, 0.5);
        assert_relative_eq!(grid.axes.y.origin, -0.25);
        assert_relative_eq!(grid.axes.y.extent, 3.0);

        assert_eq!(grid.raw_atoms.len(), 2);
        assert_eq!(grid.raw_atoms[1].label, "O(1)");
        assert_relative_eq!(grid.raw_atoms[1].x, -0.3);
        assert_relative_eq!(grid.raw_atoms[1].z, 0.01);

        assert_eq!(grid.samples, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn missing_function_defaults_to_none() {
        let text = PLANAR.replacen("Fourier map of some plane   FOU", "ADDGRID", 1);
        let grid = parse(&text).unwrap();

        assert_eq!(grid.function_tag.as_str(), FunctionTag::NONE);
    }

    #[test]
    fn unsupported_dimensionality() {
        let text = PLANAR.replacen("2DGRDFIL", "4DGRDFIL", 1);

        assert_eq!(
            parse(&text),
            Err(FormatError::UnsupportedDimensionality {
                found: "4".to_owned()
            })
        );
    }

    #[test]
    fn missing_grid_marker() {
        let text = PLANAR.replacen("! Gridpoints", "# Gridpoints", 1);

        assert_eq!(
            parse(&text),
            Err(FormatError::MissingMarker { marker: "! Grid" })
        );
    }

    #[test]
    fn missing_values_marker() {
        let text = PLANAR.replacen("! Values", "Values", 1);

        assert_eq!(
            parse(&text),
            Err(FormatError::MissingMarker { marker: "! Values" })
        );
    }

    #[test]
    fn truncated_atom_list() {
        let text = PLANAR.replacen("\n   2\n", "\n   3\n", 1);

        // the third "atom" is the `! Connections` line, which has too few fields
        assert_eq!(
            parse(&text),
            Err(FormatError::TruncatedAtomList {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn atom_list_running_into_end_of_file() {
        let text = "2\nX FOU\n! Grid\n1 1 1\n0 0 0\n0 0 0\n!\n2\nC(1) 0 0 0\n";

        assert_eq!(
            parse(text),
            Err(FormatError::TruncatedAtomList {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn sample_count_mismatch() {
        let text = PLANAR.replacen(" 5.0\n", "", 1);

        assert_eq!(
            parse(&text),
            Err(FormatError::SampleCountMismatch {
                expected: 6,
                found: 5
            })
        );
    }

    #[test]
    fn bad_sample_names_its_line() {
        let text = PLANAR.replacen(" 3.0 4.0", " 3.0 four", 1);

        assert_eq!(
            parse(&text),
            Err(FormatError::InvalidNumber {
                line: 14,
                token: "four".to_owned(),
                expected: "sample value"
            })
        );
    }

    #[test]
    fn short_axis_line() {
        let text = PLANAR.replacen("    2    3    1", "    2    3", 1);

        assert_eq!(
            parse(&text),
            Err(FormatError::MissingValues {
                line: 4,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn zero_sample_axis_is_rejected() {
        let text = PLANAR.replacen("    2    3    1", "    0    3    1", 1);

        assert!(matches!(
            parse(&text),
            Err(FormatError::InvalidAxis { axis: 'x', .. })
        ));
    }

    #[test]
    fn scientific_notation_samples() {
        let text = PLANAR.replacen(" 0.0 1.0 2.0", " 0.14631837E+00 -1.5e-3 2", 1);
        let grid = parse(&text).unwrap();

        assert_relative_eq!(grid.samples[0], 0.14631837);
        assert_relative_eq!(grid.samples[1], -0.0015);
    }
}
