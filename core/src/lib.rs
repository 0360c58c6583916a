pub mod atom;
pub mod axis;
pub mod color;
pub mod config;
pub mod contour;
pub mod data;
pub mod field;
pub mod geometry;
pub mod grd;
pub mod mesh;
pub mod periodic_table;

pub mod testing {
    use std::{error::Error, fmt::Write as _, fs, path::Path};

    /// Writes grid files in the layout XD uses, for tests and benchmarks.
    #[derive(Clone, Debug)]
    pub struct GrdFileBuilder {
        dimension: char,
        function: Option<String>,
        counts: [usize; 3],
        origin: [f64; 3],
        extent: [f64; 3],
        atoms: Vec<(String, [f64; 3])>,
        samples: Option<Vec<f64>>,
    }

    impl GrdFileBuilder {
        pub fn planar(nx: usize, ny: usize) -> Self {
            Self::new('2', [nx, ny, 1])
        }

        pub fn volumetric(nx: usize, ny: usize, nz: usize) -> Self {
            Self::new('3', [nx, ny, nz])
        }

        fn new(dimension: char, counts: [usize; 3]) -> Self {
            Self {
                dimension,
                function: Some("FOU".to_owned()),
                counts,
                origin: [0.0; 3],
                // one unit per sample, flat along single sample axes
                extent: counts.map(|n| if n > 1 { n as f64 } else { 0.0 }),
                atoms: Vec::new(),
                samples: None,
            }
        }

        pub fn function(mut self, tag: &str) -> Self {
            self.function = Some(tag.to_owned());
            self
        }

        pub fn without_function(mut self) -> Self {
            self.function = None;
            self
        }

        pub fn origin(mut self, origin: [f64; 3]) -> Self {
            self.origin = origin;
            self
        }

        pub fn extent(mut self, extent: [f64; 3]) -> Self {
            self.extent = extent;
            self
        }

        pub fn atom(mut self, label: &str, position: [f64; 3]) -> Self {
            self.atoms.push((label.to_owned(), position));
            self
        }

        /// Samples in file order. Defaults to `0, 1, 2, ..`.
        pub fn samples(mut self, samples: Vec<f64>) -> Self {
            self.samples = Some(samples);
            self
        }

        pub fn sample_count(&self) -> usize {
            self.counts.iter().product()
        }

        pub fn build(&self) -> String {
            let mut text = String::new();
            let [nx, ny, nz] = self.counts;
            let [ox, oy, oz] = self.origin;
            let [ex, ey, ez] = self.extent;

            // writing into a String can't fail
            let _ = writeln!(text, "{}DGRDFIL  0", self.dimension);
            match &self.function {
                Some(function) => {
                    let _ = writeln!(text, "Function:  {function}");
                }
                None => text.push_str("ADDGRID\n"),
            }
            text.push_str("! Gridpoints, Origin, Physical Dimensions\n");
            let _ = writeln!(text, "{nx:>5}{ny:>5}{nz:>5}");
            let _ = writeln!(text, "{ox:>12.6}{oy:>12.6}{oz:>12.6}");
            let _ = writeln!(text, "{ex:>12.6}{ey:>12.6}{ez:>12.6}");
            text.push_str("! Objects\n");
            let _ = writeln!(text, "{:>5}", self.atoms.len());
            for (label, [x, y, z]) in &self.atoms {
                let _ = writeln!(text, "{label:<12}{x:>12.6}{y:>12.6}{z:>12.6}");
            }
            text.push_str("! Connections\n    0\n! Values\n");

            let samples = match &self.samples {
                Some(samples) => samples.clone(),
                None => (0..self.sample_count()).map(|v| v as f64).collect(),
            };
            for row in samples.chunks(6) {
                for value in row {
                    let _ = write!(text, " {value:>15.8E}");
                }
                text.push('\n');
            }

            text
        }

        pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
            Ok(fs::write(path, self.build())?)
        }
    }
}
