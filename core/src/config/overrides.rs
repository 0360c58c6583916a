use thiserror::Error;

use crate::color::Color;

/// Written in place of a missing override file, so users have something to edit.
pub const OVERRIDE_TEMPLATE: &str = "\
# Edit this file to change atom colors and/or covalent radii.
# All lines starting with '#' are treated as comments.
#
# Colors: the section starts with 'start_color' and ends with 'end_color'.
# One line per entry: the atomic symbol, '=' and the color, either as a hex
# string or as an rgb triple with components between 0 and 1, e.g. for red:
# Fe = #ff0000
# Fe = (1, 0, 0)
#
# Radii: the section starts with 'start_radii' and ends with 'end_radii'.
# One line per entry: the atomic symbol, '=' and the covalent radius in
# Angstrom, e.g.:
# Fe = 1.25
#
# Entries that can't be read are skipped.

start_color
end_color

start_radii
end_radii
";

/// An entry of an override file that was skipped.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {message}")]
pub struct OverrideWarning {
    pub line: usize,
    pub message: String,
}

/// Colors and covalent radii that replace or extend the built-in atom properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomOverrides {
    pub colors: Vec<(String, Color)>,
    pub radii: Vec<(String, f64)>,
    /// Entries that were skipped, in file order
    pub warnings: Vec<OverrideWarning>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Block {
    Colors,
    Radii,
}

impl Block {
    fn end_marker(&self) -> &'static str {
        match self {
            Self::Colors => "end_color",
            Self::Radii => "end_radii",
        }
    }
}

impl AtomOverrides {
    /// Read the text of an override file. This never fails: entries that can't be
    /// read are skipped and reported in [`AtomOverrides::warnings`].
    pub fn parse(text: &str) -> Self {
        let mut overrides = Self::default();
        let mut block = None;

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            let content = line.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }

            match block {
                None => {
                    block = match content {
                        "start_color" => Some(Block::Colors),
                        "start_radii" | "start_radius" => Some(Block::Radii),
                        _ => {
                            overrides.warn(line_number, format!("'{content}' outside of a block"));
                            None
                        }
                    };
                }
                Some(current) if content == current.end_marker() => block = None,
                Some(current) => {
                    if let Err(message) = overrides.add_entry(current, content) {
                        overrides.warn(line_number, message);
                    }
                }
            }
        }

        if let Some(unclosed) = block {
            overrides.warn(
                text.lines().count(),
                format!("missing '{}' at end of file", unclosed.end_marker()),
            );
        }

        overrides
    }

    fn add_entry(&mut self, block: Block, entry: &str) -> Result<(), String> {
        let (symbol, value) = entry
            .split_once('=')
            .ok_or_else(|| format!("'{entry}' is not of the form 'Symbol = value'"))?;

        let symbol = symbol.trim();
        if symbol.is_empty() || symbol.contains(char::is_whitespace) {
            return Err(format!("'{symbol}' is not an atomic symbol"));
        }

        match block {
            Block::Colors => {
                let color = value.parse::<Color>().map_err(|e| e.to_string())?;
                self.colors.push((symbol.to_owned(), color));
            }
            Block::Radii => {
                let value = value.trim();
                let radius = value
                    .parse::<f64>()
                    .ok()
                    .filter(|radius| radius.is_finite() && *radius >= 0.0)
                    .ok_or_else(|| format!("'{value}' is not a covalent radius"))?;
                self.radii.push((symbol.to_owned(), radius));
            }
        }

        Ok(())
    }

    fn warn(&mut self, line: usize, message: String) {
        let warning = OverrideWarning { line, message };
        log::warn!("skipped atom property override, {warning}");
        self.warnings.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.radii.is_empty()
    }
}
