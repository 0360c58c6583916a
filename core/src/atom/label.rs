/// An atom label brought into the canonical form used for display and lookups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtomLabel {
    /// Canonical label, e.g. `Fe(1)` or `X3_Fe(1)` for a symmetry generated copy
    pub text: String,
    /// Chemical symbol, e.g. `Fe`
    pub element: String,
    /// Index of the symmetry operation that generated the atom
    pub symmetry_tag: Option<String>,
}

/// Normalize a label as written by XD.
///
/// Symmetry generated atoms are written as `BASE___N` (or `BASE__N`) and are
/// rewritten to `XN_BASE`. Labels already in that form are kept. Element symbols
/// written in capitals (`FE(1)`) are fixed up to `Fe(1)`.
pub fn normalize_label(raw: &str) -> AtomLabel {
    let (symmetry_tag, body) = match split_symmetry_suffix(raw).or_else(|| split_symmetry_prefix(raw)) {
        Some((body, tag)) => (Some(tag.to_owned()), body),
        None => (None, raw),
    };

    let body = fix_capitalization(body);
    let element = element_symbol(&body).to_owned();
    let text = match &symmetry_tag {
        Some(tag) => format!("X{tag}_{body}"),
        None => body,
    };

    AtomLabel {
        text,
        element,
        symmetry_tag,
    }
}

/// `C(1)___2` -> (`C(1)`, `2`)
fn split_symmetry_suffix(label: &str) -> Option<(&str, &str)> {
    ["___", "__"].into_iter().find_map(|marker| {
        let mut parts = label.split(marker);
        let body = parts.next()?;
        let tag = parts.next()?;

        (!body.is_empty()).then_some((body, tag))
    })
}

/// `X2_C(1)` -> (`C(1)`, `2`)
fn split_symmetry_prefix(label: &str) -> Option<(&str, &str)> {
    let (tag, body) = label.strip_prefix('X')?.split_once('_')?;

    let is_tag = !tag.is_empty() && tag.bytes().all(|b| b.is_ascii_digit());
    (is_tag && !body.is_empty()).then_some((body, tag))
}

/// Capitalize the part before the parenthesis, if it is longer than one character.
fn fix_capitalization(body: &str) -> String {
    let (stem, suffix) = body.split_at(body.find('(').unwrap_or(body.len()));
    if stem.chars().count() <= 1 {
        return body.to_owned();
    }

    let mut chars = stem.chars();
    let mut fixed = String::with_capacity(body.len());
    if let Some(first) = chars.next() {
        fixed.extend(first.to_uppercase());
    }
    fixed.extend(chars.flat_map(char::to_lowercase));
    fixed.push_str(suffix);
    fixed
}

fn element_symbol(body: &str) -> &str {
    let symbol = body.rsplit_once('_').map_or(body, |(_, symbol)| symbol);
    symbol.split_once('(').map_or(symbol, |(symbol, _)| symbol)
}
