// ---------------------------------------------------------------------------
// Spectral-type classification
// ---------------------------------------------------------------------------

/// Class letters recognized when scanning a raw spectral-type string.
///
/// `L` is scanned even though the display color table has no entry for it:
/// an L-classified star keeps its classification but resolves to no color.
pub const CLASS_ALPHABET: [char; 15] = [
    'O', 'B', 'A', 'F', 'G', 'K', 'M', 'R', 'N', 'S', 'W', 'C', 'P', 'L', 'D',
];

/// Sub-class assumed when the source string carries no digit.
pub const DEFAULT_SUBCLASS: f64 = 5.0;

/// A parsed spectral type: primary class letter plus sub-class refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralClassification {
    pub class_letter: char,
    /// Sub-class in [0, 9]; lower is hotter within a class.
    pub subclass: f64,
}

/// Extract the spectral class from a free-form catalog string.
///
/// Catalog entries mix luminosity suffixes (`V`, `III`), peculiarity flags
/// (`w`, `n`, `e`) and composite notations (`(G3w)F7`) into one field. The
/// scan keeps only the first class letter and, when immediately adjacent, a
/// single sub-class digit; composite entries therefore classify by their
/// first-listed component. Returns `None` when no class letter occurs
/// anywhere in the string.
pub fn classify(raw: &str) -> Option<SpectralClassification> {
    let normalized = raw.trim().to_ascii_uppercase();
    let bytes = normalized.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        let letter = b as char;
        if !CLASS_ALPHABET.contains(&letter) {
            continue;
        }
        let subclass = match bytes.get(i + 1) {
            Some(d) if d.is_ascii_digit() => f64::from(d - b'0'),
            _ => DEFAULT_SUBCLASS,
        };
        return Some(SpectralClassification {
            class_letter: letter,
            subclass,
        });
    }
    None
}
