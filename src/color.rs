use palette::Srgb;

// ---------------------------------------------------------------------------
// Spectral class → display color table
// ---------------------------------------------------------------------------

/// One entry of the class→color table: a display color plus the position of
/// the class along the spectral sequence (used to order the legend).
#[derive(Debug, Clone, Copy)]
pub struct ColorEntry {
    pub class_letter: char,
    pub hex: &'static str,
    pub rank: u8,
}

/// Display colors for the 14 canonical spectral classes, matching the
/// front-end visualization. Process-wide constant; never mutated.
pub const COLOR_TABLE: [ColorEntry; 14] = [
    ColorEntry { class_letter: 'O', hex: "#8bd1ff", rank: 1 },  // Blue
    ColorEntry { class_letter: 'B', hex: "#a7caff", rank: 2 },  // Blue-white
    ColorEntry { class_letter: 'A', hex: "#dae9ff", rank: 3 },  // White
    ColorEntry { class_letter: 'F', hex: "#fff7e8", rank: 4 },  // White-yellow
    ColorEntry { class_letter: 'G', hex: "#ffe9b5", rank: 5 },  // Yellow
    ColorEntry { class_letter: 'K', hex: "#ffcd89", rank: 6 },  // Orange
    ColorEntry { class_letter: 'M', hex: "#ffa77d", rank: 7 },  // Red
    ColorEntry { class_letter: 'D', hex: "#ffffff", rank: 12 }, // White dwarf
    ColorEntry { class_letter: 'N', hex: "#a52a2a", rank: 11 }, // Cool carbon star
    ColorEntry { class_letter: 'C', hex: "#800000", rank: 10 }, // Carbon star
    ColorEntry { class_letter: 'R', hex: "#cd5c5c", rank: 9 },  // Hot carbon star
    ColorEntry { class_letter: 'P', hex: "#7fffd4", rank: 13 }, // Planetary nebula
    ColorEntry { class_letter: 'S', hex: "#ffd700", rank: 8 },  // S-type star
    ColorEntry { class_letter: 'W', hex: "#fd3db5", rank: 0 },  // Wolf-Rayet
];

fn find_entry(class_letter: char) -> Option<&'static ColorEntry> {
    COLOR_TABLE.iter().find(|e| e.class_letter == class_letter)
}

/// Look up the display color for a class letter.
///
/// Letters outside the table (including `L`) resolve to `None`; no fallback
/// color is synthesized at this layer.
pub fn resolve_color(class_letter: char) -> Option<Srgb<u8>> {
    find_entry(class_letter).and_then(|e| e.hex.parse().ok())
}

/// Position of a class along the spectral sequence (`W` hottest-exotic first).
pub fn sequence_rank(class_letter: char) -> Option<u8> {
    find_entry(class_letter).map(|e| e.rank)
}

/// Legend entries for all 14 canonical classes in sequence order, independent
/// of which classes actually occur in the data.
pub fn legend_entries() -> Vec<(char, Srgb<u8>)> {
    let mut entries: Vec<&ColorEntry> = COLOR_TABLE.iter().collect();
    entries.sort_by_key(|e| e.rank);
    entries
        .into_iter()
        .filter_map(|e| resolve_color(e.class_letter).map(|c| (e.class_letter, c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_table_classes() {
        assert_eq!(resolve_color('O'), Some(Srgb::new(0x8b, 0xd1, 0xff)));
        assert_eq!(resolve_color('G'), Some(Srgb::new(0xff, 0xe9, 0xb5)));
        assert_eq!(resolve_color('W'), Some(Srgb::new(0xfd, 0x3d, 0xb5)));
    }

    #[test]
    fn letters_outside_the_table_resolve_to_none() {
        assert_eq!(resolve_color('L'), None);
        assert_eq!(resolve_color('Z'), None);
    }

    #[test]
    fn ranks_follow_the_spectral_sequence() {
        assert_eq!(sequence_rank('W'), Some(0));
        assert_eq!(sequence_rank('O'), Some(1));
        assert_eq!(sequence_rank('M'), Some(7));
        assert_eq!(sequence_rank('L'), None);
    }

    #[test]
    fn legend_is_complete_and_sequence_ordered() {
        let entries = legend_entries();
        assert_eq!(entries.len(), 14);
        assert_eq!(entries.first().map(|(c, _)| *c), Some('W'));
        assert_eq!(entries.last().map(|(c, _)| *c), Some('P'));
    }
}
