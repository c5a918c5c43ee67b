//! Symbol shapes overlaid on chart cells.

/// One of the eleven symbols used to tell colours apart on a printed chart.
///
/// Shapes are defined in a 20x20 box and scaled to the cell size. Palette
/// index `i` uses `Glyph::ALL[i]`; indices from 11 upwards have no symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// `\` diagonal
    Backslash,
    /// `/` diagonal with a horizontal bar
    SlashBar,
    /// Small filled square
    FilledSquare,
    /// Downward triangle outline
    Triangle,
    /// `X`
    Cross,
    /// Large square outline
    Square,
    /// Downward triangle, filled
    FilledTriangle,
    /// Filled diamond
    Diamond,
    /// Tiny square outline
    SmallSquare,
    /// `X` overlaid with `+`
    Star,
    /// Large filled square
    Block,
}

impl Glyph {
    /// All glyphs in palette-index order.
    pub const ALL: [Glyph; 11] = [
        Glyph::Backslash,
        Glyph::SlashBar,
        Glyph::FilledSquare,
        Glyph::Triangle,
        Glyph::Cross,
        Glyph::Square,
        Glyph::FilledTriangle,
        Glyph::Diamond,
        Glyph::SmallSquare,
        Glyph::Star,
        Glyph::Block,
    ];

    /// Glyph for a palette index, if the set covers it.
    #[inline]
    pub fn for_index(index: usize) -> Option<Glyph> {
        Self::ALL.get(index).copied()
    }

    /// SVG path data in the 20x20 glyph box.
    pub fn path_data(self) -> &'static str {
        match self {
            Glyph::Backslash => "M4 4L16 16",
            Glyph::SlashBar => "M4 16L16 4M4 10L16 10",
            Glyph::FilledSquare => "M7 7L7 13 13 13 13 7Z",
            Glyph::Triangle | Glyph::FilledTriangle => "M4 4L10 16L16 4Z",
            Glyph::Cross => "M4 4L16 16M4 16L16 4",
            Glyph::Square | Glyph::Block => "M4 4L4 16 16 16 16 4Z",
            Glyph::Diamond => "M10 4L6 10 10 16 14 10Z",
            Glyph::SmallSquare => "M8 8L8 12 12 12 12 8Z",
            Glyph::Star => "M4 4L16 16M4 16L16 4M10 4L10 16M4 10L16 10",
        }
    }

    /// Whether the shape is filled black rather than stroked only.
    pub fn filled(self) -> bool {
        matches!(
            self,
            Glyph::FilledSquare | Glyph::FilledTriangle | Glyph::Diamond | Glyph::Block
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_coverage() {
        assert_eq!(Glyph::for_index(0), Some(Glyph::Backslash));
        assert_eq!(Glyph::for_index(10), Some(Glyph::Block));
        assert_eq!(Glyph::for_index(11), None);
    }

    #[test]
    fn test_shapes_are_distinct() {
        let mut seen = Vec::new();
        for glyph in Glyph::ALL {
            let key = (glyph.path_data(), glyph.filled());
            assert!(!seen.contains(&key), "{glyph:?} duplicates another glyph");
            seen.push(key);
        }
    }
}
