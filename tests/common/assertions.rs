//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use resvg::usvg;

/// Parse an SVG document, failing the test if it is not valid
pub fn parse_svg(svg: &str) -> usvg::Tree {
    usvg::Tree::from_str(svg, &usvg::Options::default())
        .unwrap_or_else(|e| panic!("Invalid SVG: {e}\n{svg}"))
}

/// Assert the document parses and has the expected canvas size
pub fn assert_svg_size(svg: &str, width: f32, height: f32) {
    let tree = parse_svg(svg);
    assert_eq!(
        (tree.size().width(), tree.size().height()),
        (width, height),
        "Unexpected canvas size"
    );
}

/// Number of occurrences of `needle` in `haystack`
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// `rgb(..)` fill values of the cell rectangles, in document order
pub fn cell_fills(svg: &str) -> Vec<String> {
    svg.lines()
        .filter(|l| l.starts_with("<rect"))
        .filter_map(|l| {
            let start = l.find("fill:rgb(")? + "fill:".len();
            let end = start + l[start..].find(')')? + 1;
            Some(l[start..end].to_string())
        })
        .collect()
}
