//! Single-pass neighbourhood smoothing of index grids.
//!
//! A cell whose index does not occur anywhere in its 8-connected
//! neighbourhood is an isolated stitch: a lone thread change that is tedious
//! to stitch and usually quantization noise. Each such cell is replaced by
//! the most frequent index among its neighbours.
//!
//! Neighbourhoods are clipped at the border, so edge cells have 5 neighbours
//! and corner cells 3. Cells are visited column by column (left to right,
//! top to bottom within a column) and rewritten in place, so a cell sees the
//! replacements already made to neighbours visited before it. A cell whose
//! index occurs around it at the time it is visited is never touched.
//!
//! There is exactly one pass.

use super::IndexGrid;

/// Indices of the cells around `(x, y)`, clipped at the grid border.
///
/// Order is row by row from the row above to the row below, left to right
/// within a row, skipping the centre cell. This order decides ties in
/// [`clean`].
pub fn neighbors(grid: &IndexGrid, x: usize, y: usize) -> impl Iterator<Item = usize> + '_ {
    let rows = y.saturating_sub(1)..(y + 2).min(grid.height());
    let cols = x.saturating_sub(1)..(x + 2).min(grid.width());
    rows.flat_map(move |ny| cols.clone().map(move |nx| (nx, ny)))
        .filter(move |&(nx, ny)| !(nx == x && ny == y))
        .map(move |(nx, ny)| grid.get(nx, ny))
}

/// Most frequent value; the first to reach the highest count wins.
fn mode(values: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for &v in values {
        let count = values.iter().filter(|&&o| o == v).count();
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((v, count));
        }
    }
    best.map(|(v, _)| v)
}

/// Replace isolated cells in place. Returns the number of cells changed.
///
/// The grid's previous contents are not kept; callers that need the
/// unsmoothed chart must clone it first.
pub fn clean_in_place(grid: &mut IndexGrid) -> usize {
    let (width, height) = (grid.width(), grid.height());
    let mut changed = 0;
    let mut around = Vec::with_capacity(8);

    for x in 0..width {
        for y in 0..height {
            around.clear();
            around.extend(neighbors(grid, x, y));

            if around.contains(&grid.get(x, y)) {
                continue;
            }
            // A 1x1 grid has no neighbours; leave it alone.
            if let Some(replacement) = mode(&around) {
                grid.set(x, y, replacement);
                changed += 1;
            }
        }
    }

    tracing::debug!(changed, width, height, "Smoothed isolated cells");
    changed
}

/// Take ownership of `grid`, remove isolated cells and hand it back.
///
/// # Example
///
/// ```
/// use stitch_pattern::{clean, IndexGrid};
///
/// let grid = IndexGrid::from_rows(&[vec![1, 1, 1], vec![1, 2, 1], vec![1, 1, 1]]);
/// let cleaned = clean(grid);
/// assert_eq!(cleaned.get(1, 1), 1);
/// ```
pub fn clean(mut grid: IndexGrid) -> IndexGrid {
    clean_in_place(&mut grid);
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_neighbor_counts() {
        let grid = IndexGrid::new((0..12).collect(), 4, 3);
        assert_eq!(neighbors(&grid, 0, 0).count(), 3);
        assert_eq!(neighbors(&grid, 1, 0).count(), 5);
        assert_eq!(neighbors(&grid, 1, 1).count(), 8);
        assert_eq!(neighbors(&grid, 3, 2).count(), 3);
    }

    #[test]
    fn test_neighbor_order_is_row_major() {
        let grid = IndexGrid::new((0..9).collect(), 3, 3);
        let around: Vec<usize> = neighbors(&grid, 1, 1).collect();
        assert_eq!(around, vec![0, 1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_isolated_center_replaced() {
        let grid = IndexGrid::from_rows(&[vec![1, 1, 1], vec![1, 2, 1], vec![1, 1, 1]]);
        let cleaned = clean(grid);
        assert_eq!(cleaned, IndexGrid::new(vec![1; 9], 3, 3));
    }

    #[test]
    fn test_cell_present_in_neighborhood_untouched() {
        let rows = vec![vec![0, 0, 1], vec![0, 1, 1], vec![2, 2, 1]];
        let grid = IndexGrid::from_rows(&rows);
        let mut cleaned = grid.clone();
        assert_eq!(clean_in_place(&mut cleaned), 0);
        assert_eq!(cleaned, grid);
    }

    #[test]
    fn test_mode_tie_uses_scan_order() {
        // Neighbours of the centre in scan order: 3,3,4,4,4,3,5,5 -> 3 and 4
        // both appear three times; 3 is reached first.
        let grid = IndexGrid::from_rows(&[vec![3, 3, 4], vec![4, 9, 4], vec![3, 5, 5]]);
        let cleaned = clean(grid);
        assert_eq!(cleaned.get(1, 1), 3);
    }

    #[test]
    fn test_corner_uses_clipped_neighborhood() {
        let grid = IndexGrid::from_rows(&[vec![7, 2, 2], vec![2, 2, 2]]);
        let cleaned = clean(grid);
        assert_eq!(cleaned.get(0, 0), 2);
    }

    #[test]
    fn test_adjacent_pair_kept() {
        // Each 8 has the other as a neighbour.
        let rows = vec![vec![1, 1, 1, 1], vec![1, 8, 8, 1], vec![1, 1, 1, 1]];
        let grid = IndexGrid::from_rows(&rows);
        assert_eq!(clean(grid.clone()), grid);
    }

    #[test]
    fn test_replacements_seen_by_later_cells() {
        // 0 at the top becomes 1, so the 0 further down no longer has a
        // matching neighbour when its turn comes.
        let grid = IndexGrid::from_rows(&[vec![0], vec![1], vec![0], vec![1]]);
        let mut cleaned = grid.clone();
        assert_eq!(clean_in_place(&mut cleaned), 2);
        assert_eq!(cleaned.cells(), &[1, 1, 1, 1]);
    }

    #[test]
    fn test_column_major_scan() {
        // (1,1) is visited before (2,0); once it turns into 1, (2,0) keeps
        // its matching neighbour. A row-major scan would reach (2,0) first
        // and rewrite it to 0.
        let grid = IndexGrid::from_rows(&[vec![1, 0, 1], vec![1, 2, 0]]);
        let cleaned = clean(grid);
        assert_eq!(
            cleaned,
            IndexGrid::from_rows(&[vec![1, 0, 1], vec![1, 1, 0]])
        );
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        // A rewritten cell takes a value its neighbours already have, so one
        // in-place pass leaves nothing isolated.
        let grid = IndexGrid::from_rows(&[vec![1, 0, 1], vec![1, 2, 0], vec![3, 0, 2]]);
        let mut once = clean(grid);
        let snapshot = once.clone();
        assert_eq!(clean_in_place(&mut once), 0);
        assert_eq!(once, snapshot);
    }

    #[test]
    fn test_single_cell_grid() {
        let grid = IndexGrid::new(vec![5], 1, 1);
        assert_eq!(clean(grid).get(0, 0), 5);
    }
}
