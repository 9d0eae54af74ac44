// Helper functions to build test grids and matrices

#![allow(dead_code)]

use latex_grid_editor::{CellPos, CellRange, Grid};

/// Build a matrix from string literals
pub fn matrix(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect()
}

/// Matrix whose cells name their own position, e.g. "r1c2"
pub fn labelled(rows: usize, cols: usize) -> Vec<Vec<String>> {
    (0..rows)
        .map(|r| (0..cols).map(|c| format!("r{}c{}", r, c)).collect())
        .collect()
}

/// The 2x2 matrix used by the export scenarios
pub fn abcd() -> Vec<Vec<String>> {
    matrix(&[&["a", "b"], &["c", "d"]])
}

/// A grid with labelled contents and the given rectangle selected
pub fn grid_with_selection(
    rows: usize,
    cols: usize,
    from: (usize, usize),
    to: (usize, usize),
) -> Grid {
    let mut grid = Grid::from_contents(&labelled(rows, cols));
    grid.select(CellRange::new(
        CellPos::new(from.0, from.1),
        CellPos::new(to.0, to.1),
    ))
    .unwrap();
    grid
}

/// A block with `rows` single-cell rows, for overflow tests
pub fn tall_block(rows: usize) -> Vec<Vec<String>> {
    (0..rows).map(|r| vec![r.to_string()]).collect()
}
