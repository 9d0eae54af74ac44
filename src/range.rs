use serde::{Deserialize, Serialize};

/// A single cell coordinate (zero-based)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Inclusive rectangular block of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub row_min: usize,
    pub row_max: usize,
    pub col_min: usize,
    pub col_max: usize,
}

impl CellRange {
    /// Create a range from two corners given in any order
    pub fn new(a: CellPos, b: CellPos) -> Self {
        Self {
            row_min: a.row.min(b.row),
            row_max: a.row.max(b.row),
            col_min: a.col.min(b.col),
            col_max: a.col.max(b.col),
        }
    }

    /// A range covering exactly one cell
    pub fn single(pos: CellPos) -> Self {
        Self::new(pos, pos)
    }

    /// Smallest rectangle enclosing every given coordinate.
    ///
    /// Returns `None` for an empty iterator. A ragged selection is always
    /// reduced to its enclosing rectangle.
    pub fn bounding<I>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = CellPos>,
    {
        let mut iter = cells.into_iter();
        let first = iter.next()?;
        let mut range = Self::single(first);

        for pos in iter {
            range.row_min = range.row_min.min(pos.row);
            range.row_max = range.row_max.max(pos.row);
            range.col_min = range.col_min.min(pos.col);
            range.col_max = range.col_max.max(pos.col);
        }

        Some(range)
    }

    /// Upper-left corner
    pub fn top_left(&self) -> CellPos {
        CellPos::new(self.row_min, self.col_min)
    }

    /// Lower-right corner
    pub fn bottom_right(&self) -> CellPos {
        CellPos::new(self.row_max, self.col_max)
    }

    pub fn row_count(&self) -> usize {
        self.row_max - self.row_min + 1
    }

    pub fn col_count(&self) -> usize {
        self.col_max - self.col_min + 1
    }

    /// Check if this range contains a cell
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row >= self.row_min
            && pos.row <= self.row_max
            && pos.col >= self.col_min
            && pos.col <= self.col_max
    }

    /// Check if the whole range fits inside a `rows` x `cols` grid
    pub fn fits(&self, rows: usize, cols: usize) -> bool {
        self.row_max < rows && self.col_max < cols
    }

    /// Shrink the range so it lies inside a `rows` x `cols` grid
    pub fn clamped(&self, rows: usize, cols: usize) -> Self {
        let last_row = rows.saturating_sub(1);
        let last_col = cols.saturating_sub(1);
        Self {
            row_min: self.row_min.min(last_row),
            row_max: self.row_max.min(last_row),
            col_min: self.col_min.min(last_col),
            col_max: self.col_max.min(last_col),
        }
    }
}
