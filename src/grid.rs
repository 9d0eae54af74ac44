use crate::error::{GridError, GridResult};
use crate::history::{EditKind, History, Snapshot};
use crate::range::{CellPos, CellRange};
use std::ops::{Deref, DerefMut};

/// Hard cap on the number of rows (paste and resize clamp to it)
pub const MAX_ROWS: usize = 10_000;

/// Hard cap on the number of columns (paste and resize clamp to it)
pub const MAX_COLS: usize = 1_000;

pub const DEFAULT_ROWS: usize = 3;
pub const DEFAULT_COLS: usize = 3;

/// Rectangular grid of text cells with selection and undo history.
///
/// The grid is never empty: it always has at least one row and one
/// column, and every row has the same length. Each mutating operation runs
/// inside a [`Batch`] and records exactly one history snapshot.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Row-major cell text
    cells: Vec<Vec<String>>,

    /// Bounding rectangle of the selected cells
    selection: Option<CellRange>,

    /// Cell receiving keyboard input
    active: CellPos,

    /// Undo/redo snapshots
    history: History,

    /// Nesting depth of open batches
    batch_depth: usize,

    /// Edit kind recorded by the outermost open batch
    batch_kind: EditKind,

    /// Set when something inside the open batch changed the grid
    dirty: bool,
}

impl Grid {
    /// Create an empty 3x3 grid
    pub fn new() -> Self {
        Self::with_size(DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// Create an empty grid, clamping the size to `1..=MAX_ROWS` x `1..=MAX_COLS`
    pub fn with_size(rows: usize, cols: usize) -> Self {
        let rows = rows.clamp(1, MAX_ROWS);
        let cols = cols.clamp(1, MAX_COLS);
        let cells = vec![vec![String::new(); cols]; rows];

        Self {
            history: History::new(Snapshot::new(cells.clone(), EditKind::Initial)),
            cells,
            selection: Some(CellRange::single(CellPos::default())),
            active: CellPos::default(),
            batch_depth: 0,
            batch_kind: EditKind::Initial,
            dirty: false,
        }
    }

    /// Create a grid holding `block`; the block is the initial history entry.
    ///
    /// Ragged rows are padded with empty cells; an empty block gives a 1x1 grid.
    pub fn from_contents(block: &[Vec<String>]) -> Self {
        let mut grid = Self::with_size(1, 1);
        grid.write_block(CellPos::default(), block);
        grid.history = History::new(Snapshot::new(grid.cells.clone(), EditKind::Initial));
        grid
    }

    // ========== Batch Scope ==========

    /// Open a batch scope.
    ///
    /// Every mutation made through the returned guard (including nested
    /// batches) is recorded as one snapshot of kind `kind` when the
    /// outermost guard is dropped. Nothing is recorded if nothing changed.
    pub fn batch(&mut self, kind: EditKind) -> Batch<'_> {
        if self.batch_depth == 0 {
            self.batch_kind = kind;
            self.dirty = false;
        }
        self.batch_depth += 1;
        Batch { grid: self }
    }

    fn touch(&mut self) {
        self.dirty = true;
    }

    fn commit_snapshot(&mut self) {
        tracing::debug!(
            kind = ?self.batch_kind,
            rows = self.rows(),
            cols = self.cols(),
            "captured grid snapshot"
        );
        let snapshot = Snapshot::new(self.cells.clone(), self.batch_kind);
        self.history.capture(snapshot);
    }

    // ========== Queries ==========

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Borrow the cell matrix
    pub fn cells(&self) -> &[Vec<String>] {
        &self.cells
    }

    /// Get the text of one cell
    pub fn cell(&self, row: usize, col: usize) -> GridResult<&str> {
        self.check_bounds(row, col)?;
        Ok(&self.cells[row][col])
    }

    /// Deep copy of the whole grid
    pub fn contents(&self) -> Vec<Vec<String>> {
        self.cells.clone()
    }

    /// Deep copy of a rectangular region
    pub fn region(&self, range: CellRange) -> GridResult<Vec<Vec<String>>> {
        self.check_bounds(range.row_max, range.col_max)?;
        Ok(self.cells[range.row_min..=range.row_max]
            .iter()
            .map(|row| row[range.col_min..=range.col_max].to_vec())
            .collect())
    }

    /// Deep copy of the selected region, empty when nothing is selected
    pub fn selected_contents(&self) -> Vec<Vec<String>> {
        self.selection
            .and_then(|range| self.region(range).ok())
            .unwrap_or_default()
    }

    fn check_bounds(&self, row: usize, col: usize) -> GridResult<()> {
        if row < self.rows() && col < self.cols() {
            Ok(())
        } else {
            Err(GridError::OutOfRange {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
        }
    }

    // ========== Selection ==========

    /// Bounding rectangle of the current selection
    pub fn selection_bounds(&self) -> Option<CellRange> {
        self.selection
    }

    pub fn active_cell(&self) -> CellPos {
        self.active
    }

    /// Select a rectangular range; the active cell moves to its upper-left corner
    pub fn select(&mut self, range: CellRange) -> GridResult<()> {
        self.check_bounds(range.row_max, range.col_max)?;
        self.selection = Some(range);
        self.active = range.top_left();
        Ok(())
    }

    /// Select an arbitrary set of cells, reduced to their bounding rectangle.
    ///
    /// An empty set clears the selection.
    pub fn select_cells<I>(&mut self, cells: I) -> GridResult<()>
    where
        I: IntoIterator<Item = CellPos>,
    {
        match CellRange::bounding(cells) {
            Some(range) => self.select(range),
            None => {
                self.selection = None;
                Ok(())
            }
        }
    }

    pub fn select_all(&mut self) {
        self.selection = Some(CellRange::new(
            CellPos::default(),
            CellPos::new(self.rows() - 1, self.cols() - 1),
        ));
    }

    /// Drop the selection (the active cell is kept)
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Move the active cell and select it
    pub fn set_active_cell(&mut self, pos: CellPos) -> GridResult<()> {
        self.select(CellRange::single(pos))
    }

    /// Move the active cell down one row, wrapping to the top of the next
    /// column and from the last column back to the first
    pub fn advance_active_cell(&mut self) {
        let mut pos = self.active;
        pos.row += 1;
        if pos.row >= self.rows() {
            pos.row = 0;
            pos.col += 1;
        }
        if pos.col >= self.cols() {
            pos.col = 0;
        }
        self.active = pos;
        self.selection = Some(CellRange::single(pos));
    }

    fn clamp_cursor(&mut self) {
        let (rows, cols) = (self.rows(), self.cols());
        self.active.row = self.active.row.min(rows - 1);
        self.active.col = self.active.col.min(cols - 1);
        self.selection = self.selection.map(|range| range.clamped(rows, cols));
    }

    // ========== Cell Content ==========

    /// Replace the text of one cell
    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<String>) -> GridResult<()> {
        self.check_bounds(row, col)?;
        let mut batch = self.batch(EditKind::SetCell);
        batch.cells[row][col] = value.into();
        batch.touch();
        Ok(())
    }

    /// Strip leading and trailing whitespace from every cell
    pub fn trim_all(&mut self) {
        let mut batch = self.batch(EditKind::Trim);
        for cell in batch.cells.iter_mut().flatten() {
            let trimmed = cell.trim();
            if trimmed.len() != cell.len() {
                *cell = trimmed.to_string();
            }
        }
        batch.touch();
    }

    /// Overwrite every cell with `text`
    pub fn fill_all(&mut self, text: &str) {
        let mut batch = self.batch(EditKind::Fill);
        for cell in batch.cells.iter_mut().flatten() {
            cell.clear();
            cell.push_str(text);
        }
        batch.touch();
    }

    /// Empty every cell, keeping the dimensions
    pub fn clear(&mut self) {
        let mut batch = self.batch(EditKind::Clear);
        batch.cells.iter_mut().flatten().for_each(String::clear);
        batch.touch();
    }

    /// Empty the grid and shrink it back to 3x3
    pub fn reset(&mut self) {
        let mut batch = self.batch(EditKind::Reset);
        batch.cells = vec![vec![String::new(); DEFAULT_COLS]; DEFAULT_ROWS];
        batch.active = CellPos::default();
        batch.selection = Some(CellRange::single(CellPos::default()));
        batch.touch();
    }

    /// Empty the selected cells; no-op without a selection
    pub fn erase_selection(&mut self) {
        let Some(range) = self.selection else {
            return;
        };
        let mut batch = self.batch(EditKind::Erase);
        for row in &mut batch.cells[range.row_min..=range.row_max] {
            row[range.col_min..=range.col_max]
                .iter_mut()
                .for_each(String::clear);
        }
        batch.touch();
    }

    // ========== Structural Edits ==========

    /// Grow or shrink to `rows` x `cols` (clamped to the caps).
    ///
    /// New cells are empty; truncated cells survive only in history.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let rows = rows.clamp(1, MAX_ROWS);
        let cols = cols.clamp(1, MAX_COLS);
        if rows == self.rows() && cols == self.cols() {
            return;
        }
        let mut batch = self.batch(EditKind::Resize);
        batch.set_size(rows, cols);
        batch.touch();
    }

    fn set_size(&mut self, rows: usize, cols: usize) {
        for row in &mut self.cells {
            row.resize(cols, String::new());
        }
        self.cells.resize(rows, vec![String::new(); cols]);
        self.clamp_cursor();
    }

    /// Insert an empty row above the selection
    pub fn insert_row_above(&mut self) {
        if let Some(range) = self.selection {
            self.insert_row_at(range.row_min);
        }
    }

    /// Insert an empty row below the selection
    pub fn insert_row_below(&mut self) {
        if let Some(range) = self.selection {
            self.insert_row_at(range.row_max + 1);
        }
    }

    /// Insert an empty column left of the selection
    pub fn insert_column_before(&mut self) {
        if let Some(range) = self.selection {
            self.insert_column_at(range.col_min);
        }
    }

    /// Insert an empty column right of the selection
    pub fn insert_column_after(&mut self) {
        if let Some(range) = self.selection {
            self.insert_column_at(range.col_max + 1);
        }
    }

    fn insert_row_at(&mut self, index: usize) {
        if self.rows() >= MAX_ROWS {
            return;
        }
        let mut batch = self.batch(EditKind::InsertRow);
        let cols = batch.cols();
        batch.cells.insert(index, vec![String::new(); cols]);

        // Keep the same cells selected when the new row lands above them
        if batch.active.row >= index {
            batch.active.row += 1;
        }
        if let Some(range) = batch.selection.as_mut() {
            if range.row_min >= index {
                range.row_min += 1;
                range.row_max += 1;
            }
        }
        batch.touch();
    }

    fn insert_column_at(&mut self, index: usize) {
        if self.cols() >= MAX_COLS {
            return;
        }
        let mut batch = self.batch(EditKind::InsertColumn);
        for row in &mut batch.cells {
            row.insert(index, String::new());
        }

        if batch.active.col >= index {
            batch.active.col += 1;
        }
        if let Some(range) = batch.selection.as_mut() {
            if range.col_min >= index {
                range.col_min += 1;
                range.col_max += 1;
            }
        }
        batch.touch();
    }

    /// Delete every row spanned by the selection
    pub fn delete_rows(&mut self) {
        let Some(range) = self.selection else {
            return;
        };
        let mut batch = self.batch(EditKind::DeleteRows);
        batch.remove_rows(range);
        batch.touch();
    }

    /// Delete every column spanned by the selection
    pub fn delete_columns(&mut self) {
        let Some(range) = self.selection else {
            return;
        };
        let mut batch = self.batch(EditKind::DeleteColumns);
        batch.remove_columns(range);
        batch.touch();
    }

    /// Delete every row and every column spanned by the selection
    pub fn delete_rows_and_columns(&mut self) {
        let Some(range) = self.selection else {
            return;
        };
        let mut batch = self.batch(EditKind::DeleteRowsAndColumns);
        batch.remove_rows(range);
        batch.remove_columns(range);
        batch.touch();
    }

    fn remove_rows(&mut self, range: CellRange) {
        let cols = self.cols();
        self.cells.drain(range.row_min..=range.row_max);
        if self.cells.is_empty() {
            self.cells.push(vec![String::new(); cols]);
        }
        self.clamp_cursor();
    }

    fn remove_columns(&mut self, range: CellRange) {
        for row in &mut self.cells {
            row.drain(range.col_min..=range.col_max);
            if row.is_empty() {
                row.push(String::new());
            }
        }
        self.clamp_cursor();
    }

    /// Swap rows and columns; the active cell returns to (0, 0)
    pub fn transpose(&mut self) {
        let (rows, cols) = (self.rows(), self.cols());
        let transposed: Vec<Vec<String>> = (0..cols)
            .map(|c| (0..rows).map(|r| self.cells[r][c].clone()).collect())
            .collect();

        let mut batch = self.batch(EditKind::Transpose);
        batch.cells = transposed;
        batch.active = CellPos::default();
        batch.selection = Some(CellRange::single(CellPos::default()));
        batch.touch();
    }

    // ========== Paste ==========

    /// Write `block` starting at `origin`, growing the grid as needed.
    ///
    /// Growth stops at `MAX_ROWS` x `MAX_COLS`; anything beyond is dropped.
    pub fn paste_block(&mut self, origin: CellPos, block: &[Vec<String>]) -> GridResult<()> {
        self.check_bounds(origin.row, origin.col)?;
        if block.is_empty() {
            return Ok(());
        }
        let mut batch = self.batch(EditKind::Paste);
        batch.write_block(origin, block);
        batch.touch();
        Ok(())
    }

    /// Paste at the upper-left corner of the selection; no-op without one
    pub fn paste_at_selection(&mut self, block: &[Vec<String>]) {
        let Some(range) = self.selection else {
            return;
        };
        if block.is_empty() {
            return;
        }
        let mut batch = self.batch(EditKind::Paste);
        batch.write_block(range.top_left(), block);
        batch.touch();
    }

    /// Replace the whole grid with `block` as a single history entry
    pub fn replace_contents(&mut self, block: &[Vec<String>]) {
        let mut batch = self.batch(EditKind::Replace);
        batch.cells = vec![vec![String::new()]];
        batch.active = CellPos::default();
        batch.selection = Some(CellRange::single(CellPos::default()));
        batch.write_block(CellPos::default(), block);
        batch.touch();
    }

    fn write_block(&mut self, origin: CellPos, block: &[Vec<String>]) {
        let block_rows = block.len();
        let block_cols = block.iter().map(Vec::len).max().unwrap_or(0);

        let row_end = (origin.row + block_rows).min(MAX_ROWS);
        let col_end = (origin.col + block_cols).min(MAX_COLS);
        if row_end > self.rows() || col_end > self.cols() {
            let rows = row_end.max(self.rows());
            let cols = col_end.max(self.cols());
            self.set_size(rows, cols);
        }

        let row_span = row_end.saturating_sub(origin.row);
        let col_span = col_end.saturating_sub(origin.col);
        for (i, source) in block.iter().take(row_span).enumerate() {
            let target = &mut self.cells[origin.row + i];
            for (j, value) in source.iter().take(col_span).enumerate() {
                target[origin.col + j].clone_from(value);
            }
        }
    }

    // ========== History ==========

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restore the previous snapshot; returns false when already at the start
    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let cells = self.history.undo().cells.clone();
        tracing::debug!(cursor = self.history.cursor(), "undo");
        self.load_snapshot(cells);
        true
    }

    /// Restore the next snapshot; returns false when already at the end
    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let cells = self.history.redo().cells.clone();
        tracing::debug!(cursor = self.history.cursor(), "redo");
        self.load_snapshot(cells);
        true
    }

    /// History replay: swap in stored cells without recording a snapshot
    fn load_snapshot(&mut self, cells: Vec<Vec<String>>) {
        self.cells = cells;
        self.clamp_cursor();
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

/// Scope guard returned by [`Grid::batch`].
///
/// Dereferences to the grid; dropping the outermost guard records one
/// snapshot if anything changed inside the scope.
pub struct Batch<'a> {
    grid: &'a mut Grid,
}

impl Deref for Batch<'_> {
    type Target = Grid;

    fn deref(&self) -> &Grid {
        self.grid
    }
}

impl DerefMut for Batch<'_> {
    fn deref_mut(&mut self) -> &mut Grid {
        self.grid
    }
}

impl Drop for Batch<'_> {
    fn drop(&mut self) {
        self.grid.batch_depth -= 1;
        if self.grid.batch_depth == 0 && self.grid.dirty {
            self.grid.dirty = false;
            self.grid.commit_snapshot();
        }
    }
}
