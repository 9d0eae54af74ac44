use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full copy of the grid contents at one point in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cells: Vec<Vec<String>>,
    pub kind: EditKind,
    pub captured_at: DateTime<Utc>,
}

impl Snapshot {
    /// Create a snapshot stamped with the current time
    pub fn new(cells: Vec<Vec<String>>, kind: EditKind) -> Self {
        Self {
            cells,
            kind,
            captured_at: Utc::now(),
        }
    }

    /// Create a snapshot with a specific timestamp
    pub fn with_timestamp(
        cells: Vec<Vec<String>>,
        kind: EditKind,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            cells,
            kind,
            captured_at,
        }
    }
}

/// The edit that produced a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    Initial,
    SetCell,
    Resize,
    InsertRow,
    InsertColumn,
    DeleteRows,
    DeleteColumns,
    DeleteRowsAndColumns,
    Transpose,
    Trim,
    Fill,
    Clear,
    Reset,
    Erase,
    Paste,
    Replace,
}

/// Linear undo/redo history of grid snapshots.
///
/// The snapshot list is never empty and `cursor` always indexes into it.
/// Capturing after an undo prunes the redo branch.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    cursor: usize,
}

impl History {
    /// Start a history whose first entry is `initial`
    pub fn new(initial: Snapshot) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    /// Append a snapshot, discarding everything after the cursor
    pub fn capture(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
    }

    /// Step back one entry (stays at 0) and return the entry at the cursor
    pub fn undo(&mut self) -> &Snapshot {
        self.cursor = self.cursor.saturating_sub(1);
        &self.snapshots[self.cursor]
    }

    /// Step forward one entry (stays at the end) and return the entry at the cursor
    pub fn redo(&mut self) -> &Snapshot {
        self.cursor = (self.cursor + 1).min(self.snapshots.len() - 1);
        &self.snapshots[self.cursor]
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}
