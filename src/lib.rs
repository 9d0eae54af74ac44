// LaTeX Grid Editor - Core Library

pub mod clipboard;
pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod history;
pub mod logging;
pub mod persistence;
pub mod range;
pub mod session;
pub mod ui;

// Re-export main types for convenience
pub use clipboard::{ClipboardChannel, MemoryClipboard, SystemClipboard};
pub use config::EditorConfig;
pub use error::{GridError, GridResult};
pub use export::{ExportFormat, ExportPreferences, FormatOptions, GridType};
pub use grid::{Batch, Grid, MAX_COLS, MAX_ROWS};
pub use history::{EditKind, History, Snapshot};
pub use persistence::GridFile;
pub use range::{CellPos, CellRange};
pub use session::EditorSession;
pub use ui::GridEditorApp;
