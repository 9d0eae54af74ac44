//! Editor session: the grid plus everything a command needs around it.
//!
//! Both front ends (GUI and CLI) drive the grid through this type, so
//! clipboard, file and export behavior is defined once.

use crate::clipboard::ClipboardChannel;
use crate::codec;
use crate::config::EditorConfig;
use crate::export::{self, ExportFormat, ExportPreferences};
use crate::grid::Grid;
use crate::persistence;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct EditorSession {
    grid: Grid,
    clipboard: Box<dyn ClipboardChannel>,
    preferences: ExportPreferences,
    current_path: Option<PathBuf>,
}

impl EditorSession {
    /// Start with an empty grid sized from `config`
    pub fn new(clipboard: Box<dyn ClipboardChannel>, config: &EditorConfig) -> Self {
        Self {
            grid: Grid::with_size(config.initial_rows, config.initial_cols),
            clipboard,
            preferences: config.export,
            current_path: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn preferences(&self) -> &ExportPreferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut ExportPreferences {
        &mut self.preferences
    }

    /// File the grid was last opened from or saved to
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    // ========== Export / Clipboard ==========

    /// Render the whole grid without touching the clipboard
    pub fn export_text(&self, format: &ExportFormat) -> String {
        export::render(self.grid.cells(), format)
    }

    /// LaTeX for the whole grid using the current preferences
    pub fn markup_text(&self) -> String {
        export::render_markup(self.grid.cells(), &self.preferences.format_options())
    }

    /// Copy the whole grid as tab-delimited text
    pub fn copy_all(&mut self) -> Result<()> {
        let text = codec::to_tab_delimited(self.grid.cells());
        self.clipboard.set_text(&text)
    }

    /// Copy the selected region as tab-delimited text.
    ///
    /// Returns false (and leaves the clipboard alone) without a selection.
    pub fn copy_selection(&mut self) -> Result<bool> {
        let block = self.grid.selected_contents();
        if block.is_empty() {
            return Ok(false);
        }
        self.clipboard.set_text(&codec::to_tab_delimited(&block))?;
        Ok(true)
    }

    /// Copy the grid as LaTeX using the current preferences
    pub fn copy_markup(&mut self) -> Result<()> {
        let text = self.markup_text();
        self.clipboard.set_text(&text)?;
        tracing::info!(
            grid_type = %self.preferences.grid_type,
            "copied LaTeX to clipboard"
        );
        Ok(())
    }

    /// Copy the grid in any export format
    pub fn copy_as(&mut self, format: &ExportFormat) -> Result<()> {
        let text = self.export_text(format);
        self.clipboard.set_text(&text)?;
        tracing::info!("copied grid as {}", format.description());
        Ok(())
    }

    /// Paste tab-delimited clipboard text at the selection.
    ///
    /// Returns false when nothing was pasted (empty clipboard or no selection).
    pub fn paste(&mut self) -> Result<bool> {
        let text = self.clipboard.get_text()?;
        let block = codec::from_tab_delimited(&text);
        if block.is_empty() || self.grid.selection_bounds().is_none() {
            return Ok(false);
        }
        self.grid.paste_at_selection(&block);
        Ok(true)
    }

    /// Replace the grid with a LaTeX table read from the clipboard.
    ///
    /// Returns false when the clipboard holds no table rows.
    pub fn paste_markup(&mut self) -> Result<bool> {
        let text = self.clipboard.get_text()?;
        let block = codec::parse_markup_table(&text);
        if block.is_empty() {
            tracing::warn!("clipboard text contains no table rows");
            return Ok(false);
        }
        self.grid.replace_contents(&block);
        Ok(true)
    }

    // ========== Files ==========

    /// Replace the grid with the contents of a grid file.
    ///
    /// On failure the open grid is left untouched.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        let cells = persistence::load_grid(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        self.grid.replace_contents(&cells);
        self.current_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Save the grid to `path` and remember it for [`Self::save_current`]
    pub fn save(&mut self, path: &Path) -> Result<()> {
        persistence::save_grid(path, self.grid.cells())
            .with_context(|| format!("Failed to save {}", path.display()))?;
        self.current_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Save to the file last opened or saved
    pub fn save_current(&mut self) -> Result<()> {
        let path = self
            .current_path
            .clone()
            .context("No file chosen yet; use save with a path")?;
        self.save(&path)
    }

    // ========== History ==========

    pub fn undo(&mut self) -> bool {
        self.grid.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.grid.redo()
    }

    /// Reset to an empty 3x3 grid and forget the current file
    pub fn new_grid(&mut self) {
        self.grid.reset();
        self.current_path = None;
    }
}
