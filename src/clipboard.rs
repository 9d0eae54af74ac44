//! Text clipboard access.

use anyhow::{Context, Result};

/// Opaque text channel the editor copies to and pastes from
pub trait ClipboardChannel {
    fn get_text(&mut self) -> Result<String>;
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard via arboard.
///
/// A fresh handle is opened per call so a missing clipboard (headless
/// sessions) only fails the copy or paste that needed it.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardChannel for SystemClipboard {
    fn get_text(&mut self) -> Result<String> {
        let mut clipboard = arboard::Clipboard::new().context("Failed to open clipboard")?;
        clipboard
            .get_text()
            .context("Failed to read text from clipboard")
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Failed to open clipboard")?;
        clipboard
            .set_text(text)
            .context("Failed to write text to clipboard")?;
        Ok(())
    }
}

/// Process-local clipboard for tests and headless use
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    text: String,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl ClipboardChannel for MemoryClipboard {
    fn get_text(&mut self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.text = text.to_string();
        Ok(())
    }
}
