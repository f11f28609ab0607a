//! Modal dialog.

use std::fmt;

/// A titled dialog that renders only while open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modal {
    title: String,
    body: String,
    open: bool,
}

impl Modal {
    /// Closed modal with `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), body: String::new(), open: false }
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Shows the modal.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hides the modal.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether the modal is shown.
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl fmt::Display for Modal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.open {
            return Ok(());
        }
        let width = self.body.lines().map(str::len).chain([self.title.len()]).max().unwrap_or(0);
        let rule = "=".repeat(width + 4);
        writeln!(f, "{rule}")?;
        writeln!(f, "| {:<width$} |", self.title)?;
        writeln!(f, "|{}|", "-".repeat(width + 2))?;
        for line in self.body.lines() {
            writeln!(f, "| {line:<width$} |")?;
        }
        write!(f, "{rule}")
    }
}
