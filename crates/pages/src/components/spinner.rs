//! Loading indicator.

use std::fmt;

/// Spinner size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpinnerSize {
    /// Small.
    Sm,
    /// Medium.
    #[default]
    Md,
    /// Large.
    Lg,
    /// Extra large.
    Xl,
}

impl SpinnerSize {
    const fn glyph(&self) -> &'static str {
        match self {
            Self::Sm => "(.)",
            Self::Md => "(..)",
            Self::Lg => "(...)",
            Self::Xl => "(....)",
        }
    }
}

/// A loading indicator with optional text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spinner {
    size: SpinnerSize,
    text: Option<String>,
}

impl Default for Spinner {
    fn default() -> Self {
        Self { size: SpinnerSize::Md, text: Some("Loading...".to_string()) }
    }
}

impl Spinner {
    /// Spinner of `size` showing `text`.
    pub fn new(size: SpinnerSize, text: impl Into<String>) -> Self {
        Self { size, text: Some(text.into()) }
    }

    /// Spinner without text.
    pub const fn bare(size: SpinnerSize) -> Self {
        Self { size, text: None }
    }
}

impl fmt::Display for Spinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{} {text}", self.size.glyph()),
            None => f.write_str(self.size.glyph()),
        }
    }
}
