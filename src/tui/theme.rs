//! Severity-keyed color tokens for dashboard rendering.
//!
//! Rendering itself is plain text; the theme decides whether severity
//! labels and box borders carry ANSI color. `Theme::plain()` disables
//! color entirely, which is also what tests assert against.

use std::env;

use crossterm::style::{Color, Stylize};

use crate::pool::types::Severity;

/// Color output mode, honoring `NO_COLOR` and `--no-color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Emit ANSI color sequences.
    Enabled,
    /// Plain text only.
    Disabled,
}

/// Render-facing theme: maps severities to colors and paints text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: ColorMode,
}

impl Theme {
    /// Theme without any color output.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            color: ColorMode::Disabled,
        }
    }

    /// Theme with ANSI color output.
    #[must_use]
    pub const fn ansi() -> Self {
        Self {
            color: ColorMode::Enabled,
        }
    }

    /// Pick the mode from the environment (`NO_COLOR` disables color).
    #[must_use]
    pub fn from_environment() -> Self {
        if env::var_os("NO_COLOR").is_some() {
            Self::plain()
        } else {
            Self::ansi()
        }
    }

    /// True when color output is disabled.
    #[must_use]
    pub const fn no_color(self) -> bool {
        matches!(self.color, ColorMode::Disabled)
    }

    /// Color assigned to a severity level.
    #[must_use]
    pub const fn severity_color(severity: Severity) -> Color {
        match severity {
            Severity::Online => Color::Green,
            Severity::Degraded => Color::Yellow,
            Severity::Faulted => Color::Red,
        }
    }

    /// Paint arbitrary text with a color, or pass it through unchanged in
    /// plain mode.
    #[must_use]
    pub fn paint(self, color: Color, text: &str) -> String {
        match self.color {
            ColorMode::Disabled => text.to_string(),
            ColorMode::Enabled => format!("{}", text.with(color)),
        }
    }

    /// Severity display token painted in the severity's color.
    #[must_use]
    pub fn severity_label(self, severity: Severity) -> String {
        self.paint(Self::severity_color(severity), severity.as_label())
    }

    /// Paint a box-border fragment with the severity color of the node it
    /// encloses.
    #[must_use]
    pub fn border(self, severity: Severity, text: &str) -> String {
        self.paint(Self::severity_color(severity), text)
    }
}
