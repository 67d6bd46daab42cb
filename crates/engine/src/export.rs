//! Text exports of a palette.
//!
//! Each format emits one declaration per color, named `color-{i}` with `i`
//! starting at 1, joined by newlines without a trailing separator.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use swatch_types::Palette;
use thiserror::Error;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// CSS custom properties: `--color-1: #aabbcc;`
    Css,
    /// SCSS variables: `$color-1: #aabbcc;`
    Scss,
    /// Tailwind config fragment: `'color-1': '#aabbcc',`
    Tailwind,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Css, ExportFormat::Scss, ExportFormat::Tailwind];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Tailwind => "tailwind",
        }
    }

    /// Heading shown above the rendered block.
    pub fn label(self) -> &'static str {
        match self {
            Self::Css => "CSS Variables",
            Self::Scss => "SCSS Variables",
            Self::Tailwind => "Tailwind Config",
        }
    }

    /// Render `palette` in this format.
    pub fn render(self, palette: &Palette) -> String {
        palette
            .iter()
            .enumerate()
            .map(|(position, color)| {
                let index = position + 1;
                match self {
                    Self::Css => format!("--color-{index}: {color};"),
                    Self::Scss => format!("$color-{index}: {color};"),
                    Self::Tailwind => format!("'color-{index}': '{color}',"),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ParseExportFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(Self::Css),
            "scss" | "sass" => Ok(Self::Scss),
            "tailwind" => Ok(Self::Tailwind),
            other => Err(ParseExportFormatError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown export format '{0}'; expected css, scss or tailwind")]
pub struct ParseExportFormatError(pub String);

/// `--color-{i}: {token};` per color.
pub fn css_variables(palette: &Palette) -> String {
    ExportFormat::Css.render(palette)
}

/// `$color-{i}: {token};` per color.
pub fn scss_variables(palette: &Palette) -> String {
    ExportFormat::Scss.render(palette)
}

/// `'color-{i}': '{token}',` per color.
pub fn tailwind_config(palette: &Palette) -> String {
    ExportFormat::Tailwind.render(palette)
}

/// Every format, in [`ExportFormat::ALL`] order.
pub fn export_all(palette: &Palette) -> Vec<(ExportFormat, String)> {
    ExportFormat::ALL.into_iter().map(|format| (format, format.render(palette))).collect()
}
