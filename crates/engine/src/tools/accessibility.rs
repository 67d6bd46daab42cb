//! Per-color luminance report.
//!
//! The verdict is a bare luminance threshold, not a contrast ratio against a
//! particular background.

use serde::Serialize;
use swatch_types::{ColorToken, Palette};

/// Accessibility verdict for one palette position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessibilityEntry {
    /// 1-based position in the palette.
    pub index: usize,
    pub color: ColorToken,
    pub luminance: f64,
    pub accessible: bool,
    pub suggestion: &'static str,
}

/// Classify every color of `palette`, in order.
pub fn accessibility_report(palette: &Palette) -> Vec<AccessibilityEntry> {
    palette
        .iter()
        .enumerate()
        .map(|(position, color)| AccessibilityEntry {
            index: position + 1,
            color: color.clone(),
            luminance: color.relative_luminance(),
            accessible: color.is_accessible(),
            suggestion: color.contrast_suggestion(),
        })
        .collect()
}
