//! Shared type definitions for Swatch.
//!
//! - [`color`]: hex color tokens, channel parsing, luminance and the
//!   decimal `rgb()` value kind used by variations.
//! - [`palette`]: ordered palettes and saved palette records.
//! - [`generation`]: styles, generation requests and results.

pub mod color;
pub mod generation;
pub mod palette;

pub use color::{ColorToken, InvalidColor, RgbColor, normalize};
pub use generation::{EmptyPrompt, GeneratedPalette, GenerationRequest, ParseStyleError, Style};
pub use palette::{Palette, PaletteError, SavedPalette};
