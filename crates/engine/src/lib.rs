//! # Swatch Engine
//!
//! Everything between a raw service response and what a user sees:
//!
//! - **`generation`**: the request lifecycle. Submissions are single-flight
//!   by epoch, so only the most recent submission may update the result.
//! - **`tools`**: accessibility, gradient and variation views of a palette.
//! - **`export`**: CSS, SCSS and Tailwind renderings.
//!
//! ## Usage
//!
//! ```rust
//! use swatch_engine::{css_variables, gradients};
//! use swatch_types::Palette;
//!
//! let palette = Palette::from_raw(["#264653", "#2a9d8f"])?;
//! assert_eq!(css_variables(&palette), "--color-1: #264653;\n--color-2: #2a9d8f;");
//! assert_eq!(gradients(&palette).len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod export;
pub mod generation;
pub mod tools;

pub use export::{ExportFormat, ParseExportFormatError, css_variables, export_all, scss_variables, tailwind_config};
pub use generation::{
    GenerationError, GenerationLifecycle, GenerationPhase, GenerationSnapshot, GenerationTicket, INVALID_RESPONSE_MESSAGE, PaletteGenerator,
    parse_palette_response,
};
pub use tools::{AccessibilityEntry, GRADIENT_ANGLE_DEGREES, Gradient, Variations, accessibility_report, gradients, variations};
