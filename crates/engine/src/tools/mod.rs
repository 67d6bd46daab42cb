//! Palette inspection tools: accessibility, gradients and tonal variations.

pub mod accessibility;
pub mod gradients;
pub mod variations;

pub use accessibility::{AccessibilityEntry, accessibility_report};
pub use gradients::{GRADIENT_ANGLE_DEGREES, Gradient, gradients};
pub use variations::{Variations, variations};
