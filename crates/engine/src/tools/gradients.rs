//! Pairwise gradients that walk a palette and close the cycle.

use serde::Serialize;
use swatch_types::{ColorToken, Palette};

/// Angle used for every generated gradient.
pub const GRADIENT_ANGLE_DEGREES: u16 = 90;

/// Linear gradient between two palette colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub from: ColorToken,
    pub to: ColorToken,
    pub angle: u16,
}

impl Gradient {
    /// CSS value, e.g. `linear-gradient(90deg, #ff0000, #00ff00)`.
    pub fn to_css(&self) -> String {
        format!("linear-gradient({}deg, {}, {})", self.angle, self.from, self.to)
    }
}

/// One gradient per color: each color to the next, and the last back to the first.
///
/// A single-color palette yields one gradient from the color to itself.
pub fn gradients(palette: &Palette) -> Vec<Gradient> {
    let colors = palette.colors();
    colors
        .iter()
        .enumerate()
        .map(|(index, from)| Gradient {
            from: from.clone(),
            to: colors[(index + 1) % colors.len()].clone(),
            angle: GRADIENT_ANGLE_DEGREES,
        })
        .collect()
}
