//! Tonal variations of a single color.
//!
//! Each variation offsets the raw channels by a fixed delta and clamps to
//! `[0, 255]`. "Saturated" and "desaturated" are simple warm/cool channel
//! pushes, not HSL saturation transforms.

use serde::Serialize;
use swatch_types::{ColorToken, RgbColor};

/// Channel offset applied by [`Variations::lighter`] and [`Variations::darker`].
pub const LIGHTNESS_DELTA: i16 = 40;
/// Channel offset applied by [`Variations::saturated`] and [`Variations::desaturated`].
pub const SATURATION_DELTA: i16 = 20;

/// Four derived tones of a base color, rendered as `rgb()` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Variations {
    /// Every channel +40.
    pub lighter: RgbColor,
    /// Every channel −40.
    pub darker: RgbColor,
    /// Red and green +20, blue −20.
    pub saturated: RgbColor,
    /// Red and green −20, blue +20.
    pub desaturated: RgbColor,
}

/// Derive the four tonal variations of `token`.
pub fn variations(token: &ColorToken) -> Variations {
    let base = token.to_rgb();
    Variations {
        lighter: base.offset(LIGHTNESS_DELTA, LIGHTNESS_DELTA, LIGHTNESS_DELTA),
        darker: base.offset(-LIGHTNESS_DELTA, -LIGHTNESS_DELTA, -LIGHTNESS_DELTA),
        saturated: base.offset(SATURATION_DELTA, SATURATION_DELTA, -SATURATION_DELTA),
        desaturated: base.offset(-SATURATION_DELTA, -SATURATION_DELTA, SATURATION_DELTA),
    }
}
