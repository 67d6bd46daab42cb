//! Color model shared by the generator, the export formatter and the store.
//!
//! Two textual color representations live side by side:
//!
//! - [`ColorToken`]: the normalized `#rrggbb` hex form returned by the
//!   generation service and carried through palettes, exports and saved
//!   records.
//! - [`RgbColor`]: a decimal `rgb(r, g, b)` triple produced by tonal
//!   variations. It is never converted back into a token.
//!
//! Luminance here is a plain weighted sum over raw sRGB channel values. It is
//! not gamma corrected and is not a WCAG contrast ratio.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Luminance above which a color is reported as having good contrast.
pub const ACCESSIBLE_LUMINANCE_THRESHOLD: f64 = 0.5;

/// Suggestion shown for colors above the luminance threshold.
pub const GOOD_CONTRAST_SUGGESTION: &str = "Good contrast";

/// Suggestion shown for colors at or below the luminance threshold.
pub const LIGHTER_SHADE_SUGGESTION: &str = "Consider using a lighter shade";

const RED_WEIGHT: f64 = 0.2126;
const GREEN_WEIGHT: f64 = 0.7152;
const BLUE_WEIGHT: f64 = 0.0722;

static HEX_COLOR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color regex should compile"));

/// Characters stripped from both ends of a raw token before validation.
const WRAPPING_QUOTES: &[char] = &['"', '\''];

/// Raised when a raw string does not normalize to a `#rrggbb` token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color token '{raw}'; expected '#' followed by 6 hex digits")]
pub struct InvalidColor {
    /// The raw input as received, before quote stripping.
    pub raw: String,
}

/// A validated `#rrggbb` color.
///
/// Tokens can only be built through [`normalize`] (serde deserialization goes
/// through the same path), so every other operation on a token can assume the
/// hex digits are well formed. The original letter case is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorToken {
    text: String,
    channels: [u8; 3],
}

impl ColorToken {
    /// The normalized token text, e.g. `#a1b2c3`.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Red, green and blue channels in `[0, 255]`.
    pub fn to_channels(&self) -> (u8, u8, u8) {
        let [r, g, b] = self.channels;
        (r, g, b)
    }

    /// Channels as an [`RgbColor`] value.
    pub fn to_rgb(&self) -> RgbColor {
        let (r, g, b) = self.to_channels();
        RgbColor { r, g, b }
    }

    /// Weighted sum `0.2126 R + 0.7152 G + 0.0722 B` over channels scaled to `[0, 1]`.
    pub fn relative_luminance(&self) -> f64 {
        let (r, g, b) = self.to_channels();
        RED_WEIGHT * f64::from(r) / 255.0 + GREEN_WEIGHT * f64::from(g) / 255.0 + BLUE_WEIGHT * f64::from(b) / 255.0
    }

    /// Coarse contrast heuristic: `true` when luminance exceeds the threshold.
    pub fn is_accessible(&self) -> bool {
        meets_luminance_threshold(self.relative_luminance())
    }

    /// Human readable hint matching [`Self::is_accessible`].
    pub fn contrast_suggestion(&self) -> &'static str {
        if self.is_accessible() {
            GOOD_CONTRAST_SUGGESTION
        } else {
            LIGHTER_SHADE_SUGGESTION
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for ColorToken {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl TryFrom<String> for ColorToken {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        normalize(&value)
    }
}

impl TryFrom<&str> for ColorToken {
    type Error = InvalidColor;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        normalize(value)
    }
}

impl From<ColorToken> for String {
    fn from(token: ColorToken) -> Self {
        token.text
    }
}

/// Normalize a raw color string into a [`ColorToken`].
///
/// Surrounding whitespace and any number of wrapping quote characters are
/// stripped. The remainder must be `#` followed by exactly six hex digits;
/// shorthand (`#abc`) and alpha (`#rrggbbaa`) forms are rejected.
///
/// # Example
/// ```rust
/// use swatch_types::color::normalize;
///
/// let token = normalize("\"#A1b2C3\"").unwrap();
/// assert_eq!(token.as_str(), "#A1b2C3");
/// assert!(normalize("#abc").is_err());
/// ```
pub fn normalize(raw: &str) -> Result<ColorToken, InvalidColor> {
    let stripped = raw.trim().trim_matches(WRAPPING_QUOTES).trim();
    if !HEX_COLOR_PATTERN.is_match(stripped) {
        return Err(InvalidColor { raw: raw.to_string() });
    }

    let channel = |offset: usize| u8::from_str_radix(&stripped[offset..offset + 2], 16);
    match (channel(1), channel(3), channel(5)) {
        (Ok(r), Ok(g), Ok(b)) => Ok(ColorToken {
            text: stripped.to_string(),
            channels: [r, g, b],
        }),
        _ => Err(InvalidColor { raw: raw.to_string() }),
    }
}

/// Returns `true` when a luminance value counts as accessible.
pub fn meets_luminance_threshold(luminance: f64) -> bool {
    luminance > ACCESSIBLE_LUMINANCE_THRESHOLD
}

/// Decimal channel triple rendered as `rgb(r, g, b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Offset each channel independently, clamping to `[0, 255]`.
    pub fn offset(self, red: i16, green: i16, blue: i16) -> Self {
        Self {
            r: clamp_channel(self.r, red),
            g: clamp_channel(self.g, green),
            b: clamp_channel(self.b, blue),
        }
    }

    /// CSS functional notation, e.g. `rgb(12, 34, 56)`.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

fn clamp_channel(channel: u8, delta: i16) -> u8 {
    (i16::from(channel) + delta).clamp(0, 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_wrapping_quotes() {
        let plain = normalize("#a1b2c3").unwrap();
        for raw in ["\"#a1b2c3\"", "\"\"#a1b2c3\"\"", "'#a1b2c3'", "\"#a1b2c3", " \"#a1b2c3\" "] {
            assert_eq!(normalize(raw).unwrap(), plain, "raw input {raw}");
        }
    }

    #[test]
    fn normalize_rejects_malformed_tokens() {
        for raw in ["", "#", "a1b2c3", "#abc", "#a1b2c3ff", "#g1b2c3", "rgb(1, 2, 3)", "#a1 b2c3"] {
            let error = normalize(raw).unwrap_err();
            assert_eq!(error.raw, raw);
        }
    }

    #[test]
    fn normalize_preserves_case() {
        assert_eq!(normalize("#FFaa00").unwrap().as_str(), "#FFaa00");
    }

    #[test]
    fn channels_are_parsed_as_byte_pairs() {
        let token = normalize("#ff8001").unwrap();
        assert_eq!(token.to_channels(), (255, 128, 1));
        assert_eq!(token.to_rgb(), RgbColor::new(255, 128, 1));
    }

    #[test]
    fn luminance_extremes() {
        assert!((normalize("#ffffff").unwrap().relative_luminance() - 1.0).abs() < 1e-9);
        assert_eq!(normalize("#000000").unwrap().relative_luminance(), 0.0);
    }

    #[test]
    fn luminance_weights_green_highest() {
        let red = normalize("#ff0000").unwrap().relative_luminance();
        let green = normalize("#00ff00").unwrap().relative_luminance();
        let blue = normalize("#0000ff").unwrap().relative_luminance();
        assert!((red - 0.2126).abs() < 1e-9);
        assert!((green - 0.7152).abs() < 1e-9);
        assert!((blue - 0.0722).abs() < 1e-9);
    }

    #[test]
    fn accessibility_threshold_is_exclusive() {
        assert!(meets_luminance_threshold(0.51));
        assert!(!meets_luminance_threshold(0.49));
        assert!(!meets_luminance_threshold(ACCESSIBLE_LUMINANCE_THRESHOLD));
    }

    #[test]
    fn contrast_suggestion_follows_threshold() {
        assert_eq!(normalize("#ffffff").unwrap().contrast_suggestion(), GOOD_CONTRAST_SUGGESTION);
        assert_eq!(normalize("#0000ff").unwrap().contrast_suggestion(), LIGHTER_SHADE_SUGGESTION);
        assert!(normalize("#00ff00").unwrap().is_accessible());
    }

    #[test]
    fn token_serde_goes_through_normalize() {
        let token: ColorToken = serde_json::from_str("\"\\\"#123abc\\\"\"").unwrap();
        assert_eq!(token.as_str(), "#123abc");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"#123abc\"");
        assert!(serde_json::from_str::<ColorToken>("\"#12\"").is_err());
    }

    #[test]
    fn rgb_offset_clamps_each_channel() {
        let color = RgbColor::new(250, 10, 128);
        assert_eq!(color.offset(40, -40, 0), RgbColor::new(255, 0, 128));
        assert_eq!(color.to_css(), "rgb(250, 10, 128)");
    }
}
