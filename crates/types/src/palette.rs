//! Ordered palettes and saved palette records.

use std::ops::Index;
use std::slice::Iter;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::color::{ColorToken, InvalidColor, normalize};

/// Errors raised while building a [`Palette`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// A palette must contain at least one color.
    #[error("palette must contain at least one color")]
    Empty,
    /// A raw entry failed normalization.
    #[error("color {position} is invalid: {source}")]
    InvalidColor {
        /// 1-based position of the offending entry.
        position: usize,
        #[source]
        source: InvalidColor,
    },
}

/// Ordered, non-empty sequence of colors.
///
/// Position `i` is exported as `color-{i + 1}`; order is preserved from
/// generation through variations, exports and saved records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColorToken>", into = "Vec<ColorToken>")]
pub struct Palette {
    colors: Vec<ColorToken>,
}

impl Palette {
    /// Wrap already-normalized tokens.
    pub fn new(colors: Vec<ColorToken>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Normalize every raw entry and build a palette, failing on the first invalid one.
    pub fn from_raw<I, S>(raw_colors: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = raw_colors
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                normalize(raw.as_ref()).map_err(|source| PaletteError::InvalidColor {
                    position: index + 1,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn colors(&self) -> &[ColorToken] {
        &self.colors
    }

    pub fn iter(&self) -> Iter<'_, ColorToken> {
        self.colors.iter()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false` for a constructed palette; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// First color; palettes are never empty.
    pub fn first(&self) -> &ColorToken {
        &self.colors[0]
    }

    /// Token text for each color in order.
    pub fn to_strings(&self) -> Vec<String> {
        self.colors.iter().map(|color| color.as_str().to_string()).collect()
    }
}

impl TryFrom<Vec<ColorToken>> for Palette {
    type Error = PaletteError;

    fn try_from(colors: Vec<ColorToken>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<ColorToken> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

impl Index<usize> for Palette {
    type Output = ColorToken;

    fn index(&self, index: usize) -> &Self::Output {
        &self.colors[index]
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a ColorToken;
    type IntoIter = Iter<'a, ColorToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

/// A palette the user chose to keep.
///
/// Records are immutable once created; the store only ever prepends or
/// removes them. The JSON shape uses camelCase keys (`createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPalette {
    /// Store-unique identifier derived from the creation time in milliseconds.
    pub id: String,
    /// User supplied name; may be empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Independent copy of the palette at save time.
    pub colors: Palette,
    /// Prompt that produced the palette.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub prompt: String,
    pub created_at: DateTime<Utc>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SavedPalette {
    /// Name to show for the record at `position` in the newest-first list.
    ///
    /// Blank names fall back to `Palette {position + 1}`.
    pub fn display_name(&self, position: usize) -> String {
        if self.name.trim().is_empty() {
            format!("Palette {}", position + 1)
        } else {
            self.name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn from_raw_preserves_order_and_strips_quotes() {
        let palette = Palette::from_raw(["\"#ff0000\"", "#00ff00", "'#0000FF'"]).unwrap();
        assert_eq!(palette.to_strings(), vec!["#ff0000", "#00ff00", "#0000FF"]);
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.first().as_str(), "#ff0000");
    }

    #[test]
    fn from_raw_reports_position_of_invalid_color() {
        let error = Palette::from_raw(["#ff0000", "blue"]).unwrap_err();
        match error {
            PaletteError::InvalidColor { position, source } => {
                assert_eq!(position, 2);
                assert_eq!(source.raw, "blue");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert_eq!(Palette::from_raw(Vec::<String>::new()).unwrap_err(), PaletteError::Empty);
        assert!(serde_json::from_str::<Palette>("[]").is_err());
    }

    #[test]
    fn saved_palette_uses_camel_case_keys() {
        let saved = SavedPalette {
            id: "1700000000000".into(),
            name: "Sunset".into(),
            colors: Palette::from_raw(["#ff7f50"]).unwrap(),
            prompt: "warm evening".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        };
        let value = serde_json::to_value(&saved).unwrap();
        assert_eq!(value["createdAt"], "2024-01-02T03:04:05Z");
        assert_eq!(value["colors"][0], "#ff7f50");

        let back: SavedPalette = serde_json::from_value(value).unwrap();
        assert_eq!(back, saved);
    }

    #[test]
    fn display_name_falls_back_to_position() {
        let mut saved = SavedPalette {
            id: "1".into(),
            name: "   ".into(),
            colors: Palette::from_raw(["#000000"]).unwrap(),
            prompt: String::new(),
            created_at: Utc::now(),
        };
        assert_eq!(saved.display_name(2), "Palette 3");
        saved.name = "Forest".into();
        assert_eq!(saved.display_name(2), "Forest");
    }
}
