//! Request and result types exchanged with the palette generation service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::Palette;

/// Message surfaced when a submission carries no prompt text.
pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt";

/// Visual direction sent alongside the prompt.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Modern,
    Vintage,
    Neon,
    Pastel,
    Monochrome,
    Gradient,
    Complementary,
    Analogous,
    Triadic,
    Tetradic,
}

impl Style {
    /// Every style, in the order offered to users.
    pub const ALL: [Style; 10] = [
        Style::Modern,
        Style::Vintage,
        Style::Neon,
        Style::Pastel,
        Style::Monochrome,
        Style::Gradient,
        Style::Complementary,
        Style::Analogous,
        Style::Triadic,
        Style::Tetradic,
    ];

    /// Wire identifier, e.g. `modern`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Vintage => "vintage",
            Self::Neon => "neon",
            Self::Pastel => "pastel",
            Self::Monochrome => "monochrome",
            Self::Gradient => "gradient",
            Self::Complementary => "complementary",
            Self::Analogous => "analogous",
            Self::Triadic => "triadic",
            Self::Tetradic => "tetradic",
        }
    }

    /// Display label, e.g. `Modern`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Modern => "Modern",
            Self::Vintage => "Vintage",
            Self::Neon => "Neon",
            Self::Pastel => "Pastel",
            Self::Monochrome => "Monochrome",
            Self::Gradient => "Gradient",
            Self::Complementary => "Complementary",
            Self::Analogous => "Analogous",
            Self::Triadic => "Triadic",
            Self::Tetradic => "Tetradic",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Style::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseStyleError(wanted.to_string()))
    }
}

/// Raised when a style name is not part of the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown style '{0}'; expected one of modern, vintage, neon, pastel, monochrome, gradient, complementary, analogous, triadic, tetradic")]
pub struct ParseStyleError(pub String);

/// Raised when a prompt is empty after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", EMPTY_PROMPT_MESSAGE)]
pub struct EmptyPrompt;

/// Body of `POST /api/colors`.
///
/// Built once per submission and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    prompt: String,
    style: Style,
}

impl GenerationRequest {
    /// Validate the prompt and build a request. `None` selects [`Style::Modern`].
    pub fn new(prompt: &str, style: Option<Style>) -> Result<Self, EmptyPrompt> {
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            return Err(EmptyPrompt);
        }
        Ok(Self {
            prompt: trimmed.to_string(),
            style: style.unwrap_or_default(),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn style(&self) -> Style {
        self.style
    }
}

/// Successful generation outcome: the palette plus what produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedPalette {
    pub palette: Palette,
    pub prompt: String,
    pub style: Style,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_parses_case_insensitively() {
        assert_eq!("Neon".parse::<Style>().unwrap(), Style::Neon);
        assert_eq!(" tetradic ".parse::<Style>().unwrap(), Style::Tetradic);
        assert_eq!("grunge".parse::<Style>().unwrap_err(), ParseStyleError("grunge".into()));
    }

    #[test]
    fn style_defaults_to_modern() {
        assert_eq!(Style::default(), Style::Modern);
        let request = GenerationRequest::new("ocean breeze", None).unwrap();
        assert_eq!(request.style(), Style::Modern);
    }

    #[test]
    fn style_round_trips_through_identifiers() {
        for style in Style::ALL {
            assert_eq!(style.as_str().parse::<Style>().unwrap(), style);
            assert_eq!(serde_json::to_value(style).unwrap(), style.as_str());
        }
    }

    #[test]
    fn request_rejects_blank_prompts() {
        assert_eq!(GenerationRequest::new("", None), Err(EmptyPrompt));
        assert_eq!(GenerationRequest::new(" \t\n ", Some(Style::Neon)), Err(EmptyPrompt));
        assert_eq!(EmptyPrompt.to_string(), EMPTY_PROMPT_MESSAGE);
    }

    #[test]
    fn request_serializes_wire_body() {
        let request = GenerationRequest::new("  autumn forest ", Some(Style::Pastel)).unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, serde_json::json!({"prompt": "autumn forest", "style": "pastel"}));
    }
}
