//! Validation of generation service responses.

use serde_json::Value;
use swatch_types::Palette;
use tracing::debug;

use super::error::GenerationError;

/// Extract the palette from a `{"colors": [...]}` response body.
///
/// The `colors` field must be a non-empty array of strings that all
/// normalize to color tokens (wrapping quotes are tolerated).
pub fn parse_palette_response(body: &Value) -> Result<Palette, GenerationError> {
    let Some(items) = body.get("colors").and_then(Value::as_array) else {
        debug!("response has no colors array");
        return Err(GenerationError::invalid_response());
    };

    let raw_colors = items.iter().map(Value::as_str).collect::<Option<Vec<_>>>().ok_or_else(|| {
        debug!("colors array contains non-string entries");
        GenerationError::invalid_response()
    })?;

    Palette::from_raw(raw_colors).map_err(|error| {
        debug!(%error, "colors array is not a valid palette");
        GenerationError::invalid_response()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_colors_array() {
        let palette = parse_palette_response(&json!({"colors": ["\"#264653\"", "#2A9D8F"]})).unwrap();
        assert_eq!(palette.to_strings(), vec!["#264653", "#2A9D8F"]);
    }

    #[test]
    fn rejects_malformed_shapes() {
        for body in [
            json!({}),
            json!({"colors": "not-an-array"}),
            json!({"colors": []}),
            json!({"colors": ["#ffffff", 42]}),
            json!({"colors": ["#ffffff", "teal"]}),
            json!(["#ffffff"]),
            Value::Null,
        ] {
            assert_eq!(parse_palette_response(&body), Err(GenerationError::invalid_response()), "body {body}");
        }
    }
}
