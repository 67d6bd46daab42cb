//! Seam between the lifecycle and whatever produces palettes.

use async_trait::async_trait;
use serde_json::Value;
use swatch_api::PaletteServiceClient;
use swatch_types::GenerationRequest;

use super::error::GenerationError;

/// Source of raw generation responses.
///
/// Implementations return the decoded response body; the lifecycle validates
/// its shape. Implementations perform no retries.
#[async_trait]
pub trait PaletteGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Value, GenerationError>;
}

#[async_trait]
impl PaletteGenerator for PaletteServiceClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Value, GenerationError> {
        PaletteServiceClient::generate(self, request).await.map_err(GenerationError::from)
    }
}
