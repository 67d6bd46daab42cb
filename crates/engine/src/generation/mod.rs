//! Palette generation: the service seam, response validation and the
//! single-flight request lifecycle.

pub mod error;
pub mod generator;
pub mod lifecycle;
pub mod response;

pub use error::{GenerationError, INVALID_RESPONSE_MESSAGE};
pub use generator::PaletteGenerator;
pub use lifecycle::{GenerationLifecycle, GenerationPhase, GenerationSnapshot, GenerationTicket};
pub use response::parse_palette_response;
