//! Request lifecycle around the generation service.
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Success
//!   │                 │    └─err──▶ Error
//!   └─blank prompt──▶ Error
//! Success | Error ──submit──▶ Loading
//! ```
//!
//! Every submission takes a new epoch. A completion is applied only when its
//! epoch is still the latest one issued, so a slow response from an earlier
//! submission can never overwrite the outcome of a later one. A superseded
//! call is left to finish and its result is dropped. Dropping a `submit`
//! future mid-request abandons its epoch, so the lifecycle does not stay
//! `Loading`.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;
use swatch_types::{ColorToken, GeneratedPalette, GenerationRequest, Style};
use swatch_util::LastGenerationStore;
use tracing::{debug, info, warn};

use super::error::GenerationError;
use super::generator::PaletteGenerator;
use super::response::parse_palette_response;

/// Lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationPhase {
    Idle,
    Loading,
    Success,
    Error,
}

/// Handle for an in-flight submission, produced by [`GenerationLifecycle::begin`].
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    epoch: u64,
    request: GenerationRequest,
}

impl GenerationTicket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

/// Presentation-facing view of the lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSnapshot {
    pub phase: GenerationPhase,
    /// Colors currently on display; empty when there are none.
    pub colors: Vec<ColorToken>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_prompt: String,
    pub last_style: Style,
}

#[derive(Debug)]
struct LifecycleState {
    phase: GenerationPhase,
    epoch: u64,
    result: Option<GeneratedPalette>,
    error: Option<GenerationError>,
    last_prompt: String,
    last_style: Style,
}

impl Default for LifecycleState {
    fn default() -> Self {
        Self {
            phase: GenerationPhase::Idle,
            epoch: 0,
            result: None,
            error: None,
            last_prompt: String::new(),
            last_style: Style::default(),
        }
    }
}

/// Owns the current generation result and drives requests to a [`PaletteGenerator`].
pub struct GenerationLifecycle {
    generator: Arc<dyn PaletteGenerator>,
    snapshots: Option<LastGenerationStore>,
    state: Mutex<LifecycleState>,
}

impl GenerationLifecycle {
    /// Create a lifecycle, hydrating the last successful generation from
    /// `snapshots` when one was stored.
    pub fn new(generator: Arc<dyn PaletteGenerator>, snapshots: Option<LastGenerationStore>) -> Self {
        let mut state = LifecycleState::default();
        if let Some(previous) = snapshots.as_ref().and_then(LastGenerationStore::load) {
            debug!(colors = previous.palette.len(), "restored last generation");
            state.last_prompt = previous.prompt.clone();
            state.last_style = previous.style;
            state.result = Some(previous);
        }

        Self {
            generator,
            snapshots,
            state: Mutex::new(state),
        }
    }

    /// Submit a prompt and wait for the outcome.
    ///
    /// Errors are captured in the lifecycle state rather than returned. If a
    /// newer submission starts while this one is in flight, this call's
    /// result is discarded.
    pub async fn submit(&self, prompt: &str, style: Option<Style>) -> GenerationSnapshot {
        let Some(ticket) = self.begin(prompt, style) else {
            return self.snapshot();
        };
        let mut guard = AbandonOnDrop {
            lifecycle: self,
            epoch: Some(ticket.epoch),
        };
        let response = self.generator.generate(ticket.request()).await;
        guard.epoch = None;
        self.complete(ticket, response);
        self.snapshot()
    }

    /// Start a submission.
    ///
    /// Returns `None` when the prompt is blank; the lifecycle then moves
    /// straight to `Error` and no request must be issued. Either way the
    /// epoch advances, superseding anything still in flight.
    ///
    /// A returned ticket must be handed to [`Self::complete`] or
    /// [`Self::abandon`]; until then the lifecycle stays `Loading`.
    pub fn begin(&self, prompt: &str, style: Option<Style>) -> Option<GenerationTicket> {
        let mut state = self.state.lock().expect("generation lock poisoned");
        state.epoch += 1;

        match GenerationRequest::new(prompt, style) {
            Ok(request) => {
                state.phase = GenerationPhase::Loading;
                state.error = None;
                info!(epoch = state.epoch, style = %request.style(), "generation started");
                Some(GenerationTicket {
                    epoch: state.epoch,
                    request,
                })
            }
            Err(empty) => {
                state.phase = GenerationPhase::Error;
                state.error = Some(GenerationError::Validation(empty.to_string()));
                info!(epoch = state.epoch, "generation rejected: empty prompt");
                None
            }
        }
    }

    /// Apply the generator's response for `ticket`.
    ///
    /// Returns `false` when the ticket was superseded and the response was
    /// dropped.
    pub fn complete(&self, ticket: GenerationTicket, response: Result<Value, GenerationError>) -> bool {
        let outcome = response.and_then(|body| parse_palette_response(&body));

        let mut state = self.state.lock().expect("generation lock poisoned");
        if ticket.epoch != state.epoch {
            debug!(epoch = ticket.epoch, latest = state.epoch, "discarding superseded generation");
            return false;
        }

        match outcome {
            Ok(palette) => {
                let GenerationTicket { request, .. } = ticket;
                let generated = GeneratedPalette {
                    palette,
                    prompt: request.prompt().to_string(),
                    style: request.style(),
                };
                if let Some(snapshots) = &self.snapshots
                    && let Err(error) = snapshots.save(&generated)
                {
                    warn!(error = %error, "Failed to persist last generation");
                }
                info!(epoch = state.epoch, colors = generated.palette.len(), "generation succeeded");
                state.phase = GenerationPhase::Success;
                state.error = None;
                state.last_prompt = generated.prompt.clone();
                state.last_style = generated.style;
                state.result = Some(generated);
            }
            Err(error) => {
                info!(epoch = state.epoch, %error, "generation failed");
                state.phase = GenerationPhase::Error;
                state.error = Some(error);
                state.result = None;
            }
        }
        true
    }

    /// Give up on `ticket` without a response.
    ///
    /// If it is still the latest submission the lifecycle leaves `Loading`,
    /// going back to `Success` when a palette is on display and to `Idle`
    /// otherwise. Returns `false` when the ticket was already superseded.
    pub fn abandon(&self, ticket: GenerationTicket) -> bool {
        self.abandon_epoch(ticket.epoch)
    }

    fn abandon_epoch(&self, epoch: u64) -> bool {
        let mut state = self.state.lock().expect("generation lock poisoned");
        if epoch != state.epoch || state.phase != GenerationPhase::Loading {
            return false;
        }
        state.phase = if state.result.is_some() {
            GenerationPhase::Success
        } else {
            GenerationPhase::Idle
        };
        info!(epoch, "generation abandoned");
        true
    }

    pub fn phase(&self) -> GenerationPhase {
        self.state.lock().expect("generation lock poisoned").phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == GenerationPhase::Loading
    }

    /// Palette currently on display with the prompt and style that produced it.
    pub fn result(&self) -> Option<GeneratedPalette> {
        self.state.lock().expect("generation lock poisoned").result.clone()
    }

    pub fn error(&self) -> Option<GenerationError> {
        self.state.lock().expect("generation lock poisoned").error.clone()
    }

    pub fn snapshot(&self) -> GenerationSnapshot {
        let state = self.state.lock().expect("generation lock poisoned");
        GenerationSnapshot {
            phase: state.phase,
            colors: state
                .result
                .as_ref()
                .map(|generated| generated.palette.colors().to_vec())
                .unwrap_or_default(),
            loading: state.phase == GenerationPhase::Loading,
            error: state.error.as_ref().map(ToString::to_string),
            last_prompt: state.last_prompt.clone(),
            last_style: state.last_style,
        }
    }
}

/// Abandons the pending epoch when a `submit` future is dropped mid-request.
struct AbandonOnDrop<'a> {
    lifecycle: &'a GenerationLifecycle,
    epoch: Option<u64>,
}

impl Drop for AbandonOnDrop<'_> {
    fn drop(&mut self) {
        if let Some(epoch) = self.epoch.take()
            && !std::thread::panicking()
        {
            self.lifecycle.abandon_epoch(epoch);
        }
    }
}
