//! Code resolution controller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use ic_core::clip::{Clip, ClipError};
use ic_core::config::ClipConfig;
use ic_core::ports::ClipApiPort;
use ic_core::validate::{normalize_code, validate_code, CodeValidation};

/// State of the resolution screen. Loading and error are distinct
/// variants, so the two can never be shown at once.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveState {
    /// Nothing typed yet.
    Idle,
    /// Input present but not dispatchable; carries the validator outcome.
    Invalid { validation: CodeValidation },
    /// A lookup for `code` is in flight.
    Loading { code: String },
    Resolved { clip: Clip },
    Failed { error: ClipError },
}

/// Drives the code input: validator on every keystroke, lookup on
/// complete input, stale responses discarded by generation.
pub struct ResolutionController {
    api: Arc<dyn ClipApiPort>,
    config: ClipConfig,
    generation: AtomicU64,
    state: Mutex<ResolveState>,
}

impl ResolutionController {
    pub fn new(api: Arc<dyn ClipApiPort>, config: ClipConfig) -> Self {
        Self {
            api,
            config,
            generation: AtomicU64::new(0),
            state: Mutex::new(ResolveState::Idle),
        }
    }

    pub async fn state(&self) -> ResolveState {
        self.state.lock().await.clone()
    }

    /// Handle one input change. Returns the state the screen should show
    /// once this change has settled.
    pub async fn input_changed(&self, raw: &str) -> ResolveState {
        let code = normalize_code(raw);
        let validation = validate_code(&code, &self.config);

        // Every keystroke supersedes whatever request is still in flight.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !validation.is_valid() {
            let next = ResolveState::Invalid { validation };
            *self.state.lock().await = next.clone();
            return next;
        }

        {
            let mut state = self.state.lock().await;
            *state = ResolveState::Loading { code: code.clone() };
        }
        debug!(code = %code, generation, "dispatching clip lookup");

        // Both arms replace the loading state, so the screen can never be
        // left on a spinner after the request settles.
        let next = match self.api.resolve(&code).await {
            Ok(clip) => ResolveState::Resolved { clip },
            Err(error) => ResolveState::Failed { error },
        };

        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            // A newer keystroke owns the screen now; drop this response.
            debug!(code = %code, generation, "discarding stale lookup response");
            return state.clone();
        }
        *state = next.clone();
        next
    }
}
