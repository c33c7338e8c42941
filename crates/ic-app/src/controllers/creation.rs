//! Clip creation controller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use ic_core::clip::{Clip, ClipError, ClipSignature};
use ic_core::ports::ClipApiPort;
use ic_core::validate::{validate_url, UrlValidation};

/// State of the send screen.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateState {
    Idle,
    /// Input present but not a dispatchable URL.
    Invalid { validation: UrlValidation },
    /// A creation request for `url` is in flight.
    Loading { url: String },
    Created { clip: Clip },
    Failed { error: ClipError },
}

/// Drives the URL input: validator on every change, creation request on
/// a well-formed URL, stale responses discarded by generation.
pub struct CreationController {
    api: Arc<dyn ClipApiPort>,
    generation: AtomicU64,
    state: Mutex<CreateState>,
    signature: Mutex<Option<ClipSignature>>,
}

impl CreationController {
    pub fn new(api: Arc<dyn ClipApiPort>) -> Self {
        Self {
            api,
            generation: AtomicU64::new(0),
            state: Mutex::new(CreateState::Idle),
            signature: Mutex::new(None),
        }
    }

    pub async fn state(&self) -> CreateState {
        self.state.lock().await.clone()
    }

    /// Attach or clear the ownership attestation forwarded with every
    /// subsequent creation request.
    pub async fn set_signature(&self, signature: Option<ClipSignature>) {
        *self.signature.lock().await = signature;
    }

    /// Offer a clipboard paste as input. Accepted (and dispatched) only
    /// when it already validates as a URL; otherwise the paste is ignored
    /// and the current state is left alone.
    pub async fn paste(&self, pasteboard: &str) -> Option<CreateState> {
        if validate_url(pasteboard).is_valid() {
            Some(self.input_changed(pasteboard).await)
        } else {
            None
        }
    }

    /// Handle one input change. Returns the state the screen should show
    /// once this change has settled.
    pub async fn input_changed(&self, raw: &str) -> CreateState {
        let url = raw.trim().to_string();
        let validation = validate_url(&url);

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !validation.is_valid() {
            let next = CreateState::Invalid { validation };
            *self.state.lock().await = next.clone();
            return next;
        }

        {
            let mut state = self.state.lock().await;
            *state = CreateState::Loading { url: url.clone() };
        }
        debug!(url = %url, generation, "dispatching clip creation");

        let signature = self.signature.lock().await.clone();
        let next = match self.api.create(&url, signature).await {
            Ok(clip) => CreateState::Created { clip },
            Err(error) => CreateState::Failed { error },
        };

        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(url = %url, generation, "discarding stale creation response");
            return state.clone();
        }
        *state = next.clone();
        next
    }
}
