//! Upload orchestrator.
//!
//! Drives the pure upload state machine from `ic-core` against the
//! platform and network ports: permission check, picker, size ceiling,
//! pre-signed credentials, transfer, clip registration. The pipeline is
//! strictly sequential and a failure at any stage aborts the rest; no
//! rollback is needed because nothing durable exists until registration
//! succeeds.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info_span, warn, Instrument};

use ic_core::clip::Clip;
use ic_core::config::ClipConfig;
use ic_core::ports::{ClipApiPort, FilePickerPort, ObjectStorePort, PermissionsPort, SettingsPort};
use ic_core::upload::{
    PermissionDecision, PickOptions, PickOutcome, StorageError, UploadAction, UploadError,
    UploadEvent, UploadSource, UploadState, UploadStateMachine,
};

/// Final result of one upload attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Completed(Clip),
    /// The user backed out of the picker; nothing happened.
    Cancelled,
    Failed(UploadError),
}

pub struct UploadOrchestrator {
    api: Arc<dyn ClipApiPort>,
    store: Arc<dyn ObjectStorePort>,
    permissions: Arc<dyn PermissionsPort>,
    picker: Arc<dyn FilePickerPort>,
    settings: Arc<dyn SettingsPort>,
    config: ClipConfig,
    state: Mutex<UploadState>,
}

impl UploadOrchestrator {
    pub fn new(
        api: Arc<dyn ClipApiPort>,
        store: Arc<dyn ObjectStorePort>,
        permissions: Arc<dyn PermissionsPort>,
        picker: Arc<dyn FilePickerPort>,
        settings: Arc<dyn SettingsPort>,
        config: ClipConfig,
    ) -> Self {
        Self {
            api,
            store,
            permissions,
            picker,
            settings,
            config,
            state: Mutex::new(UploadState::Idle),
        }
    }

    /// Snapshot of the current pipeline state, for the screen to render.
    pub async fn state(&self) -> UploadState {
        self.state.lock().await.clone()
    }

    /// Run one upload attempt from the given source. Always starts a
    /// fresh cycle at `Idle`, whatever the previous attempt did.
    pub async fn run(&self, source: UploadSource) -> UploadOutcome {
        let span = info_span!("usecase.upload_file", source = ?source);
        self.drive(source).instrument(span).await
    }

    async fn drive(&self, source: UploadSource) -> UploadOutcome {
        let mut state = UploadState::Idle;
        let mut queue: VecDeque<UploadAction> = VecDeque::new();

        let (next, actions) =
            UploadStateMachine::transition(state, UploadEvent::Start { source });
        state = next;
        queue.extend(actions);
        self.publish(&state).await;

        while let Some(action) = queue.pop_front() {
            let event = self.perform(action, &state).await;
            let (next, actions) = UploadStateMachine::transition(state, event);
            state = next;
            queue.extend(actions);
            self.publish(&state).await;
        }

        match state {
            UploadState::Done { clip } => UploadOutcome::Completed(clip),
            UploadState::Failed { error } => {
                warn!(error = %error, "upload attempt failed");
                UploadOutcome::Failed(error)
            }
            // The only non-terminal way out of the loop is a cancelled
            // picker, which lands back on Idle.
            _ => UploadOutcome::Cancelled,
        }
    }

    async fn publish(&self, state: &UploadState) {
        *self.state.lock().await = state.clone();
    }

    /// Perform one side effect and translate its result into an event.
    async fn perform(&self, action: UploadAction, state: &UploadState) -> UploadEvent {
        match action {
            UploadAction::RequestPermission { capability } => {
                match self.permissions.request(capability).await {
                    PermissionDecision::Granted => UploadEvent::PermissionGranted,
                    PermissionDecision::Denied => UploadEvent::PermissionDenied,
                }
            }
            UploadAction::OpenPicker { source } => {
                let options = PickOptions {
                    quality: self.camera_quality(source).await,
                };
                match self.picker.pick(source, &options).await {
                    PickOutcome::Picked(file) => {
                        debug!(name = %file.name, size = file.size, "file picked");
                        UploadEvent::FilePicked { file }
                    }
                    PickOutcome::Cancelled => UploadEvent::PickCancelled,
                }
            }
            UploadAction::CheckSize { size } => {
                if size > self.config.upload_limit_bytes {
                    UploadEvent::SizeRejected {
                        size,
                        limit_mb: self.config.upload_limit_mb(),
                    }
                } else {
                    UploadEvent::SizeAccepted
                }
            }
            UploadAction::RequestTicket { name, content_type } => {
                match self.api.request_upload(&name, &content_type).await {
                    Ok(ticket) => UploadEvent::TicketIssued { ticket },
                    Err(error) => UploadEvent::TicketRefused {
                        message: error.to_string(),
                    },
                }
            }
            UploadAction::TransferFile => {
                let UploadState::Uploading { file, ticket } = state else {
                    // Unreachable by construction: TransferFile is only
                    // emitted entering Uploading.
                    return UploadEvent::StoreRejected {
                        error: StorageError::Rejected,
                    };
                };
                let Some(key) = ticket.object_key() else {
                    warn!("upload ticket carries no object key");
                    return UploadEvent::StoreRejected {
                        error: StorageError::Rejected,
                    };
                };
                let file_url = format!(
                    "{}/{}",
                    self.config.files_endpoint.trim_end_matches('/'),
                    key
                );
                match self.store.upload(ticket, file).await {
                    Ok(()) => UploadEvent::StoreAccepted { file_url },
                    Err(error) => UploadEvent::StoreRejected { error },
                }
            }
            UploadAction::RegisterClip { file_url } => {
                match self.api.create(&file_url, None).await {
                    Ok(clip) => UploadEvent::ClipRegistered { clip },
                    Err(error) => UploadEvent::RegistrationFailed {
                        message: error.to_string(),
                    },
                }
            }
        }
    }

    /// Camera picks honor the stored quality preference; other sources
    /// don't use it. A missing or unreadable store falls back to the
    /// default, same as the original client treating `null` as 0.
    async fn camera_quality(&self, source: UploadSource) -> f64 {
        if source != UploadSource::Camera {
            return 0.0;
        }
        self.settings
            .load()
            .await
            .map(|preferences| preferences.upload_quality)
            .unwrap_or_default()
    }
}
