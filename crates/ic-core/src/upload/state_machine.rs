//! Upload state machine.
//!
//! Defines a pure state transition function for the file upload flow.
//! The orchestrator in the application layer performs the returned
//! actions against its ports and feeds the resulting events back in;
//! no I/O happens here.

use crate::clip::Clip;
use crate::upload::error::{StorageError, UploadError};
use crate::upload::model::{Capability, PickedFile, UploadSource, UploadTicket};

/// Upload flow state. `Done` and `Failed` are terminal for one attempt;
/// a new attempt starts over at `Idle`.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    Idle,
    /// Waiting for the platform permission decision.
    CheckingPermission {
        source: UploadSource,
        capability: Capability,
    },
    /// Picker is open.
    PickingFile { source: UploadSource },
    /// Enforcing the size ceiling, before any network call.
    CheckingSize { file: PickedFile },
    /// Asking the API for pre-signed upload credentials.
    RequestingTicket { file: PickedFile },
    /// Transferring bytes to object storage.
    Uploading {
        file: PickedFile,
        ticket: UploadTicket,
    },
    /// Registering the stored object's URL as a clip.
    RegisteringClip { file_url: String },
    Done { clip: Clip },
    Failed { error: UploadError },
}

/// Events that drive the upload flow.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    Start { source: UploadSource },
    PermissionGranted,
    PermissionDenied,
    FilePicked { file: PickedFile },
    /// User backed out of the picker. Not an error; returns to `Idle`.
    PickCancelled,
    SizeAccepted,
    SizeRejected { size: u64, limit_mb: u64 },
    TicketIssued { ticket: UploadTicket },
    TicketRefused { message: String },
    StoreAccepted { file_url: String },
    StoreRejected { error: StorageError },
    ClipRegistered { clip: Clip },
    RegistrationFailed { message: String },
}

/// Side-effects requested by state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadAction {
    RequestPermission { capability: Capability },
    OpenPicker { source: UploadSource },
    CheckSize { size: u64 },
    RequestTicket { name: String, content_type: String },
    TransferFile,
    RegisterClip { file_url: String },
}

pub struct UploadStateMachine;

impl UploadStateMachine {
    pub fn transition(state: UploadState, event: UploadEvent) -> (UploadState, Vec<UploadAction>) {
        match (state, event) {
            (UploadState::Idle, UploadEvent::Start { source }) => {
                match source.required_capability() {
                    Some(capability) => (
                        UploadState::CheckingPermission { source, capability },
                        vec![UploadAction::RequestPermission { capability }],
                    ),
                    None => (
                        UploadState::PickingFile { source },
                        vec![UploadAction::OpenPicker { source }],
                    ),
                }
            }
            (
                UploadState::CheckingPermission { source, .. },
                UploadEvent::PermissionGranted,
            ) => (
                UploadState::PickingFile { source },
                vec![UploadAction::OpenPicker { source }],
            ),
            (
                UploadState::CheckingPermission { capability, .. },
                UploadEvent::PermissionDenied,
            ) => (
                UploadState::Failed {
                    error: UploadError::PermissionDenied(capability),
                },
                Vec::new(),
            ),
            (UploadState::PickingFile { .. }, UploadEvent::PickCancelled) => {
                (UploadState::Idle, Vec::new())
            }
            (UploadState::PickingFile { .. }, UploadEvent::FilePicked { file }) => {
                let size = file.size;
                (
                    UploadState::CheckingSize { file },
                    vec![UploadAction::CheckSize { size }],
                )
            }
            (UploadState::CheckingSize { file }, UploadEvent::SizeAccepted) => {
                let name = file.name.clone();
                let content_type = file.content_type.clone();
                (
                    UploadState::RequestingTicket { file },
                    vec![UploadAction::RequestTicket { name, content_type }],
                )
            }
            (UploadState::CheckingSize { .. }, UploadEvent::SizeRejected { size, limit_mb }) => (
                UploadState::Failed {
                    error: UploadError::too_large(size, limit_mb),
                },
                Vec::new(),
            ),
            (UploadState::RequestingTicket { file }, UploadEvent::TicketIssued { ticket }) => (
                UploadState::Uploading { file, ticket },
                vec![UploadAction::TransferFile],
            ),
            (UploadState::RequestingTicket { .. }, UploadEvent::TicketRefused { message }) => (
                UploadState::Failed {
                    error: UploadError::Ticket(message),
                },
                Vec::new(),
            ),
            (UploadState::Uploading { .. }, UploadEvent::StoreAccepted { file_url }) => (
                UploadState::RegisteringClip {
                    file_url: file_url.clone(),
                },
                vec![UploadAction::RegisterClip { file_url }],
            ),
            (UploadState::Uploading { .. }, UploadEvent::StoreRejected { error }) => (
                UploadState::Failed {
                    error: error.into(),
                },
                Vec::new(),
            ),
            (UploadState::RegisteringClip { .. }, UploadEvent::ClipRegistered { clip }) => {
                (UploadState::Done { clip }, Vec::new())
            }
            (UploadState::RegisteringClip { .. }, UploadEvent::RegistrationFailed { message }) => (
                UploadState::Failed {
                    error: UploadError::Registration(message),
                },
                Vec::new(),
            ),
            // Terminal states and stray events: hold position.
            (state, _event) => (state, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn picked_file(size: usize) -> PickedFile {
        PickedFile::new(
            "media.jpg",
            "image/jpeg",
            Bytes::from(vec![0u8; size]),
        )
    }

    fn ticket() -> UploadTicket {
        UploadTicket {
            url: "https://bucket.example/upload".to_string(),
            fields: vec![("key".to_string(), "ab12cd.jpg".to_string())],
        }
    }

    #[test]
    fn camera_start_requests_permission_first() {
        let (state, actions) = UploadStateMachine::transition(
            UploadState::Idle,
            UploadEvent::Start {
                source: UploadSource::Camera,
            },
        );
        assert_eq!(
            state,
            UploadState::CheckingPermission {
                source: UploadSource::Camera,
                capability: Capability::Camera,
            }
        );
        assert_eq!(
            actions,
            vec![UploadAction::RequestPermission {
                capability: Capability::Camera
            }]
        );
    }

    #[test]
    fn document_start_skips_the_permission_step() {
        let (state, actions) = UploadStateMachine::transition(
            UploadState::Idle,
            UploadEvent::Start {
                source: UploadSource::Document,
            },
        );
        assert_eq!(
            state,
            UploadState::PickingFile {
                source: UploadSource::Document
            }
        );
        assert_eq!(
            actions,
            vec![UploadAction::OpenPicker {
                source: UploadSource::Document
            }]
        );
    }

    #[test]
    fn permission_denied_fails_closed() {
        let state = UploadState::CheckingPermission {
            source: UploadSource::MediaLibrary,
            capability: Capability::MediaLibrary,
        };
        let (state, actions) =
            UploadStateMachine::transition(state, UploadEvent::PermissionDenied);
        assert_eq!(
            state,
            UploadState::Failed {
                error: UploadError::PermissionDenied(Capability::MediaLibrary)
            }
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn pick_cancel_returns_to_idle_silently() {
        let state = UploadState::PickingFile {
            source: UploadSource::MediaLibrary,
        };
        let (state, actions) = UploadStateMachine::transition(state, UploadEvent::PickCancelled);
        assert_eq!(state, UploadState::Idle);
        assert!(actions.is_empty());
    }

    #[test]
    fn oversize_rejection_formats_both_sizes() {
        let state = UploadState::CheckingSize {
            file: picked_file(16),
        };
        let (state, _) = UploadStateMachine::transition(
            state,
            UploadEvent::SizeRejected {
                size: 150 * 1024 * 1024,
                limit_mb: 100,
            },
        );
        match state {
            UploadState::Failed { error } => assert_eq!(
                error.to_string(),
                "File size limit exceeded, your file has 150 MB, but the limit is 100 MB"
            ),
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn happy_path_walks_every_stage() {
        let file = picked_file(16);
        let (state, _) = UploadStateMachine::transition(
            UploadState::PickingFile {
                source: UploadSource::Document,
            },
            UploadEvent::FilePicked { file: file.clone() },
        );
        let (state, actions) = UploadStateMachine::transition(state, UploadEvent::SizeAccepted);
        assert_eq!(
            actions,
            vec![UploadAction::RequestTicket {
                name: "media.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
            }]
        );
        let (state, actions) = UploadStateMachine::transition(
            state,
            UploadEvent::TicketIssued { ticket: ticket() },
        );
        assert_eq!(actions, vec![UploadAction::TransferFile]);
        let (state, actions) = UploadStateMachine::transition(
            state,
            UploadEvent::StoreAccepted {
                file_url: "https://files.interclip.app/ab12cd.jpg".to_string(),
            },
        );
        assert_eq!(
            actions,
            vec![UploadAction::RegisterClip {
                file_url: "https://files.interclip.app/ab12cd.jpg".to_string()
            }]
        );
        assert!(matches!(state, UploadState::RegisteringClip { .. }));
    }

    #[test]
    fn stray_events_hold_position() {
        let (state, actions) =
            UploadStateMachine::transition(UploadState::Idle, UploadEvent::SizeAccepted);
        assert_eq!(state, UploadState::Idle);
        assert!(actions.is_empty());
    }

    #[test]
    fn terminal_failed_state_ignores_late_events() {
        let failed = UploadState::Failed {
            error: UploadError::Ticket("Generic fail".to_string()),
        };
        let (state, actions) = UploadStateMachine::transition(
            failed.clone(),
            UploadEvent::StoreAccepted {
                file_url: "https://files.interclip.app/late.jpg".to_string(),
            },
        );
        assert_eq!(state, failed);
        assert!(actions.is_empty());
    }
}
