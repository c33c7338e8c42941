//! Direct-to-storage uploader using pre-signed POST credentials.
//!
//! The file bytes go straight to the object storage endpoint named by the
//! ticket, never through the application server. On failure the storage
//! service answers with an XML error envelope, not JSON; the machine code
//! inside it is mapped to a friendly [`StorageError`].

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use ic_core::format::format_bytes;
use ic_core::ports::ObjectStorePort;
use ic_core::upload::{PickedFile, StorageError, UploadTicket};

static ERROR_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<Code>([^<]+)</Code>").unwrap());
static PROPOSED_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<ProposedSize>(\d+)</ProposedSize>").unwrap());

pub struct PresignedObjectStore {
    http: reqwest::Client,
}

impl PresignedObjectStore {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

/// Map the XML error envelope to a storage error. Unknown codes and
/// unparsable bodies collapse to the generic rejection.
fn parse_storage_error(body: &str) -> StorageError {
    let code = ERROR_CODE
        .captures(body)
        .map(|captures| captures[1].to_string());
    match code.as_deref() {
        Some("EntityTooLarge") => {
            let size = PROPOSED_SIZE
                .captures(body)
                .and_then(|captures| captures[1].parse::<u64>().ok())
                .map(format_bytes)
                .unwrap_or_else(|| "unknown size".to_string());
            StorageError::EntityTooLarge(size)
        }
        Some("AccessDenied") => StorageError::AccessDenied,
        other => {
            warn!(code = ?other, "storage rejected the upload");
            StorageError::Rejected
        }
    }
}

#[async_trait]
impl ObjectStorePort for PresignedObjectStore {
    async fn upload(&self, ticket: &UploadTicket, file: &PickedFile) -> Result<(), StorageError> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in &ticket.fields {
            form = form.text(name.clone(), value.clone());
        }
        let part = reqwest::multipart::Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|_| StorageError::Rejected)?;
        // The storage service requires the file part after the fields.
        form = form.part("file", part);

        let response = self
            .http
            .post(&ticket.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, name = %file.name, "upload accepted");
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(parse_storage_error(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use mockito::{Matcher, Server};

    fn small_file() -> PickedFile {
        PickedFile::new("media.jpg", "image/jpeg", Bytes::from_static(b"jpegbytes"))
    }

    fn ticket_for(server: &Server) -> UploadTicket {
        UploadTicket {
            url: format!("{}/bucket", server.url()),
            fields: vec![
                ("key".to_string(), "ab12cd.jpg".to_string()),
                ("policy".to_string(), "opaque".to_string()),
            ],
        }
    }

    #[tokio::test]
    async fn successful_upload_posts_fields_and_file() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/bucket")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data.*".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("ab12cd.jpg".to_string()),
                Matcher::Regex("opaque".to_string()),
                Matcher::Regex("jpegbytes".to_string()),
            ]))
            .with_status(204)
            .create_async()
            .await;

        let store = PresignedObjectStore::with_client(reqwest::Client::new());
        store
            .upload(&ticket_for(&server), &small_file())
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn entity_too_large_extracts_the_proposed_size() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/bucket")
            .with_status(400)
            .with_body(
                r#"<?xml version="1.0"?>
                <Error>
                    <Code>EntityTooLarge</Code>
                    <Message>Your proposed upload exceeds the maximum allowed size</Message>
                    <ProposedSize>125829120</ProposedSize>
                </Error>"#,
            )
            .create_async()
            .await;

        let store = PresignedObjectStore::with_client(reqwest::Client::new());
        let error = store
            .upload(&ticket_for(&server), &small_file())
            .await
            .unwrap_err();
        assert_eq!(error, StorageError::EntityTooLarge("120 MB".to_string()));
        assert_eq!(error.to_string(), "File too large (120 MB)");
    }

    #[tokio::test]
    async fn access_denied_maps_to_its_own_variant() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/bucket")
            .with_status(403)
            .with_body("<Error><Code>AccessDenied</Code></Error>")
            .create_async()
            .await;

        let store = PresignedObjectStore::with_client(reqwest::Client::new());
        let error = store
            .upload(&ticket_for(&server), &small_file())
            .await
            .unwrap_err();
        assert_eq!(error, StorageError::AccessDenied);
    }

    #[tokio::test]
    async fn unknown_rejections_collapse_to_the_generic_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/bucket")
            .with_status(400)
            .with_body("<Error><Code>MalformedPOSTRequest</Code></Error>")
            .create_async()
            .await;

        let store = PresignedObjectStore::with_client(reqwest::Client::new());
        let error = store
            .upload(&ticket_for(&server), &small_file())
            .await
            .unwrap_err();
        assert_eq!(error, StorageError::Rejected);
        assert_eq!(error.to_string(), "Upload failed.");
    }

    #[test]
    fn parser_tolerates_garbage_bodies() {
        assert_eq!(parse_storage_error("not xml at all"), StorageError::Rejected);
        assert_eq!(
            parse_storage_error("<Error><Code>EntityTooLarge</Code></Error>"),
            StorageError::EntityTooLarge("unknown size".to_string())
        );
    }
}
