//! Reqwest-backed clip API client.
//!
//! Normalizes every transport and HTTP-status outcome into [`ClipError`].
//! A reqwest error never crosses this module's boundary: the controllers
//! have no retry logic and must always get a settled result back.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ic_core::clip::{Clip, ClipError, ClipSignature};
use ic_core::config::ClipConfig;
use ic_core::ports::ClipApiPort;
use ic_core::upload::UploadTicket;

pub struct HttpClipApi {
    http: reqwest::Client,
    config: ClipConfig,
}

impl HttpClipApi {
    pub fn new(config: ClipConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// Build from an existing client, mainly for tests pointing at a
    /// mock server.
    pub fn with_client(http: reqwest::Client, config: ClipConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_endpoint.trim_end_matches('/'), path)
    }
}

/// The wire envelope every JSON API response uses:
/// `{status: "success"|"error", result, code?}`.
#[derive(Debug, Deserialize)]
struct ClipEnvelope {
    status: String,
    result: serde_json::Value,
}

impl ClipEnvelope {
    fn into_clip(self) -> Result<Clip, ClipError> {
        if self.status == "success" {
            serde_json::from_value(self.result)
                .map_err(|e| ClipError::Api(format!("malformed clip payload: {e}")))
        } else {
            Err(ClipError::Api(
                self.result.as_str().unwrap_or("Something went wrong...").to_string(),
            ))
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sig: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    addr: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TicketResponse {
    url: String,
    fields: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct FailureBody {
    result: String,
}

fn transport(error: reqwest::Error) -> ClipError {
    ClipError::Transport(error.to_string())
}

#[async_trait]
impl ClipApiPort for HttpClipApi {
    async fn resolve(&self, code: &str) -> Result<Clip, ClipError> {
        let response = self
            .http
            .get(self.endpoint("api/clip/get"))
            .query(&[("code", code)])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        debug!(code, %status, "clip lookup answered");
        match status {
            s if s.is_success() => {
                let envelope: ClipEnvelope = response.json().await.map_err(transport)?;
                envelope.into_clip()
            }
            StatusCode::NOT_FOUND => Err(ClipError::NotFound),
            StatusCode::TOO_MANY_REQUESTS => Err(ClipError::RateLimited),
            s => Err(ClipError::Status(s.as_u16())),
        }
    }

    async fn create(
        &self,
        url: &str,
        signature: Option<ClipSignature>,
    ) -> Result<Clip, ClipError> {
        let body = CreateRequest {
            url,
            sig: signature.as_ref().map(|s| s.signature.as_str()),
            addr: signature.as_ref().and_then(|s| s.address.as_deref()),
        };
        let response = self
            .http
            .post(self.endpoint("api/clip/set"))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        // Legacy servers answer a fatal failure with plain text and 500;
        // the body is the message.
        if response.status() == StatusCode::INTERNAL_SERVER_ERROR {
            let text = response.text().await.map_err(transport)?;
            warn!("clip creation failed with a legacy 500 body");
            return Err(ClipError::Api(text));
        }

        let envelope: ClipEnvelope = response.json().await.map_err(transport)?;
        envelope.into_clip()
    }

    async fn request_upload(
        &self,
        name: &str,
        content_type: &str,
    ) -> Result<UploadTicket, ClipError> {
        let response = self
            .http
            .get(self.endpoint("api/uploadFile"))
            .query(&[("name", name), ("type", content_type)])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        match status {
            s if s.is_success() => {
                let ticket: TicketResponse = response.json().await.map_err(transport)?;
                let fields = ticket
                    .fields
                    .into_iter()
                    .map(|(key, value)| {
                        let value = match value {
                            serde_json::Value::String(s) => s,
                            other => other.to_string(),
                        };
                        (key, value)
                    })
                    .collect();
                Ok(UploadTicket {
                    url: ticket.url,
                    fields,
                })
            }
            StatusCode::NOT_FOUND => Err(ClipError::Api("API Endpoint not found".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR => Err(ClipError::Api("Generic fail".to_string())),
            StatusCode::SERVICE_UNAVAILABLE => {
                let failure: FailureBody = response.json().await.map_err(transport)?;
                Err(ClipError::Api(failure.result))
            }
            _ => {
                let text = response.text().await.map_err(transport)?;
                Err(ClipError::Api(text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn client_for(server: &Server) -> HttpClipApi {
        let config = ClipConfig {
            api_endpoint: server.url(),
            ..ClipConfig::default()
        };
        HttpClipApi::new(config).unwrap()
    }

    fn clip_body() -> String {
        r#"{
            "status": "success",
            "result": {
                "code": "fa3dc2305e",
                "hashLength": 5,
                "url": "https://example.com/page",
                "createdAt": "2022-03-01T12:00:00.000Z",
                "expiresAt": "2022-04-01T12:00:00.000Z"
            }
        }"#
        .to_string()
    }

    #[tokio::test]
    async fn resolve_maps_success_envelope_to_clip() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/clip/get?code=abcde")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(clip_body())
            .create_async()
            .await;

        let clip = client_for(&server).resolve("abcde").await.unwrap();
        assert_eq!(clip.display_code(), "fa3dc");
        assert_eq!(clip.url, "https://example.com/page");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn resolve_maps_404_to_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/clip/get?code=abcde")
            .with_status(404)
            .with_body(r#"{"status":"error","result":"clip not found"}"#)
            .create_async()
            .await;

        let error = client_for(&server).resolve("abcde").await.unwrap_err();
        assert_eq!(error, ClipError::NotFound);
    }

    #[tokio::test]
    async fn resolve_maps_429_to_rate_limited() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/clip/get?code=abcde")
            .with_status(429)
            .create_async()
            .await;

        let error = client_for(&server).resolve("abcde").await.unwrap_err();
        assert_eq!(error, ClipError::RateLimited);
    }

    #[tokio::test]
    async fn resolve_maps_other_statuses_generically() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/clip/get?code=abcde")
            .with_status(502)
            .create_async()
            .await;

        let error = client_for(&server).resolve("abcde").await.unwrap_err();
        assert_eq!(error, ClipError::Status(502));
        assert_eq!(error.to_string(), "Got the error 502");
    }

    #[tokio::test]
    async fn resolve_converts_connection_failure_to_transport_error() {
        // Port 1 refuses connections.
        let config = ClipConfig {
            api_endpoint: "http://127.0.0.1:1".to_string(),
            ..ClipConfig::default()
        };
        let error = HttpClipApi::new(config)
            .unwrap()
            .resolve("abcde")
            .await
            .unwrap_err();
        assert!(matches!(error, ClipError::Transport(_)));
    }

    #[tokio::test]
    async fn create_posts_url_and_parses_envelope() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/clip/set")
            .match_header("content-type", "application/json")
            .match_body(r#"{"url":"https://example.com/page"}"#)
            .with_status(200)
            .with_body(clip_body())
            .create_async()
            .await;

        let clip = client_for(&server)
            .create("https://example.com/page", None)
            .await
            .unwrap();
        assert_eq!(clip.code, "fa3dc2305e");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_forwards_signature_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/clip/set")
            .match_body(r#"{"url":"https://example.com","sig":"0xsigned","addr":"0xaddr"}"#)
            .with_status(200)
            .with_body(clip_body())
            .create_async()
            .await;

        let signature = ClipSignature {
            signature: "0xsigned".to_string(),
            address: Some("0xaddr".to_string()),
        };
        client_for(&server)
            .create("https://example.com", Some(signature))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_turns_legacy_500_text_into_the_error_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/clip/set")
            .with_status(500)
            .with_body("Internal database failure")
            .create_async()
            .await;

        let error = client_for(&server)
            .create("https://example.com", None)
            .await
            .unwrap_err();
        assert_eq!(error, ClipError::Api("Internal database failure".to_string()));
    }

    #[tokio::test]
    async fn create_surfaces_error_envelopes() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/clip/set")
            .with_status(200)
            .with_body(r#"{"status":"error","result":"URL is blocked"}"#)
            .create_async()
            .await;

        let error = client_for(&server)
            .create("https://example.com", None)
            .await
            .unwrap_err();
        assert_eq!(error, ClipError::Api("URL is blocked".to_string()));
    }

    #[tokio::test]
    async fn request_upload_parses_the_ticket() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/uploadFile?name=media.jpg&type=image%2Fjpeg")
            .with_status(200)
            .with_body(
                r#"{
                    "url": "https://bucket.example/upload",
                    "fields": {"key": "ab12cd.jpg", "policy": "opaque"}
                }"#,
            )
            .create_async()
            .await;

        let ticket = client_for(&server)
            .request_upload("media.jpg", "image/jpeg")
            .await
            .unwrap();
        assert_eq!(ticket.url, "https://bucket.example/upload");
        assert_eq!(ticket.object_key(), Some("ab12cd.jpg"));
    }

    #[tokio::test]
    async fn request_upload_maps_failure_statuses() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/uploadFile?name=a.jpg&type=image%2Fjpeg")
            .with_status(404)
            .create_async()
            .await;

        let error = client_for(&server)
            .request_upload("a.jpg", "image/jpeg")
            .await
            .unwrap_err();
        assert_eq!(error, ClipError::Api("API Endpoint not found".to_string()));

        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/uploadFile?name=a.jpg&type=image%2Fjpeg")
            .with_status(503)
            .with_body(r#"{"result":"storage quota exhausted"}"#)
            .create_async()
            .await;

        let error = client_for(&server)
            .request_upload("a.jpg", "image/jpeg")
            .await
            .unwrap_err();
        assert_eq!(error, ClipError::Api("storage quota exhausted".to_string()));
    }
}
