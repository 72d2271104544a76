//! Model server client.
//!
//! The model server is an external collaborator: given a directory path
//! it returns a clustering/rating assignment over the images inside.
//! [`Organizer`] is the trait seam so that navigators can be driven by
//! any implementation; [`ModelServerClient`] talks to the real server
//! over HTTP/JSON.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::org::record::OrganizationRecord;

/// Errors that can occur while requesting an organization.
#[derive(Debug, thiserror::Error)]
pub enum OrganizeError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("malformed response: {0}")]
    BadResponse(String),
}

/// Computes an organization for a directory.
///
/// The one call here may block for a non-trivial duration, so it is
/// async; navigators stay responsive while awaiting it.
#[async_trait]
pub trait Organizer: Send + Sync {
    /// Returns a clustering/rating assignment over the images in `dir`.
    async fn organize(&self, dir: &Path) -> Result<OrganizationRecord, OrganizeError>;
}

#[derive(Serialize)]
struct OrganizeRequest<'a> {
    path: &'a str,
}

/// HTTP client for the external deep-learning model server.
///
/// Posts `{"path": ...}` to `<base_url>/organize` and expects an
/// [`OrganizationRecord`] as the JSON response body. The server's wider
/// protocol (prediction, training status) is not part of this core.
#[derive(Debug, Clone)]
pub struct ModelServerClient {
    http: reqwest::Client,
    base_url: String,
}

/// Organize calls run a clustering pass server-side, so the timeout is
/// generous compared to a typical API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

impl ModelServerClient {
    /// Creates a client for the server at `base_url`
    /// (e.g. `http://127.0.0.1:5000`). A trailing slash is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the configured base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Organizer for ModelServerClient {
    async fn organize(&self, dir: &Path) -> Result<OrganizationRecord, OrganizeError> {
        let url = format!("{}/organize", self.base_url);
        let path = dir.to_string_lossy();
        let request = OrganizeRequest { path: &path };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| OrganizeError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OrganizeError::Server {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<OrganizationRecord>()
            .await
            .map_err(|e| OrganizeError::BadResponse(e.to_string()))
    }
}
