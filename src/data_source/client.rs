use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;

use crate::error_handling::types::FetchError;
use crate::program::types::Session;

/// Envelope of the public session endpoint: `{ "sessions": [...] }`.
#[derive(Debug, Deserialize)]
pub struct SessionsPayload {
    pub sessions: Vec<Session>,
}

/// Read-only client for the public session API.
///
/// The service performs exactly one GET per process lifetime; there is no
/// retry, timeout or cancellation policy. A failed fetch leaves the program
/// cache empty and the web interface in its loading state.
pub struct SessionApiClient {
    client: Client,
    endpoint: String,
}

impl SessionApiClient {
    pub fn new<S: Into<String>>(endpoint: S) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Fetch and decode the full session list.
    pub async fn fetch_sessions(&self) -> Result<Vec<Session>, FetchError> {
        debug!("Fetching sessions from {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::BadStatus(response.status().as_u16()));
        }

        let payload: SessionsPayload = response
            .json()
            .await
            .map_err(|e| FetchError::DecodeFailed(e.to_string()))?;

        info!(
            "Fetched {} session(s) from {}",
            payload.sessions.len(),
            self.endpoint
        );
        Ok(payload.sessions)
    }
}
