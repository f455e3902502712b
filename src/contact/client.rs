//! HTTP client for the external mail-sending endpoint

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use super::ContactFormData;

/// Message used when the endpoint answers with something other than JSON
pub const NON_JSON_MESSAGE: &str = "Received non-JSON response";

/// Why a submission did not go through
#[derive(Error, Debug)]
pub enum ContactError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Invalid JSON response: {0}")]
    InvalidBody(String),
}

/// Body the endpoint is expected to send back
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactReply {
    pub message: Option<String>,
}

/// Posts contact form payloads to a fixed endpoint
#[derive(Clone)]
pub struct ContactClient {
    endpoint: String,
    client: reqwest::Client,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, reqwest::Client::new())
    }

    pub fn with_client(endpoint: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one message. Any 2xx status is success.
    pub async fn send(&self, form: &ContactFormData) -> Result<ContactReply, ContactError> {
        tracing::debug!("Posting contact message to {}", self.endpoint);

        let response = self.client.post(&self.endpoint).json(form).send().await?;
        let status = response.status();
        tracing::debug!("Contact endpoint answered {}", status);

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);

        let reply = if is_json {
            let body = response.text().await?;
            serde_json::from_str::<ContactReply>(&body)
                .map_err(|e| ContactError::InvalidBody(e.to_string()))?
        } else {
            let body = response.text().await?;
            tracing::debug!("Non-JSON contact response: {}", body);
            ContactReply {
                message: Some(NON_JSON_MESSAGE.to_string()),
            }
        };

        if !status.is_success() {
            let message = reply
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("Error: {}", status.as_u16()));
            return Err(ContactError::Rejected { status, message });
        }

        Ok(reply)
    }
}
