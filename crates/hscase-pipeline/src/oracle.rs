//! HTTP-backed classification oracle.
//!
//! Prompt text in, free text out. Status codes map onto the retryability
//! split: 429/503 are transient (honoring `Retry-After` when present),
//! other non-2xx responses are permanent, transport errors are transient.

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use hscase_core::error::OracleError;
use hscase_core::traits::Oracle;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    text: String,
    #[serde(default)]
    response: String,
}

pub struct HttpOracle {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl HttpOracle {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl Oracle for HttpOracle {
    async fn complete(&self, prompt: &str) -> Result<String, OracleError> {
        let request = GenerateRequest { model: &self.model, prompt };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| OracleError::transient(format!("oracle request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<f64>().ok())
                .map(Duration::from_secs_f64);
            return Err(OracleError::Transient {
                message: format!("oracle returned {status}"),
                retry_after,
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::permanent(format!("oracle returned {status}: {body}")));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| OracleError::permanent(format!("malformed oracle response: {e}")))?;
        if body.text.is_empty() {
            Ok(body.response)
        } else {
            Ok(body.text)
        }
    }
}
