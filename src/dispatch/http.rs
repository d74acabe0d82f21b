use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::GenError;

pub const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024; // 4MB

pub struct HttpDispatch {
    client: Client,
}

/// `{"error": {"message": "..."}}`, the documented failure body.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

impl Default for HttpDispatch {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpDispatch {
    pub fn new() -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(4)
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// POST a JSON body with bearer auth and return the raw success body.
    /// Exactly one request per call; nothing is retried.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        api_key: &str,
        body: &B,
        timeout: Duration,
        label: &str,
    ) -> Result<Vec<u8>, GenError> {
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .timeout(timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if let Some(len) = response.content_length()
            && len as usize > MAX_RESPONSE_BYTES
            && status.is_success()
        {
            return Err(too_large(status, len as usize));
        }

        if !status.is_success() {
            let body = read_error_body(response).await;
            return Err(GenError::Upstream {
                status: status.as_u16(),
                message: upstream_message(status, &body, label),
            });
        }

        let bytes = response.bytes().await?;

        if bytes.len() > MAX_RESPONSE_BYTES {
            return Err(too_large(status, bytes.len()));
        }

        Ok(bytes.to_vec())
    }
}

/// Message for a non-2xx reply: the structured `error.message` if the body
/// has one, else the status line.
pub fn upstream_message(status: StatusCode, body: &[u8], label: &str) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("{label} API error: {status}"))
}

/// Read at most `MAX_RESPONSE_BYTES` of an error body. A body that fails
/// mid-read keeps what arrived; the status is what the caller needs.
async fn read_error_body(mut response: Response) -> Vec<u8> {
    let mut body = Vec::new();
    while let Ok(Some(chunk)) = response.chunk().await {
        let room = MAX_RESPONSE_BYTES - body.len();
        body.extend_from_slice(&chunk[..chunk.len().min(room)]);
        if body.len() >= MAX_RESPONSE_BYTES {
            break;
        }
    }
    body
}

fn too_large(status: StatusCode, len: usize) -> GenError {
    GenError::Upstream {
        status: status.as_u16(),
        message: format!("response too large: {len} bytes (max {MAX_RESPONSE_BYTES})"),
    }
}
