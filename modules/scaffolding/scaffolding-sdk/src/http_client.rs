//! Remote [`ScaffoldingClientV1`] over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, StatusCode, header};
use http_body_util::{BodyExt, Empty};
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use serde::Deserialize;

use crate::api::ScaffoldingClientV1;
use crate::errors::ScaffoldingError;
use crate::models::IdentityRecord;

/// Pause before the single retry.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

const INFO_PATH: &str = "/scaffolding/info";

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for a remote scaffolding server.
///
/// Retries a failed lookup once, after [`DEFAULT_RETRY_DELAY`] unless
/// configured otherwise, when the failure is a transport error or a 5xx.
#[derive(Clone)]
pub struct ScaffoldingHttpClient {
    base_url: String,
    bearer_token: Option<String>,
    retry_delay: Duration,
    inner: Client<HttpConnector, Empty<Bytes>>,
}

impl ScaffoldingHttpClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            bearer_token: None,
            retry_delay: DEFAULT_RETRY_DELAY,
            inner: Client::builder(TokioExecutor::new()).build_http(),
        }
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    fn info_url(&self, name: &str) -> String {
        format!("{}{INFO_PATH}/{}", self.base_url, urlencoding::encode(name))
    }

    async fn fetch(&self, url: &str) -> Result<IdentityRecord, ScaffoldingError> {
        let mut builder = Request::get(url).header(header::ACCEPT, "application/json");
        if let Some(token) = &self.bearer_token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder
            .body(Empty::new())
            .map_err(|e| ScaffoldingError::Transport(format!("invalid request: {e}")))?;

        let response = self
            .inner
            .request(request)
            .await
            .map_err(|e| ScaffoldingError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ScaffoldingError::Transport(e.to_string()))?
            .to_bytes();

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(|e| ScaffoldingError::Http {
                status: status.as_u16(),
                message: Some(format!("Invalid response body: {e}")),
            });
        }
        Err(error_from_status(status, &body))
    }
}

fn error_from_status(status: StatusCode, body: &[u8]) -> ScaffoldingError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_default();

    match status {
        StatusCode::BAD_REQUEST => ScaffoldingError::InvalidInput(message),
        StatusCode::UNAUTHORIZED => ScaffoldingError::Unauthorized,
        StatusCode::FORBIDDEN => ScaffoldingError::Forbidden,
        StatusCode::NOT_FOUND => ScaffoldingError::NotFound(message),
        StatusCode::INTERNAL_SERVER_ERROR => ScaffoldingError::Internal(message),
        _ => ScaffoldingError::Http {
            status: status.as_u16(),
            message: (!message.is_empty()).then_some(message),
        },
    }
}

#[async_trait]
impl ScaffoldingClientV1 for ScaffoldingHttpClient {
    async fn get_info(&self, name: &str) -> Result<IdentityRecord, ScaffoldingError> {
        // Same trim as the server: spaces and ASCII control characters only.
        let name = name.trim_matches(|c: char| c <= ' ');
        if name.is_empty() {
            return Err(ScaffoldingError::invalid_input("Identity name is required"));
        }
        let url = self.info_url(name);

        match self.fetch(&url).await {
            Err(err) if err.is_retryable() => {
                tracing::warn!(
                    error = %err,
                    delay = ?self.retry_delay,
                    "Identity lookup failed, retrying once"
                );
                tokio::time::sleep(self.retry_delay).await;
                self.fetch(&url).await
            }
            result => result,
        }
    }
}
