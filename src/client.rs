use bytes::Bytes;
use reqwest::{
    StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    constants,
    context::Context,
    error::{ApiErrorBody, CompletionError, Result},
    types::{CompletionRequest, CompletionResponse},
};

/// Client for the completions endpoint.
///
/// Holds only immutable credentials and a transport handle, so a single
/// instance can be shared across tasks and used concurrently.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    config: ClientConfig,
    url: String,
    http: reqwest::Client,
}

impl CompletionClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a caller-built transport (proxies, TLS roots, timeouts, ...).
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        let url = config.completions_url();
        Self { config, url, http }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Submit one completion request.
    ///
    /// Exactly one HTTP call is made. Non-200 responses are decoded as an
    /// [`ApiError`](crate::ApiError) when possible.
    #[tracing::instrument(
        name = "completion",
        skip(self, ctx, request),
        fields(model = %request.model)
    )]
    pub async fn complete(
        &self,
        ctx: &Context,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse> {
        let body = serde_json::to_vec(request).map_err(CompletionError::Serialize)?;

        let (status, bytes) = ctx.run(self.send(body)).await??;

        decode_response(status, &bytes)
    }

    async fn send(&self, body: Vec<u8>) -> Result<(StatusCode, Bytes)> {
        let res = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(constants::ORGANIZATION_HEADER, &self.config.organization)
            .body(body)
            .send()
            .await
            .map_err(|e| CompletionError::Network {
                message: "Failed to send completion request".to_string(),
                source: e,
            })?;

        let status = res.status();
        debug!(status = %status, "Received completion response");

        let bytes = res.bytes().await.map_err(|e| CompletionError::Network {
            message: "Failed to read response body".to_string(),
            source: e,
        })?;

        Ok((status, bytes))
    }
}

fn decode_response(status: StatusCode, body: &[u8]) -> Result<CompletionResponse> {
    if status != StatusCode::OK {
        warn!(status = %status, "API returned error status");

        let parsed: ApiErrorBody =
            serde_json::from_slice(body).map_err(|e| CompletionError::InvalidErrorBody {
                status: status.as_u16(),
                source: e,
            })?;
        return Err(CompletionError::Api(parsed.error));
    }

    serde_json::from_slice(body).map_err(|e| CompletionError::Parse {
        status: status.as_u16(),
        source: e,
    })
}
