//! Face engine adapter that reaches a running face-recognition engine over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::Config;
use crate::domain::models::types::{AnalyzeParams, FindParams, RepresentParams, ResultTable, VerifyParams};
use crate::domain::services::face_engine::{EngineError, FaceEngine};

/// Analyze body: the engine is always asked to run without progress output.
#[derive(Serialize)]
struct AnalyzeBody<'a> {
    #[serde(flatten)]
    params: &'a AnalyzeParams,
    silent: bool,
}

/// HTTP client for a face-recognition engine exposing one POST endpoint per operation
#[derive(Debug, Clone)]
pub struct HttpFaceEngine {
    /// HTTP client
    client: Client,

    /// Base URL of the engine
    base_url: String,
}

impl HttpFaceEngine {
    /// Creates a new engine client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, EngineError> {
        let client = Client::builder()
            .pool_max_idle_per_host(16)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .tcp_keepalive(Some(Duration::from_secs(30)))
            .timeout(timeout)
            .build()
            .map_err(transport)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates an engine client from the service configuration
    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        Self::new(&config.engine_url, config.engine_timeout)
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts `body` to the operation's endpoint and returns the decoded JSON answer.
    async fn call<B: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        body: &B,
    ) -> Result<Value, EngineError> {
        let url = format!("{}/{}", self.base_url, operation);
        debug!("POST {}", url);

        let resp = self.client.post(&url).json(body).send().await.map_err(transport)?;
        let status = resp.status();

        if status.is_success() {
            return resp
                .json::<Value>()
                .await
                .map_err(|e| EngineError::InvalidResponse(format!("{} body: {}", operation, e)));
        }

        let error_text = resp.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        error!("Engine {} failed: {} - {}", operation, status, error_text);
        Err(EngineError::engine(operation, upstream_message(&error_text)))
    }
}

/// Converts a client failure into the engine boundary's transport error.
fn transport(err: reqwest::Error) -> EngineError {
    EngineError::Transport(err.to_string())
}

/// Extracts the engine's `error` field from a failure body, falling back to the raw text.
fn upstream_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl FaceEngine for HttpFaceEngine {
    async fn represent(&self, params: RepresentParams) -> Result<Value, EngineError> {
        self.call("represent", &params).await
    }

    async fn verify(&self, params: VerifyParams) -> Result<Value, EngineError> {
        self.call("verify", &params).await
    }

    async fn find(&self, params: FindParams) -> Result<Vec<ResultTable>, EngineError> {
        let value = self.call("find", &params).await?;
        serde_json::from_value(value)
            .map_err(|e| EngineError::InvalidResponse(format!("find results: {}", e)))
    }

    async fn analyze(&self, params: AnalyzeParams) -> Result<Value, EngineError> {
        let body = AnalyzeBody {
            params: &params,
            silent: true,
        };
        self.call("analyze", &body).await
    }
}
