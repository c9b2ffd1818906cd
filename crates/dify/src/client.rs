// Dify workflow API client
//
// One blocking `POST {base_url}/workflows/run` per call. No retries, no
// streaming, and no timeout beyond reqwest's defaults.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::DifyConfig;
use crate::error::{DifyError, Result};
use crate::types::{WorkflowRequest, WORKFLOW_RUN_PATH};

/// Runs a workflow and returns the raw JSON response
#[async_trait]
pub trait WorkflowClient: Send + Sync {
    async fn run_workflow(&self, request: &WorkflowRequest) -> Result<Value>;
}

/// HTTP client for the Dify workflow API
#[derive(Clone)]
pub struct DifyApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl DifyApiClient {
    /// Fails with `MissingCredential` when `api_key` is empty
    pub fn new(api_key: impl Into<String>, base_url: impl AsRef<str>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DifyError::MissingCredential);
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &DifyConfig) -> Result<Self> {
        let api_key = config.require_api_key()?;
        Self::new(api_key, config.api_base())
    }

    /// Use a preconfigured reqwest client (proxy, timeouts, TLS roots)
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, WORKFLOW_RUN_PATH)
    }
}

impl std::fmt::Debug for DifyApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DifyApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WorkflowClient for DifyApiClient {
    async fn run_workflow(&self, request: &WorkflowRequest) -> Result<Value> {
        let url = self.endpoint();
        debug!(url = %url, user = %request.user, "Sending Dify workflow request");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            debug!(status = status.as_u16(), "Dify workflow request rejected");
            return Err(DifyError::upstream(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(DifyError::InvalidResponse)
    }
}
