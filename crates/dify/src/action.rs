//! Agent-facing workflow action.
//!
//! [`DifyContext`] is built once by the plugin from its configuration and
//! shared by every invocation. [`DifyContext::run_dify_workflow`] is the
//! boundary the agent sees: errors stay typed up to this point and are turned
//! into text here, so a failing upstream never surfaces as a fault in the host.

use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{error, info};

use crate::client::{DifyApiClient, WorkflowClient};
use crate::config::DifyConfig;
use crate::describe::describe_result;
use crate::error::Result;
use crate::types::WorkflowRequest;

pub const FAILURE_PREFIX: &str = "Workflow execution failed: ";

/// Configuration and client shared by all invocations of the action
#[derive(Clone)]
pub struct DifyContext {
    config: Arc<DifyConfig>,
    client: Option<Arc<dyn WorkflowClient>>,
}

impl DifyContext {
    pub fn new(config: DifyConfig) -> Self {
        Self {
            config: Arc::new(config),
            client: None,
        }
    }

    /// Use `client` instead of building a [`DifyApiClient`] per call
    pub fn with_client(mut self, client: Arc<dyn WorkflowClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn config(&self) -> &DifyConfig {
        &self.config
    }

    fn client(&self) -> Result<Arc<dyn WorkflowClient>> {
        // the key is checked even for injected clients
        self.config.require_api_key()?;
        match &self.client {
            Some(client) => Ok(Arc::clone(client)),
            None => Ok(Arc::new(DifyApiClient::from_config(&self.config)?)),
        }
    }

    /// Resolve the user identity, falling back to the configured default
    /// when `user` is absent or blank. A given user is sent unchanged.
    pub fn resolve_user<'a>(&'a self, user: Option<&'a str>) -> &'a str {
        match user {
            Some(u) if !u.trim().is_empty() => u,
            _ => &self.config.default_user,
        }
    }

    /// Run the workflow and return the raw response
    pub async fn run_workflow(
        &self,
        inputs: Map<String, Value>,
        user: Option<&str>,
    ) -> Result<Value> {
        let client = self.client()?;
        let request = WorkflowRequest::new(inputs, self.resolve_user(user));

        info!(user = %request.user, inputs = ?request.inputs, "Running Dify workflow");
        let result = client.run_workflow(&request).await?;
        info!(result = %result, "Dify workflow succeeded");

        Ok(result)
    }

    /// Run the workflow and describe the outcome. Never fails.
    pub async fn run_dify_workflow(
        &self,
        inputs: Map<String, Value>,
        user: Option<&str>,
    ) -> String {
        match self.run_workflow(inputs, user).await {
            Ok(result) => describe_result(&result),
            Err(e) => {
                error!(error = %e, "Dify workflow failed");
                failure_message(&e)
            }
        }
    }
}

impl std::fmt::Debug for DifyContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DifyContext")
            .field("config", &self.config)
            .field("injected_client", &self.client.is_some())
            .finish()
    }
}

pub fn failure_message(error: &dyn std::error::Error) -> String {
    format!("{}{}", FAILURE_PREFIX, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::OUTPUTS_PREFIX;
    use crate::error::DifyError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records requests and replays a fixed outcome
    struct ScriptedClient {
        outcome: fn() -> Result<Value>,
        seen: Mutex<Vec<WorkflowRequest>>,
    }

    impl ScriptedClient {
        fn new(outcome: fn() -> Result<Value>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl WorkflowClient for ScriptedClient {
        async fn run_workflow(&self, request: &WorkflowRequest) -> Result<Value> {
            self.seen.lock().unwrap().push(request.clone());
            (self.outcome)()
        }
    }

    fn inputs() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("query".to_string(), json!("hello"));
        map
    }

    #[tokio::test]
    async fn test_success_is_described() {
        let client = ScriptedClient::new(|| Ok(json!({"data": {"outputs": {"a": 1}}})));
        let ctx = DifyContext::new(DifyConfig::new("app-1")).with_client(client.clone());

        let text = ctx.run_dify_workflow(inputs(), None).await;

        assert!(text.starts_with(OUTPUTS_PREFIX));
        assert!(text.contains("\"a\": 1"));
        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].user, "nekro-agent-user");
        assert_eq!(seen[0].inputs, inputs());
    }

    #[tokio::test]
    async fn test_explicit_user_is_used() {
        let client = ScriptedClient::new(|| Ok(json!("ok")));
        let ctx = DifyContext::new(DifyConfig::new("app-1").with_default_user("fallback"))
            .with_client(client.clone());

        ctx.run_dify_workflow(inputs(), Some("alice")).await;
        ctx.run_dify_workflow(inputs(), Some("  ")).await;

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen[0].user, "alice");
        assert_eq!(seen[1].user, "fallback");
    }

    #[test]
    fn test_resolve_user_keeps_given_value() {
        let ctx = DifyContext::new(DifyConfig::new("app-1").with_default_user("fallback"));

        assert_eq!(ctx.resolve_user(Some(" alice ")), " alice ");
        assert_eq!(ctx.resolve_user(Some("")), "fallback");
        assert_eq!(ctx.resolve_user(Some(" \t")), "fallback");
        assert_eq!(ctx.resolve_user(None), "fallback");
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_text() {
        let ctx = DifyContext::new(DifyConfig::new("app-1").with_base_url("http://127.0.0.1:1"));

        let err = ctx.run_workflow(inputs(), None).await.unwrap_err();
        assert!(matches!(err, DifyError::Transport(_)));

        let text = ctx.run_dify_workflow(inputs(), None).await;
        assert!(text.starts_with(FAILURE_PREFIX));
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_text() {
        let client = ScriptedClient::new(|| Err(DifyError::upstream(503, "maintenance")));
        let ctx = DifyContext::new(DifyConfig::new("app-1")).with_client(client);

        let text = ctx.run_dify_workflow(inputs(), None).await;

        assert_eq!(
            text,
            "Workflow execution failed: Dify API call failed (status 503): maintenance"
        );
    }

    #[tokio::test]
    async fn test_missing_key_never_reaches_client() {
        let client = ScriptedClient::new(|| Ok(json!({})));
        let ctx = DifyContext::new(DifyConfig::default()).with_client(client.clone());

        let err = ctx.run_workflow(inputs(), None).await.unwrap_err();
        assert!(matches!(err, DifyError::MissingCredential));

        let text = ctx.run_dify_workflow(inputs(), None).await;
        assert_eq!(text, "Workflow execution failed: Dify API key is not configured");
        assert!(client.seen.lock().unwrap().is_empty());
    }
}
