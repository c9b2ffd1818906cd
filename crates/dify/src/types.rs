// Wire types for the Dify workflow API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Endpoint path appended to the configured base URL
pub const WORKFLOW_RUN_PATH: &str = "/workflows/run";

/// Dify response mode. Only blocking calls are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    #[default]
    Blocking,
}

/// Body of `POST /workflows/run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRequest {
    /// Workflow input variables, passed through unvalidated
    pub inputs: Map<String, Value>,
    pub response_mode: ResponseMode,
    pub user: String,
}

impl WorkflowRequest {
    pub fn new(inputs: Map<String, Value>, user: impl Into<String>) -> Self {
        Self {
            inputs,
            response_mode: ResponseMode::Blocking,
            user: user.into(),
        }
    }
}
