// Tool: run_dify_workflow

use async_trait::async_trait;
use nekro_plugin_core::Tool;
use serde_json::{Map, Value};

use crate::action::{failure_message, DifyContext};
use crate::error::{DifyError, Result};

pub const TOOL_NAME: &str = "run_dify_workflow";

/// Exposes [`DifyContext::run_dify_workflow`] to the agent.
///
/// Always returns a JSON string; failures are described in the text rather
/// than reported to the host as errors.
#[derive(Debug, Clone)]
pub struct RunDifyWorkflowTool {
    context: DifyContext,
}

impl RunDifyWorkflowTool {
    pub fn new(context: DifyContext) -> Self {
        Self { context }
    }
}

/// Split tool arguments into workflow inputs and an optional user.
/// A missing or null `inputs` means no inputs.
fn parse_arguments(arguments: &Value) -> Result<(Map<String, Value>, Option<&str>)> {
    let inputs = match arguments.get("inputs") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(other) => {
            return Err(DifyError::invalid_arguments(format!(
                "`inputs` must be an object, got {}",
                json_type(other)
            )))
        }
    };

    let user = match arguments.get("user") {
        None | Some(Value::Null) => None,
        Some(Value::String(user)) => Some(user.as_str()),
        Some(other) => {
            return Err(DifyError::invalid_arguments(format!(
                "`user` must be a string, got {}",
                json_type(other)
            )))
        }
    };

    Ok((inputs, user))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl Tool for RunDifyWorkflowTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Run a Dify workflow in blocking mode and return a text summary of its outputs."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "inputs": {
                    "type": "object",
                    "description": "Workflow input variables as key/value pairs.",
                    "additionalProperties": true
                },
                "user": {
                    "type": "string",
                    "description": "User identity reported to Dify. Defaults to the configured default user."
                }
            },
            "required": ["inputs"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, arguments: Value) -> Value {
        let text = match parse_arguments(&arguments) {
            Ok((inputs, user)) => self.context.run_dify_workflow(inputs, user).await,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected run_dify_workflow arguments");
                failure_message(&e)
            }
        };
        Value::String(text)
    }
}
