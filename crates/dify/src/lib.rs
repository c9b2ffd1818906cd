// Dify Workflow Plugin
//
// Lets an agent run a Dify workflow and read back a text summary of the
// result. Each tool call issues one blocking `POST /workflows/run`; there is
// no streaming, polling, retrying or caching.
//
// Layers:
// - config: DifyConfig supplied by the host (JSON object or environment)
// - client: WorkflowClient trait and the reqwest-backed DifyApiClient
// - describe: response shape classification and rendering
// - action: DifyContext, the typed-errors-to-text boundary
// - tool / plugin: host integration (Tool, Capability, Plugin)

mod action;
mod client;
mod config;
mod describe;
mod error;
mod plugin;
mod prompt;
mod tool;
mod types;

pub use action::{failure_message, DifyContext, FAILURE_PREFIX};
pub use client::{DifyApiClient, WorkflowClient};
pub use config::{DifyConfig, DEFAULT_BASE_URL, DEFAULT_USER};
pub use describe::{
    describe_result, ResultShape, DATA_PREFIX, FULL_RESULT_PREFIX, OUTPUTS_PREFIX, RESULT_PREFIX,
};
pub use error::{DifyError, Result};
pub use plugin::{DifyPlugin, MODULE_NAME, PLUGIN_NAME, PLUGIN_VERSION};
pub use prompt::{build_prompt_fragment, USAGE_DOC};
pub use tool::{RunDifyWorkflowTool, TOOL_NAME};
pub use types::{ResponseMode, WorkflowRequest, WORKFLOW_RUN_PATH};
