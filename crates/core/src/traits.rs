// Host-facing traits
//
// The host dispatches agent tool calls through ToolExecutor. ToolRegistry is
// the standard implementation; hosts with their own dispatch can implement it
// directly.

use async_trait::async_trait;

use crate::error::Result;
use crate::tool_types::{ToolCall, ToolDefinition, ToolResult};

/// Executes tool calls on behalf of the host agent
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a single tool call.
    ///
    /// Returns `Err` only for dispatch failures (unknown tool). Failures inside
    /// the tool are reported through the returned `ToolResult`.
    async fn execute(&self, tool_call: &ToolCall, tool_def: &ToolDefinition)
        -> Result<ToolResult>;
}
