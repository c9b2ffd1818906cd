// Tool Abstraction for Plugins
//
// Plugins expose agent-callable actions by implementing the `Tool` trait.
// Tools are registered with a `ToolRegistry`, which the host uses to
// dispatch tool calls.
//
// Design decisions:
// - Tools are defined via a trait (function-style tools)
// - ToolRegistry implements ToolExecutor for integration with the host
// - A tool reports its own failures inside the returned value; dispatch only
//   fails when no tool has the requested name

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::{PluginError, Result};
use crate::tool_types::{PluginTool, ToolCall, ToolDefinition, ToolResult};
use crate::traits::ToolExecutor;

// ============================================================================
// Tool Trait
// ============================================================================

/// Trait for agent-callable actions provided by a plugin.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use serde_json::{json, Value};
///
/// struct Ping;
///
/// #[async_trait]
/// impl Tool for Ping {
///     fn name(&self) -> &str {
///         "ping"
///     }
///
///     fn description(&self) -> &str {
///         "Reply with pong"
///     }
///
///     fn parameters_schema(&self) -> Value {
///         json!({"type": "object", "properties": {}})
///     }
///
///     async fn execute(&self, _arguments: Value) -> Value {
///         json!("pong")
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name. The agent invokes the tool by this name.
    fn name(&self) -> &str;

    /// Description shown to the agent to decide when to use the tool.
    fn description(&self) -> &str;

    /// JSON schema describing the expected arguments.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments. The returned value is
    /// handed back to the agent as is.
    async fn execute(&self, arguments: Value) -> Value;

    /// Convert this tool to a ToolDefinition advertised to the agent.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition::Plugin(PluginTool {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        })
    }
}

// ============================================================================
// ToolRegistry - Collection of Tools
// ============================================================================

/// A registry that holds tools by name and implements ToolExecutor.
///
/// ```ignore
/// let registry = ToolRegistry::builder()
///     .tool(RunDifyWorkflowTool::new(context))
///     .build();
///
/// let tool_def = registry.get(TOOL_NAME).unwrap().to_definition();
/// let result = registry.execute(&tool_call, &tool_def).await?;
/// ```
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. A tool with the same name is replaced.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        self.tools.insert(tool.name().to_string(), Arc::new(tool));
    }

    pub fn register_boxed(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), Arc::from(tool));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::new()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    async fn execute(
        &self,
        tool_call: &ToolCall,
        _tool_def: &ToolDefinition,
    ) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(&tool_call.name)
            .ok_or_else(|| PluginError::tool_not_found(&tool_call.name))?;

        debug!(tool_name = %tool_call.name, tool_call_id = %tool_call.id, "Dispatching tool call");

        let result = tool.execute(tool_call.arguments.clone()).await;
        Ok(ToolResult {
            tool_call_id: tool_call.id.clone(),
            result,
        })
    }
}

// ============================================================================
// ToolRegistryBuilder
// ============================================================================

/// Builder for creating a ToolRegistry with a fluent API.
pub struct ToolRegistryBuilder {
    registry: ToolRegistry,
}

impl ToolRegistryBuilder {
    pub fn new() -> Self {
        Self {
            registry: ToolRegistry::new(),
        }
    }

    pub fn tool(mut self, tool: impl Tool + 'static) -> Self {
        self.registry.register(tool);
        self
    }

    pub fn build(self) -> ToolRegistry {
        self.registry
    }
}

impl Default for ToolRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
