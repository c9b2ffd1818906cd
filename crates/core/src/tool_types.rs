// Tool definitions and call/result envelopes exchanged with the host
//
// Design Decision: Tools are identified by name (string) so plugins can add
// tools without touching the host. Dispatch happens through ToolRegistry.

use serde::{Deserialize, Serialize};

/// Tool definition advertised to the agent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolDefinition {
    /// Plugin-provided tool, executed via ToolRegistry
    Plugin(PluginTool),
}

impl ToolDefinition {
    /// Name of the defined tool
    pub fn name(&self) -> &str {
        match self {
            ToolDefinition::Plugin(tool) => &tool.name,
        }
    }
}

/// Plugin tool description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginTool {
    /// Tool name (used by the agent and for registry lookup)
    pub name: String,
    /// Tool description for the agent
    pub description: String,
    /// JSON schema for tool parameters
    pub parameters: serde_json::Value,
}

/// Tool call issued by the agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique ID for this tool call
    pub id: String,
    /// Tool name to execute
    pub name: String,
    /// Arguments as JSON
    pub arguments: serde_json::Value,
}

/// Tool execution result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool call ID this result corresponds to
    pub tool_call_id: String,
    /// Value returned by the tool
    pub result: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_tool_deserialization() {
        let json = r#"{
            "type": "plugin",
            "name": "run_dify_workflow",
            "description": "Run a Dify workflow",
            "parameters": {"type": "object"}
        }"#;

        let tool: ToolDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(tool.name(), "run_dify_workflow");
        let ToolDefinition::Plugin(plugin) = tool;
        assert_eq!(plugin.parameters["type"], "object");
    }

    #[test]
    fn test_definition_serializes_with_type_tag() {
        let def = ToolDefinition::Plugin(PluginTool {
            name: "run_dify_workflow".to_string(),
            description: "Run a Dify workflow".to_string(),
            parameters: serde_json::json!({"type": "object"}),
        });

        let value = serde_json::to_value(&def).unwrap();
        assert_eq!(value["type"], "plugin");
        assert_eq!(value["name"], "run_dify_workflow");
    }
}
