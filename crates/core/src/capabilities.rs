//! Capabilities Module
//!
//! A capability is the unit a plugin contributes to an agent. Each capability
//! can contribute:
//! - A system prompt addition (usage documentation for its tools)
//! - Tools for the agent
//!
//! Design decisions:
//! - CapabilityRegistry holds capability implementations by ID
//! - apply_capabilities() merges contributions in the requested order
//! - Capabilities that still need configuration are applied anyway so the
//!   agent sees their tools and gets a descriptive failure when it calls them

use crate::tool_types::ToolDefinition;
use crate::tools::{Tool, ToolRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub use crate::capability_types::{CapabilityId, CapabilityStatus};

// ============================================================================
// Capability Trait
// ============================================================================

/// Trait for implementing capabilities that extend agent functionality.
///
/// ```ignore
/// impl Capability for DifyCapability {
///     fn id(&self) -> &str {
///         CapabilityId::DIFY_WORKFLOW
///     }
///
///     fn name(&self) -> &str {
///         "Dify Workflow"
///     }
///
///     fn description(&self) -> &str {
///         "Run Dify workflows from the agent."
///     }
///
///     fn tools(&self) -> Vec<Box<dyn Tool>> {
///         vec![Box::new(RunDifyWorkflowTool::new(self.context.clone()))]
///     }
/// }
/// ```
pub trait Capability: Send + Sync {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn status(&self) -> CapabilityStatus {
        CapabilityStatus::Available
    }

    /// Icon name for UI rendering
    fn icon(&self) -> Option<&str> {
        None
    }

    /// Category for grouping in UI
    fn category(&self) -> Option<&str> {
        None
    }

    /// Text to prepend to the agent's system prompt
    fn system_prompt_addition(&self) -> Option<&str> {
        None
    }

    /// Tool implementations provided by this capability
    fn tools(&self) -> Vec<Box<dyn Tool>> {
        vec![]
    }

    fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools().iter().map(|t| t.to_definition()).collect()
    }
}

// ============================================================================
// Capability Registry
// ============================================================================

/// Registry that holds capability implementations by ID.
#[derive(Clone, Default)]
pub struct CapabilityRegistry {
    capabilities: HashMap<String, Arc<dyn Capability>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self {
            capabilities: HashMap::new(),
        }
    }

    pub fn register(&mut self, capability: impl Capability + 'static) {
        self.capabilities
            .insert(capability.id().to_string(), Arc::new(capability));
    }

    pub fn register_arc(&mut self, capability: Arc<dyn Capability>) {
        self.capabilities
            .insert(capability.id().to_string(), capability);
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn Capability>> {
        self.capabilities.get(id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.capabilities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    pub fn builder() -> CapabilityRegistryBuilder {
        CapabilityRegistryBuilder::new()
    }
}

impl std::fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<_> = self.capabilities.keys().collect();
        f.debug_struct("CapabilityRegistry")
            .field("capabilities", &ids)
            .finish()
    }
}

/// Builder for creating a CapabilityRegistry with a fluent API
pub struct CapabilityRegistryBuilder {
    registry: CapabilityRegistry,
}

impl CapabilityRegistryBuilder {
    pub fn new() -> Self {
        Self {
            registry: CapabilityRegistry::new(),
        }
    }

    pub fn capability(mut self, capability: impl Capability + 'static) -> Self {
        self.registry.register(capability);
        self
    }

    pub fn capability_arc(mut self, capability: Arc<dyn Capability>) -> Self {
        self.registry.register_arc(capability);
        self
    }

    pub fn build(self) -> CapabilityRegistry {
        self.registry
    }
}

impl Default for CapabilityRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Apply Capabilities
// ============================================================================

/// Result of applying capabilities to a base system prompt
pub struct AppliedCapabilities {
    /// Capability prompt additions followed by the base prompt
    pub system_prompt: String,
    /// Tool registry containing all capability tools
    pub tool_registry: ToolRegistry,
    /// Tool definitions to advertise to the agent
    pub tool_definitions: Vec<ToolDefinition>,
    /// IDs of capabilities that were applied
    pub applied_ids: Vec<String>,
}

/// Apply capabilities to a base system prompt.
///
/// Prompt additions are collected in `capability_ids` order, joined by a
/// blank line and prepended to `base_prompt`. Unknown and deprecated
/// capabilities are skipped.
pub fn apply_capabilities(
    base_prompt: &str,
    capability_ids: &[String],
    registry: &CapabilityRegistry,
) -> AppliedCapabilities {
    let mut system_prompt_parts: Vec<String> = Vec::new();
    let mut tool_registry = ToolRegistry::new();
    let mut tool_definitions: Vec<ToolDefinition> = Vec::new();
    let mut applied_ids: Vec<String> = Vec::new();

    for cap_id in capability_ids {
        let Some(capability) = registry.get(cap_id) else {
            debug!(capability_id = %cap_id, "Skipping unknown capability");
            continue;
        };

        if capability.status() == CapabilityStatus::Deprecated {
            debug!(capability_id = %cap_id, "Skipping deprecated capability");
            continue;
        }

        if let Some(addition) = capability.system_prompt_addition() {
            if !addition.is_empty() {
                system_prompt_parts.push(addition.to_string());
            }
        }

        for tool in capability.tools() {
            tool_definitions.push(tool.to_definition());
            tool_registry.register_boxed(tool);
        }

        applied_ids.push(cap_id.clone());
    }

    let mut system_prompt = String::new();
    if !system_prompt_parts.is_empty() {
        system_prompt.push_str(&system_prompt_parts.join("\n\n"));
        system_prompt.push_str("\n\n");
    }
    system_prompt.push_str(base_prompt);

    AppliedCapabilities {
        system_prompt,
        tool_registry,
        tool_definitions,
        applied_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;

    struct NoteTool;

    #[async_trait]
    impl Tool for NoteTool {
        fn name(&self) -> &str {
            "take_note"
        }

        fn description(&self) -> &str {
            "Take a note"
        }

        fn parameters_schema(&self) -> Value {
            serde_json::json!({"type": "object"})
        }

        async fn execute(&self, _arguments: Value) -> Value {
            Value::from("noted")
        }
    }

    struct Notes {
        status: CapabilityStatus,
        prompt: Option<&'static str>,
    }

    impl Capability for Notes {
        fn id(&self) -> &str {
            "notes"
        }

        fn name(&self) -> &str {
            "Notes"
        }

        fn description(&self) -> &str {
            "Note taking"
        }

        fn status(&self) -> CapabilityStatus {
            self.status
        }

        fn system_prompt_addition(&self) -> Option<&str> {
            self.prompt
        }

        fn tools(&self) -> Vec<Box<dyn Tool>> {
            vec![Box::new(NoteTool)]
        }
    }

    struct Quiet;

    impl Capability for Quiet {
        fn id(&self) -> &str {
            "quiet"
        }

        fn name(&self) -> &str {
            "Quiet"
        }

        fn description(&self) -> &str {
            "Only prompt"
        }

        fn system_prompt_addition(&self) -> Option<&str> {
            Some("Be brief.")
        }
    }

    fn notes(status: CapabilityStatus) -> Notes {
        Notes {
            status,
            prompt: Some("Use take_note to remember things."),
        }
    }

    #[test]
    fn test_apply_capabilities_empty() {
        let registry = CapabilityRegistry::builder()
            .capability(notes(CapabilityStatus::Available))
            .build();

        let applied = apply_capabilities("You are helpful.", &[], &registry);

        assert_eq!(applied.system_prompt, "You are helpful.");
        assert!(applied.tool_registry.is_empty());
        assert!(applied.applied_ids.is_empty());
    }

    #[test]
    fn test_apply_capabilities_prepends_prompt_in_order() {
        let registry = CapabilityRegistry::builder()
            .capability(notes(CapabilityStatus::Available))
            .capability(Quiet)
            .build();

        let applied = apply_capabilities(
            "You are helpful.",
            &["quiet".to_string(), "notes".to_string()],
            &registry,
        );

        assert_eq!(
            applied.system_prompt,
            "Be brief.\n\nUse take_note to remember things.\n\nYou are helpful."
        );
        assert!(applied.tool_registry.has("take_note"));
        assert_eq!(applied.tool_definitions.len(), 1);
        assert_eq!(applied.applied_ids, vec!["quiet", "notes"]);
    }

    #[test]
    fn test_apply_capabilities_keeps_unconfigured() {
        let registry = CapabilityRegistry::builder()
            .capability(notes(CapabilityStatus::NeedsConfiguration))
            .build();

        let applied = apply_capabilities("", &["notes".to_string()], &registry);

        assert!(applied.tool_registry.has("take_note"));
        assert_eq!(applied.applied_ids, vec!["notes"]);
    }

    #[test]
    fn test_apply_capabilities_skips_deprecated_and_unknown() {
        let registry = CapabilityRegistry::builder()
            .capability(notes(CapabilityStatus::Deprecated))
            .build();

        let applied = apply_capabilities(
            "base",
            &["notes".to_string(), "missing".to_string()],
            &registry,
        );

        assert_eq!(applied.system_prompt, "base");
        assert!(applied.tool_registry.is_empty());
        assert!(applied.applied_ids.is_empty());
    }

    #[test]
    fn test_empty_prompt_addition_is_ignored() {
        let registry = CapabilityRegistry::builder()
            .capability(Notes {
                status: CapabilityStatus::Available,
                prompt: Some(""),
            })
            .build();

        let applied = apply_capabilities("base", &["notes".to_string()], &registry);
        assert_eq!(applied.system_prompt, "base");
    }

    #[test]
    fn test_registry_lookup() {
        let registry = CapabilityRegistry::builder().capability(Quiet).build();

        assert_eq!(registry.len(), 1);
        assert!(registry.has("quiet"));
        assert_eq!(registry.get("quiet").unwrap().name(), "Quiet");
        assert!(registry.get("quiet").unwrap().tools().is_empty());
        assert!(registry.get("loud").is_none());
    }
}
