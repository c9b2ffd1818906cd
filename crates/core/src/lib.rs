// Plugin Host Abstractions
//
// This crate defines the contract between an agent host and the plugins it
// mounts. Plugins contribute capabilities; capabilities contribute tools and
// system prompt text.
//
// Key design decisions:
// - Tools are defined via a Tool trait (function-style tools)
// - ToolRegistry implements ToolExecutor for host dispatch
// - Tools describe their own failures in the value they return
// - Plugins are constructed explicitly with their configuration; there is no
//   process-wide plugin state

pub mod capabilities;
pub mod capability_types;
pub mod error;
pub mod plugin;
pub mod telemetry;
pub mod tool_types;
pub mod tools;
pub mod traits;

pub use capabilities::{
    apply_capabilities, AppliedCapabilities, Capability, CapabilityId, CapabilityRegistry,
    CapabilityRegistryBuilder, CapabilityStatus,
};
pub use error::{PluginError, Result};
pub use plugin::{cleanup_plugins, init_plugins, Plugin, PluginInfo};
pub use telemetry::{init_tracing, TelemetryConfig};
pub use tool_types::{PluginTool, ToolCall, ToolDefinition, ToolResult};
pub use tools::{Tool, ToolRegistry, ToolRegistryBuilder};
pub use traits::ToolExecutor;
