// Error types for the plugin host

use thiserror::Error;

/// Result type alias for plugin host operations
pub type Result<T> = std::result::Result<T, PluginError>;

/// Errors that can occur while dispatching to plugins
#[derive(Debug, Error)]
pub enum PluginError {
    /// No tool with the requested name is registered
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Plugin lifecycle hook failed
    #[error("Plugin lifecycle error in {plugin}: {message}")]
    Lifecycle { plugin: String, message: String },
}

impl PluginError {
    /// Create a tool not found error
    pub fn tool_not_found(name: impl Into<String>) -> Self {
        PluginError::ToolNotFound(name.into())
    }

    /// Create a lifecycle error for the named plugin
    pub fn lifecycle(plugin: impl Into<String>, msg: impl Into<String>) -> Self {
        PluginError::Lifecycle {
            plugin: plugin.into(),
            message: msg.into(),
        }
    }
}
