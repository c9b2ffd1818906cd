// Plugin contract
//
// A plugin is a capability with metadata, a configuration schema and async
// lifecycle hooks. The host calls `init` once after loading configuration and
// `cleanup` once on shutdown.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::capabilities::Capability;
use crate::error::Result;

/// Public plugin metadata shown by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Display name
    pub name: String,
    /// Module name the host registers the plugin under
    pub module_name: String,
    pub description: String,
    pub author: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[async_trait]
pub trait Plugin: Capability {
    fn info(&self) -> PluginInfo;

    /// JSON schema describing the plugin configuration
    fn config_schema(&self) -> Value {
        serde_json::json!({"type": "object", "properties": {}})
    }

    /// Called once after the plugin is loaded
    async fn init(&self) -> Result<()> {
        Ok(())
    }

    /// Called once before the plugin is unloaded
    async fn cleanup(&self) -> Result<()> {
        Ok(())
    }
}

/// Run `init` on each plugin in order, stopping at the first failure
pub async fn init_plugins(plugins: &[&dyn Plugin]) -> Result<()> {
    for plugin in plugins {
        plugin.init().await?;
        info!(plugin = %plugin.info().name, "Plugin initialized");
    }
    Ok(())
}

/// Run `cleanup` on each plugin in reverse order.
///
/// Every plugin gets its cleanup call; the first error is returned.
pub async fn cleanup_plugins(plugins: &[&dyn Plugin]) -> Result<()> {
    let mut first_error = None;
    for plugin in plugins.iter().rev() {
        if let Err(e) = plugin.cleanup().await {
            tracing::error!(plugin = %plugin.info().name, error = %e, "Plugin cleanup failed");
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
