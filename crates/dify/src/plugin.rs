//! NekroDify plugin: registers the Dify workflow capability with the host.

use async_trait::async_trait;
use nekro_plugin_core::{
    Capability, CapabilityId, CapabilityStatus, Plugin, PluginInfo, Result as PluginResult, Tool,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::action::DifyContext;
use crate::config::DifyConfig;
use crate::prompt::build_prompt_fragment;
use crate::tool::RunDifyWorkflowTool;

pub const PLUGIN_NAME: &str = "NekroDify";
pub const MODULE_NAME: &str = "dify_adapter";
pub const PLUGIN_VERSION: &str = "1.0.2";
pub const PLUGIN_URL: &str = "https://github.com/wess09/nekro_plugin_dify";

/// Dify workflow plugin
pub struct DifyPlugin {
    context: DifyContext,
    prompt: String,
}

impl DifyPlugin {
    pub fn new(config: DifyConfig) -> Self {
        Self::with_context(DifyContext::new(config))
    }

    /// Build from a prepared context (e.g. one with an injected client)
    pub fn with_context(context: DifyContext) -> Self {
        let prompt = build_prompt_fragment(context.config());
        Self { context, prompt }
    }

    pub fn context(&self) -> &DifyContext {
        &self.context
    }

    /// Text injected into the agent's system prompt
    pub fn prompt_fragment(&self) -> &str {
        &self.prompt
    }
}

impl Capability for DifyPlugin {
    fn id(&self) -> &str {
        CapabilityId::DIFY_WORKFLOW
    }

    fn name(&self) -> &str {
        "Dify Workflow"
    }

    fn description(&self) -> &str {
        "Run Dify workflows through the Dify API and read back their outputs."
    }

    fn status(&self) -> CapabilityStatus {
        if self.context.config().has_api_key() {
            CapabilityStatus::Available
        } else {
            CapabilityStatus::NeedsConfiguration
        }
    }

    fn icon(&self) -> Option<&str> {
        Some("workflow")
    }

    fn category(&self) -> Option<&str> {
        Some("Integrations")
    }

    fn system_prompt_addition(&self) -> Option<&str> {
        Some(&self.prompt)
    }

    fn tools(&self) -> Vec<Box<dyn Tool>> {
        vec![Box::new(RunDifyWorkflowTool::new(self.context.clone()))]
    }
}

#[async_trait]
impl Plugin for DifyPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: PLUGIN_NAME.to_string(),
            module_name: MODULE_NAME.to_string(),
            description: "Run Dify workflows through the Dify API".to_string(),
            author: "wess09".to_string(),
            version: PLUGIN_VERSION.to_string(),
            url: Some(PLUGIN_URL.to_string()),
        }
    }

    fn config_schema(&self) -> Value {
        DifyConfig::schema()
    }

    async fn init(&self) -> PluginResult<()> {
        info!(plugin = PLUGIN_NAME, "Initializing plugin");
        if self.context.config().has_api_key() {
            info!(
                plugin = PLUGIN_NAME,
                base_url = %self.context.config().api_base(),
                "Dify API key configured"
            );
        } else {
            warn!(
                plugin = PLUGIN_NAME,
                "Dify API key is not configured; set api_key in the plugin config"
            );
        }
        info!(plugin = PLUGIN_NAME, "Plugin initialized");
        Ok(())
    }

    async fn cleanup(&self) -> PluginResult<()> {
        // connections are per call, nothing is held between invocations
        info!(plugin = PLUGIN_NAME, "Plugin cleaned up");
        Ok(())
    }
}
