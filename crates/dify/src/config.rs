// Dify plugin configuration
//
// The host hands the plugin a JSON object; missing fields take their
// defaults. `from_env` covers hosts that configure plugins through the
// environment instead.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{DifyError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.dify.ai/v1";
pub const DEFAULT_USER: &str = "nekro-agent-user";

/// Dify plugin settings. Read-only once loaded.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifyConfig {
    /// Dify app API key, `app-xxxxxxxx`
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User identity sent when the caller does not name one
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Text placed ahead of the usage documentation in the agent prompt.
    /// `null` is treated like an absent field.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub custom_prompt: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

impl Default for DifyConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            default_user: default_user(),
            custom_prompt: String::new(),
        }
    }
}

impl std::fmt::Debug for DifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("DifyConfig")
            .field("api_key", &api_key)
            .field("base_url", &self.base_url)
            .field("default_user", &self.default_user)
            .field("custom_prompt", &self.custom_prompt)
            .finish()
    }
}

impl DifyConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_default_user(mut self, user: impl Into<String>) -> Self {
        self.default_user = user.into();
        self
    }

    pub fn with_custom_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.custom_prompt = prompt.into();
        self
    }

    /// Parse the JSON object supplied by the host
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| DifyError::config(format!("invalid Dify plugin config: {}", e)))
    }

    /// Load from `DIFY_API_KEY`, `DIFY_BASE_URL`, `DIFY_DEFAULT_USER` and
    /// `DIFY_CUSTOM_PROMPT`. Unset variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_key: lookup("DIFY_API_KEY").unwrap_or(defaults.api_key),
            base_url: lookup("DIFY_BASE_URL").unwrap_or(defaults.base_url),
            default_user: lookup("DIFY_DEFAULT_USER").unwrap_or(defaults.default_user),
            custom_prompt: lookup("DIFY_CUSTOM_PROMPT").unwrap_or(defaults.custom_prompt),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// The API key, or `MissingCredential` when it is unset
    pub fn require_api_key(&self) -> Result<&str> {
        if !self.has_api_key() {
            warn!("Dify API key is not configured; set api_key in the plugin config");
            return Err(DifyError::MissingCredential);
        }
        Ok(self.api_key.trim())
    }

    /// Base URL without trailing slashes
    pub fn api_base(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }

    /// JSON schema of the configuration surface shown by the host
    pub fn schema() -> Value {
        serde_json::json!({
            "type": "object",
            "title": "Dify adapter configuration",
            "properties": {
                "api_key": {
                    "type": "string",
                    "title": "Dify API key",
                    "description": "Dify app API key, in the form app-xxxxxxxx",
                    "default": "",
                    "format": "password",
                    "writeOnly": true
                },
                "base_url": {
                    "type": "string",
                    "title": "Dify API base URL",
                    "description": "Base URL of the Dify API",
                    "default": DEFAULT_BASE_URL
                },
                "default_user": {
                    "type": "string",
                    "title": "Default user identity",
                    "description": "User identity sent to Dify when the agent does not pass one",
                    "default": DEFAULT_USER
                },
                "custom_prompt": {
                    "type": "string",
                    "title": "Custom prompt",
                    "description": "Text injected ahead of the run_dify_workflow usage notes, e.g. the inputs your workflow expects",
                    "default": ""
                }
            },
            "required": ["api_key"]
        })
    }
}
