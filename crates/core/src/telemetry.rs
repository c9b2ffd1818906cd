// Tracing setup for hosts embedding Nekro plugins
//
// Plugins only emit `tracing` events. A host that does not install its own
// subscriber can call `init_tracing` once at startup.
//
// Configuration via environment variables:
// - OTEL_SERVICE_NAME: service name attached to startup logs (default: "nekro-plugins")
// - RUST_LOG or LOG_LEVEL: log filter (default: "info")

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_SERVICE_NAME: &str = "nekro-plugins";
const DEFAULT_LOG_FILTER: &str = "info";

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub service_name: String,
    /// Explicit filter directive; `None` falls back to `RUST_LOG`, then "info"
    pub log_filter: Option<String>,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_filter: None,
            json: false,
        }
    }
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let service_name =
            lookup("OTEL_SERVICE_NAME").unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());
        let log_filter = lookup("RUST_LOG").or_else(|| lookup("LOG_LEVEL"));
        let json = lookup("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self {
            service_name,
            log_filter,
            json,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let directive = self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}

/// Install a global fmt subscriber.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(config: &TelemetryConfig) -> bool {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    let installed = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .is_ok()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .is_ok()
    };

    if installed {
        tracing::info!(service_name = %config.service_name, "Tracing initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = TelemetryConfig::from_lookup(lookup(&[]));
        assert_eq!(config.service_name, "nekro-plugins");
        assert!(config.log_filter.is_none());
        assert!(!config.json);
    }

    #[test]
    fn test_rust_log_wins_over_log_level() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("RUST_LOG", "nekro_plugin_dify=debug"),
            ("LOG_LEVEL", "warn"),
            ("LOG_FORMAT", "JSON"),
            ("OTEL_SERVICE_NAME", "agent-host"),
        ]));
        assert_eq!(config.log_filter.as_deref(), Some("nekro_plugin_dify=debug"));
        assert_eq!(config.service_name, "agent-host");
        assert!(config.json);
    }

    #[test]
    fn test_init_tracing_only_once() {
        let config = TelemetryConfig {
            log_filter: Some("not a [valid filter".to_string()),
            ..Default::default()
        };
        // the first call may lose to a subscriber another test installed
        let _first = init_tracing(&config);
        let second = init_tracing(&config);
        assert!(!second);
    }
}
