//! Tracing subscriber setup.
//!
//! Library crates only emit `tracing` events; a host process calls
//! [`init_telemetry`] once to decide where they go.

#[cfg(feature = "telemetry")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::KeelResult;
use serde::{Deserialize, Serialize};

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,keel=debug,sqlx=warn";

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether a subscriber should be installed at all.
    #[serde(default)]
    pub enabled: bool,

    /// Service name attached to the startup event.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,

    /// Whether to enable console output.
    #[serde(default = "default_console_output")]
    pub console_output: bool,
}

fn default_service_name() -> String {
    "keel".to_string()
}

fn default_console_output() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            service_name: default_service_name(),
            json: false,
            console_output: default_console_output(),
        }
    }
}

/// Installs the global tracing subscriber.
///
/// Filtering honours `RUST_LOG` and falls back to [`DEFAULT_FILTER`].
#[cfg(feature = "telemetry")]
pub fn init_telemetry(config: &TelemetryConfig) -> KeelResult<()> {
    if !config.enabled || !config.console_output {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };
    result.map_err(|e| crate::KeelError::Internal(format!("Failed to install subscriber: {}", e)))?;

    tracing::info!(service_name = %config.service_name, json = config.json, "Telemetry initialized");

    Ok(())
}

/// Placeholder for when telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_telemetry(_config: &TelemetryConfig) -> KeelResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert!(!config.enabled);
        assert_eq!(config.service_name, "keel");
        assert!(!config.json);
        assert!(config.console_output);
    }

    #[test]
    fn test_disabled_config_is_noop() {
        let config = TelemetryConfig::default();
        assert!(init_telemetry(&config).is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: TelemetryConfig = serde_json::from_str(r#"{"enabled": true}"#).unwrap();
        assert!(config.enabled);
        assert_eq!(config.service_name, "keel");
        assert!(config.console_output);
    }
}
