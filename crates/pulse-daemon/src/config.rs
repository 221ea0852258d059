//! Configuration for pulse-daemon

use pulse_runtime::PulseConfig;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

/// Main daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Telemetry engine configuration
    #[serde(default)]
    pub engine: PulseConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// SSE keep-alive interval in seconds
    #[serde(default = "default_keep_alive")]
    pub keep_alive_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            enable_cors: true,
            keep_alive_secs: default_keep_alive(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::LOCALHOST, 8080))
}

fn default_true() -> bool {
    true
}

fn default_keep_alive() -> u64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

impl DaemonConfig {
    /// Load configuration: built-in defaults, then the optional file, then
    /// `PULSE_` environment variables (`__` separates nested keys, e.g.
    /// `PULSE_ENGINE__SCHEDULE__TICK_INTERVAL_MS`).
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&DaemonConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PULSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate the engine section.
    pub fn validate(&self) -> Result<(), pulse_types::ConfigError> {
        self.engine.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_types::{MetricKind, Thresholds};

    #[test]
    fn test_default_config() {
        let config = DaemonConfig::default();
        assert_eq!(config.server.listen_addr.port(), 8080);
        assert!(config.server.enable_cors);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        let config = DaemonConfig::load(None).unwrap();
        assert_eq!(config.server.keep_alive_secs, 15);
        assert_eq!(config.engine.schedule.tick_interval_ms, 2000);
        assert_eq!(config.engine.history.capacity, 30);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("pulsed-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
[server]
listen_addr = "0.0.0.0:9000"

[engine.schedule]
tick_interval_ms = 500

[engine.alerting.thresholds.cpu]
warning = 60.0
critical = 80.0
"#,
        )
        .unwrap();

        let config = DaemonConfig::load(path.to_str()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.server.listen_addr.port(), 9000);
        assert_eq!(config.engine.schedule.tick_interval_ms, 500);
        assert_eq!(config.engine.schedule.log_jitter_max_ms, 3000);
        assert_eq!(config.engine.alerting.thresholds.len(), 4);
        assert_eq!(
            config.engine.alerting.thresholds[&MetricKind::Cpu],
            Thresholds::new(60.0, 80.0)
        );
        assert_eq!(
            config.engine.alerting.thresholds[&MetricKind::ResponseTime],
            Thresholds::new(300.0, 500.0)
        );
    }

    #[test]
    fn test_load_single_signal_field() {
        let path = std::env::temp_dir().join(format!("pulsed-signal-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
[engine.simulation.signals.cpu]
max = 90.0

[engine.simulation.signals.response_time]
spike_cap = 900.0
"#,
        )
        .unwrap();

        let config = DaemonConfig::load(path.to_str()).unwrap();
        std::fs::remove_file(&path).ok();

        let signals = &config.engine.simulation.signals;
        assert_eq!(signals.cpu.max, 90.0);
        assert_eq!(signals.cpu.min, 10.0);
        assert_eq!(signals.cpu.spike_cap, Some(98.0));
        assert_eq!(signals.response_time.spike_cap, Some(900.0));
        assert_eq!(signals.response_time.max, 250.0);
        assert_eq!(signals.requests.spike_cap, None);
        assert!(config.validate().is_ok());
    }
}
