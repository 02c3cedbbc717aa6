use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log: LogConfig,
    pub custodian: CustodianConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    #[serde(default)]
    pub rotation: LogRotation,
}

/// How often the log file rolls over
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Never,
    Hourly,
    #[default]
    Daily,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "rewards_custodian.log".to_string(),
            use_json: false,
            rotation: LogRotation::Daily,
        }
    }
}

/// Custodian deployment the process talks to
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    Staging,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Staging => "staging",
        }
    }
}

/// Custodian endpoint and client identity selection
///
/// Passed by value into every URL builder and endpoint; nothing reads a
/// process-wide switch.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CustodianConfig {
    pub environment: Environment,
    pub client_id: String,
    /// Destination card for contribution fees
    pub fee_address: String,
    /// Destination card for auto-contribute settlements
    pub ac_address: String,
    /// Override for the user-facing site URL
    #[serde(default)]
    pub url: Option<String>,
    /// Override for the REST API URL
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl CustodianConfig {
    pub fn new(
        environment: Environment,
        client_id: impl Into<String>,
        fee_address: impl Into<String>,
        ac_address: impl Into<String>,
    ) -> Self {
        Self {
            environment,
            client_id: client_id.into(),
            fee_address: fee_address.into(),
            ac_address: ac_address.into(),
            url: None,
            api_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    pub fn site_url(&self) -> &str {
        match (&self.url, self.environment) {
            (Some(url), _) => url.as_str(),
            (None, Environment::Production) => "https://uphold.com",
            (None, Environment::Staging) => "https://sandbox.uphold.com",
        }
    }

    pub fn api_url(&self) -> &str {
        match (&self.api_url, self.environment) {
            (Some(url), _) => url.as_str(),
            (None, Environment::Production) => "https://api.uphold.com",
            (None, Environment::Staging) => "https://api-sandbox.uphold.com",
        }
    }

    pub fn fee_address(&self) -> &str {
        &self.fee_address
    }

    pub fn ac_address(&self) -> &str {
        &self.ac_address
    }
}

impl AppConfig {
    /// Load `config/<env>.yaml`
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        Self::from_file(&format!("config/{}.yaml", env))
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_deserialize() {
        let yaml = r#"
log:
  log_level: "debug"
  log_dir: "./logs"
  log_file: "custodian.log"
  use_json: true
  rotation: "hourly"
custodian:
  environment: staging
  client_id: "client-abc"
  fee_address: "fee-card"
  ac_address: "ac-card"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log.log_level, "debug");
        assert!(config.log.use_json);
        assert_eq!(config.log.rotation, LogRotation::Hourly);
        assert_eq!(config.custodian.environment, Environment::Staging);
        assert_eq!(config.custodian.client_id, "client-abc");
        assert_eq!(config.custodian.request_timeout_secs, 30);
        assert!(config.custodian.url.is_none());
    }

    #[test]
    fn test_rotation_defaults_to_daily() {
        let yaml = r#"
log_level: "info"
log_dir: "./logs"
log_file: "custodian.log"
use_json: false
"#;
        let log: LogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(log.rotation, LogRotation::Daily);

        let bad = "log_level: info\nlog_dir: .\nlog_file: a.log\nuse_json: false\nrotation: weekly\n";
        assert!(serde_yaml::from_str::<LogConfig>(bad).is_err());
    }

    #[test]
    fn test_environment_urls() {
        let prod = CustodianConfig::new(Environment::Production, "id", "fee", "ac");
        assert_eq!(prod.site_url(), "https://uphold.com");
        assert_eq!(prod.api_url(), "https://api.uphold.com");

        let staging = CustodianConfig::new(Environment::Staging, "id", "fee", "ac");
        assert_eq!(staging.site_url(), "https://sandbox.uphold.com");
        assert_eq!(staging.api_url(), "https://api-sandbox.uphold.com");
    }

    #[test]
    fn test_url_overrides() {
        let mut config = CustodianConfig::new(Environment::Production, "id", "fee", "ac");
        config.url = Some("http://127.0.0.1:8080".to_string());
        config.api_url = Some("http://127.0.0.1:8081".to_string());

        assert_eq!(config.site_url(), "http://127.0.0.1:8080");
        assert_eq!(config.api_url(), "http://127.0.0.1:8081");
    }

    #[test]
    fn test_from_file_missing() {
        let result = AppConfig::from_file("config/does-not-exist.yaml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_from_file_roundtrip() {
        let path = std::env::temp_dir().join("rewards_custodian_config_test.yaml");
        let config = AppConfig {
            log: LogConfig::default(),
            custodian: CustodianConfig::new(Environment::Production, "id", "fee", "ac"),
        };
        fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();

        let loaded = AppConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.custodian.environment, Environment::Production);
        assert_eq!(loaded.log.rotation, LogRotation::Daily);

        let _ = fs::remove_file(path);
    }
}
