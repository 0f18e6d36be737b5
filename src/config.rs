//! Configuration module for whisperbox.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, WhisperboxError};

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
    /// Maximum number of pooled connections.
    #[serde(default = "default_db_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/whisperbox.db".to_string()
}

fn default_db_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_db_max_connections(),
        }
    }
}

/// Web API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number for the Web API.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// JWT secret key (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// Access token expiry in seconds.
    #[serde(default = "default_jwt_access_expiry")]
    pub jwt_access_token_expiry_secs: u64,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    8080
}

fn default_jwt_access_expiry() -> u64 {
    900 // 15 minutes
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
            jwt_secret: String::new(),
            jwt_access_token_expiry_secs: default_jwt_access_expiry(),
        }
    }
}

/// Verification code configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationConfig {
    /// Seconds until an issued verification code expires.
    #[serde(default = "default_code_ttl")]
    pub code_ttl_secs: i64,
}

fn default_code_ttl() -> i64 {
    3600 // 1 hour
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_secs: default_code_ttl(),
        }
    }
}

/// Notifier configuration.
///
/// The notifier delivers verification codes. In `log` mode the code is
/// written to the application log (development). In `webhook` mode it is
/// POSTed to an external mail-dispatch endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Delivery mode: "log" or "webhook".
    #[serde(default = "default_notifier_mode")]
    pub mode: String,
    /// Webhook endpoint URL (required in webhook mode).
    #[serde(default)]
    pub webhook_url: String,
    /// Bearer token for the webhook endpoint (optional).
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds for webhook delivery.
    #[serde(default = "default_notifier_timeout")]
    pub timeout_secs: u64,
}

fn default_notifier_mode() -> String {
    "log".to_string()
}

fn default_notifier_timeout() -> u64 {
    10
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            mode: default_notifier_mode(),
            webhook_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_notifier_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/whisperbox.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Verification code configuration.
    #[serde(default)]
    pub verification: VerificationConfig,
    /// Notifier configuration.
    #[serde(default)]
    pub notifier: NotifierConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(WhisperboxError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s)
            .map_err(|e| WhisperboxError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `WHISPERBOX_JWT_SECRET`: Override the JWT secret key
    /// - `WHISPERBOX_NOTIFIER_API_KEY`: Override the notifier bearer token
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var("WHISPERBOX_JWT_SECRET") {
            if !jwt_secret.is_empty() {
                self.web.jwt_secret = jwt_secret;
            }
        }

        if let Ok(api_key) = std::env::var("WHISPERBOX_NOTIFIER_API_KEY") {
            if !api_key.is_empty() {
                self.notifier.api_key = api_key;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The JWT secret is not set
    /// - The notifier mode is unknown, or webhook mode has no URL
    /// - The verification code TTL is zero
    pub fn validate(&self) -> Result<()> {
        if self.web.jwt_secret.is_empty() {
            return Err(WhisperboxError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via WHISPERBOX_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }

        match self.notifier.mode.as_str() {
            "log" => {}
            "webhook" => {
                if self.notifier.webhook_url.is_empty() {
                    return Err(WhisperboxError::Config(
                        "notifier mode is webhook but webhook_url is not set".to_string(),
                    ));
                }
            }
            other => {
                return Err(WhisperboxError::Config(format!(
                    "unknown notifier mode: {other} (expected \"log\" or \"webhook\")"
                )));
            }
        }

        if self.verification.code_ttl_secs <= 0 {
            return Err(WhisperboxError::Config(
                "verification code_ttl_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.database.path, "data/whisperbox.db");
        assert_eq!(config.database.max_connections, 5);

        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.web.port, 8080);
        assert!(config.web.cors_origins.is_empty());
        assert!(config.web.jwt_secret.is_empty());
        assert_eq!(config.web.jwt_access_token_expiry_secs, 900);

        assert_eq!(config.verification.code_ttl_secs, 3600);

        assert_eq!(config.notifier.mode, "log");
        assert!(config.notifier.webhook_url.is_empty());
        assert!(config.notifier.api_key.is_empty());
        assert_eq!(config.notifier.timeout_secs, 10);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/whisperbox.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[database]
path = "custom/db.sqlite"
max_connections = 10

[web]
host = "127.0.0.1"
port = 3000
cors_origins = ["http://localhost:5173"]
jwt_secret = "super-secret"
jwt_access_token_expiry_secs = 600

[verification]
code_ttl_secs = 1800

[notifier]
mode = "webhook"
webhook_url = "https://mail.example.com/send"
api_key = "key-123"
timeout_secs = 5

[logging]
level = "debug"
file = "custom/log.txt"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.database.path, "custom/db.sqlite");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.web.host, "127.0.0.1");
        assert_eq!(config.web.port, 3000);
        assert_eq!(config.web.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.web.jwt_secret, "super-secret");
        assert_eq!(config.web.jwt_access_token_expiry_secs, 600);
        assert_eq!(config.verification.code_ttl_secs, 1800);
        assert_eq!(config.notifier.mode, "webhook");
        assert_eq!(config.notifier.webhook_url, "https://mail.example.com/send");
        assert_eq!(config.notifier.api_key, "key-123");
        assert_eq!(config.notifier.timeout_secs, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/log.txt");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[web]
port = 9000
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.web.port, 9000);
        // Everything else falls back to defaults
        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.database.path, "data/whisperbox.db");
        assert_eq!(config.verification.code_ttl_secs, 3600);
        assert_eq!(config.notifier.mode, "log");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.web.port, 8080);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::parse("this is not toml [[[");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[web]\nport = 4000").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.web.port, 4000);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_requires_jwt_secret() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("jwt_secret"));
    }

    #[test]
    fn test_validate_webhook_requires_url() {
        let mut config = Config::default();
        config.web.jwt_secret = "secret".to_string();
        config.notifier.mode = "webhook".to_string();

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("webhook_url"));
    }

    #[test]
    fn test_validate_unknown_notifier_mode() {
        let mut config = Config::default();
        config.web.jwt_secret = "secret".to_string();
        config.notifier.mode = "carrier-pigeon".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_code_ttl() {
        let mut config = Config::default();
        config.web.jwt_secret = "secret".to_string();
        config.verification.code_ttl_secs = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ok() {
        let mut config = Config::default();
        config.web.jwt_secret = "secret".to_string();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("WHISPERBOX_JWT_SECRET", "from-env");
        std::env::set_var("WHISPERBOX_NOTIFIER_API_KEY", "key-from-env");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.web.jwt_secret, "from-env");
        assert_eq!(config.notifier.api_key, "key-from-env");

        std::env::remove_var("WHISPERBOX_JWT_SECRET");
        std::env::remove_var("WHISPERBOX_NOTIFIER_API_KEY");
    }
}
