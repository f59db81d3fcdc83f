use std::path::Path;
use std::time::Duration;

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::aliyun::client::DEFAULT_ENDPOINT;
use crate::live::action::LIVE_API_VERSION;
use crate::live::stream::{StreamCredentials, DEFAULT_VIDEO_CENTER};

const ENV_PREFIX: &str = "ALIYUN_LIVE";

/// Longest accepted URL auth validity.
pub const MAX_AUTH_TIMEOUT_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveConfig {
    pub access_key_id: String,
    pub access_key_secret: String,
    pub endpoint: String,
    pub version: String,
    /// Acceleration (CDN) domain every request is scoped to.
    pub domain_name: String,
    /// Default app name. Empty means "not sent".
    pub app_name: String,
    pub video_center: String,
    /// URL auth for generated stream URLs. `None` disables signing.
    pub stream_auth: Option<StreamAuthConfig>,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            access_key_id: String::new(),
            access_key_secret: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            version: LIVE_API_VERSION.to_string(),
            domain_name: String::new(),
            app_name: String::new(),
            video_center: DEFAULT_VIDEO_CENTER.to_string(),
            stream_auth: None,
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamAuthConfig {
    pub key: String,
    #[serde(default = "default_auth_timeout_seconds")]
    pub timeout_seconds: u64,
}

const fn default_auth_timeout_seconds() -> u64 {
    1800
}

impl StreamAuthConfig {
    #[must_use]
    pub fn credentials(&self) -> StreamCredentials {
        StreamCredentials::new(self.key.clone(), Duration::from_secs(self.timeout_seconds))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_seconds: u64,
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: 10,
            timeout_seconds: 30,
        }
    }
}

impl HttpConfig {
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
        }
    }
}

impl LiveConfig {
    /// Load configuration from an optional file, then environment overrides
    /// (`ALIYUN_LIVE_DOMAIN_NAME`, `ALIYUN_LIVE_HTTP__TIMEOUT_SECONDS`, ...).
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        Self::load_with_env_prefix(config_file, ENV_PREFIX)
    }

    /// Values stay strings until deserialized so secrets and app names
    /// like `007` keep their leading zeros; numeric fields still parse.
    fn load_with_env_prefix(config_file: Option<&str>, prefix: &str) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_file {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::load(Some(path))
    }

    /// Reject configurations that cannot produce a working client.
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        if self.access_key_id.is_empty() {
            errors.push("access_key_id is required");
        }
        if self.access_key_secret.is_empty() {
            errors.push("access_key_secret is required");
        }
        if self.domain_name.is_empty() {
            errors.push("domain_name is required");
        }
        if self.endpoint.is_empty() {
            errors.push("endpoint is required");
        }
        if self.video_center.is_empty() {
            errors.push("video_center is required");
        }
        if let Some(auth) = &self.stream_auth {
            if auth.key.is_empty() {
                errors.push("stream_auth.key must not be empty");
            }
            if auth.timeout_seconds == 0 {
                errors.push("stream_auth.timeout_seconds must be > 0");
            }
            if auth.timeout_seconds > MAX_AUTH_TIMEOUT_SECONDS {
                errors.push("stream_auth.timeout_seconds must not exceed one year");
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("; "))
        }
    }
}
