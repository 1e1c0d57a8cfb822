use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "STAYHUB_ENV";
const CONFIG_DIR_ENV: &str = "STAYHUB_CONFIG_DIR";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub uploads: UploadSettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    ///
    /// Environment variables use the `STAYHUB_` prefix and `__` between nested
    /// keys, e.g. `STAYHUB_SERVER__PORT=9090` or `STAYHUB_AUTH__JWT_SECRET=...`.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .with_context(|| "unable to resolve current directory")?
                .join("config"),
        };

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let cfg = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix("STAYHUB")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // The selector variable wins over whatever the files say.
        settings.environment = environment.parse()?;

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "ServerSettings::default_body_limit_bytes")]
    pub body_limit_bytes: usize,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        8080
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }

    fn default_body_limit_bytes() -> usize {
        25 * 1024 * 1024
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
            body_limit_bytes: Self::default_body_limit_bytes(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    #[serde(default = "TelemetrySettings::default_log_filter")]
    pub log_filter: String,
}

impl TelemetrySettings {
    fn default_log_filter() -> String {
        "info,tower_http=debug".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            log_filter: Self::default_log_filter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// HMAC secret for HS256 bearer tokens
    #[serde(default = "AuthSettings::default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "AuthSettings::default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

impl AuthSettings {
    fn default_jwt_secret() -> String {
        "change-me-in-production".to_string()
    }

    fn default_token_ttl_secs() -> u64 {
        24 * 60 * 60
    }

    /// True while the shipped placeholder secret is still in use
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == Self::default_jwt_secret()
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: Self::default_jwt_secret(),
            token_ttl_secs: Self::default_token_ttl_secs(),
        }
    }
}

/// Which object storage backend receives uploaded files.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Local,
    Http,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Directory that receives objects for the `local` backend
    #[serde(default = "StorageSettings::default_root_dir")]
    pub root_dir: PathBuf,
    /// Prefix of the locations returned by the `local` and `memory` backends
    #[serde(default = "StorageSettings::default_public_base_url")]
    pub public_base_url: String,
    /// Base URL of an S3-compatible endpoint for the `http` backend
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "StorageSettings::default_bucket")]
    pub bucket: String,
}

impl StorageSettings {
    fn default_root_dir() -> PathBuf {
        PathBuf::from("var/uploads")
    }

    fn default_public_base_url() -> String {
        "http://localhost:8080/uploads".to_string()
    }

    fn default_bucket() -> String {
        "stayhub".to_string()
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            root_dir: Self::default_root_dir(),
            public_base_url: Self::default_public_base_url(),
            endpoint: None,
            bucket: Self::default_bucket(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    /// Maximum number of images accepted by a single room submission
    #[serde(default = "UploadSettings::default_max_room_images")]
    pub max_room_images: usize,
}

impl UploadSettings {
    fn default_max_room_images() -> usize {
        5
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_room_images: Self::default_max_room_images(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_upload_cap_is_five_images() {
        let settings = Settings::default();
        assert_eq!(settings.uploads.max_room_images, 5);
        assert_eq!(settings.storage.backend, StorageBackend::Local);
    }

    #[test]
    fn environment_parses_known_names_only() {
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "server": { "port": 9090 },
            "storage": { "backend": "memory" }
        }))
        .unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.storage.backend, StorageBackend::Memory);
        assert_eq!(settings.auth.token_ttl_secs, 86_400);
    }
}
