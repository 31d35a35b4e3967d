//! Application configuration management.

use std::fmt;

use serde::Deserialize;

/// Conventional AWS variables accepted as lowest-priority defaults.
///
/// Values under the `TWYNUP__` prefix and in config files win over these.
const LEGACY_ENV_DEFAULTS: &[(&str, &str)] = &[
    ("storage.region", "AWS_REGION"),
    ("storage.access_key_id", "AWS_ACCESS_KEY_ID"),
    ("storage.secret_access_key", "AWS_SECRET_ACCESS_KEY"),
    ("storage.bucket", "AWS_S3_BUCKET_NAME"),
    ("storage.presign_expires_secs", "AWS_PRESIGNED_URL_EXPIRE_SECONDS"),
    ("server.port", "PORT"),
];

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Object storage configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Deployment environment label (`RUN_MODE`).
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5050
}

fn default_body_limit() -> usize {
    200 * 1024
}

fn default_environment() -> String {
    "development".to_string()
}

/// Raw object storage settings.
///
/// Every field is optional here; completeness is checked when the storage
/// service is built so a partially configured deployment can still start.
#[derive(Clone, Default, Deserialize)]
pub struct StorageSettings {
    /// AWS region, e.g. `us-east-1`.
    pub region: Option<String>,
    /// Bucket receiving uploads.
    pub bucket: Option<String>,
    /// Access key ID.
    pub access_key_id: Option<String>,
    /// Secret access key.
    pub secret_access_key: Option<String>,
    /// Custom S3 endpoint for S3-compatible providers.
    pub endpoint: Option<String>,
    /// Presigned URL lifetime in seconds.
    pub presign_expires_secs: Option<u64>,
}

impl fmt::Debug for StorageSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageSettings")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "[redacted]"))
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "[redacted]"),
            )
            .field("endpoint", &self.endpoint)
            .field("presign_expires_secs", &self.presign_expires_secs)
            .finish()
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| default_environment());

        let mut builder = config::Config::builder().set_default("environment", run_mode.clone())?;
        for (key, var) in LEGACY_ENV_DEFAULTS {
            if let Some(value) = std::env::var(var).ok().filter(|v| !v.trim().is_empty()) {
                builder = builder.set_default(*key, value)?;
            }
        }

        let config = builder
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TWYNUP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR: &[(&str, Option<&str>)] = &[
        ("RUN_MODE", None),
        ("AWS_REGION", None),
        ("AWS_ACCESS_KEY_ID", None),
        ("AWS_SECRET_ACCESS_KEY", None),
        ("AWS_S3_BUCKET_NAME", None),
        ("AWS_PRESIGNED_URL_EXPIRE_SECONDS", None),
        ("PORT", None),
        ("TWYNUP__SERVER__PORT", None),
        ("TWYNUP__STORAGE__BUCKET", None),
    ];

    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let mut all: Vec<(&str, Option<&str>)> = CLEAR.to_vec();
        all.extend_from_slice(vars);
        temp_env::with_vars(all, f);
    }

    #[test]
    fn test_defaults_without_environment() {
        with_env(&[], || {
            let config = AppConfig::load().expect("should load");
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 5050);
            assert_eq!(config.server.body_limit_bytes, 200 * 1024);
            assert_eq!(config.environment, "development");
            assert!(config.storage.bucket.is_none());
            assert!(config.storage.region.is_none());
        });
    }

    #[test]
    fn test_legacy_aws_variables() {
        with_env(
            &[
                ("AWS_REGION", Some("us-east-1")),
                ("AWS_ACCESS_KEY_ID", Some("AKIDEXAMPLE")),
                ("AWS_SECRET_ACCESS_KEY", Some("secret")),
                ("AWS_S3_BUCKET_NAME", Some("mybucket")),
                ("AWS_PRESIGNED_URL_EXPIRE_SECONDS", Some("120")),
                ("PORT", Some("6060")),
            ],
            || {
                let config = AppConfig::load().expect("should load");
                assert_eq!(config.storage.region.as_deref(), Some("us-east-1"));
                assert_eq!(config.storage.bucket.as_deref(), Some("mybucket"));
                assert_eq!(config.storage.access_key_id.as_deref(), Some("AKIDEXAMPLE"));
                assert_eq!(config.storage.presign_expires_secs, Some(120));
                assert_eq!(config.server.port, 6060);
            },
        );
    }

    #[test]
    fn test_prefixed_variables_win_over_legacy() {
        with_env(
            &[
                ("AWS_S3_BUCKET_NAME", Some("legacy")),
                ("TWYNUP__STORAGE__BUCKET", Some("preferred")),
                ("PORT", Some("6060")),
                ("TWYNUP__SERVER__PORT", Some("7070")),
            ],
            || {
                let config = AppConfig::load().expect("should load");
                assert_eq!(config.storage.bucket.as_deref(), Some("preferred"));
                assert_eq!(config.server.port, 7070);
            },
        );
    }

    #[test]
    fn test_blank_legacy_variables_are_ignored() {
        with_env(&[("AWS_REGION", Some("  "))], || {
            let config = AppConfig::load().expect("should load");
            assert!(config.storage.region.is_none());
        });
    }

    #[test]
    fn test_run_mode_sets_environment() {
        with_env(&[("RUN_MODE", Some("production"))], || {
            let config = AppConfig::load().expect("should load");
            assert_eq!(config.environment, "production");
        });
    }

    #[test]
    fn test_storage_settings_debug_redacts_secrets() {
        let settings = StorageSettings {
            access_key_id: Some("AKIDEXAMPLE".to_string()),
            secret_access_key: Some("super-secret".to_string()),
            ..StorageSettings::default()
        };
        let debug = format!("{settings:?}");
        assert!(!debug.contains("AKIDEXAMPLE"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[redacted]"));
    }
}
