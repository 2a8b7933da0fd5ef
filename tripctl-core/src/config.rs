//! Store configuration
//!
//! Connection settings are resolved in layers: built-in defaults, then the
//! `[database]` table of a TOML file (`~/.tripctl/config.toml` unless a path
//! is given), then `DB_*` environment variables. The result is validated once,
//! when the [`StoreConfig`] is built, and turned into structured
//! `PgConnectOptions`; credentials never pass through a URL string.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;
/// Kept low for single-user tooling.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_HOST: &str = "DB_HOST";
pub const ENV_PORT: &str = "DB_PORT";
pub const ENV_USER: &str = "DB_USER";
pub const ENV_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_NAME: &str = "DB_NAME";
pub const ENV_MAX_CONNECTIONS: &str = "DB_MAX_CONNECTIONS";
pub const ENV_ACQUIRE_TIMEOUT: &str = "DB_ACQUIRE_TIMEOUT_SECS";
pub const ENV_STATEMENT_TIMEOUT: &str = "DB_STATEMENT_TIMEOUT_SECS";

/// Database password. Never rendered: `Debug` prints `***` and there is no
/// `Display`.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Unvalidated settings, one layer at a time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawStoreConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<Password>,
    pub database: Option<String>,
    pub max_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub statement_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    database: Option<RawStoreConfig>,
}

impl RawStoreConfig {
    /// Read the `[database]` table of a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.database.unwrap_or_default())
    }

    /// Collect `DB_*` values from an environment snapshot.
    pub fn from_env_map(env: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            env.get(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            host: get(ENV_HOST),
            port: get(ENV_PORT)
                .map(|v| parse_number(&v, "port"))
                .transpose()?,
            user: get(ENV_USER),
            // passwords may legitimately contain surrounding whitespace
            password: env
                .get(ENV_PASSWORD)
                .filter(|v| !v.is_empty())
                .map(Password::new),
            database: get(ENV_NAME),
            max_connections: get(ENV_MAX_CONNECTIONS)
                .map(|v| parse_number(&v, "max_connections"))
                .transpose()?,
            acquire_timeout_secs: get(ENV_ACQUIRE_TIMEOUT)
                .map(|v| parse_number(&v, "acquire_timeout_secs"))
                .transpose()?,
            statement_timeout_secs: get(ENV_STATEMENT_TIMEOUT)
                .map(|v| parse_number(&v, "statement_timeout_secs"))
                .transpose()?,
        })
    }

    /// Collect `DB_*` values from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("DB_"))
            .collect();
        Self::from_env_map(&env)
    }

    /// Overlay `other` on top of `self`; values present in `other` win.
    pub fn merge(self, other: RawStoreConfig) -> Self {
        Self {
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            user: other.user.or(self.user),
            password: other.password.or(self.password),
            database: other.database.or(self.database),
            max_connections: other.max_connections.or(self.max_connections),
            acquire_timeout_secs: other.acquire_timeout_secs.or(self.acquire_timeout_secs),
            statement_timeout_secs: other.statement_timeout_secs.or(self.statement_timeout_secs),
        }
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, field: &'static str) -> Result<T, ConfigError>
where
    T::Err: fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        field,
        reason: format!("'{}': {}", value, e),
    })
}

/// Validated connection descriptor for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Password,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub statement_timeout: Option<Duration>,
}

impl StoreConfig {
    /// Build a config from explicit values with default pool settings.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: Password,
        database: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Self::try_from(RawStoreConfig {
            host: Some(host.into()),
            port: Some(port),
            user: Some(user.into()),
            password: Some(password),
            database: Some(database.into()),
            ..Default::default()
        })
    }

    /// Resolve file and environment layers.
    ///
    /// An explicit `path` must exist; the default path is used only if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file_layer = match path {
            Some(path) => RawStoreConfig::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.exists() => RawStoreConfig::from_file(&default)?,
                _ => RawStoreConfig::default(),
            },
        };

        let config = Self::try_from(file_layer.merge(RawStoreConfig::from_env()?))?;
        tracing::debug!(store = %config, "resolved store configuration");
        Ok(config)
    }

    /// Default config file path: ~/.tripctl/config.toml
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".tripctl").join("config.toml"))
    }

    /// Structured connect options; no URL interpolation involved.
    pub fn connect_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database)
            .application_name("tripctl");

        if !self.password.is_empty() {
            options = options.password(self.password.expose());
        }

        if let Some(timeout) = self.statement_timeout {
            options = options.options([("statement_timeout", format!("{}ms", timeout.as_millis()))]);
        }

        options
    }
}

impl TryFrom<RawStoreConfig> for StoreConfig {
    type Error = ConfigError;

    fn try_from(raw: RawStoreConfig) -> Result<Self, Self::Error> {
        let host = raw.host.unwrap_or_else(|| DEFAULT_HOST.to_owned());
        if host.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "host",
                reason: "cannot be empty".into(),
            });
        }

        let port = raw.port.unwrap_or(DEFAULT_PORT);
        if port == 0 {
            return Err(ConfigError::Invalid {
                field: "port",
                reason: "must be non-zero".into(),
            });
        }

        let user = raw.user.ok_or(ConfigError::Missing("user (DB_USER)"))?;
        if user.trim().is_empty() {
            return Err(ConfigError::Missing("user (DB_USER)"));
        }

        let database = raw.database.ok_or(ConfigError::Missing("database (DB_NAME)"))?;
        if database.trim().is_empty() {
            return Err(ConfigError::Missing("database (DB_NAME)"));
        }

        let max_connections = raw.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS);
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                field: "max_connections",
                reason: "must be at least 1".into(),
            });
        }

        let acquire_timeout = match raw.acquire_timeout_secs {
            Some(0) => {
                return Err(ConfigError::Invalid {
                    field: "acquire_timeout_secs",
                    reason: "must be at least 1 second".into(),
                })
            }
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_ACQUIRE_TIMEOUT,
        };

        Ok(Self {
            host,
            port,
            user,
            password: raw.password.unwrap_or_default(),
            database,
            max_connections,
            acquire_timeout,
            statement_timeout: raw
                .statement_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        })
    }
}

/// `user@host:port/database`, password omitted.
impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn env_layer_builds_config() {
        let raw = RawStoreConfig::from_env_map(&env(&[
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "agent"),
            ("DB_PASSWORD", "s3cret"),
            ("DB_NAME", "travel"),
        ]))
        .unwrap();
        let config = StoreConfig::try_from(raw).unwrap();

        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.password.expose(), "s3cret");
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.acquire_timeout, DEFAULT_ACQUIRE_TIMEOUT);
        assert_eq!(config.statement_timeout, None);
    }

    #[test]
    fn defaults_apply_for_host_and_port() {
        let raw = RawStoreConfig::from_env_map(&env(&[("DB_USER", "u"), ("DB_NAME", "d")])).unwrap();
        let config = StoreConfig::try_from(raw).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.password.is_empty());
    }

    #[test]
    fn rejects_non_numeric_port() {
        let err = RawStoreConfig::from_env_map(&env(&[("DB_PORT", "fivefourthreetwo")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "port", .. }));
    }

    #[test]
    fn rejects_missing_database() {
        let raw = RawStoreConfig::from_env_map(&env(&[("DB_USER", "u")])).unwrap();
        let err = StoreConfig::try_from(raw).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[test]
    fn rejects_zero_port_and_pool_size() {
        let err = StoreConfig::new("h", 0, "u", Password::default(), "d").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "port", .. }));

        let raw = RawStoreConfig {
            user: Some("u".into()),
            database: Some("d".into()),
            max_connections: Some(0),
            ..Default::default()
        };
        let err = StoreConfig::try_from(raw).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_connections", .. }));
    }

    #[test]
    fn env_overrides_file() {
        let file = RawStoreConfig::from_toml(
            r#"
            [database]
            host = "file-host"
            user = "file-user"
            database = "travel"
            max_connections = 2
            "#,
        )
        .unwrap();
        let env_layer = RawStoreConfig::from_env_map(&env(&[("DB_HOST", "env-host")])).unwrap();

        let config = StoreConfig::try_from(file.merge(env_layer)).unwrap();
        assert_eq!(config.host, "env-host");
        assert_eq!(config.user, "file-user");
        assert_eq!(config.max_connections, 2);
    }

    #[test]
    fn reads_config_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[database]\nuser = \"agent\"\ndatabase = \"travel\"\nstatement_timeout_secs = 30"
        )
        .unwrap();

        let raw = RawStoreConfig::from_file(file.path()).unwrap();
        let config = StoreConfig::try_from(raw).unwrap();
        assert_eq!(config.statement_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RawStoreConfig::from_toml("[database]\nurl = \"postgres://x\"").unwrap_err();
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RawStoreConfig::from_file(Path::new("/nonexistent/tripctl.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tripctl.toml"));
    }

    #[test]
    fn password_never_rendered() {
        let config = StoreConfig::new("h", 5432, "u", Password::new("hunter2"), "d").unwrap();
        assert_eq!(config.to_string(), "u@h:5432/d");
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
