/**
 * Server Configuration
 *
 * This module builds the `ServerConfig` that is handed to every component at
 * construction time. Nothing else in the backend reads the environment.
 *
 * # Configuration Sources
 *
 * Later sources override earlier ones:
 *
 * 1. Built-in defaults
 * 2. A TOML file, if `MINILINK_CONFIG` names one
 * 3. Environment variables (a `.env` file is loaded by the binary first)
 *
 * | Key | Default |
 * |---|---|
 * | `HOST` | `0.0.0.0` |
 * | `PORT` | `5000` |
 * | `DATABASE_URL` | `sqlite://minilink.db?mode=rwc` |
 * | `JWT_SECRET` | required |
 * | `TOKEN_TTL_SECS` | `604800` (7 days) |
 * | `BCRYPT_COST` | `12` |
 * | `UPLOAD_DIR` | `uploads` |
 * | `MAX_UPLOAD_BYTES` | `5242880` (5 MiB) |
 * | `FRONTEND_DIR` | unset |
 *
 * # Error Handling
 *
 * Unlike optional services, a bad configuration is fatal: `ServerConfig::load`
 * returns a `ConfigError` and the binary exits before binding a socket.
 */

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://minilink.db?mode=rwc";
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;
/// Ten years
pub const MAX_TOKEN_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// bcrypt accepts costs in this range
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Environment variable naming an optional TOML config file
pub const CONFIG_FILE_ENV: &str = "MINILINK_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    ParseFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// HMAC secret used to sign tokens
///
/// Kept out of `Debug` output so configuration can be logged.
#[derive(Clone, PartialEq, Eq)]
pub struct JwtSecret(String);

impl JwtSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("JwtSecret(***)")
    }
}

/// Process-wide server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: JwtSecret,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    /// Directory uploaded images are written to and served from
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Pre-built frontend to serve for non-API paths
    pub frontend_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the optional file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let file = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => FileConfig::read(Path::new(&path))?,
            Err(_) => FileConfig::default(),
        };
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    ///
    /// The lookup is a closure so tests can supply variables without touching
    /// the real process environment.
    pub fn from_sources<F>(file: FileConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ServerConfigBuilder::from(file);

        if let Some(v) = env("HOST") {
            builder.host = Some(parse_value("HOST", &v)?);
        }
        if let Some(v) = env("PORT") {
            builder.port = Some(parse_value("PORT", &v)?);
        }
        if let Some(v) = env("DATABASE_URL") {
            builder.database_url = Some(v);
        }
        if let Some(v) = env("JWT_SECRET") {
            builder.jwt_secret = Some(v);
        }
        if let Some(v) = env("TOKEN_TTL_SECS") {
            builder.token_ttl_secs = Some(parse_value("TOKEN_TTL_SECS", &v)?);
        }
        if let Some(v) = env("BCRYPT_COST") {
            builder.bcrypt_cost = Some(parse_value("BCRYPT_COST", &v)?);
        }
        if let Some(v) = env("UPLOAD_DIR") {
            builder.upload_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = env("MAX_UPLOAD_BYTES") {
            builder.max_upload_bytes = Some(parse_value("MAX_UPLOAD_BYTES", &v)?);
        }
        if let Some(v) = env("FRONTEND_DIR") {
            builder.frontend_dir = Some(PathBuf::from(v));
        }

        builder.build()
    }

    /// Address the listener binds to
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Largest request body accepted by the post upload route
    ///
    /// Leaves headroom above the image limit for the text fields and
    /// multipart framing.
    pub fn upload_body_limit(&self) -> usize {
        self.max_upload_bytes.saturating_add(64 * 1024)
    }
}

/// Shape of the optional TOML config file
///
/// ```toml
/// port = 8080
/// database_url = "sqlite:///var/lib/minilink/data.db?mode=rwc"
/// jwt_secret = "change-me"
/// upload_dir = "/var/lib/minilink/uploads"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub jwt_secret: Option<String>,
    pub token_ttl_secs: Option<i64>,
    pub bcrypt_cost: Option<u32>,
    pub upload_dir: Option<PathBuf>,
    pub max_upload_bytes: Option<usize>,
    pub frontend_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    host: Option<IpAddr>,
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    token_ttl_secs: Option<i64>,
    bcrypt_cost: Option<u32>,
    upload_dir: Option<PathBuf>,
    max_upload_bytes: Option<usize>,
    frontend_dir: Option<PathBuf>,
}

impl From<FileConfig> for ServerConfigBuilder {
    fn from(file: FileConfig) -> Self {
        Self {
            host: file.host,
            port: file.port,
            database_url: file.database_url,
            jwt_secret: file.jwt_secret,
            token_ttl_secs: file.token_ttl_secs,
            bcrypt_cost: file.bcrypt_cost,
            upload_dir: file.upload_dir,
            max_upload_bytes: file.max_upload_bytes,
            frontend_dir: file.frontend_dir,
        }
    }
}

impl ServerConfigBuilder {
    pub fn host(mut self, host: IpAddr) -> Self {
        self.host = Some(host);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl_secs(mut self, secs: i64) -> Self {
        self.token_ttl_secs = Some(secs);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Some(dir.into());
        self
    }

    pub fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = Some(bytes);
        self
    }

    pub fn frontend_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.frontend_dir = Some(dir.into());
        self
    }

    /// Fill in defaults and validate
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let jwt_secret = self
            .jwt_secret
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingValue("JWT_SECRET"))?;

        let token_ttl_secs = self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        let token_ttl = Duration::try_seconds(token_ttl_secs)
            .filter(|_| (1..=MAX_TOKEN_TTL_SECS).contains(&token_ttl_secs))
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "TOKEN_TTL_SECS",
                reason: format!("must be between 1 and {MAX_TOKEN_TTL_SECS}"),
            })?;

        let bcrypt_cost = self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST);
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                reason: format!("must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}"),
            });
        }

        let max_upload_bytes = self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
        if max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MAX_UPLOAD_BYTES",
                reason: "must be positive".to_string(),
            });
        }

        Ok(ServerConfig {
            host: self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret: JwtSecret::new(jwt_secret),
            token_ttl,
            bcrypt_cost,
            upload_dir: self
                .upload_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            max_upload_bytes,
            frontend_dir: self.frontend_dir,
        })
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        reason: e.to_string(),
    })
}
