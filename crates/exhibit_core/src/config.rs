//! Connection configuration loaded from a `key=value` text file.
//!
//! # Responsibility
//! - Parse the five connection keys into a typed descriptor.
//! - Report every missing key at once so startup fails with one message.
//!
//! # Invariants
//! - Keys are case-insensitive; values are trimmed.
//! - Blank lines, `#` comments, lines without `=` and unknown keys are ignored.
//! - An empty value counts as missing.
//! - The password never appears in `Display`/log output.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Config file name looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "config.txt";

/// Keys every config file must define, in reporting order.
pub const REQUIRED_KEYS: [&str; 5] = ["host", "port", "database", "username", "password"];

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Startup-fatal configuration failure.
#[derive(Debug)]
pub enum ConfigError {
    NotFound(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    MissingKeys(Vec<&'static str>),
    InvalidPort(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "configuration file not found: {}", path.display())
            }
            Self::Io { path, source } => write!(
                f,
                "failed to read configuration file `{}`: {source}",
                path.display()
            ),
            Self::MissingKeys(keys) => write!(
                f,
                "configuration file is missing parameters: {}",
                keys.join(", ")
            ),
            Self::InvalidPort(value) => write!(
                f,
                "configuration parameter `port` must be a number in 1..=65535, got `{value}`"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Connection descriptor assembled from the config file.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    /// Database name; for the SQLite store this is the database file path.
    pub database: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl DatabaseConfig {
    /// Reads and parses a config file.
    ///
    /// # Errors
    /// - `NotFound` when `path` does not exist.
    /// - `Io` when the file cannot be read.
    /// - Any error from [`DatabaseConfig::parse`].
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let shown = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
                return Err(ConfigError::NotFound(shown));
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&text)
    }

    /// Parses config text.
    ///
    /// When a key appears more than once, the last occurrence wins.
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let mut values: [Option<String>; 5] = Default::default();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            if let Some(index) = REQUIRED_KEYS.iter().position(|known| *known == key) {
                values[index] = Some(value.trim().to_string());
            }
        }

        let missing: Vec<&'static str> = REQUIRED_KEYS
            .iter()
            .zip(values.iter())
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(key, _)| *key)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingKeys(missing));
        }

        let [host, port, database, username, password] = values.map(Option::unwrap_or_default);
        let port = match port.parse::<u16>() {
            Ok(port) if port > 0 => port,
            _ => return Err(ConfigError::InvalidPort(port)),
        };

        Ok(Self {
            host,
            port,
            database,
            username,
            password,
        })
    }

    /// Renders the standard `Key=Value;` relational connection string.
    ///
    /// The embedded SQLite store only needs `database`; this is the full
    /// descriptor for server engines and for `redacted_connection_string`.
    pub fn connection_string(&self) -> String {
        format!(
            "Host={};Port={};Database={};Username={};Password={}",
            self.host, self.port, self.database, self.username, self.password
        )
    }

    /// Same as [`DatabaseConfig::connection_string`] with the password masked.
    pub fn redacted_connection_string(&self) -> String {
        let full = self.connection_string();
        let prefix_len = full.len() - self.password.len();
        format!("{}***", &full[..prefix_len])
    }
}
