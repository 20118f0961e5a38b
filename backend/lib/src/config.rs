use serde::{Deserialize, Serialize};

use crate::constants::auth::{
    DEFAULT_COOKIE_NAME, DEFAULT_NONCE_TTL_SECS, DEFAULT_SESSION_TTL_SECS,
};
use crate::constants::server::{DEFAULT_HOST, DEFAULT_PORT};
use crate::error::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret used to sign session tokens. Required; there is no default.
    pub jwt_secret: String,
    /// Name of the session cookie
    pub cookie_name: String,
    /// Session lifetime in seconds
    pub session_ttl_secs: u64,
    /// Nonce challenge lifetime in seconds
    pub nonce_ttl_secs: u64,
    /// Include diagnostic detail in error responses
    pub debug_errors: bool,
}

/// Log output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON if stdout is not a terminal, text otherwise
    #[default]
    Auto,
    Json,
    Text,
}

impl LogFormat {
    /// Resolves `Auto` based on whether stdout is a TTY
    pub fn resolve(self) -> LogFormat {
        use std::io::IsTerminal;

        match self {
            LogFormat::Auto => {
                if std::io::stdout().is_terminal() {
                    LogFormat::Text
                } else {
                    LogFormat::Json
                }
            }
            other => other,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        // these are just some sane defaults, most likely we will
        // have them overridden
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_format: LogFormat::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            nonce_ttl_secs: DEFAULT_NONCE_TTL_SECS,
            debug_errors: false,
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Rejects configurations the server must not start with
    pub fn validate(&self) -> Result<(), Error> {
        if self.auth.jwt_secret.is_empty() {
            return Err(Error::Config(
                "auth.jwt_secret must be set (config file or VIBENT_JWT_SECRET)".to_string(),
            ));
        }
        Ok(())
    }
}
