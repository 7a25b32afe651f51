#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::is_remote_location;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CATALOG: &str = "melons.txt";
pub const DEFAULT_SECRET_KEY: &str = "something-unguessable";
pub const DEFAULT_SESSION_TTL_MINUTES: u64 = 24 * 60;
/// 一百年，超過就沒有意義了
pub const MAX_SESSION_TTL_MINUTES: u64 = 100 * 365 * 24 * 60;
pub const DEFAULT_CATALOG_TIMEOUT_SECONDS: u64 = 10;

/// Fully resolved server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Local path or http(s) URL of the catalog file.
    pub catalog: String,
    pub catalog_timeout_seconds: u64,
    pub secret_key: String,
    pub session_ttl_minutes: u64,
    pub json_logs: bool,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            catalog: DEFAULT_CATALOG.to_string(),
            catalog_timeout_seconds: DEFAULT_CATALOG_TIMEOUT_SECONDS,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
            json_logs: false,
            verbose: false,
        }
    }
}

impl AppConfig {
    /// 以 TOML 檔中有設定的欄位覆蓋目前值
    pub fn apply_toml(&mut self, toml: &TomlConfig) {
        if let Some(server) = &toml.server {
            if let Some(host) = &server.host {
                self.host = host.clone();
            }
            if let Some(port) = server.port {
                self.port = port;
            }
        }

        if let Some(catalog) = &toml.catalog {
            if let Some(source) = &catalog.source {
                self.catalog = source.clone();
            }
            if let Some(timeout) = catalog.timeout_seconds {
                self.catalog_timeout_seconds = timeout;
            }
        }

        if let Some(session) = &toml.session {
            if let Some(secret) = &session.secret_key {
                self.secret_key = secret.clone();
            }
            if let Some(ttl) = session.ttl_minutes {
                self.session_ttl_minutes = ttl;
            }
        }

        if let Some(logging) = &toml.logging {
            if let Some(format) = &logging.format {
                self.json_logs = format.eq_ignore_ascii_case("json");
            }
            if let Some(verbose) = logging.verbose {
                self.verbose = verbose;
            }
        }
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl ConfigProvider for AppConfig {
    fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn catalog_location(&self) -> &str {
        &self.catalog
    }

    fn catalog_timeout_seconds(&self) -> u64 {
        self.catalog_timeout_seconds
    }

    fn secret_key(&self) -> &str {
        &self.secret_key
    }

    fn session_ttl_minutes(&self) -> u64 {
        self.session_ttl_minutes
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.host)?;
        validation::validate_range("server.port", self.port, 1, u16::MAX)?;

        if is_remote_location(&self.catalog) {
            validation::validate_url("catalog.source", &self.catalog)?;
        } else {
            validation::validate_path("catalog.source", &self.catalog)?;
        }
        validation::validate_positive_number(
            "catalog.timeout_seconds",
            self.catalog_timeout_seconds,
            1,
        )?;

        validation::validate_non_empty_string("session.secret_key", &self.secret_key)?;
        validation::validate_range(
            "session.ttl_minutes",
            self.session_ttl_minutes,
            1,
            MAX_SESSION_TTL_MINUTES,
        )?;

        Ok(())
    }
}
