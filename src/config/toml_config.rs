use crate::utils::error::{Result, ShopError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional on-disk configuration. Every section and field may be left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub catalog: Option<CatalogSection>,
    pub session: Option<SessionSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    pub source: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSection {
    pub secret_key: Option<String>,
    pub ttl_minutes: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    /// `text` (default) or `json`
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShopError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let config: Self =
            toml::from_str(&processed_content).map_err(|e| ShopError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        if let Some(format) = config.logging.as_ref().and_then(|l| l.format.as_deref()) {
            if !matches!(format.to_ascii_lowercase().as_str(), "text" | "json") {
                return Err(ShopError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: text, json".to_string(),
                });
            }
        }

        Ok(config)
    }

    /// 替換環境變數 (例如 ${MELON_SECRET})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShopError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
host = "0.0.0.0"
port = 8000

[catalog]
source = "https://example.com/melons.txt"
timeout_seconds = 3

[session]
secret_key = "shh"
ttl_minutes = 60

[logging]
format = "text"
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        let server = config.server.unwrap();
        assert_eq!(server.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(server.port, Some(8000));
        let catalog = config.catalog.unwrap();
        assert_eq!(catalog.source.as_deref(), Some("https://example.com/melons.txt"));
        assert_eq!(catalog.timeout_seconds, Some(3));
        assert_eq!(config.session.unwrap().ttl_minutes, Some(60));
        assert_eq!(config.logging.unwrap().verbose, Some(true));
    }

    #[test]
    fn test_empty_config_is_allowed() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.server.is_none());
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("UBERMELON_TEST_SECRET", "from-env");

        let toml_content = r#"
[session]
secret_key = "${UBERMELON_TEST_SECRET}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.session.unwrap().secret_key.as_deref(),
            Some("from-env")
        );

        std::env::remove_var("UBERMELON_TEST_SECRET");
    }

    #[test]
    fn test_unset_env_var_is_left_alone() {
        let toml_content = r#"
[session]
secret_key = "${UBERMELON_TEST_DEFINITELY_UNSET}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.session.unwrap().secret_key.as_deref(),
            Some("${UBERMELON_TEST_DEFINITELY_UNSET}")
        );
    }

    #[test]
    fn test_invalid_log_format() {
        let err = TomlConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ShopError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let err = TomlConfig::from_toml_str("[server\nport = 1").unwrap_err();
        assert!(matches!(err, ShopError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nport = 9001\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.unwrap().port, Some(9001));
    }
}
