use crate::config::{toml_config::TomlConfig, AppConfig};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command line flags. Anything given here wins over the TOML file.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "ubermelon")]
#[command(about = "Ubermelon melon shop web server")]
pub struct ServeArgs {
    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, help = "Catalog file path or http(s) URL")]
    pub catalog: Option<String>,

    #[arg(long, env = "UBERMELON_SECRET_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    #[arg(long)]
    pub session_ttl_minutes: Option<u64>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServeArgs {
    /// defaults → TOML 檔 → 命令列參數，依序覆蓋
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = &self.config {
            let toml = TomlConfig::from_file(path)?;
            config.apply_toml(&toml);
        }

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(catalog) = &self.catalog {
            config.catalog = catalog.clone();
        }
        if let Some(secret) = &self.secret_key {
            config.secret_key = secret.clone();
        }
        if let Some(ttl) = self.session_ttl_minutes {
            config.session_ttl_minutes = ttl;
        }
        if self.json_logs {
            config.json_logs = true;
        }
        if self.verbose {
            config.verbose = true;
        }

        Ok(config)
    }
}
