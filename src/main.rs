use anyhow::Context;
use clap::Parser;
use ubermelon::adapters::catalog_source;
use ubermelon::utils::{logger, validation::Validate};
use ubermelon::{web, Catalog, ServeArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServeArgs::parse();

    // 先決定設定，才知道日誌格式
    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    logger::init_logger(config.verbose, config.json_logs);

    tracing::info!("Starting ubermelon");
    if config.verbose {
        tracing::debug!("Resolved config: catalog={}, address={}:{}", config.catalog, config.host, config.port);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if config.uses_default_secret() {
        tracing::warn!("Using the built-in session secret; set --secret-key or UBERMELON_SECRET_KEY");
    }

    let source = catalog_source(&config)?;
    let catalog = Catalog::load(source.as_ref())
        .await
        .with_context(|| format!("failed to load catalog from {}", source.describe()))?;

    web::start_server(&config, catalog).await?;

    Ok(())
}
