use std::sync::Arc;

use crate::adapters::MemorySessionStore;
use crate::core::catalog::Catalog;
use crate::core::{ConfigProvider, SessionStore};
use crate::utils::error::{Result, ShopError};
use crate::web::session::SessionSigner;

pub struct AppState {
    pub catalog: Catalog,
    pub sessions: Arc<dyn SessionStore>,
    pub signer: SessionSigner,
}

impl AppState {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C, catalog: Catalog) -> Result<Arc<Self>> {
        let ttl = session_ttl(config.session_ttl_minutes())?;
        Self::with_store(config, catalog, Arc::new(MemorySessionStore::new(ttl)))
    }

    pub fn with_store<C: ConfigProvider + ?Sized>(
        config: &C,
        catalog: Catalog,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            catalog,
            sessions,
            signer: SessionSigner::new(config.secret_key())?,
        }))
    }
}

fn session_ttl(minutes: u64) -> Result<chrono::Duration> {
    i64::try_from(minutes)
        .ok()
        .and_then(chrono::Duration::try_minutes)
        .ok_or_else(|| ShopError::InvalidConfigValueError {
            field: "session.ttl_minutes".to_string(),
            value: minutes.to_string(),
            reason: "Value is too large".to_string(),
        })
}
