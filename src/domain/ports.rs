use crate::domain::model::{Product, ProductId, SessionState};
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Where the raw catalog text comes from (local file, HTTP, ...).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn describe(&self) -> String;
    async fn fetch(&self) -> Result<String>;
}

/// Read access to the loaded catalog.
pub trait CatalogLookup: Send + Sync {
    fn all(&self) -> &[Product];
    /// Returns `ProductNotFound` for ids the catalog does not know.
    fn get_by_id(&self, id: ProductId) -> Result<&Product>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// `None` when the session is unknown or has expired.
    async fn load(&self, id: &Uuid) -> Result<Option<SessionState>>;
    async fn save(&self, id: &Uuid, state: &SessionState) -> Result<()>;
    /// Drops expired sessions and returns how many were removed.
    async fn prune_expired(&self) -> Result<usize>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> String;
    fn catalog_location(&self) -> &str;
    fn catalog_timeout_seconds(&self) -> u64;
    fn secret_key(&self) -> &str;
    fn session_ttl_minutes(&self) -> u64;
}
