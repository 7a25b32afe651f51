// Adapters layer: concrete implementations of the domain ports.

pub mod catalog_file;
pub mod catalog_remote;
pub mod session_memory;

pub use catalog_file::FileCatalogSource;
pub use catalog_remote::RemoteCatalogSource;
pub use session_memory::MemorySessionStore;

use crate::core::{CatalogSource, ConfigProvider};
use crate::utils::error::Result;

pub fn is_remote_location(location: &str) -> bool {
    location.contains("://")
}

/// Picks the catalog adapter for the configured location: anything with a
/// scheme is fetched over HTTP, everything else is a local path.
pub fn catalog_source<C: ConfigProvider + ?Sized>(config: &C) -> Result<Box<dyn CatalogSource>> {
    let location = config.catalog_location();

    if is_remote_location(location) {
        Ok(Box::new(RemoteCatalogSource::new(
            location,
            config.catalog_timeout_seconds(),
        )?))
    } else {
        Ok(Box::new(FileCatalogSource::new(location)))
    }
}
