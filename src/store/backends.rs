use crate::config::AppConfig;
use crate::error::Result;
use crate::store::{CachedSource, HttpSource, JsonFileStore, ListingSource};
use tracing::info;

/// The backends a configured process talks to. Writes always go to the
/// local JSON catalog; reads come from the remote API when one is
/// configured, otherwise from that same cached JSON store so writes are
/// visible to the next read.
pub struct Backends {
    pub store: CachedSource<JsonFileStore>,
    remote: Option<CachedSource<HttpSource>>,
}

impl Backends {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store =
            CachedSource::with_ttl(JsonFileStore::new(&config.store_path), config.cache_ttl());
        let remote = match &config.api_url {
            Some(url) => {
                info!("🏠 Reading listings from {}", url);
                Some(CachedSource::with_ttl(
                    HttpSource::new(url.as_str())?,
                    config.cache_ttl(),
                ))
            }
            None => {
                info!("🏠 Reading listings from {}", config.store_path.display());
                None
            }
        };
        Ok(Self { store, remote })
    }

    pub fn reader(&self) -> &dyn ListingSource {
        match &self.remote {
            Some(remote) => remote,
            None => &self.store,
        }
    }
}
