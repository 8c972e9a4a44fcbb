use crate::error::Result;
use crate::models::{Listing, ListingUpdate, NewListing};
use async_trait::async_trait;

/// Read access to the listing catalog.
/// Implemented by every backend (file, memory, remote API) and by the cache.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Snapshot of the whole catalog
    async fn fetch_all(&self) -> Result<Vec<Listing>>;

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Listing>> {
        Ok(self.fetch_all().await?.into_iter().find(|l| l.id == id))
    }

    /// Name of the backend, for logs
    fn source_name(&self) -> &'static str;
}

/// Owner-side mutations on top of [`ListingSource`]
#[async_trait]
pub trait ListingStore: ListingSource {
    /// Persist a new listing, assigning its id and creation time
    async fn add(&self, listing: NewListing) -> Result<Listing>;

    /// Apply a partial update. Fails with `NotFound` for unknown ids.
    async fn update(&self, id: &str, update: ListingUpdate) -> Result<Listing>;

    /// Fails with `NotFound` for unknown ids.
    async fn delete(&self, id: &str) -> Result<()>;
}
