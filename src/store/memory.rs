use crate::error::Result;
use crate::models::{Listing, ListingUpdate, NewListing};
use crate::store::traits::{ListingSource, ListingStore};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// In-process catalog, mostly for tests and demos
#[derive(Debug, Default)]
pub struct MemoryStore {
    listings: RwLock<Vec<Listing>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings: RwLock::new(listings),
        }
    }
}

#[async_trait]
impl ListingSource for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<Listing>> {
        Ok(self.listings.read().await.clone())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Listing>> {
        Ok(self.listings.read().await.iter().find(|l| l.id == id).cloned())
    }

    fn source_name(&self) -> &'static str {
        "memory"
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn add(&self, listing: NewListing) -> Result<Listing> {
        let mut listings = self.listings.write().await;
        let created = super::insert_new(&mut listings, listing);
        debug!(id = %created.id, "added listing");
        Ok(created)
    }

    async fn update(&self, id: &str, update: ListingUpdate) -> Result<Listing> {
        let mut listings = self.listings.write().await;
        super::apply_update(&mut listings, id, update)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut listings = self.listings.write().await;
        super::remove(&mut listings, id)
    }
}
