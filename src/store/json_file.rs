use crate::error::Result;
use crate::models::{Listing, ListingUpdate, NewListing};
use crate::store::traits::{ListingSource, ListingStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Catalog kept as one pretty-printed JSON array on disk
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Listing>> {
        if !tokio::fs::try_exists(&self.path).await? {
            debug!("{} does not exist yet, starting empty", self.path.display());
            return Ok(Vec::new());
        }
        let raw = tokio::fs::read_to_string(&self.path).await?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write through a temp file so readers never see a half-written catalog
    async fn save(&self, listings: &[Listing]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(listings)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("💾 Saved {} listings to {}", listings.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl ListingSource for JsonFileStore {
    async fn fetch_all(&self) -> Result<Vec<Listing>> {
        self.load().await
    }

    fn source_name(&self) -> &'static str {
        "json-file"
    }
}

#[async_trait]
impl ListingStore for JsonFileStore {
    async fn add(&self, listing: NewListing) -> Result<Listing> {
        let _guard = self.write_lock.lock().await;
        let mut listings = self.load().await?;
        let created = super::insert_new(&mut listings, listing);
        self.save(&listings).await?;
        info!("Added listing {}", created.id);
        Ok(created)
    }

    async fn update(&self, id: &str, update: ListingUpdate) -> Result<Listing> {
        let _guard = self.write_lock.lock().await;
        let mut listings = self.load().await?;
        let updated = super::apply_update(&mut listings, id, update)?;
        self.save(&listings).await?;
        info!("Updated listing {}", id);
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut listings = self.load().await?;
        super::remove(&mut listings, id)?;
        self.save(&listings).await?;
        info!("Deleted listing {}", id);
        Ok(())
    }
}
