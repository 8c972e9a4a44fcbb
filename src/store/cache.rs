use crate::error::Result;
use crate::models::{Listing, ListingUpdate, NewListing};
use crate::store::traits::{ListingSource, ListingStore};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct Snapshot {
    fetched_at: Instant,
    listings: Vec<Listing>,
}

/// Time-bounded cache in front of another source.
///
/// A snapshot younger than the TTL is served as is. An empty catalog is never
/// cached. If the inner source fails, a stale snapshot is served instead of
/// the error. Writes made through the cache invalidate it, including any
/// refresh that was already in flight when the write happened.
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
    // Bumped by every invalidation, under the snapshot write lock
    generation: AtomicU64,
}

impl<S> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self::with_ttl(inner, DEFAULT_TTL)
    }

    pub fn with_ttl(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            snapshot: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub async fn clear(&self) {
        let mut snapshot = self.snapshot.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        *snapshot = None;
    }
}

#[async_trait]
impl<S: ListingSource> ListingSource for CachedSource<S> {
    async fn fetch_all(&self) -> Result<Vec<Listing>> {
        if let Some(snapshot) = self.snapshot.read().await.as_ref() {
            if snapshot.fetched_at.elapsed() < self.ttl {
                debug!("serving {} cached listings", snapshot.listings.len());
                return Ok(snapshot.listings.clone());
            }
        }

        let started = self.generation.load(Ordering::SeqCst);
        match self.inner.fetch_all().await {
            Ok(listings) => {
                if !listings.is_empty() {
                    let mut snapshot = self.snapshot.write().await;
                    if self.generation.load(Ordering::SeqCst) == started {
                        *snapshot = Some(Snapshot {
                            fetched_at: Instant::now(),
                            listings: listings.clone(),
                        });
                    } else {
                        debug!("catalog changed during refresh, not caching it");
                    }
                }
                Ok(listings)
            }
            Err(err) => match self.snapshot.read().await.as_ref() {
                Some(stale) => {
                    warn!(
                        "{} fetch failed ({}), serving {} stale listings",
                        self.inner.source_name(),
                        err,
                        stale.listings.len()
                    );
                    Ok(stale.listings.clone())
                }
                None => Err(err),
            },
        }
    }

    fn source_name(&self) -> &'static str {
        self.inner.source_name()
    }
}

#[async_trait]
impl<S: ListingStore> ListingStore for CachedSource<S> {
    async fn add(&self, listing: NewListing) -> Result<Listing> {
        let created = self.inner.add(listing).await?;
        self.clear().await;
        Ok(created)
    }

    async fn update(&self, id: &str, update: ListingUpdate) -> Result<Listing> {
        let updated = self.inner.update(id, update).await?;
        self.clear().await;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.inner.delete(id).await?;
        self.clear().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::fixtures::{apartment, new_listing};
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use std::sync::Arc;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct FlakySource {
        calls: AtomicUsize,
        failing: AtomicBool,
        empty: AtomicBool,
    }

    #[async_trait]
    impl ListingSource for FlakySource {
        async fn fetch_all(&self) -> Result<Vec<Listing>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "backend down",
                )));
            }
            if self.empty.load(Ordering::SeqCst) {
                return Ok(Vec::new());
            }
            Ok(vec![apartment("a"), apartment("b")])
        }

        fn source_name(&self) -> &'static str {
            "flaky"
        }
    }

    #[tokio::test]
    async fn fresh_snapshot_skips_inner_source() {
        let cache = CachedSource::new(FlakySource::default());
        assert_eq!(cache.fetch_all().await.unwrap().len(), 2);
        assert_eq!(cache.fetch_all().await.unwrap().len(), 2);
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 1);

        cache.clear().await;
        cache.fetch_all().await.unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn expired_snapshot_refetches() {
        let cache = CachedSource::with_ttl(FlakySource::default(), Duration::ZERO);
        cache.fetch_all().await.unwrap();
        cache.fetch_all().await.unwrap();
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn stale_snapshot_covers_failures() {
        let cache = CachedSource::with_ttl(FlakySource::default(), Duration::ZERO);
        cache.fetch_all().await.unwrap();
        cache.inner().failing.store(true, Ordering::SeqCst);
        let listings = cache.fetch_all().await.unwrap();
        assert_eq!(listings.len(), 2);
    }

    #[tokio::test]
    async fn failure_without_snapshot_propagates() {
        let source = FlakySource::default();
        source.failing.store(true, Ordering::SeqCst);
        let cache = CachedSource::new(source);
        assert!(cache.fetch_all().await.is_err());
    }

    #[tokio::test]
    async fn empty_catalog_is_not_cached() {
        let source = FlakySource::default();
        source.empty.store(true, Ordering::SeqCst);
        let cache = CachedSource::new(source);
        assert!(cache.fetch_all().await.unwrap().is_empty());
        assert!(cache.fetch_all().await.unwrap().is_empty());
        assert_eq!(cache.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn writes_invalidate() {
        let cache = CachedSource::new(MemoryStore::with_listings(vec![apartment("a")]));
        assert_eq!(cache.fetch_all().await.unwrap().len(), 1);

        let added = cache.add(new_listing()).await.unwrap();
        assert_eq!(cache.fetch_all().await.unwrap().len(), 2);

        cache.delete(&added.id).await.unwrap();
        let ids: Vec<String> = cache.fetch_all().await.unwrap().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["a"]);
    }

    /// Memory store whose next `fetch_all` reads the catalog, then waits for
    /// `release` before returning it
    #[derive(Default)]
    struct GatedStore {
        store: MemoryStore,
        hold_next: AtomicBool,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ListingSource for GatedStore {
        async fn fetch_all(&self) -> Result<Vec<Listing>> {
            let listings = self.store.fetch_all().await?;
            if self.hold_next.swap(false, Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            Ok(listings)
        }

        fn source_name(&self) -> &'static str {
            "gated"
        }
    }

    #[async_trait]
    impl ListingStore for GatedStore {
        async fn add(&self, listing: NewListing) -> Result<Listing> {
            self.store.add(listing).await
        }

        async fn update(&self, id: &str, update: ListingUpdate) -> Result<Listing> {
            self.store.update(id, update).await
        }

        async fn delete(&self, id: &str) -> Result<()> {
            self.store.delete(id).await
        }
    }

    #[tokio::test]
    async fn refresh_racing_a_write_is_not_cached() {
        let gated = GatedStore {
            store: MemoryStore::with_listings(vec![apartment("a")]),
            ..Default::default()
        };
        gated.hold_next.store(true, Ordering::SeqCst);
        let cache = Arc::new(CachedSource::new(gated));

        let refresh = tokio::spawn({
            let cache = Arc::clone(&cache);
            async move { cache.fetch_all().await }
        });

        // the refresh has read the old catalog and is parked
        cache.inner().entered.notified().await;
        cache.add(new_listing()).await.unwrap();
        cache.inner().release.notify_one();

        assert_eq!(refresh.await.unwrap().unwrap().len(), 1);
        assert_eq!(cache.fetch_all().await.unwrap().len(), 2);
    }
}
