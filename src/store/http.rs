use crate::error::Result;
use crate::models::Listing;
use crate::store::traits::ListingSource;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Read-only catalog served by a remote JSON API
/// (`GET {base}/listings`, `GET {base}/listings/{id}`)
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("listing-scout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn listings_url(&self) -> String {
        format!("{}/listings", self.base_url)
    }

    fn listing_url(&self, id: &str) -> String {
        format!("{}/listings/{}", self.base_url, id)
    }
}

#[async_trait]
impl ListingSource for HttpSource {
    async fn fetch_all(&self) -> Result<Vec<Listing>> {
        let url = self.listings_url();
        debug!("Fetching URL: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            warn!("Listing API returned status: {}", response.status());
        }
        let listings: Vec<Listing> = response.error_for_status()?.json().await?;

        info!("Fetched {} listings from {}", listings.len(), self.base_url);
        Ok(listings)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<Listing>> {
        let url = self.listing_url(id);
        debug!("Fetching URL: {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(response.error_for_status()?.json().await?))
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
