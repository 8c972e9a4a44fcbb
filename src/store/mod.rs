//! Listing persistence
//!
//! Backends implement [`ListingSource`] (and [`ListingStore`] when they can
//! be written to). [`CachedSource`] wraps any of them with a freshness window.

pub mod backends;
pub mod cache;
pub mod http;
pub mod json_file;
pub mod memory;
pub mod traits;
pub mod types;

pub use backends::Backends;
pub use cache::CachedSource;
pub use http::HttpSource;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{ListingSource, ListingStore};
pub use types::{ListingQuery, Page};

use crate::error::{Error, Result};
use crate::models::{Listing, ListingUpdate, NewListing};
use chrono::Utc;
use uuid::Uuid;

fn new_listing_id() -> String {
    format!("prop-{}", Uuid::new_v4().simple())
}

// Shared by the in-process backends, which all keep the catalog as a Vec.

fn insert_new(listings: &mut Vec<Listing>, new: NewListing) -> Listing {
    let listing = new.into_listing(new_listing_id(), Utc::now());
    listings.push(listing.clone());
    listing
}

fn apply_update(listings: &mut [Listing], id: &str, update: ListingUpdate) -> Result<Listing> {
    let listing = listings
        .iter_mut()
        .find(|l| l.id == id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;
    update.apply(listing);
    Ok(listing.clone())
}

fn remove(listings: &mut Vec<Listing>, id: &str) -> Result<()> {
    let before = listings.len();
    listings.retain(|l| l.id != id);
    if listings.len() == before {
        return Err(Error::NotFound(id.to_string()));
    }
    Ok(())
}
