//! Catalog queries used by the listing pages

use crate::error::{Error, Result};
use crate::models::Listing;
use crate::ranking;
use crate::store::{ListingQuery, ListingSource, Page};
use tracing::info;

/// Filter then slice out 1-based page `page` of `per_page` listings
pub fn page<'a>(
    listings: &'a [Listing],
    query: &ListingQuery,
    page: usize,
    per_page: usize,
) -> Result<Page<&'a Listing>> {
    if page == 0 || per_page == 0 {
        return Err(Error::InvalidArgument(
            "page and per_page must be positive".to_string(),
        ));
    }

    let filtered: Vec<&Listing> = listings.iter().filter(|l| query.matches(l)).collect();
    let total = filtered.len();
    let total_pages = total.div_ceil(per_page);
    // an offset past usize::MAX is past the end of any catalog
    let items = match (page - 1).checked_mul(per_page) {
        Some(offset) => filtered.into_iter().skip(offset).take(per_page).collect(),
        None => Vec::new(),
    };

    Ok(Page {
        items,
        total,
        total_pages,
        page,
    })
}

/// Verified listings in catalog order
pub fn featured(listings: &[Listing], limit: usize) -> Vec<&Listing> {
    listings.iter().filter(|l| l.is_verified).take(limit).collect()
}

/// Newest first
pub fn latest(listings: &[Listing], limit: usize) -> Vec<&Listing> {
    let mut sorted: Vec<&Listing> = listings.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(limit);
    sorted
}

/// A related listing and how similar it is to the one being viewed
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedMatch {
    pub listing: Listing,
    pub similarity: u8,
}

/// The listing being viewed plus its ranked related listings
#[derive(Debug, Clone)]
pub struct Related {
    pub listing: Listing,
    pub matches: Vec<RelatedMatch>,
}

/// Look up `id` in `source` and rank the rest of the catalog against it
pub async fn related<S: ListingSource + ?Sized>(
    source: &S,
    id: &str,
    limit: usize,
) -> Result<Related> {
    if limit == 0 {
        return Err(Error::InvalidArgument(
            "related listing limit must be positive".to_string(),
        ));
    }

    let catalog = source.fetch_all().await?;
    let listing = catalog
        .iter()
        .find(|l| l.id == id)
        .cloned()
        .ok_or_else(|| Error::NotFound(id.to_string()))?;

    info!(
        "Ranking {} candidates from {} against {}",
        catalog.len().saturating_sub(1),
        source.source_name(),
        id
    );

    let matches = ranking::rank_scored(&listing, &catalog, limit)?
        .into_iter()
        .map(|c| RelatedMatch {
            listing: c.listing.clone(),
            similarity: c.similarity,
        })
        .collect();

    Ok(Related { listing, matches })
}
