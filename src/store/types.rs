use crate::models::{City, Listing};
use serde::{Deserialize, Serialize};

/// Catalog filter used by the listing pages
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ListingQuery {
    pub city: Option<City>,
    /// Exact district name
    pub district: Option<String>,
    /// Exact listing type
    pub kind: Option<String>,
    /// Minimum price (EGP)
    pub min_price: Option<f64>,
    /// Maximum price (EGP)
    pub max_price: Option<f64>,
}

impl ListingQuery {
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(city) = self.city {
            if listing.location.city_id != city {
                return false;
            }
        }
        if let Some(district) = &self.district {
            if &listing.location.district != district {
                return false;
            }
        }
        if let Some(kind) = &self.kind {
            if &listing.kind != kind {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if listing.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if listing.price > max {
                return false;
            }
        }
        true
    }
}

/// One page of a filtered catalog
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
}
