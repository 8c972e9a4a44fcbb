//! Real-estate listing catalog: storage backends, related-listing ranking,
//! and URL/SEO text generation for two cities.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod ranking;
pub mod seo;
pub mod store;

pub use error::{Error, Result};
pub use models::{City, Listing, ListingUpdate, NewListing, PaymentType, Status};
pub use ranking::{rank, rank_scored, score, ScoredCandidate};
