//! URL slugs and search-engine metadata for listings

pub mod slug;
pub mod text;

pub use slug::{city_slug, district_for_slug, district_slug, listing_path, listing_url};
pub use text::{
    description, enhance_description, enhance_title, format_price, keywords, schema, title,
};
