use crate::models::{City, Listing};
use once_cell::sync::Lazy;
use std::collections::HashMap;

const UNKNOWN_DISTRICT: &str = "unknown-district";

static DISTRICT_SLUGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // New Damietta
        ("الحي الأول", "first-district"),
        ("الحي الثاني", "second-district"),
        ("الحي الثالث", "third-district"),
        ("الحي الرابع", "fourth-district"),
        ("الحي الخامس", "fifth-district"),
        ("الحي السادس (المتميز)", "sixth-district"),
        ("مشروع جنة", "janna-project"),
        ("دار مصر - موقع 1", "dar-misr-1"),
        ("دار مصر - موقع 2", "dar-misr-2"),
        ("سكن مصر - جنوب الحي الأول", "sakan-misr-south"),
        ("سكن مصر - غرب الجامعات", "sakan-misr-west"),
        ("بيت الوطن - شرق", "beit-al-watan-east"),
        ("بيت الوطن - غرب", "beit-al-watan-west"),
        ("بيت الوطن - امتداد الشاطئ", "beit-al-watan-beach"),
        ("المنطقة المركزية (أ)", "central-area-a"),
        ("المنطقة المركزية (ب)", "central-area-b"),
        ("المنطقة المركزية (ج)", "central-area-c"),
        ("منطقة الشاليهات", "chalets"),
        // New Mansoura
        ("R1", "r1"),
        ("R2", "r2"),
        ("R3", "r3"),
        ("R4", "r4"),
        ("R5", "r5"),
        ("R6", "r6"),
        ("R7", "r7"),
        ("الحي السكني الأول", "residential-1"),
        ("الحي السكني الثاني", "residential-2"),
        ("الحي السكني الثالث", "residential-3"),
        ("سكن لكل المصريين", "sakan-kol-misryeen"),
        ("سكن لكل المصريين 2", "sakan-kol-misryeen-2"),
        ("سكن لكل المصريين 3", "sakan-kol-misryeen-3"),
        ("دار مصر", "dar-misr"),
        ("جنة", "janna"),
        ("الإسكان المتوسط", "medium-housing"),
        ("الإسكان الاجتماعي", "social-housing"),
        ("حي الفيلات", "villas-district"),
        ("منطقة الفيلات D", "villas-d"),
        ("فيلات الجولف", "golf-villas"),
        ("فيلات البحيرات", "lake-villas"),
        ("داون تاون", "downtown"),
        ("المول التجاري المركزي", "central-mall"),
        ("منطقة الأعمال المركزية CBD", "cbd"),
        ("المحور التجاري", "commercial-axis"),
        ("منطقة الخدمات", "services-zone"),
        ("الحديقة المركزية", "central-park"),
        ("منطقة الكورنيش", "corniche"),
        ("النادي الاجتماعي", "social-club"),
        ("المنطقة السياحية", "touristic-zone"),
        ("الواجهة البحرية", "waterfront"),
        ("شاطئ المنصورة الجديدة", "beach"),
        ("منتجعات الساحل", "coastal-resorts"),
    ])
});

/// URL slug for a district name.
///
/// Known districts come from a fixed table. Anything else is lowercased,
/// whitespace runs become `-` and parentheses are dropped.
pub fn district_slug(name: &str) -> String {
    if name.trim().is_empty() {
        return UNKNOWN_DISTRICT.to_string();
    }
    if let Some(slug) = DISTRICT_SLUGS.get(name) {
        return (*slug).to_string();
    }
    fallback_slug(name)
}

fn fallback_slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c != '(' && c != ')' {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Reverse lookup for routing: district name for a slug within a catalog
pub fn district_for_slug<'a>(
    slug: &str,
    districts: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    districts.into_iter().find(|d| district_slug(d) == slug)
}

pub fn city_slug(city: City) -> &'static str {
    city.slug()
}

/// Site-relative path: `/{city}/{district}/{id}`
pub fn listing_path(listing: &Listing) -> String {
    format!(
        "/{}/{}/{}",
        city_slug(listing.location.city_id),
        district_slug(&listing.location.district),
        listing.id
    )
}

pub fn listing_url(base_url: &str, listing: &Listing) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), listing_path(listing))
}
