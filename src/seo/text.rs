use crate::models::{Listing, Status};
use crate::seo::slug::listing_url;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

const BRAND: &str = "التيسير للعقارات";
const BRAND_MARKER: &str = "التيسير";
const BRAND_PHONE: &str = "+201558245974";
const CURRENCY_WORD: &str = "جنيه";
const MILLION_WORD: &str = "مليون";

const PRIMARY_KEYWORDS: [&str; 3] = ["دمياط الجديدة", "عقارات", "للبيع"];

/// Types for which the floor level is left out of the title
const LEVELLESS_TYPES: [&str; 2] = ["أرض", "فيلا منفصلة"];

static TYPE_KEYWORDS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("شقة", &["شقة للبيع", "شقق", "سكني"] as &[&str]),
        ("شقة فاخرة", &["شقة فاخرة", "لوكس", "تشطيب سوبر لوكس"] as &[&str]),
        ("فيلا منفصلة", &["فيلا", "فيلات", "منفصلة", "حديقة خاصة"] as &[&str]),
        ("دوبلكس", &["دوبلكس", "طابقين", "روف"] as &[&str]),
        ("بنتهاوس", &["بنتهاوس", "روف", "إطلالة"] as &[&str]),
        ("تاون هاوس", &["تاون هاوس", "منزل", "حديقة"] as &[&str]),
        ("محل تجاري", &["محل", "تجاري", "استثمار", "إيجار"] as &[&str]),
        ("مقر إداري", &["مكتب", "إداري", "تجاري"] as &[&str]),
        ("عيادة", &["عيادة", "طبي", "مجمع طبي"] as &[&str]),
        ("أرض", &["أرض", "قطعة أرض", "بناء"] as &[&str]),
        ("مبنى تحت الإنشاء", &["تحت الإنشاء", "استلام", "تقسيط"] as &[&str]),
        ("شاليه", &["شاليه", "مصيف", "بحر"] as &[&str]),
        ("روف", &["روف", "سطح", "تراس"] as &[&str]),
    ])
});

static DISTRICT_KEYWORDS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("الحي الأول", &["الحي الأول", "منطقة راقية", "قريب من الخدمات"] as &[&str]),
        ("الحي الثاني", &["الحي الثاني", "موقع متميز"] as &[&str]),
        ("الحي الثالث", &["الحي الثالث", "منطقة هادئة"] as &[&str]),
        ("الحي الرابع", &["الحي الرابع", "قريب من المدارس"] as &[&str]),
        ("الحي الخامس", &["الحي الخامس", "منطقة جديدة"] as &[&str]),
        ("الحي المتميز", &["الحي المتميز", "فيلات", "راقي"] as &[&str]),
        ("مشروع جنة", &["جنة", "مشروع جنة", "إسكان اجتماعي"] as &[&str]),
        ("الإسكان الاجتماعي", &["إسكان اجتماعي", "دعم حكومي"] as &[&str]),
        ("المنصورة الجديدة", &["المنصورة الجديدة", "سكن لكل المصريين", "دار مصر"] as &[&str]),
    ])
});

/// Whole numbers print without a fractional part
fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

/// Human price: `2.3 مليون جنيه`, `3 مليون جنيه`, `850,000 جنيه`
pub fn format_price(price: f64) -> String {
    if price >= 1_000_000.0 {
        let millions = price / 1_000_000.0;
        if millions.fract() == 0.0 {
            return format!("{} {MILLION_WORD} {CURRENCY_WORD}", millions as i64);
        }
        return format!("{millions:.1} {MILLION_WORD} {CURRENCY_WORD}");
    }
    format!("{} {CURRENCY_WORD}", group_thousands(price.round() as i64))
}

/// Search-result title, e.g. `شقة 120 متر 3 غرف الحي الأول الدور الثالث - 1.5 مليون جنيه | دمياط الجديدة`
pub fn title(listing: &Listing) -> String {
    let d = &listing.details;
    let mut title = format!("{} {} متر", listing.kind, number(d.area_sqm));

    if d.bedrooms > 0 {
        title.push_str(&format!(" {} غرف", d.bedrooms));
    }

    title.push(' ');
    title.push_str(&listing.location.district);

    if !d.level.is_empty() && !LEVELLESS_TYPES.contains(&listing.kind.as_str()) {
        title.push(' ');
        title.push_str(&d.level);
    }

    title.push_str(&format!(
        " - {} | {}",
        format_price(listing.price),
        listing.location.city_id.name_ar()
    ));
    title
}

/// Meta description built from the listing attributes
pub fn description(listing: &Listing) -> String {
    let d = &listing.details;
    let city = listing.location.city_id.name_ar();
    let district = &listing.location.district;

    let mut out = format!("{} للبيع في {} - {}. ", listing.kind, district, city);
    out.push_str(&format!("المساحة: {} متر مربع. ", number(d.area_sqm)));

    if d.bedrooms > 0 {
        out.push_str(&format!("{} غرف نوم و {} حمام. ", d.bedrooms, d.bathrooms));
    }
    if !d.level.is_empty() {
        out.push_str(&format!("الدور: {}. ", d.level));
    }
    if !d.finishing.is_empty() {
        out.push_str(&format!("التشطيب: {}. ", d.finishing));
    }

    match listing.status {
        Status::UnderConstruction => out.push_str("العقار تحت الإنشاء. "),
        Status::Ready => out.push_str("جاهز للسكن والتسليم الفوري. "),
        Status::Sold => {}
    }

    if listing.payment.kind.allows_installments() {
        out.push_str("متاح التقسيط. ");
    }

    if !listing.amenities.is_empty() {
        let top: Vec<&str> = listing.amenities.iter().take(5).map(String::as_str).collect();
        out.push_str(&format!("المميزات: {}. ", top.join("، ")));
    }

    out.push_str(&format!("السعر: {}. ", format_price(listing.price)));

    let user_text = listing.description.trim();
    if !user_text.is_empty() {
        out.push_str(user_text);
        out.push(' ');
    }

    out.push_str(&format!("{BRAND} - شريكك الموثوق في عقارات {city}."));
    out
}

/// Meta keywords, first occurrence wins
pub fn keywords(listing: &Listing) -> Vec<String> {
    let kind = listing.kind.as_str();
    let district = listing.location.district.as_str();
    let city = listing.location.city_id.name_ar();

    let mut all: Vec<String> = PRIMARY_KEYWORDS.iter().map(|k| k.to_string()).collect();
    all.extend([
        kind.to_string(),
        format!("{kind} للبيع"),
        format!("{kind} {district}"),
        format!("{kind} {city}"),
        district.to_string(),
        format!("عقارات {district}"),
        format!("{} متر", number(listing.details.area_sqm)),
    ]);

    if let Some(extra) = TYPE_KEYWORDS.get(kind) {
        all.extend(extra.iter().map(|k| k.to_string()));
    }
    if let Some(extra) = DISTRICT_KEYWORDS.get(district) {
        all.extend(extra.iter().map(|k| k.to_string()));
    }

    let finishing = &listing.details.finishing;
    if !finishing.is_empty() {
        all.push(finishing.clone());
        all.push(format!("تشطيب {finishing}"));
    }

    all.extend(listing.amenities.iter().take(3).cloned());

    let mut seen = HashSet::new();
    all.retain(|k| seen.insert(k.clone()));
    all
}

/// schema.org `RealEstateListing` JSON-LD
pub fn schema(listing: &Listing, base_url: &str) -> Value {
    let url = listing_url(base_url, listing);
    let d = &listing.details;
    let district = &listing.location.district;
    let city = listing.location.city_id.name_ar();
    let name = if listing.title.is_empty() {
        title(listing)
    } else {
        listing.title.clone()
    };
    let availability = if listing.status == Status::Sold {
        "https://schema.org/SoldOut"
    } else {
        "https://schema.org/InStock"
    };

    let mut doc = json!({
        "@context": "https://schema.org",
        "@type": "RealEstateListing",
        "@id": url,
        "name": name,
        "description": description(listing),
        "url": url,
        "datePosted": listing.created_at.to_rfc3339(),
        "about": {
            "@type": "Residence",
            "name": name,
            "numberOfRooms": d.bedrooms,
            "numberOfBathroomsTotal": d.bathrooms,
            "floorSize": {
                "@type": "QuantitativeValue",
                "value": d.area_sqm,
                "unitCode": "MTK"
            },
            "address": {
                "@type": "PostalAddress",
                "addressLocality": district,
                "addressRegion": city,
                "addressCountry": "EG"
            }
        },
        "offers": {
            "@type": "Offer",
            "price": listing.price,
            "priceCurrency": "EGP",
            "availability": availability
        },
        "seller": {
            "@type": "RealEstateAgent",
            "name": BRAND,
            "telephone": BRAND_PHONE,
            "url": base_url.trim_end_matches('/')
        },
        "contentLocation": {
            "@type": "Place",
            "name": format!("{district}، {city}"),
            "address": {
                "@type": "PostalAddress",
                "addressLocality": district,
                "addressRegion": city,
                "addressCountry": "مصر"
            }
        }
    });

    if !listing.images.is_empty() {
        doc["image"] = json!(listing.images);
    }
    doc
}

/// Keep an owner-written title when it already names the place; otherwise
/// append location (and type) or replace it when too short to be useful.
pub fn enhance_title(user_title: &str, listing: &Listing) -> String {
    if user_title.chars().count() < 15 {
        return title(listing);
    }

    let city = listing.location.city_id.name_ar();
    let district = &listing.location.district;
    let has_location = user_title.contains(city) || user_title.contains(district.as_str());
    let has_type = user_title.contains(listing.kind.as_str());

    if !has_location && !has_type {
        return format!("{user_title} | {} {district} - {city}", listing.kind);
    }
    if !has_location {
        return format!("{user_title} | {district} - {city}");
    }
    user_title.to_string()
}

/// Prefix a short summary when price or area are missing and make sure the
/// brand appears; descriptions under 30 characters are regenerated.
pub fn enhance_description(user_description: &str, listing: &Listing) -> String {
    if user_description.chars().count() < 30 {
        return description(listing);
    }

    let has_price =
        user_description.contains(CURRENCY_WORD) || user_description.contains(MILLION_WORD);
    let has_area = user_description.contains("متر") || user_description.contains("م²");

    let mut enhanced = String::new();
    if !has_area || !has_price {
        enhanced.push_str(&format!(
            "{} {} متر في {}. السعر: {}. ",
            listing.kind,
            number(listing.details.area_sqm),
            listing.location.district,
            format_price(listing.price)
        ));
    }
    enhanced.push_str(user_description);

    if !enhanced.contains(BRAND_MARKER) {
        enhanced.push_str(&format!(
            " | {BRAND} - {}",
            listing.location.city_id.name_ar()
        ));
    }
    enhanced
}
