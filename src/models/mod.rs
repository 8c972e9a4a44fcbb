use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// City a listing belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum City {
    #[default]
    NewDamietta,
    NewMansoura,
}

impl City {
    pub const ALL: [City; 2] = [City::NewDamietta, City::NewMansoura];

    /// URL slug, also the wire form of the enum
    pub fn slug(self) -> &'static str {
        match self {
            City::NewDamietta => "new-damietta",
            City::NewMansoura => "new-mansoura",
        }
    }

    /// Display name used in generated text
    pub fn name_ar(self) -> &'static str {
        match self {
            City::NewDamietta => "دمياط الجديدة",
            City::NewMansoura => "المنصورة الجديدة",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

impl std::str::FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s).ok_or_else(|| {
            format!("unknown city '{s}', expected one of: new-damietta, new-mansoura")
        })
    }
}

/// Sale status of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    #[serde(alias = "جاهز")]
    Ready,
    #[serde(alias = "تحت الإنشاء")]
    UnderConstruction,
    #[serde(alias = "تم البيع")]
    Sold,
}

/// How the buyer may pay
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentType {
    #[default]
    #[serde(alias = "كاش")]
    Cash,
    #[serde(alias = "تقسيط")]
    Installment,
    #[serde(alias = "كاش أو تقسيط")]
    CashOrInstallment,
}

impl PaymentType {
    pub fn allows_installments(self) -> bool {
        matches!(self, PaymentType::Installment | PaymentType::CashOrInstallment)
    }
}

/// Location information for a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub city_id: City,
    pub district: String,
}

/// Physical attributes of the unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Details {
    pub area_sqm: f64,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub finishing: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Payment {
    #[serde(rename = "type", default)]
    pub kind: PaymentType,
}

/// Core listing data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
    pub location: Location,
    pub details: Details,
    #[serde(default)]
    pub payment: Payment,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, rename = "contact_whatsapp")]
    pub contact_whatsapp: String,
    #[serde(default)]
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// A listing as submitted from the owner dashboard, before the store assigns
/// its id and creation time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
    pub location: Location,
    pub details: Details,
    #[serde(default)]
    pub payment: Payment,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, rename = "contact_whatsapp")]
    pub contact_whatsapp: String,
    #[serde(default)]
    pub is_verified: bool,
}

impl NewListing {
    pub fn into_listing(self, id: String, created_at: DateTime<Utc>) -> Listing {
        Listing {
            id,
            title: self.title,
            kind: self.kind,
            price: self.price,
            location: self.location,
            details: self.details,
            payment: self.payment,
            status: self.status,
            description: self.description,
            amenities: self.amenities,
            images: self.images,
            contact_whatsapp: self.contact_whatsapp,
            is_verified: self.is_verified,
            created_at,
        }
    }
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListingUpdate {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub price: Option<f64>,
    pub location: Option<Location>,
    pub details: Option<Details>,
    pub payment: Option<Payment>,
    pub status: Option<Status>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    #[serde(rename = "contact_whatsapp")]
    pub contact_whatsapp: Option<String>,
    pub is_verified: Option<bool>,
}

impl ListingUpdate {
    pub fn apply(self, listing: &mut Listing) {
        if let Some(v) = self.title {
            listing.title = v;
        }
        if let Some(v) = self.kind {
            listing.kind = v;
        }
        if let Some(v) = self.price {
            listing.price = v;
        }
        if let Some(v) = self.location {
            listing.location = v;
        }
        if let Some(v) = self.details {
            listing.details = v;
        }
        if let Some(v) = self.payment {
            listing.payment = v;
        }
        if let Some(v) = self.status {
            listing.status = v;
        }
        if let Some(v) = self.description {
            listing.description = v;
        }
        if let Some(v) = self.amenities {
            listing.amenities = v;
        }
        if let Some(v) = self.images {
            listing.images = v;
        }
        if let Some(v) = self.contact_whatsapp {
            listing.contact_whatsapp = v;
        }
        if let Some(v) = self.is_verified {
            listing.is_verified = v;
        }
    }
}
