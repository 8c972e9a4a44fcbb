use crate::models::Listing;

/// Points awarded per dimension. They add up to 100 so the raw sum is
/// already a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    pub city: u8,
    pub district: u8,
    pub kind: u8,
    pub price: u8,
    pub area: u8,
    pub bedrooms: u8,
    pub status: u8,
    pub payment: u8,
}

pub const WEIGHTS: Weights = Weights {
    city: 15,
    district: 20,
    kind: 25,
    price: 15,
    area: 10,
    bedrooms: 8,
    status: 5,
    payment: 2,
};

impl Weights {
    pub const fn total(&self) -> u32 {
        self.city as u32
            + self.district as u32
            + self.kind as u32
            + self.price as u32
            + self.area as u32
            + self.bedrooms as u32
            + self.status as u32
            + self.payment as u32
    }
}

/// Relative-difference thresholds shared by the price and area tiers
const CLOSENESS_THRESHOLDS: [f64; 4] = [0.1, 0.2, 0.3, 0.5];
const _: () = assert!(WEIGHTS.total() == 100, "weights must sum to 100");

const PRICE_TIERS: [u8; 4] = [15, 12, 8, 4];
const AREA_TIERS: [u8; 4] = [10, 8, 5, 2];
const BEDROOM_TIERS: [u8; 3] = [8, 5, 2];

/// Similarity between two listings as an integer percentage in [0, 100].
///
/// Symmetric in its arguments. Never fails: a zero average price or area
/// counts as maximally dissimilar for that dimension.
pub fn score(reference: &Listing, candidate: &Listing) -> u8 {
    let w = &WEIGHTS;
    let mut total: u8 = 0;

    if reference.location.city_id == candidate.location.city_id {
        total += w.city;
    }
    if reference.location.district == candidate.location.district {
        total += w.district;
    }
    if reference.kind == candidate.kind {
        total += w.kind;
    }
    total += closeness(reference.price, candidate.price, &PRICE_TIERS);
    total += closeness(
        reference.details.area_sqm,
        candidate.details.area_sqm,
        &AREA_TIERS,
    );
    total += bedroom_closeness(reference.details.bedrooms, candidate.details.bedrooms);
    if reference.status == candidate.status {
        total += w.status;
    }
    if reference.payment.kind == candidate.payment.kind {
        total += w.payment;
    }

    total
}

/// Tiered award on `|a - b| / avg(a, b)`
fn closeness(a: f64, b: f64, tiers: &[u8; 4]) -> u8 {
    let avg = (a + b) / 2.0;
    if avg == 0.0 {
        return 0;
    }
    let ratio = (a - b).abs() / avg;
    if !ratio.is_finite() {
        return 0;
    }
    CLOSENESS_THRESHOLDS
        .iter()
        .zip(tiers)
        .find(|(threshold, _)| ratio <= **threshold)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

fn bedroom_closeness(a: u32, b: u32) -> u8 {
    BEDROOM_TIERS
        .get(a.abs_diff(b) as usize)
        .copied()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::apartment;
    use crate::models::{City, PaymentType, Status};

    #[test]
    fn weights_sum_to_one_hundred() {
        assert_eq!(WEIGHTS.total(), 100);
        assert_eq!(PRICE_TIERS[0], WEIGHTS.price);
        assert_eq!(AREA_TIERS[0], WEIGHTS.area);
        assert_eq!(BEDROOM_TIERS[0], WEIGHTS.bedrooms);
    }

    #[test]
    fn partial_match_is_the_plain_sum_of_awards() {
        let reference = apartment("a");
        let mut candidate = apartment("b");
        candidate.location.district = "D9".to_string();
        candidate.details.bedrooms = 3;
        candidate.details.area_sqm = 120.0;
        // city 15 + type 25 + price 15 + area 8 + bedrooms 5 + status 5 + payment 2
        assert_eq!(score(&reference, &candidate), 75);
    }

    #[test]
    fn identical_listing_scores_full() {
        let a = apartment("a");
        assert_eq!(score(&a, &a.clone()), 100);
    }

    #[test]
    fn five_percent_price_gap_still_scores_full() {
        let reference = apartment("a");
        let mut candidate = apartment("b");
        candidate.price = 1_050_000.0;
        assert_eq!(score(&reference, &candidate), 100);
    }

    #[test]
    fn forty_six_percent_price_gap_lands_in_last_tier() {
        let reference = apartment("a");
        let mut candidate = apartment("b");
        candidate.price = 1_600_000.0;
        assert_eq!(score(&reference, &candidate), 89);
    }

    #[test]
    fn price_beyond_half_contributes_nothing() {
        let reference = apartment("a");
        let mut candidate = apartment("b");
        candidate.price = 3_000_000.0;
        assert_eq!(score(&reference, &candidate), 100 - WEIGHTS.price);
    }

    #[test]
    fn price_tiers() {
        assert_eq!(closeness(100.0, 100.0, &PRICE_TIERS), 15);
        // d = 20 / 110
        assert_eq!(closeness(100.0, 120.0, &PRICE_TIERS), 12);
        // d = 30 / 115
        assert_eq!(closeness(100.0, 130.0, &PRICE_TIERS), 8);
        // d = 50 / 125
        assert_eq!(closeness(100.0, 150.0, &PRICE_TIERS), 4);
        assert_eq!(closeness(100.0, 200.0, &PRICE_TIERS), 0);
    }

    #[test]
    fn area_tiers() {
        assert_eq!(closeness(100.0, 105.0, &AREA_TIERS), 10);
        assert_eq!(closeness(100.0, 120.0, &AREA_TIERS), 8);
        assert_eq!(closeness(100.0, 130.0, &AREA_TIERS), 5);
        assert_eq!(closeness(100.0, 150.0, &AREA_TIERS), 2);
        assert_eq!(closeness(100.0, 250.0, &AREA_TIERS), 0);
    }

    #[test]
    fn zero_average_is_maximally_dissimilar() {
        assert_eq!(closeness(0.0, 0.0, &PRICE_TIERS), 0);

        let mut reference = apartment("a");
        let mut candidate = apartment("b");
        reference.details.area_sqm = 0.0;
        candidate.details.area_sqm = 0.0;
        assert_eq!(score(&reference, &candidate), 100 - WEIGHTS.area);
    }

    #[test]
    fn bedroom_tiers() {
        assert_eq!(bedroom_closeness(2, 2), 8);
        assert_eq!(bedroom_closeness(2, 3), 5);
        assert_eq!(bedroom_closeness(4, 2), 2);
        assert_eq!(bedroom_closeness(0, 5), 0);
    }

    #[test]
    fn completely_different_listing_scores_zero() {
        let reference = apartment("a");
        let mut candidate = apartment("b");
        candidate.location.city_id = City::NewMansoura;
        candidate.location.district = "R7".to_string();
        candidate.kind = "villa".to_string();
        candidate.price = 9_000_000.0;
        candidate.details.area_sqm = 600.0;
        candidate.details.bedrooms = 6;
        candidate.status = Status::Sold;
        candidate.payment.kind = PaymentType::Installment;
        assert_eq!(score(&reference, &candidate), 0);
    }

    #[test]
    fn score_is_symmetric_and_bounded() {
        let base = apartment("a");
        let mut variants = Vec::new();
        for (i, price) in [500_000.0, 900_000.0, 1_250_000.0, 4_000_000.0].iter().enumerate() {
            let mut v = apartment(&format!("v{i}"));
            v.price = *price;
            v.details.area_sqm = 60.0 + 30.0 * i as f64;
            v.details.bedrooms = i as u32;
            if i % 2 == 1 {
                v.location.district = "D2".to_string();
                v.status = Status::UnderConstruction;
            }
            variants.push(v);
        }
        variants.push(base);

        for a in &variants {
            for b in &variants {
                let ab = score(a, b);
                assert_eq!(ab, score(b, a));
                assert!(ab <= 100);
            }
        }
    }
}
