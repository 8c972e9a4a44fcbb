use crate::error::{Error, Result};
use crate::models::Listing;
use crate::ranking::score;
use tracing::debug;

/// Candidates at or above this score are preferred over everything else
pub const HIGH_SIMILARITY: u8 = 90;

/// A candidate paired with its similarity to the reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub listing: &'a Listing,
    pub similarity: u8,
}

/// Pick the `limit` listings from `pool` most similar to `reference`.
///
/// The reference is excluded by id. Ties keep their pool order.
pub fn rank<'a>(
    reference: &Listing,
    pool: &'a [Listing],
    limit: usize,
) -> Result<Vec<&'a Listing>> {
    Ok(rank_scored(reference, pool, limit)?
        .into_iter()
        .map(|c| c.listing)
        .collect())
}

/// Like [`rank`], keeping the similarity of each returned listing.
pub fn rank_scored<'a>(
    reference: &Listing,
    pool: &'a [Listing],
    limit: usize,
) -> Result<Vec<ScoredCandidate<'a>>> {
    if limit == 0 {
        return Err(Error::InvalidArgument(
            "related listing limit must be positive".to_string(),
        ));
    }

    let mut scored: Vec<ScoredCandidate<'a>> = pool
        .iter()
        .filter(|candidate| candidate.id != reference.id)
        .map(|candidate| ScoredCandidate {
            listing: candidate,
            similarity: score(reference, candidate),
        })
        .collect();

    // sort_by is stable, equal scores stay in pool order
    scored.sort_by(|a, b| b.similarity.cmp(&a.similarity));

    let high: Vec<ScoredCandidate<'a>> = scored
        .iter()
        .filter(|c| c.similarity >= HIGH_SIMILARITY)
        .copied()
        .collect();

    debug!(
        reference = %reference.id,
        candidates = scored.len(),
        high_similarity = high.len(),
        limit,
        "ranked related listings"
    );

    if high.len() >= limit {
        return Ok(high.into_iter().take(limit).collect());
    }

    // Not enough strong matches, backfill from the full ordering
    scored.truncate(limit);
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::apartment;
    use crate::models::{City, Status};

    fn ids(listings: &[&Listing]) -> Vec<String> {
        listings.iter().map(|l| l.id.clone()).collect()
    }

    /// Candidate whose score against `apartment` is exactly `target`
    fn with_score(id: &str, target: u8) -> Listing {
        let mut l = apartment(id);
        match target {
            100 => {}
            // price tier 12 instead of 15
            97 => l.price = 1_200_000.0,
            // area tier 8 instead of 10
            98 => l.details.area_sqm = 120.0,
            95 => l.status = Status::UnderConstruction,
            85 => l.location.city_id = City::NewMansoura,
            80 => l.location.district = "D9".to_string(),
            75 => l.kind = "villa".to_string(),
            60 => {
                l.kind = "villa".to_string();
                l.location.city_id = City::NewMansoura;
            }
            other => panic!("no fixture for score {other}"),
        }
        l
    }

    #[test]
    fn fixture_scores_match() {
        let reference = apartment("ref");
        for target in [100, 98, 97, 95, 85, 80, 75, 60] {
            assert_eq!(score(&reference, &with_score("x", target)), target);
        }
    }

    #[test]
    fn zero_limit_is_invalid() {
        let reference = apartment("ref");
        let pool = vec![apartment("b")];
        assert!(matches!(
            rank(&reference, &pool, 0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn empty_pool_gives_empty_result() {
        let reference = apartment("ref");
        assert!(rank(&reference, &[], 5).unwrap().is_empty());
    }

    #[test]
    fn reference_excluded_by_id_not_by_equality() {
        let reference = apartment("ref");
        let duplicate = apartment("dup");
        let pool = vec![reference.clone(), duplicate];
        let result = rank(&reference, &pool, 5).unwrap();
        assert_eq!(ids(&result), vec!["dup"]);
    }

    #[test]
    fn sorted_descending_with_stable_ties() {
        let reference = apartment("ref");
        let pool = vec![
            with_score("low", 60),
            with_score("tie-1", 80),
            with_score("top", 100),
            with_score("tie-2", 80),
            with_score("tie-3", 80),
        ];
        let result = rank(&reference, &pool, 10).unwrap();
        assert_eq!(ids(&result), vec!["top", "tie-1", "tie-2", "tie-3", "low"]);
    }

    #[test]
    fn backfills_when_too_few_high_matches() {
        let reference = apartment("ref");
        let pool = vec![
            with_score("c1", 60),
            with_score("h1", 95),
            with_score("c2", 75),
            with_score("c3", 80),
            with_score("h2", 100),
            with_score("c4", 60),
            with_score("c5", 85),
            with_score("h3", 97),
            with_score("c6", 75),
            with_score("c7", 60),
        ];
        let result = rank_scored(&reference, &pool, 4).unwrap();
        let got: Vec<(&str, u8)> = result
            .iter()
            .map(|c| (c.listing.id.as_str(), c.similarity))
            .collect();
        assert_eq!(got, vec![("h2", 100), ("h3", 97), ("h1", 95), ("c5", 85)]);
    }

    #[test]
    fn enough_high_matches_fill_the_limit() {
        let reference = apartment("ref");
        let pool = vec![
            with_score("a", 95),
            with_score("b", 85),
            with_score("c", 98),
            with_score("d", 100),
        ];
        let result = rank(&reference, &pool, 2).unwrap();
        assert_eq!(ids(&result), vec!["d", "c"]);
    }

    #[test]
    fn short_pool_returns_everything_available() {
        let reference = apartment("ref");
        let pool = vec![reference.clone(), with_score("a", 60), with_score("b", 75)];
        let result = rank(&reference, &pool, 4).unwrap();
        assert_eq!(ids(&result), vec!["b", "a"]);
    }
}
