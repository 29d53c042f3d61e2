//! Fitting listings to the user's filters and scoring them by price.

use crate::models::{ListingRecord, ScoredListing, SearchRequest};
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: u8 = 60;
pub const MAX_SCORE: u8 = 100;

/// Coerce price and surface into the requested bounds.
///
/// Out-of-range listings are pulled to the nearest boundary, never dropped.
pub fn clamp_to_request(listing: ListingRecord, request: &SearchRequest) -> ListingRecord {
    ListingRecord {
        price: clamp(listing.price, request.min_price(), request.max_price()),
        surface: clamp(listing.surface, request.min_surface(), request.max_surface()),
        ..listing
    }
}

/// Score in `[60, 100]`: 100 for a free listing, 60 at or above budget.
/// A non-positive budget scores 60.
pub fn score_by_price(price: f64, max_budget: f64) -> u8 {
    let ratio = if max_budget > 0.0 && max_budget.is_finite() && price.is_finite() {
        price / max_budget
    } else {
        1.0
    };

    let score = (100.0 - ratio * 40.0).max(f64::from(MIN_SCORE)).round();
    score.min(f64::from(MAX_SCORE)) as u8
}

/// Clamp every listing, score it against the request budget and order best first
pub fn rank_listings(listings: Vec<ListingRecord>, request: &SearchRequest) -> Vec<ScoredListing> {
    let mut ranked: Vec<ScoredListing> = listings
        .into_iter()
        .map(|listing| {
            let listing = clamp_to_request(listing, request);
            let score = score_by_price(listing.price, request.max_price());
            ScoredListing { listing, score }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Badge band for a score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScoreTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => ScoreTier::Excellent,
            80..=89 => ScoreTier::Good,
            70..=79 => ScoreTier::Fair,
            _ => ScoreTier::Poor,
        }
    }
}

fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    value.max(lo).min(hi)
}
