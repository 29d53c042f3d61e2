use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source of the listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Source {
    Idealista,
    #[serde(rename = "Demo Data")]
    DemoData,
}

impl Source {
    /// Provenance label shown next to a listing
    pub fn label(&self) -> &'static str {
        match self {
            Source::Idealista => "Idealista",
            Source::DemoData => "Demo Data",
        }
    }
}

/// Location information for a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub region: String,
}

/// A commercial rental listing, normalized from either provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingRecord {
    pub id: String,
    pub title: String,
    pub address: String,
    /// Monthly rent in euro
    pub price: f64,
    /// Surface in square meters
    pub surface: f64,
    pub description: String,
    pub images: Vec<String>,
    pub property_type: String,
    pub url: String,
    pub source: Source,
    pub location: Location,
    pub features: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

/// A listing after clamping, with its price score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredListing {
    #[serde(flatten)]
    pub listing: ListingRecord,
    pub score: u8,
}

/// Why a set of search filters was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("minimum surface {min} exceeds maximum surface {max}")]
    SurfaceRange { min: f64, max: f64 },

    #[error("maximum price must be a non-negative number, got {0}")]
    MaxPrice(f64),

    #[error("minimum price {min} must be between 0 and the maximum price {max}")]
    MinPrice { min: f64, max: f64 },

    #[error("surface bounds must be finite numbers")]
    NonFiniteSurface,
}

/// Search filters collected from the user for one search action.
///
/// Fields are private so every instance has passed validation; build it with
/// [`SearchRequest::new`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchRequest {
    location: String,
    min_price: f64,
    max_price: f64,
    min_surface: f64,
    max_surface: f64,
    property_type: String,
}

impl SearchRequest {
    pub fn new(
        location: impl Into<String>,
        max_price: f64,
        min_surface: f64,
        max_surface: f64,
        property_type: impl Into<String>,
    ) -> Result<Self, RequestError> {
        if !max_price.is_finite() || max_price < 0.0 {
            return Err(RequestError::MaxPrice(max_price));
        }
        if !min_surface.is_finite() || !max_surface.is_finite() {
            return Err(RequestError::NonFiniteSurface);
        }
        if min_surface > max_surface {
            return Err(RequestError::SurfaceRange {
                min: min_surface,
                max: max_surface,
            });
        }

        Ok(Self {
            location: location.into(),
            min_price: 0.0,
            max_price,
            min_surface,
            max_surface,
            property_type: property_type.into(),
        })
    }

    /// Set the lower budget bound (defaults to 0)
    pub fn with_min_price(mut self, min_price: f64) -> Result<Self, RequestError> {
        if !min_price.is_finite() || min_price < 0.0 || min_price > self.max_price {
            return Err(RequestError::MinPrice {
                min: min_price,
                max: self.max_price,
            });
        }
        self.min_price = min_price;
        Ok(self)
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn min_price(&self) -> f64 {
        self.min_price
    }

    pub fn max_price(&self) -> f64 {
        self.max_price
    }

    pub fn min_surface(&self) -> f64 {
        self.min_surface
    }

    pub fn max_surface(&self) -> f64 {
        self.max_surface
    }

    pub fn property_type(&self) -> &str {
        &self.property_type
    }
}
