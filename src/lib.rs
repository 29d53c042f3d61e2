//! Commercial rental search: live Idealista listings when an API key is
//! configured, local demo data otherwise, clamped and scored against the
//! user's budget and surface filters.

pub mod config;
pub mod credentials;
pub mod models;
pub mod providers;
pub mod ranking;
pub mod service;

pub use models::{ListingRecord, Location, RequestError, ScoredListing, SearchRequest, Source};
pub use service::PropertyService;
