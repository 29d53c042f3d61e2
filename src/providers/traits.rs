use crate::models::{ListingRecord, SearchRequest};
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for remote listing providers.
/// Errors are returned as-is; falling back is the caller's decision.
#[async_trait]
pub trait ListingProvider: Send + Sync {
    /// Fetch listings matching the request, authenticating with `api_key`
    async fn fetch(&self, request: &SearchRequest, api_key: &str) -> Result<Vec<ListingRecord>>;

    /// Get the name of the provider
    fn source_name(&self) -> &'static str;
}
