use crate::credentials::{CredentialStore, KeyValueStore};
use crate::models::{ListingRecord, ScoredListing, SearchRequest};
use crate::providers::{ListingProvider, SyntheticGenerator};
use crate::ranking::rank_listings;
use anyhow::Result;
use tracing::{debug, info, warn};

/// Listing gateway: live provider when a key is configured, demo data otherwise
pub struct PropertyService {
    credentials: CredentialStore,
    provider: Box<dyn ListingProvider>,
    synthetic: SyntheticGenerator,
}

impl PropertyService {
    pub fn new(store: impl KeyValueStore + 'static, provider: impl ListingProvider + 'static) -> Self {
        Self {
            credentials: CredentialStore::new(store),
            provider: Box::new(provider),
            synthetic: SyntheticGenerator::new(),
        }
    }

    /// Replace the demo data generator (seeded jitter, fixed ids)
    pub fn with_synthetic(mut self, synthetic: SyntheticGenerator) -> Self {
        self.synthetic = synthetic;
        self
    }

    /// Listings for a request. Provider failures fall back to demo data.
    pub async fn search_properties(&self, request: &SearchRequest) -> Vec<ListingRecord> {
        debug!("Searching properties with {:?}", request);

        let Some(api_key) = self.credentials.get() else {
            info!("No API key configured, using demo data");
            return self.synthetic.generate(request);
        };

        match self.provider.fetch(request, &api_key).await {
            Ok(listings) if listings.is_empty() => {
                info!(
                    "{} found no listings for '{}', using demo data",
                    self.provider.source_name(),
                    request.location()
                );
                self.synthetic.generate(request)
            }
            Ok(listings) => {
                info!(
                    "✅ {} listings from {}",
                    listings.len(),
                    self.provider.source_name()
                );
                listings
            }
            Err(err) => {
                warn!(
                    "{} unavailable, using demo data: {:#}",
                    self.provider.source_name(),
                    err
                );
                self.synthetic.generate(request)
            }
        }
    }

    /// Search, then clamp and score every listing, best first
    pub async fn search_ranked(&self, request: &SearchRequest) -> Vec<ScoredListing> {
        let listings = self.search_properties(request).await;
        rank_listings(listings, request)
    }

    pub fn set_credential(&self, key: &str) -> Result<()> {
        self.credentials.set(key)
    }

    pub fn get_credential(&self) -> Option<String> {
        self.credentials.get()
    }

    pub fn clear_credential(&self) -> Result<()> {
        self.credentials.clear()
    }
}
