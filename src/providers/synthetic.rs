use crate::models::{ListingRecord, Location, SearchRequest, Source};
use crate::providers::types::{COMMERCIAL_PROPERTY_TYPE, PLACEHOLDER_IMAGE, SECONDARY_IMAGE};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tracing::info;

const LISTING_COUNT: u32 = 3;
const CENTER: (f64, f64) = (45.4642, 9.1900);
const JITTER: f64 = 0.05;
const DEFAULT_FEATURES: [&str; 4] = ["Vetrina su strada", "Aria condizionata", "Bagno", "Deposito"];

/// Source of listing ids for generated data
pub trait IdGenerator: Send + Sync {
    fn next_id(&self, index: u32) -> String;
}

/// `mock_{index}_{unix millis}`: unique within one call, not across calls
pub struct TimestampIds;

impl IdGenerator for TimestampIds {
    fn next_id(&self, index: u32) -> String {
        format!("mock_{}_{}", index, Utc::now().timestamp_millis())
    }
}

/// Local demo data used when no credential is set or the provider fails
pub struct SyntheticGenerator {
    ids: Box<dyn IdGenerator>,
    rng: Mutex<StdRng>,
}

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self {
            ids: Box::new(TimestampIds),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Make coordinate jitter reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Generate the three demo listings for a request
    pub fn generate(&self, request: &SearchRequest) -> Vec<ListingRecord> {
        let location = request.location();
        let base = base_price(location);

        info!("📋 Generating demo listings for '{}' (base price {})", location, base);

        // A poisoned lock only means another generate() panicked mid-jitter
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        (1..=LISTING_COUNT)
            .map(|i| {
                let step = f64::from(i);
                ListingRecord {
                    id: self.ids.next_id(i),
                    title: format!("Locale Commerciale {} {}", location, i),
                    address: format!("Via Esempio {}, {}", i * 10, location),
                    price: base + step * 200.0,
                    surface: request.min_surface().max(70.0 + step * 15.0),
                    description: format!(
                        "Ottima opportunità nel centro di {}. Locale commerciale ideale per {}.",
                        location,
                        request.property_type()
                    ),
                    images: vec![PLACEHOLDER_IMAGE.to_string(), SECONDARY_IMAGE.to_string()],
                    property_type: COMMERCIAL_PROPERTY_TYPE.to_string(),
                    url: String::new(),
                    source: Source::DemoData,
                    location: Location {
                        latitude: CENTER.0 + rng.gen_range(-JITTER..JITTER),
                        longitude: CENTER.1 + rng.gen_range(-JITTER..JITTER),
                        city: location.to_string(),
                        region: "Italia".to_string(),
                    },
                    features: DEFAULT_FEATURES.iter().map(|f| f.to_string()).collect(),
                    fetched_at: Utc::now(),
                }
            })
            .collect()
    }
}

impl Default for SyntheticGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Monthly base rent for a location, by case-insensitive city match
pub fn base_price(location: &str) -> f64 {
    let location = location.to_lowercase();
    if location.contains("milano") {
        3000.0
    } else if location.contains("roma") {
        2800.0
    } else {
        2000.0
    }
}
