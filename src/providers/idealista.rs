use crate::models::{ListingRecord, Location, SearchRequest, Source};
use crate::providers::traits::ListingProvider;
use crate::providers::types::{
    ProviderSettings, COMMERCIAL_PROPERTY_TYPE, HOST_HEADER, KEY_HEADER, MAX_ITEMS,
    PLACEHOLDER_IMAGE, PROPERTIES_PATH, PROVIDER_HOST,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

const DEFAULT_TITLE: &str = "Locale Commerciale";
const DEFAULT_DESCRIPTION: &str = "Ottima opportunità commerciale";
const DEFAULT_FEATURES: [&str; 2] = ["Buona posizione", "Spazi funzionali"];

/// Idealista (via RapidAPI) commercial rentals client
pub struct IdealistaProvider {
    client: Client,
    base_url: String,
}

impl IdealistaProvider {
    /// Create a provider pointed at the public RapidAPI host
    pub fn new() -> Result<Self> {
        Self::with_settings(ProviderSettings::default())
    }

    /// Create a provider with custom connection settings
    pub fn with_settings(settings: ProviderSettings) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, PROPERTIES_PATH)
    }
}

#[async_trait]
impl ListingProvider for IdealistaProvider {
    async fn fetch(&self, request: &SearchRequest, api_key: &str) -> Result<Vec<ListingRecord>> {
        let url = self.endpoint();
        let query = ListingQuery::from_request(request);

        debug!("Fetching URL: {} with {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header(KEY_HEADER, api_key)
            .header(HOST_HEADER, PROVIDER_HOST)
            .query(&query)
            .send()
            .await
            .context("Failed to reach Idealista")?;

        if !response.status().is_success() {
            warn!("Idealista returned status: {}", response.status());
            anyhow::bail!("Idealista request failed: {}", response.status());
        }

        let body = response.text().await.context("Failed to read response body")?;
        debug!("Downloaded {} bytes of listing data", body.len());

        let listings = parse_response(&body, request)?;
        info!("Idealista returned {} listings", listings.len());
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "Idealista"
    }
}

/// Query string sent to the properties endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingQuery<'a> {
    location_name: &'a str,
    max_price: String,
    min_size: String,
    max_size: String,
    property_type: &'static str,
    operation: &'static str,
    locale: &'static str,
    num_page: u32,
    max_items: u32,
}

impl<'a> ListingQuery<'a> {
    fn from_request(request: &'a SearchRequest) -> Self {
        Self {
            location_name: request.location(),
            max_price: format_number(request.max_price()),
            min_size: format_number(request.min_surface()),
            max_size: format_number(request.max_surface()),
            property_type: "commercial",
            operation: "rent",
            locale: "it",
            num_page: 1,
            max_items: MAX_ITEMS,
        }
    }
}

/// Whole numbers go out without a trailing `.0`
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    element_list: Option<Vec<RemoteElement>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteElement {
    property_code: Option<Value>,
    address: Option<String>,
    municipality: Option<String>,
    price: Option<f64>,
    size: Option<f64>,
    description: Option<String>,
    multimedia: Option<Multimedia>,
    url: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    province: Option<String>,
    has_air_conditioning: Option<bool>,
    has_parking: Option<bool>,
    has_lift: Option<bool>,
    has_swimming_pool: Option<bool>,
    has_terrace: Option<bool>,
    has_garden: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct Multimedia {
    #[serde(default)]
    images: Vec<RemoteImage>,
}

#[derive(Debug, Deserialize)]
struct RemoteImage {
    url: Option<String>,
}

/// Decode a provider payload. A body without `elementList` is an error.
pub(crate) fn parse_response(body: &str, request: &SearchRequest) -> Result<Vec<ListingRecord>> {
    let response: SearchResponse =
        serde_json::from_str(body).context("Failed to decode Idealista response")?;

    let elements = response
        .element_list
        .context("Idealista response has no elementList")?;

    Ok(elements
        .into_iter()
        .map(|element| map_element(element, request))
        .collect())
}

fn map_element(element: RemoteElement, request: &SearchRequest) -> ListingRecord {
    let features = extract_features(&element);

    let id = match element.property_code {
        Some(Value::String(code)) if !code.is_empty() => code,
        Some(Value::Number(code)) => code.to_string(),
        _ => format!("idealista_{:016x}", rand::random::<u64>()),
    };

    let address = [element.address.as_deref(), element.municipality.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    let mut images: Vec<String> = element
        .multimedia
        .map(|m| m.images.into_iter().filter_map(|img| img.url).collect())
        .unwrap_or_default();
    if images.is_empty() {
        images.push(PLACEHOLDER_IMAGE.to_string());
    }

    ListingRecord {
        id,
        title: element
            .address
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        address,
        price: element.price.unwrap_or(0.0),
        surface: element.size.unwrap_or(0.0),
        description: element
            .description
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        images,
        property_type: COMMERCIAL_PROPERTY_TYPE.to_string(),
        url: element.url.unwrap_or_default(),
        source: Source::Idealista,
        location: Location {
            latitude: element.latitude.unwrap_or(0.0),
            longitude: element.longitude.unwrap_or(0.0),
            city: element
                .municipality
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| request.location().to_string()),
            region: element.province.unwrap_or_default(),
        },
        features,
        fetched_at: Utc::now(),
    }
}

fn extract_features(element: &RemoteElement) -> Vec<String> {
    let amenities = [
        (element.has_air_conditioning, "Aria condizionata"),
        (element.has_parking, "Parcheggio"),
        (element.has_lift, "Ascensore"),
        (element.has_swimming_pool, "Piscina"),
        (element.has_terrace, "Terrazza"),
        (element.has_garden, "Giardino"),
    ];

    let features: Vec<String> = amenities
        .iter()
        .filter(|(flag, _)| flag.unwrap_or(false))
        .map(|(_, name)| name.to_string())
        .collect();

    if features.is_empty() {
        DEFAULT_FEATURES.iter().map(|f| f.to_string()).collect()
    } else {
        features
    }
}
