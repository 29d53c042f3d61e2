use std::time::Duration;

/// Host of the Idealista listings API on RapidAPI
pub const PROVIDER_HOST: &str = "idealista2.p.rapidapi.com";
pub const PROPERTIES_PATH: &str = "/properties";

pub const KEY_HEADER: &str = "X-RapidAPI-Key";
pub const HOST_HEADER: &str = "X-RapidAPI-Host";

pub const MAX_ITEMS: u32 = 10;

/// Fallback image when a listing has no photos
pub const PLACEHOLDER_IMAGE: &str = "https://images.unsplash.com/photo-1564419320461-6870880221ad?ixlib=rb-4.0.3&auto=format&fit=crop&w=1170&q=80";
pub const SECONDARY_IMAGE: &str = "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?ixlib=rb-4.0.3&auto=format&fit=crop&w=1170&q=80";

pub const COMMERCIAL_PROPERTY_TYPE: &str = "Locale commerciale";

/// Connection settings for the remote listings provider
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    /// Scheme and host the requests go to. The `X-RapidAPI-Host` header is
    /// always [`PROVIDER_HOST`] regardless of this value.
    pub base_url: String,
    /// Request timeout; `None` keeps the client default
    pub timeout: Option<Duration>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: format!("https://{}", PROVIDER_HOST),
            timeout: None,
        }
    }
}
