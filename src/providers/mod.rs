pub mod idealista;
pub mod synthetic;
pub mod traits;
pub mod types;

pub use idealista::IdealistaProvider;
pub use synthetic::{IdGenerator, SyntheticGenerator, TimestampIds};
pub use traits::ListingProvider;
pub use types::ProviderSettings;
