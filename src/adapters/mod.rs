// Adapters layer: reqwest-backed clients for the external services, one per
// domain port. Endpoints and keys are injected from the services config.

pub mod geocode;
pub mod ocr;
pub mod places;
pub mod reasoning;

pub use geocode::HttpGeocodeClient;
pub use ocr::HttpOcrClient;
pub use places::HttpPlacesClient;
pub use reasoning::HttpCompletionClient;
