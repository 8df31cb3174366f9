use crate::domain::model::{Coordinates, DoctorListing};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Text detection over image bytes. `Ok(None)` means the service answered
/// but found no text; an error from the service itself is `Err`.
#[async_trait]
pub trait OcrProvider: Send + Sync {
    async fn detect_text(&self, png: &[u8]) -> Result<Option<String>>;
}

/// Natural-language assessment of a prompt. The response is displayed
/// verbatim; no filtering happens on either side of this call.
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    async fn assess(&self, prompt: &str) -> Result<String>;
}

/// Postal-code and caller-IP resolution to coordinates. `Ok(None)` means
/// the service answered but could not resolve the input.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    async fn locate_postal_code(&self, postal_code: &str) -> Result<Option<Coordinates>>;
    async fn locate_caller(&self) -> Result<Option<Coordinates>>;
}

#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn search_nearby(
        &self,
        center: Coordinates,
        radius_m: u32,
        category: &str,
    ) -> Result<Vec<DoctorListing>>;
}
