use crate::domain::model::{Coordinates, DoctorSearch};
use crate::domain::ports::{GeocodeProvider, PlacesProvider};
use crate::utils::error::Result;
use crate::utils::validation;

/// The locator flow: postal code or caller IP -> coordinates -> nearby
/// search. An unresolvable location ends the flow with `None`; it is
/// reported to the user but never retried.
pub struct DoctorLocator<G, P> {
    geocode: G,
    places: P,
    radius_m: u32,
    category: String,
}

impl<G: GeocodeProvider, P: PlacesProvider> DoctorLocator<G, P> {
    pub fn new(geocode: G, places: P, radius_m: u32, category: String) -> Self {
        Self {
            geocode,
            places,
            radius_m,
            category,
        }
    }

    pub async fn find_by_postal_code(&self, postal_code: &str) -> Result<Option<DoctorSearch>> {
        validation::validate_postal_code("postal_code", postal_code)?;

        tracing::info!("Resolving postal code '{}'...", postal_code);
        match self.geocode.locate_postal_code(postal_code).await? {
            Some(center) => self.search(center).await.map(Some),
            None => {
                tracing::error!("❌ Could not resolve postal code '{}'", postal_code);
                Ok(None)
            }
        }
    }

    pub async fn find_by_caller_ip(&self) -> Result<Option<DoctorSearch>> {
        tracing::info!("Resolving location from caller IP...");
        match self.geocode.locate_caller().await? {
            Some(center) => self.search(center).await.map(Some),
            None => {
                tracing::error!("❌ Could not resolve a location from the caller IP");
                Ok(None)
            }
        }
    }

    async fn search(&self, center: Coordinates) -> Result<DoctorSearch> {
        tracing::info!(
            "Searching for '{}' within {}m of {:.4},{:.4}",
            self.category,
            self.radius_m,
            center.lat,
            center.lng
        );
        let listings = self
            .places
            .search_nearby(center, self.radius_m, &self.category)
            .await?;

        if listings.is_empty() {
            tracing::warn!("No listings found near {:.4},{:.4}", center.lat, center.lng);
        } else {
            tracing::info!("Found {} listings", listings.len());
        }

        Ok(DoctorSearch { center, listings })
    }
}
