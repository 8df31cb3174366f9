use crate::domain::model::{Coordinates, DoctorListing};
use crate::domain::ports::PlacesProvider;
use crate::utils::error::{Result, RxError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Nearby-search client. Fields beyond name/address/rating/location are
/// dropped; no paging, one request per search.
pub struct HttpPlacesClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpPlacesClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[derive(Deserialize)]
struct NearbyResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Deserialize)]
struct PlaceResult {
    #[serde(default)]
    name: String,
    #[serde(default)]
    vicinity: String,
    rating: Option<f64>,
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[async_trait]
impl PlacesProvider for HttpPlacesClient {
    async fn search_nearby(
        &self,
        center: Coordinates,
        radius_m: u32,
        category: &str,
    ) -> Result<Vec<DoctorListing>> {
        tracing::debug!(
            "Nearby search at {},{} radius {}m category {}",
            center.lat,
            center.lng,
            radius_m,
            category
        );
        let location = format!("{},{}", center.lat, center.lng);
        let radius = radius_m.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", category),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RxError::service(
                "places",
                format!("HTTP {} from nearby-search endpoint", status),
            ));
        }

        let parsed: NearbyResponse = response.json().await?;
        match parsed.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(parsed
                .results
                .into_iter()
                .map(|p| DoctorListing {
                    name: p.name,
                    address: p.vicinity,
                    rating: p.rating,
                    location: Coordinates::new(p.geometry.location.lat, p.geometry.location.lng),
                })
                .collect()),
            other => Err(RxError::service(
                "places",
                format!("nearby search rejected with status {}", other),
            )),
        }
    }
}
