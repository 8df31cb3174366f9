use crate::domain::model::Coordinates;
use crate::domain::ports::GeocodeProvider;
use crate::utils::error::{Result, RxError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Coordinate resolution, two ways: a geocoding endpoint for postal codes
/// and an IP-location endpoint that works off the caller's address.
pub struct HttpGeocodeClient {
    client: Client,
    geocode_endpoint: String,
    api_key: String,
    ip_endpoint: String,
}

impl HttpGeocodeClient {
    pub fn new(geocode_endpoint: String, api_key: String, ip_endpoint: String) -> Self {
        Self {
            client: Client::new(),
            geocode_endpoint,
            api_key,
            ip_endpoint,
        }
    }
}

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
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

#[derive(Deserialize)]
struct IpLocationResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

#[async_trait]
impl GeocodeProvider for HttpGeocodeClient {
    async fn locate_postal_code(&self, postal_code: &str) -> Result<Option<Coordinates>> {
        tracing::debug!("Geocoding postal code: {}", postal_code);
        let response = self
            .client
            .get(&self.geocode_endpoint)
            .query(&[("address", postal_code), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RxError::service(
                "geocoding",
                format!("HTTP {} from geocoding endpoint", status),
            ));
        }

        let parsed: GeocodeResponse = response.json().await?;
        match parsed.status.as_str() {
            "OK" => Ok(parsed
                .results
                .into_iter()
                .next()
                .map(|r| Coordinates::new(r.geometry.location.lat, r.geometry.location.lng))),
            "ZERO_RESULTS" => Ok(None),
            other => Err(RxError::service(
                "geocoding",
                format!("geocoding request rejected with status {}", other),
            )),
        }
    }

    async fn locate_caller(&self) -> Result<Option<Coordinates>> {
        tracing::debug!("Resolving caller location from IP");
        let response = self.client.get(&self.ip_endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RxError::service(
                "ip-location",
                format!("HTTP {} from IP-location endpoint", status),
            ));
        }

        let parsed: IpLocationResponse = response.json().await?;
        if parsed.status == "success" {
            Ok(Some(Coordinates::new(parsed.lat, parsed.lon)))
        } else {
            Ok(None)
        }
    }
}
