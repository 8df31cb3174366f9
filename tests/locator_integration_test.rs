use httpmock::prelude::*;
use rxlens::{DoctorLocator, HttpGeocodeClient, HttpPlacesClient};

fn locator_for(server: &MockServer) -> DoctorLocator<HttpGeocodeClient, HttpPlacesClient> {
    let geocode = HttpGeocodeClient::new(
        server.url("/geocode/json"),
        "maps-key".to_string(),
        server.url("/ip/json"),
    );
    let places = HttpPlacesClient::new(server.url("/place/nearbysearch/json"), "maps-key".to_string());
    DoctorLocator::new(geocode, places, 5000, "doctor".to_string())
}

#[tokio::test]
async fn test_postal_code_to_doctor_listings() {
    let server = MockServer::start();

    let geocode_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/geocode/json")
            .query_param("address", "110001");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "results": [{"geometry": {"location": {"lat": 28.6328, "lng": 77.2197}}}]
        }));
    });

    let places_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/place/nearbysearch/json")
            .query_param("type", "doctor");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "results": [
                {
                    "name": "City Clinic",
                    "vicinity": "12 Janpath Road",
                    "rating": 4.3,
                    "geometry": {"location": {"lat": 28.63, "lng": 77.22}}
                },
                {
                    "name": "Dr. Rao",
                    "vicinity": "4 Park Lane",
                    "geometry": {"location": {"lat": 28.64, "lng": 77.21}}
                }
            ]
        }));
    });

    let search = locator_for(&server)
        .find_by_postal_code("110001")
        .await
        .unwrap()
        .unwrap();

    geocode_mock.assert();
    places_mock.assert();

    assert!(search.center.is_finite());
    assert_eq!(search.listings.len(), 2);
    assert_eq!(search.listings[0].name, "City Clinic");
    assert_eq!(search.listings[0].rating, Some(4.3));
    assert!(search.listings.iter().all(|d| d.location.is_finite()));
}

#[tokio::test]
async fn test_invalid_postal_code_yields_no_result_and_no_search() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/geocode/json");
        then.status(200)
            .json_body(serde_json::json!({"status": "ZERO_RESULTS", "results": []}));
    });

    let places_mock = server.mock(|when, then| {
        when.method(GET).path("/place/nearbysearch/json");
        then.status(200)
            .json_body(serde_json::json!({"status": "OK", "results": []}));
    });

    let search = locator_for(&server).find_by_postal_code("99999").await.unwrap();

    assert!(search.is_none());
    places_mock.assert_hits(0);
}

#[tokio::test]
async fn test_geocode_http_failure_surfaces_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/geocode/json");
        then.status(503);
    });

    let err = locator_for(&server)
        .find_by_postal_code("110001")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        rxlens::RxError::ServiceError { ref service, .. } if service == "geocoding"
    ));
}

#[tokio::test]
async fn test_caller_ip_flow() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/ip/json");
        then.status(200).json_body(
            serde_json::json!({"status": "success", "lat": 52.52, "lon": 13.405}),
        );
    });

    server.mock(|when, then| {
        when.method(GET).path("/place/nearbysearch/json");
        then.status(200).json_body(serde_json::json!({
            "status": "OK",
            "results": [{
                "name": "Praxis Meyer",
                "vicinity": "Unter den Linden 5",
                "rating": 4.8,
                "geometry": {"location": {"lat": 52.517, "lng": 13.389}}
            }]
        }));
    });

    let search = locator_for(&server)
        .find_by_caller_ip()
        .await
        .unwrap()
        .unwrap();

    assert_eq!(search.listings.len(), 1);
    assert_eq!(search.listings[0].name, "Praxis Meyer");
}
