use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;
use odp_zurich::{DisabledParking, SpotId, ZurichError};
use std::collections::{HashMap, HashSet};

use mock_server_utils::{load_fixture, setup_client, spawn_server, GEOJSON};

const PATH: &str = "/wfs/geoportal/Behindertenparkplaetze";

fn geojson_route(body: String) -> Router {
    Router::new().route(
        PATH,
        get(move || async move { ([(header::CONTENT_TYPE, GEOJSON)], body) }),
    )
}

#[tokio::test]
async fn test_disabled_parkings() {
    let addr = spawn_server(geojson_route(load_fixture("disabled_parkings.json"))).await;
    let client = setup_client(addr);

    let spaces: Vec<DisabledParking> = client.disabled_parkings().await.unwrap();
    assert_eq!(spaces.len(), 5);

    let fixture: serde_json::Value =
        serde_json::from_str(&load_fixture("disabled_parkings.json")).unwrap();
    let features = fixture["features"].as_array().unwrap();
    for (spot, feature) in spaces.iter().zip(features) {
        let coordinates = &feature["geometry"]["coordinates"];
        assert_eq!(spot.longitude(), coordinates[0].as_f64().unwrap());
        assert_eq!(spot.latitude(), coordinates[1].as_f64().unwrap());
    }

    // Server order is kept.
    assert_eq!(spaces[0].spot_id(), &SpotId::Text("1".to_string()));
    assert_eq!(spaces[4].spot_id(), &SpotId::Text("5".to_string()));
    assert_eq!(spaces[4].longitude(), 8.0);
}

#[tokio::test]
async fn test_duplicates_are_kept() {
    let addr = spawn_server(geojson_route(load_fixture("disabled_parkings.json"))).await;
    let client = setup_client(addr);

    let spaces = client.disabled_parkings().await.unwrap();
    let unique: HashSet<&SpotId> = spaces.iter().map(DisabledParking::spot_id).collect();
    assert_eq!(spaces.len(), 5);
    assert_eq!(unique.len(), 4);
}

#[tokio::test]
async fn test_disabled_parkings_query() {
    let body = load_fixture("disabled_parkings.json");
    let app = Router::new().route(
        PATH,
        get(move |Query(params): Query<HashMap<String, String>>| async move {
            let expected = [
                ("service", "WFS"),
                ("request", "GetFeature"),
                ("outputFormat", "GeoJSON"),
                ("typename", "behindertenparkplaetze_dav_p"),
            ];
            let ok = params.len() == expected.len()
                && expected
                    .iter()
                    .all(|(k, v)| params.get(*k).map(String::as_str) == Some(*v));
            let status = if ok { StatusCode::OK } else { StatusCode::BAD_REQUEST };
            (status, [(header::CONTENT_TYPE, GEOJSON)], body)
        }),
    );
    let addr = spawn_server(app).await;
    let client = setup_client(addr);

    let result = client.disabled_parkings().await;
    assert!(result.is_ok(), "Query parameters did not match: {:?}", result.err());
}

#[tokio::test]
async fn test_empty_collection() {
    let body = r#"{"type": "FeatureCollection", "features": []}"#.to_string();
    let addr = spawn_server(geojson_route(body)).await;
    let client = setup_client(addr);

    let spaces = client.disabled_parkings().await.unwrap();
    assert!(spaces.is_empty());
}

#[tokio::test]
async fn test_malformed_feature() {
    let body = r#"{"features": [{"properties": {"id": 1}, "geometry": {"coordinates": [8.5]}}]}"#
        .to_string();
    let addr = spawn_server(geojson_route(body)).await;
    let client = setup_client(addr);

    let err = client.disabled_parkings().await.unwrap_err();
    assert!(matches!(err, ZurichError::JsonError(_)), "Unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_missing_features_member() {
    let addr = spawn_server(geojson_route(r#"{"type": "FeatureCollection"}"#.to_string())).await;
    let client = setup_client(addr);

    let err = client.disabled_parkings().await.unwrap_err();
    assert!(matches!(err, ZurichError::JsonError(_)));
}

#[tokio::test]
async fn test_disabled_parkings_wrong_content_type() {
    let app = Router::new().route(
        PATH,
        get(|| async { ([(header::CONTENT_TYPE, "application/json")], r#"{"features": []}"#) }),
    );
    let addr = spawn_server(app).await;
    let client = setup_client(addr);

    let err = client.disabled_parkings().await.unwrap_err();
    assert!(err.is_data());
    assert_eq!(err.content_type(), Some("application/json"));
}
