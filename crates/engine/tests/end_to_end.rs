//! End-to-end scenarios through the invocation facade.

use approx::assert_relative_eq;
use serde_json::json;

use osrmc_core::request::{self, MatchRequest, NearestRequest, RouteRequest, TableRequest};
use osrmc_core::{Coordinate, EngineConfig, Error, Osrm, TableKind, TableParameters};
use osrmc_engine::CrowFly;

fn osrm() -> Osrm {
    Osrm::new(CrowFly::new(&EngineConfig::shared_memory()).unwrap())
}

#[test]
fn test_route_between_two_berlin_points() {
    let params = request::build::<RouteRequest>(json!({
        "coordinates": [[13.388, 52.517], [13.385, 52.520]]
    }))
    .unwrap();
    let response = osrm().route(&params).unwrap();

    let distance = response.distance().unwrap();
    let duration = response.duration().unwrap();
    assert!(distance.is_finite() && distance >= 0.0);
    assert!(duration.is_finite() && duration >= 0.0);

    let waypoints = response.waypoints().unwrap();
    assert_eq!(waypoints.len(), 2);
    assert_eq!(waypoints[0].location, Coordinate::new(13.388, 52.517));
}

#[test]
fn test_table_without_distance_annotation() {
    let mut params = TableParameters::new();
    params.base.add_coordinate(Coordinate::new(13.388, 52.517));
    params.base.add_coordinate(Coordinate::new(13.385, 52.520));
    params.add_source(0);
    params.add_destination(1);

    let table = osrm().table(&params).unwrap();
    assert_eq!(table.distance(0, 0), Err(Error::NoTable(TableKind::Distances)));
    let duration = table.duration(0, 0).unwrap();
    assert!(duration.is_finite() && duration > 0.0);
}

#[test]
fn test_table_matrix_is_symmetric() {
    let params = request::build::<TableRequest>(json!({
        "coordinates": [[0.0, 0.0], [0.05, 0.0], [0.1, 0.05]],
        "annotations": ["duration", "distance"]
    }))
    .unwrap();
    let table = osrm().table(&params).unwrap();

    for from in 0..3 {
        assert_eq!(table.distance(from, from).unwrap(), 0.0);
        for to in 0..3 {
            assert_relative_eq!(
                table.distance(from, to).unwrap(),
                table.distance(to, from).unwrap()
            );
        }
    }
    assert_eq!(table.sources().unwrap().len(), 3);
}

#[test]
fn test_route_request_with_options() {
    let params = request::build::<RouteRequest>(json!({
        "coordinates": [[13.388, 52.517], [13.385, 52.520], [13.380, 52.521]],
        "steps": true,
        "annotations": true,
        "geometries": "geojson",
        "generate_hints": false
    }))
    .unwrap();
    let response = osrm().route(&params).unwrap();
    let host = response.to_host();

    let route = &host["routes"][0];
    assert_eq!(route["geometry"]["type"], "LineString");
    assert_eq!(route["legs"].as_array().unwrap().len(), 2);
    assert_eq!(route["legs"][0]["steps"].as_array().unwrap().len(), 2);
    assert!(route["legs"][0]["annotation"]["nodes"].is_array());
    assert!(host["waypoints"][0].get("hint").is_none());
}

#[test]
fn test_hints_round_trip_through_requests() {
    let first = request::build::<NearestRequest>(json!({
        "coordinates": [[13.388, 52.517]]
    }))
    .unwrap();
    let nearest = osrm().nearest(&first).unwrap().to_host();
    let hint = nearest["waypoints"][0]["hint"].as_str().unwrap().to_string();

    let params = request::build::<RouteRequest>(json!({
        "coordinates": [[13.0, 52.0], [13.385, 52.520]],
        "hints": [hint, null]
    }))
    .unwrap();
    let waypoints = osrm().route(&params).unwrap().waypoints().unwrap();
    assert_eq!(waypoints[0].location, Coordinate::new(13.388, 52.517));
}

#[test]
fn test_engine_rejections_surface_as_errors() {
    let params = request::build::<RouteRequest>(json!({
        "coordinates": [[13.388, 52.517], [13.385, 95.0]]
    }))
    .unwrap();
    let err = osrm().route(&params).unwrap_err();
    assert_eq!(err.code(), "InvalidValue");
    assert!(err.message().contains("index 1"));
}

#[test]
fn test_match_trace() {
    let params = request::build::<MatchRequest>(json!({
        "coordinates": [[13.388, 52.517], [13.386, 52.518], [13.385, 52.520]],
        "timestamps": [0, 10, 25]
    }))
    .unwrap();
    let response = osrm().match_trace(&params).unwrap();

    assert_eq!(response.matchings_count().unwrap(), 1);
    assert_relative_eq!(response.duration().unwrap(), 25.0);
    assert_relative_eq!(response.confidence().unwrap(), 1.0);
}

#[test]
fn test_file_storage_requires_existing_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::with_base_path(dir.path());
    assert!(CrowFly::new(&config).is_ok());

    let missing = EngineConfig::with_base_path(dir.path().join("missing.osrm"));
    let err = CrowFly::new(&missing).unwrap_err();
    assert!(matches!(err, Error::Construction(_)));
}
